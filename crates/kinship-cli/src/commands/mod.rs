//! CLI command implementations

pub mod completions;
pub mod config;
pub mod search;
pub mod shell;
pub mod show;
pub mod tree;
