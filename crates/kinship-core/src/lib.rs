//! Kinship Core - Family tree engine
//!
//! This crate provides the person records, the relationship validation
//! rules and the in-memory store for the Kinship genealogical record system.
//!
//! ```
//! use kinship_core::FamilyTree;
//!
//! let mut tree = FamilyTree::new();
//! let aegon = tree.register("Aegon").unwrap().id();
//! let rhaenys = tree.register("Rhaenys").unwrap().id();
//! tree.add_partner(aegon, rhaenys).unwrap();
//!
//! assert_eq!(tree.get(aegon).unwrap().partner(), Some(rhaenys));
//! ```

pub mod error;
pub mod person;
pub mod tree;
pub mod validation;
pub mod visitor;

pub use error::{Error, Operation, Result};
pub use person::{Person, PersonId};
pub use tree::FamilyTree;
pub use validation::{
    Attempt, IdError, PartnerGap, RelationKind, RelationshipError, RelationshipValidator,
    ValidationError, MAX_PARENTS,
};
pub use visitor::{RenderVisitor, SearchVisitor, TreeVisitor, EMPTY_FOREST};
