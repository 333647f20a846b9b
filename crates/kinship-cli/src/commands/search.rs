//! Search command

use clap::Args;

use crate::output::{format_json, format_matches, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct SearchArgs {
    /// Name to look for; several words are joined with spaces
    #[arg(required = true)]
    pub name: Vec<String>,
}

pub fn run(args: &SearchArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let name = args.name.join(" ");
    let matches = ctx.tree.search(&name);
    tracing::info!("Search for '{}' returned {} results", name, matches.len());

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&matches)),
        OutputFormat::Text => println!("{}", format_matches(&matches)),
    }
    Ok(())
}
