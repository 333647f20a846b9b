//! Show command

use clap::Args;
use kinship_core::PersonId;

use crate::output::{format_ancestry, format_json, format_person, Ancestry, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct ShowArgs {
    /// Person id
    pub id: PersonId,

    /// Instead of details, report whether the person is an ancestor of this id
    #[arg(long, value_name = "ID")]
    pub ancestor_of: Option<PersonId>,
}

pub fn run(args: &ShowArgs, ctx: &AppContext) -> anyhow::Result<()> {
    if let Some(descendant) = args.ancestor_of {
        let ancestry = Ancestry::between(&ctx.tree, args.id, descendant)?;
        tracing::info!("Ancestry {} -> {}: {:?}", args.id, descendant, ancestry);
        match ctx.format {
            OutputFormat::Json => println!("{}", format_json(&ancestry)),
            OutputFormat::Text => println!("{}", format_ancestry(&ctx.tree, &ancestry)),
        }
        return Ok(());
    }

    let person = ctx.tree.get(args.id)?;
    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(person)),
        OutputFormat::Text => println!("{}", format_person(&ctx.tree, person)),
    }
    Ok(())
}
