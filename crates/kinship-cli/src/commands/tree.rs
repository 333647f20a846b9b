//! Tree command

use crate::AppContext;

pub fn run(ctx: &AppContext) -> anyhow::Result<()> {
    tracing::info!("Rendering {} persons", ctx.tree.len());
    println!("{}", ctx.tree.render());
    Ok(())
}
