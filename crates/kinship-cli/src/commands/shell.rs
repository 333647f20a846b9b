//! Interactive shell command

use std::io;

use crate::shell::Shell;
use crate::AppContext;

pub fn run(ctx: &mut AppContext) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut ctx.tree, stdin.lock(), stdout.lock(), ctx.format).run()
}
