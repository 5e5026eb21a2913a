//! Employee commands - directory search

use clap::{Args, Subcommand};

use crate::ClientContext;

#[derive(Subcommand)]
pub enum EmployeesCommand {
    /// Search the employee directory
    Search(SearchArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query, matched against handle and display name
    pub query: String,
}

pub async fn run(command: EmployeesCommand) -> anyhow::Result<()> {
    let ctx = super::setup();
    super::auth::require_session(&ctx).await?;

    match command {
        EmployeesCommand::Search(args) => search(&ctx, args).await,
    }
}

async fn search(ctx: &ClientContext, args: SearchArgs) -> anyhow::Result<()> {
    let candidates = ctx.search.search(&args.query).await?;
    if candidates.is_empty() {
        println!("No matches");
        return Ok(());
    }
    for candidate in candidates {
        println!("{:<26} {} ({})", candidate.id, candidate.handle, candidate.display_name);
    }
    Ok(())
}
