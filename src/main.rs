use clap::Parser;
use roster_client::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Login(args) => cli::auth::login(args).await,
        Command::Logout => cli::auth::logout().await,
        Command::Whoami => cli::auth::whoami().await,
        Command::Teams(command) => cli::teams::run(command).await,
        Command::Employees(command) => cli::employees::run(command).await,
    }
}
