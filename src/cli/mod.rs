//! CLI module for the roster client
//!
//! Subcommands mirror the protected views of the roster frontend:
//! - `login` / `logout` / `whoami`: session management
//! - `teams`: list, show, create, and roster membership changes
//! - `employees`: directory search
//!
//! Every data command activates the session guard before touching the
//! backend.

pub mod auth;
pub mod employees;
pub mod teams;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::ClientContext;

/// Roster client - teams, rosters and directory search
#[derive(Parser)]
#[command(name = "roster-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a bearer token obtained from the login flow and verify it
    Login(auth::LoginArgs),

    /// Clear the stored credential
    Logout,

    /// Show the identity behind the current session
    Whoami,

    /// Team and roster operations
    #[command(subcommand)]
    Teams(teams::TeamsCommand),

    /// Employee directory operations
    #[command(subcommand)]
    Employees(employees::EmployeesCommand),
}

/// Shared command preamble: environment, configuration, logging, and the
/// wired client context.
pub(crate) fn setup() -> ClientContext {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config);

    crate::create_client_context(&config)
}

fn init_logging(config: &AppConfig) {
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });
}
