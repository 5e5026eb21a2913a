//! Session commands - login, logout, whoami

use clap::Args;

use crate::domain::{BearerToken, ClientError, Identity};
use crate::infrastructure::session::GuardState;
use crate::ClientContext;

#[derive(Args)]
pub struct LoginArgs {
    /// Bearer token issued by the login flow
    #[arg(long)]
    pub token: String,
}

/// Store the token, then verify it the same way any protected view would.
/// A rejected token is cleared again by the guard before this returns.
pub async fn login(args: LoginArgs) -> anyhow::Result<()> {
    let ctx = super::setup();
    ctx.credentials.set(BearerToken::new(args.token));

    match ctx.session.activate().await {
        GuardState::Authorized(identity) => {
            println!("Logged in as {} ({})", identity.display_name, identity.handle);
            Ok(())
        }
        GuardState::RedirectToLogin => {
            Err(ClientError::unauthenticated("The provided token was rejected").into())
        }
    }
}

pub async fn logout() -> anyhow::Result<()> {
    let ctx = super::setup();
    ctx.credentials.clear();
    println!("Logged out");
    Ok(())
}

pub async fn whoami() -> anyhow::Result<()> {
    let ctx = super::setup();
    let identity = require_session(&ctx).await?;
    println!("{} ({})", identity.display_name, identity.handle);
    Ok(())
}

/// Gate for protected commands. A guard redirect surfaces as the login
/// prompt; the credential has already been cleared when it was rejected.
pub(crate) async fn require_session(ctx: &ClientContext) -> anyhow::Result<Identity> {
    match ctx.session.activate().await {
        GuardState::Authorized(identity) => Ok(identity),
        GuardState::RedirectToLogin => Err(ClientError::unauthenticated(
            "No active session - run 'roster-client login --token <token>'",
        )
        .into()),
    }
}
