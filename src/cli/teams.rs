//! Team commands - listing, roster display, creation and membership

use anyhow::bail;
use clap::{Args, Subcommand};

use crate::domain::{ClientError, EmployeeId, MemberId, TeamId};
use crate::infrastructure::http::ResourceClient;
use crate::infrastructure::roster::RosterState;
use crate::infrastructure::workflow::{
    AddMemberDialog, CreateTeamDialog, DialogPhase, SearchApplication,
};
use crate::ClientContext;

#[derive(Subcommand)]
pub enum TeamsCommand {
    /// List all teams visible to the session
    List,

    /// Show one team's roster
    Show(ShowArgs),

    /// Create a team, then re-list
    Create(CreateArgs),

    /// Add an employee to a team's roster
    AddMember(AddMemberArgs),

    /// Remove a member from a team's roster
    RemoveMember(RemoveMemberArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Team id
    pub id: String,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Team name
    pub name: String,
}

#[derive(Args)]
pub struct AddMemberArgs {
    /// Team id
    pub id: String,

    /// Employee id to add
    #[arg(long, conflicts_with = "search")]
    pub employee: Option<String>,

    /// Search the directory and add the single match
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct RemoveMemberArgs {
    /// Team id
    pub id: String,

    /// Member id to remove
    pub member: String,
}

pub async fn run(command: TeamsCommand) -> anyhow::Result<()> {
    let ctx = super::setup();
    super::auth::require_session(&ctx).await?;

    match command {
        TeamsCommand::List => list(&ctx).await,
        TeamsCommand::Show(args) => show(&ctx, args).await,
        TeamsCommand::Create(args) => create(&ctx, args).await,
        TeamsCommand::AddMember(args) => add_member(&ctx, args).await,
        TeamsCommand::RemoveMember(args) => remove_member(&ctx, args).await,
    }
}

async fn list(ctx: &ClientContext) -> anyhow::Result<()> {
    let teams = ctx.roster.list_teams().await?;
    if teams.is_empty() {
        println!("No teams");
        return Ok(());
    }
    for team in teams {
        println!("{:<26} {:<30} {} members", team.id, team.name, team.member_count);
    }
    Ok(())
}

async fn show(ctx: &ClientContext, args: ShowArgs) -> anyhow::Result<()> {
    let state = ctx.roster.open(TeamId::new(args.id)).await;
    render_roster(&state)
}

async fn create(ctx: &ClientContext, args: CreateArgs) -> anyhow::Result<()> {
    let dialog = CreateTeamDialog::new(ctx.roster.clone());
    dialog.set_name(&args.name);

    match dialog.submit().await {
        DialogPhase::Completed => {}
        DialogPhase::Failed(e) => return Err(e.into()),
        phase => bail!("Create did not settle: {:?}", phase),
    }

    println!("Created team \"{}\"", args.name.trim());
    // Re-list instead of displaying a locally synthesized row; the server's
    // representation is the one that counts.
    list(ctx).await
}

async fn add_member(ctx: &ClientContext, args: AddMemberArgs) -> anyhow::Result<()> {
    let team_id = TeamId::new(args.id);

    // Open the team view first; adding to a team you cannot view fails the
    // same way the view would.
    let state = ctx.roster.open(team_id.clone()).await;
    render_roster(&state)?;

    let dialog = AddMemberDialog::new(team_id, ctx.roster.clone(), ctx.search.clone());
    let employee_id = match (args.employee, args.search) {
        (Some(id), _) => EmployeeId::new(id),
        (None, Some(query)) => pick_candidate(&dialog, &query).await?,
        (None, None) => bail!("Pass --employee <id> or --search <query>"),
    };

    match dialog.add(&employee_id).await {
        DialogPhase::Completed => {
            println!("Member added");
            render_roster(&ctx.roster.state())
        }
        DialogPhase::Failed(e) => Err(e.into()),
        phase => bail!("Add did not settle: {:?}", phase),
    }
}

async fn remove_member(ctx: &ClientContext, args: RemoveMemberArgs) -> anyhow::Result<()> {
    let team_id = TeamId::new(args.id);

    let state = ctx.roster.open(team_id.clone()).await;
    render_roster(&state)?;

    ctx.roster
        .remove_member(&team_id, &MemberId::new(args.member))
        .await?;

    println!("Member removed");
    render_roster(&ctx.roster.state())
}

/// Resolve a search query to exactly one employee; anything else needs the
/// caller to disambiguate with an explicit id.
async fn pick_candidate<C: ResourceClient>(
    dialog: &AddMemberDialog<C>,
    query: &str,
) -> anyhow::Result<EmployeeId> {
    let application = dialog.run_search(query).await?;
    let candidates = match application {
        SearchApplication::Applied(candidates) => candidates,
        SearchApplication::Superseded => bail!("Search was superseded"),
    };

    match candidates.len() {
        0 => bail!("No employees match \"{}\"", query),
        1 => Ok(candidates[0].id.clone()),
        _ => {
            for candidate in &candidates {
                println!("{:<26} {} ({})", candidate.id, candidate.handle, candidate.display_name);
            }
            bail!(
                "Multiple employees match \"{}\" - pass --employee <id>",
                query
            )
        }
    }
}

fn render_roster(state: &RosterState) -> anyhow::Result<()> {
    match state {
        RosterState::Ready(detail) => {
            println!("team > {}", detail.name);
            for member in &detail.members {
                println!("  {:<26} {} ({})", member.id, member.handle, member.display_name);
            }
            Ok(())
        }
        RosterState::Denied(message) => Err(ClientError::forbidden(message.clone()).into()),
        RosterState::Failed(e) => Err(e.clone().into()),
        RosterState::Idle | RosterState::Loading => Ok(()),
    }
}
