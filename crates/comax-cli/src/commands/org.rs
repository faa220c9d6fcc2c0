use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeletedResponse<'a> {
    deleted: &'a str,
}

/// Handle `comax org`.
pub async fn handle(action: &OrgCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        OrgCommands::Create { number, name } => {
            let org = ctx.service.create_organization(number, name).await?;
            output(&org, flags.format)
        }
        OrgCommands::List => {
            let orgs = ctx.service.list_organizations().await?;
            output(&orgs, flags.format)
        }
        OrgCommands::Get { id } => {
            let org = ctx.service.get_organization(id).await?;
            output(&org, flags.format)
        }
        OrgCommands::Rename { id, name } => {
            let org = ctx.service.rename_organization(id, name).await?;
            output(&org, flags.format)
        }
        OrgCommands::Delete { id } => {
            ctx.service.delete_organization(id).await?;
            output(&DeletedResponse { deleted: id }, flags.format)
        }
    }
}
