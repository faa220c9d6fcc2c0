use comax_db::repos::audit::{AuditFilter, ROW_HISTORY_LIMIT};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `comax audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let fallback = if args.record.is_some() {
        ROW_HISTORY_LIMIT
    } else {
        ctx.config.general.audit_limit
    };

    let filter = AuditFilter {
        record_id: args.record.clone(),
        action: args
            .action
            .as_deref()
            .map(|raw| parse_enum(raw, "action"))
            .transpose()?,
        table: args
            .table
            .as_deref()
            .map(|raw| parse_enum(raw, "table"))
            .transpose()?,
        limit: Some(effective_limit(args.limit, flags.limit, fallback)),
    };

    let entries = ctx.service.query_audit(&filter).await?;
    output(&entries, flags.format)
}
