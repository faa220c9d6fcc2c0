use std::path::Path;

use anyhow::Context;
use comax_core::responses::ImportSummary;
use comax_db::repos::resources::ResourceScope;
use comax_io::parse_file;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct ImportResponse {
    file: String,
    summary: ImportSummary,
    /// Rows that failed validation and never reached the store.
    rejected: Vec<String>,
    /// Rows in the refreshed scope, absent if the re-fetch failed.
    rows_after_import: Option<usize>,
}

/// Handle `comax import FILE`.
pub async fn handle(
    args: &ImportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let path = Path::new(&args.file);
    let parsed = parse_file(path, &ctx.config.import.allowed_cultures)
        .with_context(|| format!("failed to read {}", args.file))?;

    let total = parsed.total_rows();
    let (records, rejected) = if args.strict {
        (parsed.into_strict()?, Vec::new())
    } else {
        let rejected: Vec<String> = parsed.rejected.iter().map(ToString::to_string).collect();
        for reason in &rejected {
            tracing::warn!(file = %args.file, %reason, "skipping invalid import row");
        }
        (parsed.records, rejected)
    };
    tracing::info!(file = %args.file, total, valid = records.len(), "parsed import file");

    let scope = ResourceScope {
        resource_types: args.resource_types.clone(),
        cultures: Vec::new(),
    };
    let spinner = Progress::spinner(&format!("importing {} records", records.len()));
    let outcome = match ctx.service.import_batch(&records, &scope).await {
        Ok(outcome) => outcome,
        Err(error) => {
            spinner.finish_err("import failed");
            return Err(error.into());
        }
    };
    spinner.finish_clear();

    output(
        &ImportResponse {
            file: args.file.clone(),
            summary: outcome.summary,
            rejected,
            rows_after_import: outcome.refreshed.map(|agg| agg.rows.len()),
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use comax_core::enums::CultureCode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            limit: None,
            quiet: true,
            verbose: false,
            db: None,
        }
    }

    fn json_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        file.write_all(body.as_bytes()).expect("write import file");
        file
    }

    #[tokio::test]
    async fn reimporting_a_file_updates_instead_of_duplicating() {
        let ctx = AppContext::in_memory().await;
        let file = json_file(
            r#"[{"resourceType":"APP1","cultureCode":"en-US","resourceKey":"greet","resourceValue":"Hello"}]"#,
        );
        let args = ImportArgs {
            file: file.path().display().to_string(),
            strict: true,
            resource_types: Vec::new(),
        };

        handle(&args, &ctx, &flags()).await.expect("first import");
        handle(&args, &ctx, &flags()).await.expect("second import");

        let stored = ctx
            .service
            .fetch_all_resources(&ResourceScope::all())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].culture_code, CultureCode::EnUs);
        assert_eq!(stored[0].resource_value, "Hello");
    }

    #[tokio::test]
    async fn strict_import_refuses_disallowed_culture() {
        let ctx = AppContext::in_memory().await;
        let file = json_file(
            r#"[{"resourceType":"APP1","cultureCode":"ja-JP","resourceKey":"greet","resourceValue":"x"}]"#,
        );
        let args = ImportArgs {
            file: file.path().display().to_string(),
            strict: true,
            resource_types: Vec::new(),
        };

        assert!(handle(&args, &ctx, &flags()).await.is_err());
        let stored = ctx
            .service
            .fetch_all_resources(&ResourceScope::all())
            .await
            .unwrap();
        assert!(stored.is_empty());
    }
}
