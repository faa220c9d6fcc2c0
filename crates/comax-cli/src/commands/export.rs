use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use comax_db::repos::resources::ResourceScope;
use comax_grid::{SearchFilters, aggregate, filter_rows};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ExportArgs, ExportKind};
use crate::commands::shared::parse::parse_culture;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportResponse {
    file: String,
    kind: &'static str,
    written: usize,
}

const fn kind_name(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Grid => "grid",
        ExportKind::Records => "records",
        ExportKind::RecordsJson => "records-json",
        ExportKind::Localization => "localization",
    }
}

/// Handle `comax export FILE`.
pub async fn handle(
    args: &ExportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scope = ResourceScope {
        resource_types: args.resource_types.clone(),
        cultures: Vec::new(),
    };

    // Resolve everything that can fail before creating the file.
    let localization_target = match args.kind {
        ExportKind::Localization => {
            let [resource_type] = args.resource_types.as_slice() else {
                anyhow::bail!("localization export needs exactly one --type");
            };
            let culture = args
                .culture
                .as_deref()
                .context("localization export needs --culture")?;
            Some((resource_type.clone(), parse_culture(culture)?))
        }
        _ => None,
    };

    let file = File::create(&args.file).with_context(|| format!("failed to create {}", args.file))?;
    let writer = BufWriter::new(file);

    let written = match (args.kind, localization_target) {
        (ExportKind::Localization, Some((resource_type, culture))) => {
            let entries = ctx.service.localization_map(&resource_type, culture).await?;
            comax_io::write_localization_json(writer, &entries)?
        }
        (ExportKind::Grid, _) => {
            let records = ctx.service.fetch_all_resources(&scope).await?;
            let rows = aggregate(&records).rows;
            let filters = SearchFilters {
                only_empty_values: args.missing,
                ..SearchFilters::default()
            };
            let rows = filter_rows(&rows, &filters);
            comax_io::write_grid_csv(writer, &rows, &ctx.config.grid.cultures)?
        }
        (ExportKind::Records, _) => {
            let records = ctx.service.fetch_all_resources(&scope).await?;
            comax_io::write_records_csv(writer, &records)?
        }
        (ExportKind::RecordsJson, _) => {
            let records = ctx.service.fetch_all_resources(&scope).await?;
            comax_io::write_records_json(writer, &records)?
        }
        (ExportKind::Localization, None) => unreachable!("target resolved above"),
    };

    tracing::info!(file = %args.file, kind = kind_name(args.kind), written, "export complete");
    output(
        &ExportResponse {
            file: args.file.clone(),
            kind: kind_name(args.kind),
            written,
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use comax_core::entities::TranslationInput;
    use comax_core::enums::CultureCode;

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

    async fn seeded() -> AppContext {
        let ctx = AppContext::in_memory().await;
        for (culture, value) in [(CultureCode::HeIl, "שלום"), (CultureCode::EnUs, "")] {
            ctx.service
                .insert_resource(&TranslationInput::new("APP1", culture, "greet", value))
                .await
                .unwrap();
        }
        ctx
    }

    #[tokio::test]
    async fn grid_export_writes_one_column_per_culture() {
        let ctx = seeded().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.csv");
        let args = ExportArgs {
            file: path.display().to_string(),
            kind: ExportKind::Grid,
            resource_types: Vec::new(),
            culture: None,
            missing: true,
        };

        handle(&args, &ctx, &flags()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(r#""Resource Type","Resource Key","he-IL","en-US","ro-RO","th-TH""#)
        );
        assert_eq!(lines.next(), Some(r#""APP1","greet","שלום","","","""#));
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn localization_export_requires_one_type() {
        let ctx = seeded().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        let args = ExportArgs {
            file: path.display().to_string(),
            kind: ExportKind::Localization,
            resource_types: Vec::new(),
            culture: Some("he-IL".into()),
            missing: false,
        };

        let err = handle(&args, &ctx, &flags()).await.unwrap_err();
        assert!(err.to_string().contains("exactly one --type"));
        assert!(!path.exists());
    }
}
