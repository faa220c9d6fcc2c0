use comax_core::entities::{Application, ApplicationField};
use comax_db::repos::applications::{ApplicationInput, FieldInput};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AppCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ApplicationDetailResponse {
    application: Application,
    fields: Vec<ApplicationField>,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: String,
}

/// Overlay optional CLI values on the stored application.
fn merge_application(
    current: &Application,
    code: Option<&str>,
    name: Option<&str>,
    description: Option<&str>,
) -> ApplicationInput {
    ApplicationInput {
        application_code: code.map_or_else(|| current.application_code.clone(), String::from),
        application_name: name.map_or_else(|| current.application_name.clone(), String::from),
        description: description
            .map(String::from)
            .or_else(|| current.description.clone()),
    }
}

/// Overlay optional CLI values on the stored field.
fn merge_field(
    current: &ApplicationField,
    key: Option<&str>,
    name: Option<&str>,
    description: Option<&str>,
    required: Option<bool>,
) -> FieldInput {
    FieldInput {
        field_key: key.map_or_else(|| current.field_key.clone(), String::from),
        field_name: name.map_or_else(|| current.field_name.clone(), String::from),
        description: description
            .map(String::from)
            .or_else(|| current.description.clone()),
        is_required: required.unwrap_or(current.is_required),
    }
}

/// Handle `comax app`.
pub async fn handle(action: &AppCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        AppCommands::Create {
            code,
            name,
            description,
        } => {
            let app = svc
                .create_application(&ApplicationInput {
                    application_code: code.clone(),
                    application_name: name.clone(),
                    description: description.clone(),
                })
                .await?;
            output(&app, flags.format)
        }
        AppCommands::List => output(&svc.list_applications().await?, flags.format),
        AppCommands::Get { app } => {
            let application = svc.resolve_application(app).await?;
            let fields = svc.list_fields(&application.id).await?;
            output(
                &ApplicationDetailResponse {
                    application,
                    fields,
                },
                flags.format,
            )
        }
        AppCommands::Update {
            app,
            code,
            name,
            description,
        } => {
            let current = svc.resolve_application(app).await?;
            let input = merge_application(
                &current,
                code.as_deref(),
                name.as_deref(),
                description.as_deref(),
            );
            output(&svc.update_application(&current.id, &input).await?, flags.format)
        }
        AppCommands::Delete { app } => {
            let current = svc.resolve_application(app).await?;
            svc.delete_application(&current.id).await?;
            output(
                &DeletedResponse {
                    deleted: current.id,
                },
                flags.format,
            )
        }
        AppCommands::FieldAdd {
            app,
            key,
            name,
            description,
            required,
        } => {
            let application = svc.resolve_application(app).await?;
            let field = svc
                .create_field(
                    &application.id,
                    &FieldInput {
                        field_key: key.clone(),
                        field_name: name.clone(),
                        description: description.clone(),
                        is_required: *required,
                    },
                )
                .await?;
            output(&field, flags.format)
        }
        AppCommands::Fields { app } => {
            let application = svc.resolve_application(app).await?;
            output(&svc.list_fields(&application.id).await?, flags.format)
        }
        AppCommands::FieldUpdate {
            id,
            key,
            name,
            description,
            required,
        } => {
            let current = svc.get_field(id).await?;
            let input = merge_field(
                &current,
                key.as_deref(),
                name.as_deref(),
                description.as_deref(),
                *required,
            );
            output(&svc.update_field(id, &input).await?, flags.format)
        }
        AppCommands::FieldDelete { id } => {
            svc.delete_field(id).await?;
            output(&DeletedResponse { deleted: id.clone() }, flags.format)
        }
        AppCommands::Sync { app } => {
            let application = svc.resolve_application(app).await?;
            output(&svc.sync_fields(&application.id).await?, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn stored_field() -> ApplicationField {
        ApplicationField {
            id: "fld-1".into(),
            application_id: "app-1".into(),
            field_key: "qty_label".into(),
            field_name: "Quantity".into(),
            description: Some("picked quantity".into()),
            is_required: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn field_merge_keeps_unset_values() {
        let input = merge_field(&stored_field(), None, Some("Qty"), None, None);
        assert_eq!(input.field_key, "qty_label");
        assert_eq!(input.field_name, "Qty");
        assert_eq!(input.description.as_deref(), Some("picked quantity"));
        assert!(input.is_required);
    }

    #[test]
    fn application_merge_overrides_given_values() {
        let current = Application {
            id: "app-1".into(),
            application_code: "APP1".into(),
            application_name: "Picking".into(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let input = merge_application(&current, Some("APP2"), None, Some("handhelds"));
        assert_eq!(input.application_code, "APP2");
        assert_eq!(input.application_name, "Picking");
        assert_eq!(input.description.as_deref(), Some("handhelds"));
    }
}
