//! Organization repository.

use comax_core::entities::Organization;
use comax_core::enums::{AuditAction, AuditTable};
use comax_core::ids::PREFIX_ORGANIZATION;

use crate::error::DatabaseError;
use crate::helpers::{map_unique_violation, now_text, parse_datetime, require_non_empty};
use crate::repos::audit::AuditDraft;
use crate::service::ComaxService;

const SELECT_COLS: &str = "id, organization_number, organization_name, created_at, updated_at";

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    Ok(Organization {
        id: row.get::<String>(0)?,
        organization_number: row.get::<String>(1)?,
        organization_name: row.get::<String>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl ComaxService {
    pub async fn create_organization(
        &self,
        number: &str,
        name: &str,
    ) -> Result<Organization, DatabaseError> {
        require_non_empty("organization_number", number)?;
        require_non_empty("organization_name", name)?;
        let id = self.db().generate_id(PREFIX_ORGANIZATION).await?;
        let (now, now_str) = now_text();
        self.db()
            .execute(
                "INSERT INTO organizations (id, organization_number, organization_name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), number, name, now_str.as_str(), now_str.as_str()],
            )
            .await
            .map_err(|e| map_unique_violation(e, || format!("organization number '{number}'")))?;

        self.record_audit(
            AuditDraft::new(
                AuditAction::Create,
                AuditTable::Organizations,
                format!("Created organization {number}"),
            )
            .with_record(id.as_str())
            .with_new(serde_json::json!({"organization_number": number, "organization_name": name})),
        )
        .await;

        Ok(Organization {
            id,
            organization_number: number.to_string(),
            organization_name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {SELECT_COLS} FROM organizations ORDER BY organization_number"),
                (),
            )
            .await?;
        let mut orgs = Vec::new();
        while let Some(row) = rows.next().await? {
            orgs.push(row_to_organization(&row)?);
        }
        Ok(orgs)
    }

    pub async fn get_organization(&self, id: &str) -> Result<Organization, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {SELECT_COLS} FROM organizations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "organization".into(),
            id: id.to_string(),
        })?;
        row_to_organization(&row)
    }

    pub async fn rename_organization(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Organization, DatabaseError> {
        require_non_empty("organization_name", name)?;
        let before = self.get_organization(id).await?;
        let (_, now_str) = now_text();
        self.db()
            .execute(
                "UPDATE organizations SET organization_name = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![name, now_str, id],
            )
            .await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Update,
                AuditTable::Organizations,
                format!("Renamed organization {}", before.organization_number),
            )
            .with_record(id)
            .with_old(serde_json::json!({"organization_name": before.organization_name}))
            .with_new(serde_json::json!({"organization_name": name})),
        )
        .await;
        self.get_organization(id).await
    }

    pub async fn delete_organization(&self, id: &str) -> Result<(), DatabaseError> {
        let before = self.get_organization(id).await?;
        self.db()
            .execute("DELETE FROM organizations WHERE id = ?1", [id])
            .await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Delete,
                AuditTable::Organizations,
                format!("Deleted organization {}", before.organization_number),
            )
            .with_record(id)
            .with_old(serde_json::json!({
                "organization_number": before.organization_number,
                "organization_name": before.organization_name,
            })),
        )
        .await;
        Ok(())
    }
}
