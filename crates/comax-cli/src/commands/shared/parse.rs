use comax_core::enums::CultureCode;
use serde::de::DeserializeOwned;

/// Parse an enum value using serde-deserialization.
///
/// Accepts the wire spelling, hyphens for underscores, and upper case, so
/// `create`, `CREATE`, and `localization-resources` all resolve.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let candidates = [normalized.clone(), normalized.to_ascii_uppercase()];
    candidates
        .iter()
        .find_map(|candidate| serde_json::from_value(serde_json::Value::String(candidate.clone())).ok())
        .ok_or_else(|| anyhow::anyhow!("invalid {field} '{raw}'"))
}

/// Parse one culture code from the catalogue.
pub fn parse_culture(raw: &str) -> anyhow::Result<CultureCode> {
    Ok(raw.parse::<CultureCode>()?)
}

/// Parse every culture code in `raw`, failing on the first unknown one.
pub fn parse_cultures(raw: &[String]) -> anyhow::Result<Vec<CultureCode>> {
    raw.iter().map(|code| parse_culture(code)).collect()
}

#[cfg(test)]
mod tests {
    use comax_core::enums::{AuditAction, AuditTable, CultureCode};

    use super::{parse_cultures, parse_enum};

    #[test]
    fn parses_lower_case_audit_action() {
        let action: AuditAction = parse_enum("import", "action").expect("action should parse");
        assert_eq!(action, AuditAction::Import);
    }

    #[test]
    fn parses_hyphenated_table() {
        let table: AuditTable =
            parse_enum("localization-resources", "table").expect("table should parse");
        assert_eq!(table, AuditTable::LocalizationResources);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<AuditAction>("rename", "action").expect_err("should fail");
        assert!(err.to_string().contains("invalid action 'rename'"));
    }

    #[test]
    fn parses_culture_lists() {
        let cultures = parse_cultures(&["he-IL".to_string(), "en-us".to_string()])
            .expect("cultures should parse");
        assert_eq!(cultures, vec![CultureCode::HeIl, CultureCode::EnUs]);
        assert!(parse_cultures(&["xx-XX".to_string()]).is_err());
    }
}
