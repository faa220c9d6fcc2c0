//! CSV and JSON export.
//!
//! Every CSV field is quoted. The per-record layout uses the same headers the
//! importer accepts, so an exported file re-imports unchanged.

use std::io::Write;

use comax_core::entities::{LocalizationRow, TranslationRecord};
use comax_core::enums::CultureCode;
use comax_core::responses::LocalizationEntry;

use crate::error::IoError;

/// Header of the per-record layout. `Resource ID` is informational and
/// ignored on import.
pub const RECORD_HEADERS: [&str; 5] = [
    "Resource Type",
    "Culture Code",
    "Resource Key",
    "Resource Value",
    "Resource ID",
];

fn quoted_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer)
}

/// Write aggregated rows as a grid: type, key, then one column per culture.
///
/// A culture with no record for a row exports as an empty field.
///
/// # Errors
///
/// Returns `IoError::Csv` or `IoError::Io` if the writer fails.
pub fn write_grid_csv<W: Write>(
    writer: W,
    rows: &[LocalizationRow],
    cultures: &[CultureCode],
) -> Result<usize, IoError> {
    let mut wtr = quoted_writer(writer);

    let mut header = vec!["Resource Type".to_string(), "Resource Key".to_string()];
    header.extend(cultures.iter().map(ToString::to_string));
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = Vec::with_capacity(cultures.len() + 2);
        record.push(row.resource_type.as_str());
        record.push(row.resource_key.as_str());
        record.extend(cultures.iter().map(|c| row.value(*c).unwrap_or("")));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    tracing::debug!(rows = rows.len(), cultures = cultures.len(), "wrote grid CSV");
    Ok(rows.len())
}

/// Write stored records one per line.
///
/// # Errors
///
/// Returns `IoError::Csv` or `IoError::Io` if the writer fails.
pub fn write_records_csv<W: Write>(
    writer: W,
    records: &[TranslationRecord],
) -> Result<usize, IoError> {
    let mut wtr = quoted_writer(writer);
    wtr.write_record(RECORD_HEADERS)?;
    for record in records {
        wtr.write_record([
            record.resource_type.as_str(),
            record.culture_code.as_str(),
            record.resource_key.as_str(),
            record.resource_value.as_str(),
            record.id.as_str(),
        ])?;
    }
    wtr.flush()?;
    tracing::debug!(records = records.len(), "wrote records CSV");
    Ok(records.len())
}

/// Write the localization map as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns `IoError::Json` or `IoError::Io` if serialization or the writer fails.
pub fn write_localization_json<W: Write>(
    mut writer: W,
    entries: &[LocalizationEntry],
) -> Result<usize, IoError> {
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(entries.len())
}

/// Write stored records as a JSON array in the importer's field names.
///
/// # Errors
///
/// Returns `IoError::Json` or `IoError::Io` if serialization or the writer fails.
pub fn write_records_json<W: Write>(
    mut writer: W,
    records: &[TranslationRecord],
) -> Result<usize, IoError> {
    let items: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "resourceType": r.resource_type,
                "cultureCode": r.culture_code,
                "resourceKey": r.resource_key,
                "resourceValue": r.resource_value,
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &items)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use comax_core::entities::Translation;
    use pretty_assertions::assert_eq;

    fn record(id: &str, culture: CultureCode, key: &str, value: &str) -> TranslationRecord {
        TranslationRecord {
            id: id.into(),
            resource_type: "APP1".into(),
            culture_code: culture,
            resource_key: key.into(),
            resource_value: value.into(),
            organization_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn grid_csv_quotes_everything_and_blanks_missing_cultures() {
        let mut row = LocalizationRow::new("greet", "APP1");
        row.translations
            .insert(CultureCode::HeIl, Translation::new("r1", "שלום, \"עולם\""));

        let mut out = Vec::new();
        let written =
            write_grid_csv(&mut out, &[row], &[CultureCode::HeIl, CultureCode::EnUs]).unwrap();
        assert_eq!(written, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"Resource Type\",\"Resource Key\",\"he-IL\",\"en-US\"\n\
             \"APP1\",\"greet\",\"שלום, \"\"עולם\"\"\",\"\"\n"
        );
    }

    #[test]
    fn records_csv_has_importer_headers() {
        let mut out = Vec::new();
        write_records_csv(&mut out, &[record("r1", CultureCode::EnUs, "greet", "Hi")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(
            first,
            "\"Resource Type\",\"Culture Code\",\"Resource Key\",\"Resource Value\",\"Resource ID\""
        );
        assert!(text.contains("\"APP1\",\"en-US\",\"greet\",\"Hi\",\"r1\""));
    }

    #[test]
    fn localization_json_is_key_value_array() {
        let entries = vec![LocalizationEntry {
            key: "Hello".into(),
            value: "שלום".into(),
        }];
        let mut out = Vec::new();
        write_localization_json(&mut out, &entries).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, serde_json::json!([{"key": "Hello", "value": "שלום"}]));
    }
}
