//! Import file parsing and validation.
//!
//! Parsing happens in two steps. First the file becomes a list of raw rows
//! (header → text), whatever the format. Workbooks are read from their first
//! worksheet, whose first row holds the headers. Then every row is mapped onto the
//! canonical fields and validated: `resourceType`, `cultureCode`, and
//! `resourceKey` are required, the culture must be in the allowed set, and a
//! missing `resourceValue` means an empty value.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader};
use comax_core::entities::TranslationInput;
use comax_core::enums::CultureCode;
use serde_json::Value;

use crate::error::IoError;

/// Supported import file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
    /// Excel workbook (`.xlsx`, `.xls`).
    Xlsx,
}

impl ImportFormat {
    /// Pick a format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `IoError::UnsupportedFormat` for anything but `.json`, `.csv`,
    /// `.xlsx`, and `.xls`.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" => Ok(Self::Xlsx),
            _ => Err(IoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        })
    }
}

/// Outcome of a lenient parse: valid records plus one error per rejected row.
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub records: Vec<TranslationInput>,
    pub rejected: Vec<IoError>,
}

impl ParsedImport {
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.rejected.len()
    }

    /// Fail on the first rejected row, for callers that refuse partial files.
    ///
    /// # Errors
    ///
    /// Returns the first row's `IoError::Validation`.
    pub fn into_strict(mut self) -> Result<Vec<TranslationInput>, IoError> {
        if self.rejected.is_empty() {
            Ok(self.records)
        } else {
            Err(self.rejected.swap_remove(0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ResourceType,
    CultureCode,
    ResourceKey,
    ResourceValue,
}

impl Field {
    const fn name(self) -> &'static str {
        match self {
            Self::ResourceType => "resourceType",
            Self::CultureCode => "cultureCode",
            Self::ResourceKey => "resourceKey",
            Self::ResourceValue => "resourceValue",
        }
    }

    /// Map a header spelling onto a field.
    ///
    /// Case, spaces, underscores, and hyphens are ignored, so `resourceType`,
    /// `Resource Type`, and `resource_type` all match.
    fn from_header(header: &str) -> Option<Self> {
        let folded: String = header
            .trim_start_matches('\u{feff}')
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "resourcetype" => Some(Self::ResourceType),
            "culturecode" => Some(Self::CultureCode),
            "resourcekey" => Some(Self::ResourceKey),
            "resourcevalue" => Some(Self::ResourceValue),
            _ => None,
        }
    }
}

/// One row before validation: canonical field → raw text.
type RawRow = HashMap<&'static str, String>;

fn insert_raw(row: &mut RawRow, header: &str, value: String) {
    if let Some(field) = Field::from_header(header) {
        // The first non-empty spelling wins when a file carries two variants.
        let slot = row.entry(field.name()).or_default();
        if slot.is_empty() {
            *slot = value;
        }
    }
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn raw_rows_from_json(text: &str) -> Result<Vec<Result<RawRow, IoError>>, IoError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        single => vec![single],
    };
    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => {
                let mut row = RawRow::new();
                for (header, value) in &map {
                    if let Some(text) = json_text(value) {
                        insert_raw(&mut row, header, text);
                    }
                }
                Ok(row)
            }
            _ => Err(IoError::validation(i + 1, "record", "expected a JSON object")),
        })
        .collect())
}

fn raw_rows_from_csv<R: Read>(reader: R) -> Result<Vec<Result<RawRow, IoError>>, IoError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            insert_raw(&mut row, header, value.to_string());
        }
        rows.push(Ok(row));
    }
    Ok(rows)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn raw_rows_from_workbook(path: &Path) -> Result<Vec<Result<RawRow, IoError>>, IoError> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Vec::new());
    };
    let range = range?;
    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    let mut rows = Vec::new();
    for cells in sheet_rows {
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(cells) {
            if let Some(text) = cell_text(cell) {
                insert_raw(&mut row, header, text);
            }
        }
        rows.push(Ok(row));
    }
    Ok(rows)
}

fn required(row: &RawRow, index: usize, field: Field) -> Result<String, IoError> {
    row.get(field.name())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| IoError::validation(index, field.name(), "missing required field"))
}

fn validate_row(
    row: &RawRow,
    index: usize,
    allowed: &[CultureCode],
) -> Result<TranslationInput, IoError> {
    let resource_type = required(row, index, Field::ResourceType)?;
    let culture_text = required(row, index, Field::CultureCode)?;
    let resource_key = required(row, index, Field::ResourceKey)?;

    let culture = culture_text
        .parse::<CultureCode>()
        .ok()
        .filter(|c| allowed.contains(c))
        .ok_or_else(|| {
            let allowed: Vec<&str> = allowed.iter().map(|c| c.as_str()).collect();
            IoError::validation(
                index,
                Field::CultureCode.name(),
                format!(
                    "culture code '{culture_text}' is not allowed (allowed: {})",
                    allowed.join(", ")
                ),
            )
        })?;

    let resource_value = row
        .get(Field::ResourceValue.name())
        .cloned()
        .unwrap_or_default();

    Ok(TranslationInput::new(
        resource_type,
        culture,
        resource_key,
        resource_value,
    ))
}

fn validate_all(raw: Vec<Result<RawRow, IoError>>, allowed: &[CultureCode]) -> ParsedImport {
    let mut parsed = ParsedImport::default();
    for (i, row) in raw.into_iter().enumerate() {
        match row.and_then(|row| validate_row(&row, i + 1, allowed)) {
            Ok(record) => parsed.records.push(record),
            Err(error) => parsed.rejected.push(error),
        }
    }
    tracing::debug!(
        valid = parsed.records.len(),
        rejected = parsed.rejected.len(),
        "validated import rows"
    );
    parsed
}

/// Parse import text in `format`.
///
/// # Errors
///
/// Returns `IoError::Json` / `IoError::Csv` when the text itself is malformed,
/// and `IoError::UnsupportedFormat` for workbooks, which are binary and only
/// read through [`parse_file`]. Row-level problems are collected in
/// [`ParsedImport::rejected`].
pub fn parse_str(
    text: &str,
    format: ImportFormat,
    allowed: &[CultureCode],
) -> Result<ParsedImport, IoError> {
    let raw = match format {
        ImportFormat::Json => raw_rows_from_json(text)?,
        ImportFormat::Csv => raw_rows_from_csv(text.as_bytes())?,
        ImportFormat::Xlsx => {
            return Err(IoError::UnsupportedFormat(
                "xlsx workbooks must be read from a file".into(),
            ));
        }
    };
    Ok(validate_all(raw, allowed))
}

/// Read and parse an import file, choosing the format from its extension.
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat`, `IoError::Io`, `IoError::Workbook`,
/// or a parse error.
pub fn parse_file(path: &Path, allowed: &[CultureCode]) -> Result<ParsedImport, IoError> {
    let format = ImportFormat::from_path(path)?;
    tracing::debug!(path = %path.display(), %format, "parsing import file");
    if format == ImportFormat::Xlsx {
        let raw = raw_rows_from_workbook(path)?;
        return Ok(validate_all(raw, allowed));
    }
    let text = std::fs::read_to_string(path)?;
    parse_str(&text, format, allowed)
}
