//! Cell identity and the single-in-flight guard for cell saves.

use std::collections::HashSet;
use std::fmt;

use comax_core::entities::{LocalizationRow, Translation};
use comax_core::enums::CultureCode;
use comax_core::responses::EditKind;

use crate::error::GridError;

/// One grid cell: a resource key under one culture column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellId {
    pub resource_key: String,
    pub culture: CultureCode,
}

impl CellId {
    #[must_use]
    pub fn new(resource_key: impl Into<String>, culture: CultureCode) -> Self {
        Self {
            resource_key: resource_key.into(),
            culture,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.resource_key, self.culture)
    }
}

/// Cells whose save is outstanding.
///
/// Different cells may save concurrently; the same cell may not.
#[derive(Debug, Default)]
pub struct InFlightCells {
    cells: HashSet<CellId>,
}

impl InFlightCells {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `cell` as saving.
    ///
    /// # Errors
    ///
    /// Returns `GridError::EditInFlight` if a save for `cell` is already outstanding.
    pub fn begin(&mut self, cell: CellId) -> Result<(), GridError> {
        if self.cells.contains(&cell) {
            return Err(GridError::EditInFlight {
                resource_key: cell.resource_key,
                culture: cell.culture,
            });
        }
        self.cells.insert(cell);
        Ok(())
    }

    /// Release `cell` whether its save succeeded or failed.
    pub fn finish(&mut self, cell: &CellId) {
        self.cells.remove(cell);
    }

    #[must_use]
    pub fn is_in_flight(&self, cell: &CellId) -> bool {
        self.cells.contains(cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Splice a store-confirmed write into `row`.
///
/// Only call this after the store acknowledged the write; on failure the row
/// must be left untouched.
pub fn apply_confirmed(
    row: &mut LocalizationRow,
    culture: CultureCode,
    record_id: impl Into<String>,
    value: impl Into<String>,
) -> EditKind {
    match row
        .translations
        .insert(culture, Translation::new(record_id, value))
    {
        Some(_) => EditKind::Updated,
        None => EditKind::Inserted,
    }
}
