//! One grid session: loaded rows plus the filter → sort → paginate pipeline.
//!
//! The view is the only owner of its rows. They change only through
//! [`GridView::load`], [`GridView::set_rows`] (full reload or import
//! completion) and confirmed cell edits, never from a background task, so the
//! view needs no locking.

use std::time::Duration;

use comax_core::entities::{LocalizationRow, Translation, TranslationRecord};
use comax_core::enums::CultureCode;

use crate::aggregate::{TypeConflict, aggregate};
use crate::edit::{CellId, InFlightCells, apply_confirmed};
use crate::error::GridError;
use crate::filter::{SearchFilters, filter_indices};
use crate::paginate::{InfiniteScroll, LoadTicket};
use crate::sort::{SortColumn, SortState};

/// What a caller needs to save one cell, captured when the edit starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub cell: CellId,
    pub resource_type: String,
    /// The translation being replaced. `None` means the save must insert.
    pub existing: Option<Translation>,
}

#[derive(Debug)]
pub struct GridView {
    rows: Vec<LocalizationRow>,
    filters: SearchFilters,
    sort: SortState,
    /// Positions into `rows`, filtered then sorted.
    visible: Vec<usize>,
    scroll: InfiniteScroll,
    generation: u64,
    in_flight: InFlightCells,
    type_conflicts: Vec<TypeConflict>,
}

impl GridView {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let mut view = Self {
            rows: Vec::new(),
            filters: SearchFilters::default(),
            sort: SortState::default(),
            visible: Vec::new(),
            scroll: InfiniteScroll::new(page_size),
            generation: 0,
            in_flight: InFlightCells::new(),
            type_conflicts: Vec::new(),
        };
        view.recompute();
        view
    }

    /// Replace all rows with the aggregation of a complete record set.
    pub fn load(&mut self, records: &[TranslationRecord]) {
        let aggregation = aggregate(records);
        self.type_conflicts = aggregation.type_conflicts;
        self.set_rows(aggregation.rows);
    }

    /// Replace all rows.
    pub fn set_rows(&mut self, rows: Vec<LocalizationRow>) {
        self.rows = rows;
        self.recompute();
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        if filters != self.filters {
            self.filters = filters;
            self.recompute();
        }
    }

    /// Header click on `column`.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortState) {
        if sort != self.sort {
            self.sort = sort;
            self.recompute();
        }
    }

    /// Re-run filter and sort over the current rows and reset the window.
    pub fn refresh(&mut self) {
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut visible = filter_indices(&self.rows, &self.filters);
        self.sort.sort_indices(&self.rows, &mut visible);
        self.visible = visible;
        self.generation += 1;
        self.scroll.sync(self.visible.len(), self.generation);
    }

    #[must_use]
    pub const fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> SortState {
        self.sort
    }

    #[must_use]
    pub fn rows(&self) -> &[LocalizationRow] {
        &self.rows
    }

    #[must_use]
    pub fn type_conflicts(&self) -> &[TypeConflict] {
        &self.type_conflicts
    }

    /// Every row that passes the filters, in display order.
    pub fn matching_rows(&self) -> impl Iterator<Item = &LocalizationRow> {
        self.visible.iter().map(|&i| &self.rows[i])
    }

    #[must_use]
    pub fn matching_count(&self) -> usize {
        self.visible.len()
    }

    /// The currently revealed prefix of [`Self::matching_rows`].
    pub fn displayed_rows(&self) -> impl Iterator<Item = &LocalizationRow> {
        self.scroll
            .window(&self.visible)
            .iter()
            .map(|&i| &self.rows[i])
    }

    #[must_use]
    pub const fn displayed_count(&self) -> usize {
        self.scroll.displayed_count()
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.scroll.has_more()
    }

    pub fn request_more(&mut self) -> Option<LoadTicket> {
        self.scroll.request_more()
    }

    pub fn complete_load(&mut self, ticket: LoadTicket) -> bool {
        self.scroll.complete(ticket)
    }

    /// Reveal one more page after `delay`.
    pub async fn load_more(&mut self, delay: Duration) -> Option<usize> {
        self.scroll.load_more(delay).await
    }

    #[must_use]
    pub fn row(&self, resource_key: &str) -> Option<&LocalizationRow> {
        self.rows.iter().find(|r| r.resource_key == resource_key)
    }

    fn row_mut(&mut self, resource_key: &str) -> Result<&mut LocalizationRow, GridError> {
        self.rows
            .iter_mut()
            .find(|r| r.resource_key == resource_key)
            .ok_or_else(|| GridError::UnknownRow(resource_key.to_string()))
    }

    /// Start editing one cell.
    ///
    /// # Errors
    ///
    /// `GridError::UnknownRow` if no row has `resource_key`;
    /// `GridError::EditInFlight` if the cell is already saving.
    pub fn begin_edit(
        &mut self,
        resource_key: &str,
        culture: CultureCode,
    ) -> Result<PendingEdit, GridError> {
        let row = self
            .row(resource_key)
            .ok_or_else(|| GridError::UnknownRow(resource_key.to_string()))?;
        let pending = PendingEdit {
            cell: CellId::new(resource_key, culture),
            resource_type: row.resource_type.clone(),
            existing: row.translations.get(culture).cloned(),
        };
        self.in_flight.begin(pending.cell.clone())?;
        Ok(pending)
    }

    /// Finish a cell edit.
    ///
    /// `confirmed` carries the store's `(record_id, value)` on success; `None`
    /// records a failed save and leaves the row unchanged. The cell is
    /// released in both cases. The visible set is not recomputed, so the
    /// edited row keeps its place until the next filter or sort change.
    ///
    /// # Errors
    ///
    /// `GridError::UnknownRow` if the row vanished in a reload meanwhile.
    pub fn finish_edit(
        &mut self,
        pending: &PendingEdit,
        confirmed: Option<(String, String)>,
    ) -> Result<(), GridError> {
        self.in_flight.finish(&pending.cell);
        let Some((record_id, value)) = confirmed else {
            return Ok(());
        };
        let row = self.row_mut(&pending.cell.resource_key)?;
        apply_confirmed(row, pending.cell.culture, record_id, value);
        Ok(())
    }

    #[must_use]
    pub fn is_saving(&self, cell: &CellId) -> bool {
        self.in_flight.is_in_flight(cell)
    }
}
