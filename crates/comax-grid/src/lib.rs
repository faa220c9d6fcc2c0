//! # comax-grid
//!
//! The in-memory engine behind the translation grid.
//!
//! Data flows one way: flat [`TranslationRecord`]s are grouped into
//! [`LocalizationRow`]s by [`aggregate`], narrowed by [`filter`], ordered by
//! [`sort`], and revealed a page at a time by [`paginate`]. [`view::GridView`]
//! owns one session's rows and recomputes the pipeline whenever its inputs
//! change. Nothing here performs I/O.
//!
//! [`TranslationRecord`]: comax_core::entities::TranslationRecord
//! [`LocalizationRow`]: comax_core::entities::LocalizationRow

pub mod aggregate;
pub mod collate;
pub mod edit;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod view;

pub use aggregate::{Aggregation, TypeConflict, aggregate};
pub use edit::{CellId, InFlightCells};
pub use error::GridError;
pub use filter::{MissingScope, SearchFilters, TypeScope, filter_rows};
pub use paginate::{InfiniteScroll, LoadTicket};
pub use sort::{SortColumn, SortState};
pub use view::{GridView, PendingEdit};
