//! Column sorting with a three-state header toggle.

use std::fmt;
use std::str::FromStr;

use comax_core::entities::LocalizationRow;
use comax_core::enums::{CultureCode, SortDirection};
use serde::{Deserialize, Serialize};

use crate::collate::collate;
use crate::error::GridError;

/// A sortable grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Key,
    Culture(CultureCode),
}

impl SortColumn {
    fn sort_value(self, row: &LocalizationRow) -> &str {
        match self {
            Self::Key => &row.resource_key,
            Self::Culture(culture) => row.value(culture).unwrap_or(""),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Culture(culture) => write!(f, "{culture}"),
        }
    }
}

impl FromStr for SortColumn {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("key") || trimmed.eq_ignore_ascii_case("resource_key") {
            return Ok(Self::Key);
        }
        trimmed
            .parse::<CultureCode>()
            .map(Self::Culture)
            .map_err(|_| GridError::UnknownColumn(s.to_string()))
    }
}

/// Active sort column and direction. Both `None` means original order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    #[must_use]
    pub const fn unsorted() -> Self {
        Self {
            column: None,
            direction: None,
        }
    }

    #[must_use]
    pub const fn by(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction: Some(direction),
        }
    }

    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.column.is_some() && self.direction.is_some()
    }

    /// Header click on `column`.
    ///
    /// Clicking the active column cycles asc → desc → unsorted. Clicking any
    /// other column starts it at asc.
    pub fn toggle(&mut self, column: SortColumn) {
        *self = match (self.column, self.direction) {
            (Some(active), Some(SortDirection::Asc)) if active == column => {
                Self::by(column, SortDirection::Desc)
            }
            (Some(active), Some(SortDirection::Desc)) if active == column => Self::unsorted(),
            _ => Self::by(column, SortDirection::Asc),
        };
    }

    /// Reorder `indices` (positions into `rows`) by this state.
    ///
    /// The sort is stable: rows with equal sort values keep their relative
    /// order. When unsorted, `indices` is left as given.
    pub fn sort_indices(&self, rows: &[LocalizationRow], indices: &mut [usize]) {
        let (Some(column), Some(direction)) = (self.column, self.direction) else {
            return;
        };
        indices.sort_by(|&a, &b| {
            let ord = collate(column.sort_value(&rows[a]), column.sort_value(&rows[b]));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    /// Sorted copy of `rows`.
    #[must_use]
    pub fn sorted(&self, rows: &[LocalizationRow]) -> Vec<LocalizationRow> {
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        self.sort_indices(rows, &mut indices);
        indices.into_iter().map(|i| rows[i].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comax_core::entities::Translation;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn row(key: &str, en: Option<&str>) -> LocalizationRow {
        let mut row = LocalizationRow::new(key, "APP");
        if let Some(value) = en {
            row.translations
                .insert(CultureCode::EnUs, Translation::new(format!("{key}-en"), value));
        }
        row
    }

    fn keys(rows: &[LocalizationRow]) -> Vec<&str> {
        rows.iter().map(|r| r.resource_key.as_str()).collect()
    }

    #[test]
    fn three_clicks_restore_original_order() {
        let rows = vec![row("b_key", None), row("a_key", None)];
        let mut state = SortState::default();

        state.toggle(SortColumn::Key);
        assert_eq!(keys(&state.sorted(&rows)), vec!["a_key", "b_key"]);

        state.toggle(SortColumn::Key);
        assert_eq!(keys(&state.sorted(&rows)), vec!["b_key", "a_key"]);
        assert_eq!(state.direction, Some(SortDirection::Desc));

        state.toggle(SortColumn::Key);
        assert_eq!(state, SortState::unsorted());
        assert_eq!(keys(&state.sorted(&rows)), vec!["b_key", "a_key"]);
    }

    #[test]
    fn switching_column_starts_ascending() {
        let mut state = SortState::by(SortColumn::Key, SortDirection::Desc);
        state.toggle(SortColumn::Culture(CultureCode::EnUs));
        assert_eq!(
            state,
            SortState::by(SortColumn::Culture(CultureCode::EnUs), SortDirection::Asc)
        );
    }

    #[test]
    fn missing_values_sort_as_empty() {
        let rows = vec![row("x", Some("b")), row("y", None), row("z", Some("a"))];
        let state = SortState::by(SortColumn::Culture(CultureCode::EnUs), SortDirection::Asc);
        assert_eq!(keys(&state.sorted(&rows)), vec!["y", "z", "x"]);
    }

    #[test]
    fn equal_values_keep_aggregation_order() {
        let rows = vec![
            row("k1", Some("same")),
            row("k2", Some("other")),
            row("k3", Some("same")),
            row("k4", None),
            row("k5", Some("")),
        ];
        let asc = SortState::by(SortColumn::Culture(CultureCode::EnUs), SortDirection::Asc);
        assert_eq!(keys(&asc.sorted(&rows)), vec!["k4", "k5", "k2", "k1", "k3"]);

        let desc = SortState::by(SortColumn::Culture(CultureCode::EnUs), SortDirection::Desc);
        assert_eq!(keys(&desc.sorted(&rows)), vec!["k1", "k3", "k2", "k4", "k5"]);
    }

    #[test]
    fn sorting_twice_equals_sorting_once() {
        let rows = vec![row("c", None), row("a", None), row("B", None)];
        let state = SortState::by(SortColumn::Key, SortDirection::Asc);
        let once = state.sorted(&rows);
        assert_eq!(state.sorted(&once), once);
        assert_eq!(keys(&once), vec!["a", "B", "c"]);
    }

    #[rstest]
    #[case("key", SortColumn::Key)]
    #[case("KEY", SortColumn::Key)]
    #[case("en-US", SortColumn::Culture(CultureCode::EnUs))]
    #[case("he-il", SortColumn::Culture(CultureCode::HeIl))]
    fn parses_columns(#[case] raw: &str, #[case] expected: SortColumn) {
        assert_eq!(raw.parse::<SortColumn>().unwrap(), expected);
    }

    #[test]
    fn unknown_column_is_rejected() {
        assert_eq!(
            "value".parse::<SortColumn>(),
            Err(GridError::UnknownColumn("value".into()))
        );
    }
}
