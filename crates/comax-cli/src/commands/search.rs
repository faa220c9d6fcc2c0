use std::time::Duration;

use comax_core::entities::LocalizationRow;
use comax_core::enums::{CultureCode, SortDirection};
use comax_db::repos::resources::ResourceScope;
use comax_grid::{GridView, MissingScope, SearchFilters, SortColumn, SortState, TypeConflict, TypeScope};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::parse::parse_cultures;
use crate::context::AppContext;
use crate::output::output_with_table;
use crate::output::table::MISSING_CELL;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct SearchResponse<'a> {
    total_rows: usize,
    matching: usize,
    displayed: usize,
    has_more: bool,
    rows: Vec<&'a LocalizationRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    type_conflicts: Vec<&'a TypeConflict>,
}

fn filters_from_args(args: &SearchArgs) -> anyhow::Result<SearchFilters> {
    let missing_in = parse_cultures(&args.missing_in)?;
    let missing_scope = if missing_in.is_empty() {
        MissingScope::AnyCulture
    } else {
        MissingScope::Cultures(missing_in.into_iter().collect())
    };
    Ok(SearchFilters {
        resource_types: TypeScope::from_types(args.resource_types.iter().cloned()),
        resource_key: args.key.clone().unwrap_or_default(),
        resource_value: args.value.clone().unwrap_or_default(),
        only_empty_values: args.missing || !args.missing_in.is_empty(),
        missing_scope,
    })
}

fn sort_from_args(args: &SearchArgs) -> anyhow::Result<SortState> {
    let Some(raw) = args.sort.as_deref() else {
        return Ok(SortState::unsorted());
    };
    let column: SortColumn = raw.parse()?;
    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    Ok(SortState::by(column, direction))
}

fn table_rows(rows: &[&LocalizationRow], cultures: &[CultureCode]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(cultures.len() + 2);
            cells.push(row.resource_key.clone());
            cells.push(row.resource_type.clone());
            cells.extend(
                cultures
                    .iter()
                    .map(|c| row.value(*c).unwrap_or(MISSING_CELL).to_string()),
            );
            cells
        })
        .collect()
}

/// Handle `comax search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filters = filters_from_args(args)?;
    let sort = sort_from_args(args)?;

    let spinner = Progress::spinner("loading translations");
    let records = match ctx
        .service
        .fetch_all_resources(&ResourceScope::all())
        .await
    {
        Ok(records) => records,
        Err(error) => {
            spinner.finish_err("load failed");
            return Err(error.into());
        }
    };
    spinner.finish_clear();

    let mut view = GridView::new(ctx.config.grid.page_size);
    view.load(&records);
    view.set_filters(filters);
    view.set_sort(sort);

    // Each extra page is one bottom-sentinel signal.
    let delay = if args.all {
        Duration::ZERO
    } else {
        Duration::from_millis(ctx.config.grid.load_delay_ms)
    };
    let mut pages_left = if args.all { u32::MAX } else { args.pages.saturating_sub(1) };
    while pages_left > 0 && view.load_more(delay).await.is_some() {
        pages_left -= 1;
    }

    let displayed: Vec<&LocalizationRow> = view.displayed_rows().collect();
    tracing::debug!(
        matching = view.matching_count(),
        displayed = displayed.len(),
        "search complete"
    );

    let cultures = &ctx.config.grid.cultures;
    let mut headers = vec!["resource_key", "resource_type"];
    headers.extend(cultures.iter().map(|c| c.as_str()));
    let rows = table_rows(&displayed, cultures);

    let response = SearchResponse {
        total_rows: view.rows().len(),
        matching: view.matching_count(),
        displayed: view.displayed_count(),
        has_more: view.has_more(),
        rows: displayed,
        type_conflicts: view.type_conflicts().iter().collect(),
    };
    output_with_table(&response, flags.format, &headers, &rows)
}
