//! End-to-end store scenarios: import, edit, re-fetch.

use comax_core::entities::{LocalizationRow, TranslationInput};
use comax_core::enums::{AuditAction, CultureCode};
use comax_core::identity::SessionContext;
use comax_core::responses::EditKind;
use comax_db::error::DatabaseError;
use comax_db::repos::audit::AuditFilter;
use comax_db::repos::resources::ResourceScope;
use comax_db::service::ComaxService;
use comax_grid::{GridView, SearchFilters, aggregate};
use pretty_assertions::assert_eq;
use rstest::rstest;

async fn service() -> ComaxService {
    ComaxService::new_local(":memory:", SessionContext::new("qa"))
        .await
        .unwrap()
}

fn batch(n: usize) -> Vec<TranslationInput> {
    (0..n)
        .map(|i| {
            let culture = if i % 2 == 0 {
                CultureCode::HeIl
            } else {
                CultureCode::EnUs
            };
            TranslationInput::new("APP1", culture, format!("key_{}", i / 2), format!("v{i}"))
        })
        .collect()
}

#[tokio::test]
async fn import_into_empty_store_then_reimport() {
    let svc = service().await;
    let records = vec![TranslationInput::new("APP1", CultureCode::EnUs, "greet", "Hello")];

    let first = svc.import_batch(&records, &ResourceScope::all()).await.unwrap();
    assert_eq!((first.summary.added_count, first.summary.updated_count), (1, 0));

    let second = svc.import_batch(&records, &ResourceScope::all()).await.unwrap();
    assert_eq!((second.summary.added_count, second.summary.updated_count), (0, 1));
}

#[rstest]
#[case(1)]
#[case(6)]
#[case(25)]
#[tokio::test]
async fn reimport_never_duplicates(#[case] size: usize) {
    let svc = service().await.with_page_size(4);
    let records = batch(size);
    svc.import_batch(&records, &ResourceScope::all()).await.unwrap();
    let again = svc.import_batch(&records, &ResourceScope::all()).await.unwrap();

    assert_eq!(again.summary.added_count, 0);
    assert_eq!(again.summary.updated_count as usize, size);
    let stored = svc.fetch_all_resources(&ResourceScope::all()).await.unwrap();
    assert_eq!(stored.len(), size);

    let refreshed = again.refreshed.unwrap();
    let pairs: usize = refreshed.rows.iter().map(|r| r.translations.len()).sum();
    assert_eq!(pairs, size);
}

#[tokio::test]
async fn editing_absent_cell_inserts_and_logs_create() {
    let svc = service().await;
    svc.import_batch(
        &[TranslationInput::new("APP1", CultureCode::HeIl, "greet", "שלום")],
        &ResourceScope::all(),
    )
    .await
    .unwrap();

    let mut row: LocalizationRow = aggregate(
        &svc.fetch_all_resources(&ResourceScope::all()).await.unwrap(),
    )
    .rows
    .remove(0);
    assert_eq!(row.value(CultureCode::EnUs), None);

    let outcome = svc
        .save_cell_edit(&mut row, CultureCode::EnUs, "Hi")
        .await
        .unwrap();
    assert_eq!(outcome.kind, EditKind::Inserted);

    let creates = svc
        .query_audit(&AuditFilter {
            action: Some(AuditAction::Create),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].username, "qa");
    assert_eq!(creates[0].record_id.as_deref(), Some(outcome.record.id.as_str()));
}

#[tokio::test]
async fn saved_value_survives_reload() {
    let svc = service().await;
    svc.import_batch(
        &[
            TranslationInput::new("APP1", CultureCode::HeIl, "greet", "שלום"),
            TranslationInput::new("APP1", CultureCode::EnUs, "greet", ""),
        ],
        &ResourceScope::all(),
    )
    .await
    .unwrap();

    let mut view = GridView::new(50);
    view.load(&svc.fetch_all_resources(&ResourceScope::all()).await.unwrap());
    view.set_filters(SearchFilters {
        only_empty_values: true,
        ..Default::default()
    });
    assert_eq!(view.matching_count(), 1);

    svc.save_view_edit(&mut view, "greet", CultureCode::EnUs, "Hello")
        .await
        .unwrap();

    let mut reloaded = GridView::new(50);
    reloaded.load(&svc.fetch_all_resources(&ResourceScope::all()).await.unwrap());
    assert_eq!(
        reloaded.row("greet").unwrap().value(CultureCode::EnUs),
        Some("Hello")
    );
    reloaded.set_filters(SearchFilters {
        only_empty_values: true,
        ..Default::default()
    });
    assert_eq!(reloaded.matching_count(), 0);
}

#[tokio::test]
async fn scope_required_without_organization_fails_insert_only() {
    let seeded = ComaxService::new_local(":memory:", SessionContext::new("qa").requiring_organization())
        .await
        .unwrap();
    let outcome = seeded
        .import_batch(
            &[TranslationInput::new("APP1", CultureCode::HeIl, "greet", "x")],
            &ResourceScope::all(),
        )
        .await
        .unwrap();
    assert_eq!(outcome.summary.error_count, 1);
    assert!(outcome.summary.errors[0].contains("Required scope missing"));

    let mut row = LocalizationRow::new("greet", "APP1");
    let err = seeded
        .save_cell_edit(&mut row, CultureCode::EnUs, "Hi")
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::ScopeMissing(_)));
}
