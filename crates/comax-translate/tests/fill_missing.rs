//! `fill_missing` against an in-memory store and a scripted provider.

use std::sync::Mutex;
use std::time::Duration;

use comax_core::entities::TranslationInput;
use comax_core::enums::{AuditAction, CultureCode};
use comax_core::identity::SessionContext;
use comax_db::repos::audit::AuditFilter;
use comax_db::service::ComaxService;
use comax_translate::{
    FillProgress, FillRequest, NoProgress, TranslateError, TranslationProvider, fill_missing,
};
use pretty_assertions::assert_eq;

/// Prefixes the target subtag; fails for any text containing "boom".
#[derive(Default)]
struct ScriptedProvider {
    calls: Mutex<Vec<(String, CultureCode)>>,
}

impl TranslationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn translate(
        &self,
        text: &str,
        _source: CultureCode,
        target: CultureCode,
    ) -> Result<String, TranslateError> {
        self.calls.lock().unwrap().push((text.to_string(), target));
        if text.contains("boom") {
            return Err(TranslateError::Rejected {
                status: 500,
                message: "scripted failure".into(),
            });
        }
        Ok(format!("[{}] {text}", target.language_subtag()))
    }
}

#[derive(Default)]
struct CountingProgress {
    total: u64,
    advanced: u64,
}

impl FillProgress for CountingProgress {
    fn start(&mut self, total: u64) {
        self.total = total;
    }

    fn advance(&mut self, _resource_key: &str, _target: CultureCode) {
        self.advanced += 1;
    }
}

async fn seeded_service(rows: &[(CultureCode, &str, &str)]) -> ComaxService {
    let service = ComaxService::new_local(":memory:", SessionContext::new("translator"))
        .await
        .unwrap();
    for (culture, key, value) in rows {
        service
            .insert_resource(&TranslationInput::new("APP1", *culture, *key, *value))
            .await
            .unwrap();
    }
    service
}

fn request(targets: Vec<CultureCode>) -> FillRequest {
    FillRequest::new(CultureCode::HeIl, targets).with_delay(Duration::ZERO)
}

#[tokio::test]
async fn fills_only_missing_or_blank_targets() {
    let service = seeded_service(&[
        (CultureCode::HeIl, "greet", "שלום"),
        (CultureCode::HeIl, "bye", "להתראות"),
        (CultureCode::EnUs, "greet", "Hello"),
        (CultureCode::EnUs, "bye", "  "),
    ])
    .await;
    let provider = ScriptedProvider::default();

    let summary = fill_missing(
        &service,
        &provider,
        &request(vec![CultureCode::EnUs, CultureCode::RoRo]),
        &mut NoProgress,
    )
    .await
    .unwrap();

    assert_eq!(summary.translated, 3);
    assert_eq!(summary.skipped, 1);
    assert!(summary.is_success());

    let bye_en = service
        .find_resource("APP1", CultureCode::EnUs, "bye")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bye_en.resource_value, "[en] להתראות");
    let greet_en = service
        .find_resource("APP1", CultureCode::EnUs, "greet")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(greet_en.resource_value, "Hello");
    let greet_ro = service
        .find_resource("APP1", CultureCode::RoRo, "greet")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(greet_ro.resource_value, "[ro] שלום");

    assert_eq!(provider.calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn writes_are_audited() {
    let service = seeded_service(&[(CultureCode::HeIl, "greet", "שלום")]).await;
    fill_missing(
        &service,
        &ScriptedProvider::default(),
        &request(vec![CultureCode::EnUs]),
        &mut NoProgress,
    )
    .await
    .unwrap();

    let entries = service.query_audit(&AuditFilter::default()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::Create);
    assert_eq!(entries[0].username, "translator");
}

#[tokio::test]
async fn per_item_failures_are_collected() {
    let service = seeded_service(&[
        (CultureCode::HeIl, "a_ok", "טוב"),
        (CultureCode::HeIl, "b_bad", "boom"),
    ])
    .await;
    let mut progress = CountingProgress::default();

    let summary = fill_missing(
        &service,
        &ScriptedProvider::default(),
        &request(vec![CultureCode::EnUs]),
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(summary.translated, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.error_messages.len(), 1);
    assert!(summary.error_messages[0].starts_with("b_bad → en-US"));
    assert_eq!((progress.total, progress.advanced), (2, 2));
    assert!(
        service
            .find_resource("APP1", CultureCode::EnUs, "b_bad")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn blank_source_text_is_skipped_without_a_call() {
    let service = seeded_service(&[(CultureCode::HeIl, "empty", "")]).await;
    let provider = ScriptedProvider::default();
    let summary = fill_missing(
        &service,
        &provider,
        &request(vec![CultureCode::EnUs]),
        &mut NoProgress,
    )
    .await
    .unwrap();
    assert_eq!(summary.skipped, 1);
    assert!(provider.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn translating_into_the_source_is_rejected() {
    let service = seeded_service(&[]).await;
    let err = fill_missing(
        &service,
        &ScriptedProvider::default(),
        &request(vec![CultureCode::HeIl]),
        &mut NoProgress,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TranslateError::SameCulture(CultureCode::HeIl)));
}
