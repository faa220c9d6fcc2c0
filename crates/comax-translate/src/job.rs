//! Batch job that fills missing translations from the source culture.

use std::collections::HashMap;
use std::time::Duration;

use comax_core::entities::{Translation, TranslationRecord};
use comax_core::enums::CultureCode;
use comax_core::responses::TranslationRunSummary;
use comax_db::repos::resources::ResourceScope;
use comax_db::service::ComaxService;

use crate::error::TranslateError;
use crate::provider::TranslationProvider;

/// What to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRequest {
    pub source: CultureCode,
    pub targets: Vec<CultureCode>,
    /// Restrict to these resource types. Empty means all.
    pub resource_types: Vec<String>,
    /// Pause after every provider call.
    pub delay: Duration,
}

impl FillRequest {
    #[must_use]
    pub fn new(source: CultureCode, targets: Vec<CultureCode>) -> Self {
        Self {
            source,
            targets,
            resource_types: Vec::new(),
            delay: Duration::from_millis(100),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_resource_types(mut self, types: Vec<String>) -> Self {
        self.resource_types = types;
        self
    }

    /// Targets without duplicates, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `TranslateError::SameCulture` if a target is the source.
    fn checked_targets(&self) -> Result<Vec<CultureCode>, TranslateError> {
        let mut targets = Vec::with_capacity(self.targets.len());
        for &target in &self.targets {
            if target == self.source {
                return Err(TranslateError::SameCulture(target));
            }
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        Ok(targets)
    }
}

/// Progress callbacks for a running job.
pub trait FillProgress {
    /// Called once the amount of (source record, target) pairs is known.
    fn start(&mut self, _total: u64) {}
    /// Called after every pair, whatever its outcome.
    fn advance(&mut self, _resource_key: &str, _target: CultureCode) {}
}

/// Reports nothing.
pub struct NoProgress;

impl FillProgress for NoProgress {}

type TripleKey = (String, String);

fn index_by_key(records: Vec<TranslationRecord>) -> HashMap<TripleKey, TranslationRecord> {
    records
        .into_iter()
        .map(|r| ((r.resource_type.clone(), r.resource_key.clone()), r))
        .collect()
}

/// Translate every source-culture record into each target culture that lacks
/// a non-empty value, writing results through the store.
///
/// Existing non-empty targets and blank source texts are skipped. A failed
/// translation or write counts as one error and the job moves on.
///
/// # Errors
///
/// - `TranslateError::SameCulture` if a target equals the source.
/// - `TranslateError::Database` if loading the source or target records fails.
pub async fn fill_missing<P, R>(
    service: &ComaxService,
    provider: &P,
    request: &FillRequest,
    progress: &mut R,
) -> Result<TranslationRunSummary, TranslateError>
where
    P: TranslationProvider,
    R: FillProgress,
{
    let targets = request.checked_targets()?;
    let mut summary = TranslationRunSummary::default();

    let sources = service
        .fetch_all_resources(&ResourceScope {
            resource_types: request.resource_types.clone(),
            cultures: vec![request.source],
        })
        .await?;
    if sources.is_empty() || targets.is_empty() {
        tracing::info!(source = %request.source, "nothing to translate");
        return Ok(summary);
    }

    let mut existing: HashMap<CultureCode, HashMap<TripleKey, TranslationRecord>> = HashMap::new();
    for &target in &targets {
        let records = service
            .fetch_all_resources(&ResourceScope {
                resource_types: request.resource_types.clone(),
                cultures: vec![target],
            })
            .await?;
        existing.insert(target, index_by_key(records));
    }

    progress.start((sources.len() * targets.len()) as u64);
    let mut first_call = true;

    for source in &sources {
        for &target in &targets {
            let key = (source.resource_type.clone(), source.resource_key.clone());
            let current = existing.get(&target).and_then(|m| m.get(&key));

            if current.is_some_and(|r| !r.resource_value.trim().is_empty())
                || source.resource_value.trim().is_empty()
            {
                summary.skipped += 1;
                progress.advance(&source.resource_key, target);
                continue;
            }

            if !first_call && !request.delay.is_zero() {
                tokio::time::sleep(request.delay).await;
            }
            first_call = false;

            match translate_one(service, provider, request.source, source, target, current).await {
                Ok(()) => summary.translated += 1,
                Err(e) => {
                    tracing::warn!(
                        key = %source.resource_key,
                        %target,
                        provider = provider.name(),
                        error = %e,
                        "translation failed"
                    );
                    summary.errors += 1;
                    summary
                        .error_messages
                        .push(format!("{} → {target}: {e}", source.resource_key));
                }
            }
            progress.advance(&source.resource_key, target);
        }
    }

    tracing::info!(
        translated = summary.translated,
        skipped = summary.skipped,
        errors = summary.errors,
        "translation run finished"
    );
    Ok(summary)
}

async fn translate_one<P: TranslationProvider>(
    service: &ComaxService,
    provider: &P,
    source_culture: CultureCode,
    source: &TranslationRecord,
    target: CultureCode,
    current: Option<&TranslationRecord>,
) -> Result<(), TranslateError> {
    let text = provider
        .translate(&source.resource_value, source_culture, target)
        .await?;
    let existing = current.map(|r| Translation::new(r.id.as_str(), r.resource_value.as_str()));
    service
        .write_cell(
            &source.resource_type,
            &source.resource_key,
            target,
            existing.as_ref(),
            &text,
        )
        .await?;
    Ok(())
}
