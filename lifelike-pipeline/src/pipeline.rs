//! The enrichment pipeline for a single lifecycle event.

use crate::detect::DummyDetector;
use crate::enrich::{ContentEnricher, EntityValidator};
use lifelike_cms::{CmsAdapter, LogSeverity};
use lifelike_model::{Entity, FieldFilter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// How one pipeline invocation ended.
///
/// Skipping authored content is normal flow, not an error, so it gets a
/// variant instead of an error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The entity is authored content; nothing was touched.
    Skipped,
    /// Enrichment and validation completed.
    Enriched,
    /// A collaborator failed; the failure was logged and swallowed. The
    /// entity stands exactly as it did at the point of failure.
    Recovered,
}

/// Transient record of one pipeline invocation. Rendered into the host's
/// diagnostic log and then dropped — never persisted.
#[derive(Debug, Clone)]
pub struct EnrichmentAttempt {
    pub entity_id: Option<u64>,
    pub entity_type: String,
    pub bundle: String,
    pub filter: String,
    pub outcome: PipelineOutcome,
    pub error: Option<String>,
}

impl EnrichmentAttempt {
    fn log_line(&self) -> String {
        let id = match self.entity_id {
            Some(id) => id.to_string(),
            None => "unsaved".to_string(),
        };
        match &self.error {
            Some(error) => format!(
                "{} {id} ({}) filter={} outcome={:?}: {error}",
                self.entity_type, self.bundle, self.filter, self.outcome
            ),
            None => format!(
                "{} {id} ({}) filter={} outcome={:?}",
                self.entity_type, self.bundle, self.filter, self.outcome
            ),
        }
    }
}

/// Orchestrates detect → enrich → validate → recover for one entity.
///
/// The step sequence runs inside a recovery boundary: any error from the
/// enrichment or validation collaborators — and any panic inside the
/// sequence itself — is logged through the adapter with the original message
/// preserved, then swallowed. The host's save operation always completes;
/// the entity is left unmodified or partially modified exactly as it stood
/// when the failure hit.
pub struct EnrichmentPipeline {
    adapter: Arc<dyn CmsAdapter>,
    detector: DummyDetector,
    enricher: Arc<dyn ContentEnricher>,
    validator: Arc<dyn EntityValidator>,
}

impl EnrichmentPipeline {
    pub fn new(
        adapter: Arc<dyn CmsAdapter>,
        enricher: Arc<dyn ContentEnricher>,
        validator: Arc<dyn EntityValidator>,
    ) -> Self {
        Self {
            detector: DummyDetector::new(Arc::clone(&adapter)),
            adapter,
            enricher,
            validator,
        }
    }

    /// Runs the pipeline for one lifecycle event. Never returns an error and
    /// never panics across this boundary.
    pub fn process(
        &self,
        entity: &mut Entity,
        entity_type: &str,
        filter: &FieldFilter,
    ) -> PipelineOutcome {
        if !self.detector.is_dummy(entity, entity_type) {
            return PipelineOutcome::Skipped;
        }

        let result = catch_unwind(AssertUnwindSafe(|| {
            self.enricher.enrich(entity, entity_type, filter)?;
            self.validator.validate(entity, entity_type)
        }));

        let error = match result {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(format!("{e:#}")),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };

        let attempt = EnrichmentAttempt {
            entity_id: entity.id,
            entity_type: entity_type.to_string(),
            bundle: self.adapter.bundle_name(entity),
            filter: filter.to_string(),
            outcome: if error.is_some() {
                PipelineOutcome::Recovered
            } else {
                PipelineOutcome::Enriched
            },
            error,
        };
        self.finish(attempt)
    }

    fn finish(&self, attempt: EnrichmentAttempt) -> PipelineOutcome {
        self.adapter.debug_log(&attempt.log_line(), "enrichment");
        if let Some(error) = &attempt.error {
            // One operational log entry per failure, original message intact.
            self.adapter.log(
                &format!("failed to modify dummy content: {error}"),
                LogSeverity::Error,
            );
        }
        attempt.outcome
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in enrichment step".to_string()
    }
}
