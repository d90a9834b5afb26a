//! Per-entity-type lifecycle glue.
//!
//! The host delivers partial views of a user entity across two callbacks
//! during creation. The glue picks a filter per callback so that, taken
//! together, every user field is enriched exactly once:
//!
//! - insert  → `exclude({avatar})` — fires once, at first persist
//! - presave → `include({avatar})` — avatar handling needs the code path
//!   only available at this point
//!
//! Insert enriches first and may rewrite the contact address the dummy
//! heuristic relies on, so a positive verdict is made durable there: the
//! marker property is stamped before any field changes, and presave
//! recognizes the account by the marker alone.
//!
//! Presave also fires on every later save, so it must tell "still the
//! creation event" from "an edit". The host sets the edit marker only on
//! edits; bulk-generation tools additionally fire presave once before the
//! identifier is assigned, which is a deliberate no-op.

use crate::pipeline::{EnrichmentPipeline, PipelineOutcome};
use crate::signals::LifecycleSignals;
use lifelike_cms::CmsAdapter;
use lifelike_model::{Entity, FieldFilter};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Transient per-save metadata the host passes alongside the entity.
#[derive(Debug, Clone, Default)]
pub struct LifecycleContext {
    values: Map<String, Value>,
}

impl LifecycleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: Value) -> &mut Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Presence check — the host signals edits by *setting* the marker,
    /// whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Two-phase creation state machine for user entities.
pub struct UserLifecycle {
    adapter: Arc<dyn CmsAdapter>,
    pipeline: Arc<EnrichmentPipeline>,
    signals: LifecycleSignals,
}

impl UserLifecycle {
    pub fn new(
        adapter: Arc<dyn CmsAdapter>,
        pipeline: Arc<EnrichmentPipeline>,
        signals: LifecycleSignals,
    ) -> Self {
        Self {
            adapter,
            pipeline,
            signals,
        }
    }

    /// First phase: fires exactly once, the first time the account is
    /// persisted. Everything except the avatar field.
    pub fn on_insert(&self, account: &mut Entity) -> PipelineOutcome {
        // Enrichment is allowed to rewrite the contact address the detection
        // heuristic keys on. A positive verdict is stamped as the marker
        // property first, so presave still recognizes the account.
        if self.adapter.is_dummy_entity(account, "user") {
            self.adapter.mark_generated(account);
        }
        let filter = FieldFilter::exclude([self.signals.avatar_field.clone()]);
        self.pipeline.process(account, "user", &filter)
    }

    /// Second phase: fires on every save. Only the creation event enriches,
    /// and only the avatar field.
    pub fn on_presave(&self, account: &mut Entity, context: &LifecycleContext) -> PipelineOutcome {
        if context.contains(&self.signals.edit_marker) {
            // The host only sets this marker on edits. Authored edits are
            // never touched, dummy or not.
            return PipelineOutcome::Skipped;
        }
        if account.id.is_none() {
            // Bulk generation fires presave once before the identifier is
            // assigned; nothing to enrich yet.
            return PipelineOutcome::Skipped;
        }
        let filter = FieldFilter::include([self.signals.avatar_field.clone()]);
        self.pipeline.process(account, "user", &filter)
    }
}

/// Single-phase presave path for every entity type without multi-callback
/// creation. Users are excluded here — they go through [`UserLifecycle`].
pub struct EntityLifecycle {
    pipeline: Arc<EnrichmentPipeline>,
}

impl EntityLifecycle {
    pub fn new(pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { pipeline }
    }

    pub fn on_presave(&self, entity: &mut Entity, entity_type: &str) -> PipelineOutcome {
        if entity_type == "user" {
            return PipelineOutcome::Skipped;
        }
        self.pipeline.process(entity, entity_type, &FieldFilter::Unrestricted)
    }
}
