//! Collaborator contracts for the enrichment step.
//!
//! What realistic content *looks like* is someone else's problem: the
//! pipeline only requires that an enricher mutates eligible fields in place
//! and that a validator can reject the result. Any error either returns is
//! caught at the pipeline boundary.

use anyhow::Result;
use lifelike_cms::CmsAdapter;
use lifelike_model::{Entity, FieldFilter};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Computes replacement values for an entity's placeholder fields.
///
/// Implementations must consult the filter before touching a field; the
/// two-phase user lifecycle depends on each field being written by exactly
/// one callback.
pub trait ContentEnricher: Send + Sync {
    fn enrich(&self, entity: &mut Entity, entity_type: &str, filter: &FieldFilter) -> Result<()>;
}

/// Rejects enriched entities that violate domain constraints.
///
/// The default accepts everything; most deployments only need validation for
/// a handful of entity types.
pub trait EntityValidator: Send + Sync {
    fn validate(&self, entity: &Entity, entity_type: &str) -> Result<()> {
        let _ = (entity, entity_type);
        Ok(())
    }
}

/// Accepts every entity. The validator to use when no domain constraints
/// apply.
pub struct AcceptAll;

impl EntityValidator for AcceptAll {}

/// A value-agnostic enricher that copies a fixed set of replacement values
/// onto eligible fields, writing through the adapter so each host version
/// gets its own value shape.
pub struct FieldOverlayEnricher {
    adapter: Arc<dyn CmsAdapter>,
    values: Map<String, Value>,
}

impl FieldOverlayEnricher {
    pub fn new(adapter: Arc<dyn CmsAdapter>, values: Map<String, Value>) -> Self {
        Self { adapter, values }
    }
}

impl ContentEnricher for FieldOverlayEnricher {
    fn enrich(&self, entity: &mut Entity, _entity_type: &str, filter: &FieldFilter) -> Result<()> {
        for (name, value) in &self.values {
            if filter.is_eligible(name) {
                self.adapter.set_entity_property(entity, name, value.clone());
            }
        }
        Ok(())
    }
}
