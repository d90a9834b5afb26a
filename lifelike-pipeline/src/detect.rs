//! Placeholder-content classification.

use lifelike_cms::CmsAdapter;
use lifelike_model::Entity;
use std::sync::Arc;

/// Decides whether an entity is machine-generated placeholder content.
///
/// The heuristics vary by host version (marker field names differ) and by
/// entity type, so the verdict is delegated to the active adapter. Detection
/// degrades rather than fails: a structurally malformed entity or a missing
/// field is "not dummy", never an error, and the verdict is recomputed each
/// time it is needed rather than cached.
pub struct DummyDetector {
    adapter: Arc<dyn CmsAdapter>,
}

impl DummyDetector {
    pub fn new(adapter: Arc<dyn CmsAdapter>) -> Self {
        Self { adapter }
    }

    pub fn is_dummy(&self, entity: &Entity, entity_type: &str) -> bool {
        self.adapter.is_dummy_entity(entity, entity_type)
    }
}
