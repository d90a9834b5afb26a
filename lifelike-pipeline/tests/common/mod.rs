//! Shared test doubles for pipeline and lifecycle tests.

use anyhow::{bail, Result};
use lifelike_cms::{CmsAdapter, CmsError, LogSeverity};
use lifelike_model::{
    Entity, EntitySpec, FieldDefinition, FieldFilter, FileSpec, SavedFile, Vocabulary,
};
use lifelike_pipeline::ContentEnricher;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Wraps a real adapter and records every operational log entry so tests can
/// assert on the pipeline's logging contract.
pub struct RecordingAdapter {
    inner: Arc<dyn CmsAdapter>,
    logs: Mutex<Vec<(String, LogSeverity)>>,
}

impl RecordingAdapter {
    pub fn new(inner: Arc<dyn CmsAdapter>) -> Self {
        Self {
            inner,
            logs: Mutex::new(Vec::new()),
        }
    }

    pub fn log_entries(&self) -> Vec<(String, LogSeverity)> {
        self.logs.lock().unwrap().clone()
    }
}

impl CmsAdapter for RecordingAdapter {
    fn alter(&self, hook: &str, data: &mut Value) {
        self.inner.alter(hook, data);
    }

    fn list_fields(&self) -> Vec<FieldDefinition> {
        self.inner.list_fields()
    }

    fn list_modules(&self) -> Vec<String> {
        self.inner.list_modules()
    }

    fn module_exists(&self, name: &str) -> bool {
        self.inner.module_exists(name)
    }

    fn invoke_all(&self, hook: &str, args: &Value) -> Vec<Value> {
        self.inner.invoke_all(hook, args)
    }

    fn is_dummy_entity(&self, entity: &Entity, entity_type: &str) -> bool {
        self.inner.is_dummy_entity(entity, entity_type)
    }

    fn mark_generated(&self, entity: &mut Entity) {
        self.inner.mark_generated(entity);
    }

    fn bundle_name(&self, entity: &Entity) -> String {
        self.inner.bundle_name(entity)
    }

    fn config_get(&self, name: &str, default: Value) -> Value {
        self.inner.config_get(name, default)
    }

    fn state_get(&self, name: &str, default: Value) -> Value {
        self.inner.state_get(name, default)
    }

    fn entity_property(&self, entity: &Entity, property: &str) -> Option<Value> {
        self.inner.entity_property(entity, property)
    }

    fn set_entity_property(&self, entity: &mut Entity, property: &str, value: Value) {
        self.inner.set_entity_property(entity, property, value);
    }

    fn create_entity(&self, spec: &EntitySpec) -> Result<Entity, CmsError> {
        self.inner.create_entity(spec)
    }

    fn debug_log(&self, message: &str, context: &str) {
        self.inner.debug_log(message, context);
    }

    fn log(&self, message: &str, severity: LogSeverity) {
        self.logs
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
        self.inner.log(message, severity);
    }

    fn list_vocabularies(&self) -> Vec<Vocabulary> {
        self.inner.list_vocabularies()
    }

    fn save_file(&self, file: FileSpec) -> Result<SavedFile, CmsError> {
        self.inner.save_file(file)
    }

    fn path_of(&self, kind: &str, name: &str) -> Option<PathBuf> {
        self.inner.path_of(kind, name)
    }

    fn cms_root(&self) -> PathBuf {
        self.inner.cms_root()
    }
}

/// Enricher over a fixed field universe that records which fields it was
/// allowed to touch, so tests can check exactly-once coverage across
/// lifecycle phases.
pub struct TrackingEnricher {
    pub universe: Vec<String>,
    pub touched: Mutex<Vec<String>>,
}

impl TrackingEnricher {
    pub fn over(universe: &[&str]) -> Self {
        Self {
            universe: universe.iter().map(|s| s.to_string()).collect(),
            touched: Mutex::new(Vec::new()),
        }
    }

    pub fn touched_fields(&self) -> Vec<String> {
        self.touched.lock().unwrap().clone()
    }
}

impl ContentEnricher for TrackingEnricher {
    fn enrich(&self, entity: &mut Entity, _entity_type: &str, filter: &FieldFilter) -> Result<()> {
        for field in &self.universe {
            if filter.is_eligible(field) {
                entity.data[field.as_str()] = json!(format!("enriched-{field}"));
                self.touched.lock().unwrap().push(field.clone());
            }
        }
        Ok(())
    }
}

/// Fails midway: writes one field, then errors. For partial-mutation tests.
pub struct FailingEnricher {
    pub message: String,
}

impl ContentEnricher for FailingEnricher {
    fn enrich(&self, entity: &mut Entity, _entity_type: &str, filter: &FieldFilter) -> Result<()> {
        if filter.is_eligible("name") {
            entity.data["name"] = json!("partially enriched");
        }
        bail!("{}", self.message);
    }
}

/// Panics unconditionally. For recovery-boundary tests.
pub struct PanickingEnricher;

impl ContentEnricher for PanickingEnricher {
    fn enrich(&self, _entity: &mut Entity, _entity_type: &str, _filter: &FieldFilter) -> Result<()> {
        panic!("enrichment step exploded");
    }
}
