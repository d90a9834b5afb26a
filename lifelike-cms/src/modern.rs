//! Adapter for modern hosts (major version 2 and later).
//!
//! Modern hosts store every field value in a structured `{ "value": … }`
//! wrapper, key entities with a UUID alongside the serial id, and flag
//! generated content with the `devel_generated` field.

use crate::adapter::{emit, mail_is_generated, marker_is_set, CmsAdapter, LogSeverity};
use crate::error::CmsError;
use crate::host::InMemoryHost;
use lifelike_model::{Entity, EntitySpec, FieldDefinition, FileSpec, SavedFile, Vocabulary};
use rand::Rng;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Marker field the bulk-generation tool sets on modern hosts.
const DUMMY_MARKER: &str = "devel_generated";

const DEFAULT_BUNDLE: &str = "article";

pub struct ModernAdapter {
    host: Arc<InMemoryHost>,
}

impl ModernAdapter {
    pub fn new(host: Arc<InMemoryHost>) -> Self {
        Self { host }
    }

    fn wrap(value: Value) -> Value {
        json!({ "value": value })
    }
}

impl CmsAdapter for ModernAdapter {
    fn alter(&self, hook: &str, data: &mut Value) {
        self.host.run_alter(hook, data);
    }

    fn list_fields(&self) -> Vec<FieldDefinition> {
        self.host.field_catalog()
    }

    fn list_modules(&self) -> Vec<String> {
        self.host.module_names()
    }

    fn module_exists(&self, name: &str) -> bool {
        self.host.module_enabled(name)
    }

    fn invoke_all(&self, hook: &str, args: &Value) -> Vec<Value> {
        self.host.invoke_handlers(hook, args)
    }

    fn is_dummy_entity(&self, entity: &Entity, entity_type: &str) -> bool {
        if marker_is_set(
            entity
                .data
                .get(DUMMY_MARKER)
                .map(|v| v.get("value").unwrap_or(v)),
        ) {
            return true;
        }
        match entity_type {
            "user" => mail_is_generated(entity.get_str("/mail/value")),
            _ => false,
        }
    }

    fn mark_generated(&self, entity: &mut Entity) {
        self.set_entity_property(entity, DUMMY_MARKER, json!(true));
    }

    fn bundle_name(&self, entity: &Entity) -> String {
        entity.bundle.clone()
    }

    fn config_get(&self, name: &str, default: Value) -> Value {
        self.host.config(name).unwrap_or(default)
    }

    fn state_get(&self, name: &str, default: Value) -> Value {
        self.host.state(name).unwrap_or(default)
    }

    fn entity_property(&self, entity: &Entity, property: &str) -> Option<Value> {
        let raw = entity.data.get(property)?;
        // Unwrap the structured shape; tolerate plain values left behind by
        // migrations from legacy hosts.
        Some(raw.get("value").unwrap_or(raw).clone())
    }

    fn set_entity_property(&self, entity: &mut Entity, property: &str, value: Value) {
        // A malformed entity is left alone rather than crashed on.
        if let Value::Object(map) = &mut entity.data {
            map.insert(property.to_string(), Self::wrap(value));
        }
    }

    fn create_entity(&self, spec: &EntitySpec) -> Result<Entity, CmsError> {
        let mut rng = rand::thread_rng();
        let mut entity = match spec.entity_type.as_str() {
            "content-item" => {
                let bundle = spec.bundle.as_deref().unwrap_or(DEFAULT_BUNDLE);
                let mut entity = Entity::new("content-item", bundle);
                entity.data["title"] =
                    Self::wrap(json!(rng.gen_range(100_000..1_000_000).to_string()));
                entity
            }
            "user" => {
                let mut entity = Entity::new("user", "user");
                entity.data["name"] =
                    Self::wrap(json!(rng.gen_range(1_000_000..10_000_000).to_string()));
                entity
            }
            other => return Err(CmsError::UnsupportedEntityType(other.to_string())),
        };
        entity.data["uuid"] = Self::wrap(json!(Uuid::new_v4().to_string()));
        for (name, value) in &spec.values {
            entity.data[name] = Self::wrap(value.clone());
        }
        Ok(self.host.insert_entity(entity))
    }

    fn debug_log(&self, message: &str, context: &str) {
        tracing::debug!(target: "lifelike::host", context, "{message}");
        if self.host.module_enabled("inspector") {
            self.host
                .invoke_handlers("inspector_dump", &json!({ context: message }));
        }
    }

    fn log(&self, message: &str, severity: LogSeverity) {
        emit(message, severity);
    }

    fn list_vocabularies(&self) -> Vec<Vocabulary> {
        self.host.vocabulary_list()
    }

    fn save_file(&self, file: FileSpec) -> Result<SavedFile, CmsError> {
        if file.name.is_empty() {
            return Err(CmsError::FileSave("file name is empty".to_string()));
        }
        Ok(self.host.store_file(file))
    }

    fn path_of(&self, kind: &str, name: &str) -> Option<PathBuf> {
        self.host.path(kind, name)
    }

    fn cms_root(&self) -> PathBuf {
        self.host.root().to_path_buf()
    }
}
