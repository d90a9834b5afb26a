use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A content record owned by the host CMS.
///
/// The pipeline receives a mutable reference for the duration of one lifecycle
/// callback and must not retain it afterward. `data` is always a JSON object
/// mapping field name → field value; the shape of an individual value (plain
/// scalar vs a structured `{ "value": … }` wrapper) depends on the host major
/// version and is interpreted only by the version adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Host-assigned identifier. `None` until the host first persists the
    /// entity — some bulk-generation tools fire presave before assignment.
    pub id: Option<u64>,
    pub entity_type: String,
    /// Sub-type name (e.g. a specific content-type).
    pub bundle: String,
    pub data: Value,
}

impl Entity {
    /// Creates an unsaved entity with empty field data.
    pub fn new(entity_type: &str, bundle: &str) -> Self {
        Self {
            id: None,
            entity_type: entity_type.to_string(),
            bundle: bundle.to_string(),
            data: Value::Object(Map::new()),
        }
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/mail").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// Field names present on this entity, in stable (object) order.
    pub fn field_names(&self) -> Vec<String> {
        match &self.data {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Whether a top-level field is present, regardless of value shape.
    pub fn has_field(&self, name: &str) -> bool {
        matches!(&self.data, Value::Object(map) if map.contains_key(name))
    }
}

/// A request to create a new entity with host-appropriate minimal fields.
///
/// `values` are applied on top of the adapter's minimal defaults, in the
/// shape the requesting version adapter expects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySpec {
    pub entity_type: String,
    /// Requested sub-type; adapters fall back to their default bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl EntitySpec {
    pub fn of_type(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            bundle: None,
            values: Map::new(),
        }
    }

    pub fn with_bundle(mut self, bundle: &str) -> Self {
        self.bundle = Some(bundle.to_string());
        self
    }
}
