//! The capability interface every host major version satisfies.

use crate::error::CmsError;
use lifelike_model::{Entity, EntitySpec, FieldDefinition, FileSpec, SavedFile, Vocabulary};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Suffix the bulk-generation tool appends to generated contact addresses.
///
/// A real user could coincidentally match it; that risk is accepted because
/// this system is only recommended for non-production environments.
pub const GENERATED_MAIL_SUFFIX: &str = ".invalid";

/// Severity levels for the host's structured operational log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Host operations the rest of the system depends on.
///
/// Each host-version implementation satisfies this identically in signature
/// but differs in how it maps to host primitives (value shape, marker field
/// names, minimal required fields at creation). Consumers never branch on
/// the host version inline — they hold a `&dyn CmsAdapter` and nothing else.
pub trait CmsAdapter: Send + Sync {
    /// Gives registered listeners a chance to mutate `data` in place.
    fn alter(&self, hook: &str, data: &mut Value);

    /// Full catalog of field definitions known to the host.
    fn list_fields(&self) -> Vec<FieldDefinition>;

    /// Names of active optional integrations.
    fn list_modules(&self) -> Vec<String>;

    fn module_exists(&self, name: &str) -> bool;

    /// Broadcasts an event to all registered handlers, collecting their
    /// results in registration order.
    fn invoke_all(&self, hook: &str, args: &Value) -> Vec<Value>;

    /// Version-specific placeholder heuristic. Total: a structurally
    /// malformed entity is "not dummy", never an error.
    fn is_dummy_entity(&self, entity: &Entity, entity_type: &str) -> bool;

    /// Stamps the version-specific marker property on the entity, making a
    /// placeholder verdict durable even after other fields are rewritten.
    fn mark_generated(&self, entity: &mut Entity);

    /// The entity's sub-type name.
    fn bundle_name(&self, entity: &Entity) -> String;

    /// Persisted configuration, falling back to `default` when absent.
    fn config_get(&self, name: &str, default: Value) -> Value;

    /// Persisted runtime state, falling back to `default` when absent.
    fn state_get(&self, name: &str, default: Value) -> Value;

    /// Generic property read abstracting over the host's value shape.
    fn entity_property(&self, entity: &Entity, property: &str) -> Option<Value>;

    /// Generic property write in the host's value shape.
    fn set_entity_property(&self, entity: &mut Entity, property: &str, value: Value);

    /// Constructs and persists a new entity with host-appropriate minimal
    /// required fields. Fails with [`CmsError::UnsupportedEntityType`] for
    /// types the adapter does not support.
    fn create_entity(&self, spec: &EntitySpec) -> Result<Entity, CmsError>;

    /// Best-effort diagnostic output. Must never fail the caller.
    fn debug_log(&self, message: &str, context: &str);

    /// Structured operational logging through the host's channel.
    fn log(&self, message: &str, severity: LogSeverity);

    fn list_vocabularies(&self) -> Vec<Vocabulary>;

    fn save_file(&self, file: FileSpec) -> Result<SavedFile, CmsError>;

    /// Filesystem path of a host extension, if registered.
    fn path_of(&self, kind: &str, name: &str) -> Option<PathBuf>;

    /// The host installation root.
    fn cms_root(&self) -> PathBuf;
}

/// Whether a contact address carries the bulk-generation sentinel suffix.
pub(crate) fn mail_is_generated(mail: Option<&str>) -> bool {
    mail.is_some_and(|m| m.ends_with(GENERATED_MAIL_SUFFIX))
}

/// Whether a marker property counts as set.
///
/// Presence-based: the bulk-generation tool stamps the property, whatever
/// value it carries. Only a missing property or an explicit `null` is
/// absent — `false` and `0` still mean "this content was generated".
pub(crate) fn marker_is_set(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

/// Forwards a host log line to `tracing` at the matching level.
pub(crate) fn emit(message: &str, severity: LogSeverity) {
    match severity {
        LogSeverity::Debug => tracing::debug!(target: "lifelike::host", "{message}"),
        LogSeverity::Info => tracing::info!(target: "lifelike::host", "{message}"),
        LogSeverity::Warning => tracing::warn!(target: "lifelike::host", "{message}"),
        LogSeverity::Error => tracing::error!(target: "lifelike::host", "{message}"),
    }
}
