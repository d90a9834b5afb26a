//! In-memory stand-in for the host CMS's subsystems.
//!
//! Holds everything the version adapters map onto: entity records, config and
//! state maps, the module list, the field catalog, vocabularies, ordered
//! alter/handler registries, saved files, and extension paths. The host is
//! the one longer-lived shared resource in the process; all interior
//! mutability sits behind `RwLock`s so a single instance can back sequential
//! lifecycle callbacks from anywhere.

use lifelike_model::{Entity, FieldDefinition, FileSpec, SavedFile, Vocabulary};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A listener registered for an alter hook; receives the hook name and the
/// payload to mutate in place.
pub type AlterListener = Box<dyn Fn(&str, &mut Value) + Send + Sync>;

/// A handler registered for a broadcast hook; returns its contribution.
pub type HookHandler = Box<dyn Fn(&Value) -> Value + Send + Sync>;

pub struct InMemoryHost {
    entities: RwLock<BTreeMap<u64, Entity>>,
    next_entity_id: AtomicU64,
    config: RwLock<HashMap<String, Value>>,
    state: RwLock<HashMap<String, Value>>,
    modules: RwLock<BTreeSet<String>>,
    fields: RwLock<Vec<FieldDefinition>>,
    vocabularies: RwLock<Vec<Vocabulary>>,
    alter_listeners: RwLock<HashMap<String, Vec<AlterListener>>>,
    handlers: RwLock<HashMap<String, Vec<HookHandler>>>,
    files: RwLock<BTreeMap<u64, (SavedFile, Vec<u8>)>>,
    next_file_id: AtomicU64,
    paths: RwLock<HashMap<(String, String), PathBuf>>,
    root: PathBuf,
}

/// Lock accessors recover from poisoning: a panicked writer elsewhere must
/// not take the host down with it.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl InMemoryHost {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
            next_entity_id: AtomicU64::new(1),
            config: RwLock::new(HashMap::new()),
            state: RwLock::new(HashMap::new()),
            modules: RwLock::new(BTreeSet::new()),
            fields: RwLock::new(Vec::new()),
            vocabularies: RwLock::new(Vec::new()),
            alter_listeners: RwLock::new(HashMap::new()),
            handlers: RwLock::new(HashMap::new()),
            files: RwLock::new(BTreeMap::new()),
            next_file_id: AtomicU64::new(1),
            paths: RwLock::new(HashMap::new()),
            root: root.as_ref().to_path_buf(),
        }
    }

    // ================================================================
    // Entities
    // ================================================================

    /// Assigns an identifier and stores the entity, returning the saved copy.
    pub fn insert_entity(&self, mut entity: Entity) -> Entity {
        let id = self.next_entity_id.fetch_add(1, Ordering::Relaxed);
        entity.id = Some(id);
        write(&self.entities).insert(id, entity.clone());
        entity
    }

    pub fn entity(&self, id: u64) -> Option<Entity> {
        read(&self.entities).get(&id).cloned()
    }

    /// Overwrites a stored entity in place; ignores unsaved entities.
    pub fn update_entity(&self, entity: &Entity) {
        if let Some(id) = entity.id {
            write(&self.entities).insert(id, entity.clone());
        }
    }

    pub fn entities_of_type(&self, entity_type: &str) -> Vec<Entity> {
        read(&self.entities)
            .values()
            .filter(|e| e.entity_type == entity_type)
            .cloned()
            .collect()
    }

    /// Removes every entity of the given type, returning how many went away.
    pub fn delete_entities_of_type(&self, entity_type: &str) -> usize {
        let mut entities = write(&self.entities);
        let doomed: Vec<u64> = entities
            .iter()
            .filter(|(_, e)| e.entity_type == entity_type)
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            entities.remove(id);
        }
        doomed.len()
    }

    pub fn entity_count(&self) -> usize {
        read(&self.entities).len()
    }

    // ================================================================
    // Config / state
    // ================================================================

    pub fn set_config(&self, name: &str, value: Value) {
        write(&self.config).insert(name.to_string(), value);
    }

    pub fn config(&self, name: &str) -> Option<Value> {
        read(&self.config).get(name).cloned()
    }

    pub fn set_state(&self, name: &str, value: Value) {
        write(&self.state).insert(name.to_string(), value);
    }

    pub fn state(&self, name: &str) -> Option<Value> {
        read(&self.state).get(name).cloned()
    }

    // ================================================================
    // Modules, fields, vocabularies, paths
    // ================================================================

    pub fn enable_module(&self, name: &str) {
        write(&self.modules).insert(name.to_string());
    }

    pub fn module_enabled(&self, name: &str) -> bool {
        read(&self.modules).contains(name)
    }

    pub fn module_names(&self) -> Vec<String> {
        read(&self.modules).iter().cloned().collect()
    }

    pub fn define_field(&self, field: FieldDefinition) {
        write(&self.fields).push(field);
    }

    pub fn field_catalog(&self) -> Vec<FieldDefinition> {
        read(&self.fields).clone()
    }

    pub fn define_vocabulary(&self, vocabulary: Vocabulary) {
        write(&self.vocabularies).push(vocabulary);
    }

    pub fn vocabulary_list(&self) -> Vec<Vocabulary> {
        read(&self.vocabularies).clone()
    }

    pub fn register_path(&self, kind: &str, name: &str, path: impl AsRef<Path>) {
        write(&self.paths).insert(
            (kind.to_string(), name.to_string()),
            path.as_ref().to_path_buf(),
        );
    }

    pub fn path(&self, kind: &str, name: &str) -> Option<PathBuf> {
        read(&self.paths)
            .get(&(kind.to_string(), name.to_string()))
            .cloned()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ================================================================
    // Hooks
    // ================================================================

    pub fn register_alter(&self, hook: &str, listener: AlterListener) {
        write(&self.alter_listeners)
            .entry(hook.to_string())
            .or_default()
            .push(listener);
    }

    /// Runs every listener for `hook` over `data`, in registration order.
    pub fn run_alter(&self, hook: &str, data: &mut Value) {
        let listeners = read(&self.alter_listeners);
        if let Some(hooks) = listeners.get(hook) {
            for listener in hooks {
                listener(hook, data);
            }
        }
    }

    pub fn register_handler(&self, hook: &str, handler: HookHandler) {
        write(&self.handlers)
            .entry(hook.to_string())
            .or_default()
            .push(handler);
    }

    /// Invokes every handler for `hook`, collecting results in registration
    /// order.
    pub fn invoke_handlers(&self, hook: &str, args: &Value) -> Vec<Value> {
        let handlers = read(&self.handlers);
        match handlers.get(hook) {
            Some(hooks) => hooks.iter().map(|h| h(args)).collect(),
            None => Vec::new(),
        }
    }

    // ================================================================
    // Files
    // ================================================================

    /// Stores a file and returns the host's record of it.
    pub fn store_file(&self, file: FileSpec) -> SavedFile {
        let id = self.next_file_id.fetch_add(1, Ordering::Relaxed);
        let saved = SavedFile {
            id,
            uri: format!("memory://files/{}", file.name),
        };
        write(&self.files).insert(id, (saved.clone(), file.contents));
        saved
    }

    pub fn file(&self, id: u64) -> Option<SavedFile> {
        read(&self.files).get(&id).map(|(saved, _)| saved.clone())
    }

    pub fn file_count(&self) -> usize {
        read(&self.files).len()
    }
}

impl std::fmt::Debug for InMemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryHost")
            .field("entities", &self.entity_count())
            .field("files", &self.file_count())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
