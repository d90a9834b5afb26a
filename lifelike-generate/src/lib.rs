//! Bulk placeholder generation.
//!
//! Thin integration over the CMS adapter's `create_entity`: creates N
//! entities of a type, optionally clearing out existing ones first. Creation
//! errors propagate to the caller — generation is a deliberate action, not a
//! lifecycle interception, so nothing is swallowed here.

use lifelike_cms::{CmsAdapter, CmsError, InMemoryHost};
use lifelike_model::{Entity, EntitySpec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// A bulk-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSpec {
    pub entity_type: String,
    pub quantity: u32,
    /// Delete existing entities of the type before generating.
    #[serde(default)]
    pub kill_existing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

impl GenerateSpec {
    pub fn new(entity_type: &str, quantity: u32) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            quantity,
            kill_existing: false,
            bundle: None,
        }
    }
}

pub struct Generator {
    adapter: Arc<dyn CmsAdapter>,
    host: Arc<InMemoryHost>,
}

impl Generator {
    pub fn new(adapter: Arc<dyn CmsAdapter>, host: Arc<InMemoryHost>) -> Self {
        Self { adapter, host }
    }

    /// Creates `spec.quantity` entities through the adapter, returning them
    /// in creation order. Fails on the first creation error.
    pub fn generate(&self, spec: &GenerateSpec) -> Result<Vec<Entity>, CmsError> {
        if spec.kill_existing {
            let removed = self.host.delete_entities_of_type(&spec.entity_type);
            info!(
                entity_type = %spec.entity_type,
                removed,
                "cleared existing entities before generation"
            );
        }

        let mut entity_spec = EntitySpec::of_type(&spec.entity_type);
        entity_spec.bundle = spec.bundle.clone();

        let mut created = Vec::with_capacity(spec.quantity as usize);
        for _ in 0..spec.quantity {
            created.push(self.adapter.create_entity(&entity_spec)?);
        }
        info!(
            entity_type = %spec.entity_type,
            count = created.len(),
            "generated entities"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifelike_cms::{adapter_for, HostVersion};
    use pretty_assertions::assert_eq;

    fn generator() -> (Generator, Arc<InMemoryHost>) {
        let host = Arc::new(InMemoryHost::new("/srv/cms"));
        let adapter = adapter_for(HostVersion::Legacy, Arc::clone(&host));
        (Generator::new(adapter, Arc::clone(&host)), host)
    }

    #[test]
    fn generates_requested_quantity() {
        let (generator, host) = generator();
        let created = generator.generate(&GenerateSpec::new("user", 5)).unwrap();
        assert_eq!(created.len(), 5);
        assert_eq!(host.entity_count(), 5);
        assert!(created.iter().all(|e| e.id.is_some()));
    }

    #[test]
    fn kill_existing_clears_only_the_requested_type() {
        let (generator, host) = generator();
        generator.generate(&GenerateSpec::new("user", 2)).unwrap();
        generator
            .generate(&GenerateSpec::new("content-item", 3))
            .unwrap();

        let mut spec = GenerateSpec::new("content-item", 1);
        spec.kill_existing = true;
        generator.generate(&spec).unwrap();

        assert_eq!(host.entities_of_type("content-item").len(), 1);
        assert_eq!(host.entities_of_type("user").len(), 2);
    }

    #[test]
    fn bundle_override_applies_to_every_entity() {
        let (generator, host) = generator();
        let mut spec = GenerateSpec::new("content-item", 2);
        spec.bundle = Some("page".to_string());
        let created = generator.generate(&spec).unwrap();
        assert!(created.iter().all(|e| e.bundle == "page"));
        assert_eq!(host.entity_count(), 2);
    }

    #[test]
    fn unsupported_type_propagates() {
        let (generator, host) = generator();
        let result = generator.generate(&GenerateSpec::new("bogus", 3));
        assert!(matches!(result, Err(CmsError::UnsupportedEntityType(_))));
        assert_eq!(host.entity_count(), 0);
    }

    #[test]
    fn zero_quantity_creates_nothing() {
        let (generator, host) = generator();
        let created = generator.generate(&GenerateSpec::new("user", 0)).unwrap();
        assert!(created.is_empty());
        assert_eq!(host.entity_count(), 0);
    }
}
