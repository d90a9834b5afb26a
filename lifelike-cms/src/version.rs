//! One-time host version selection.
//!
//! The process picks its adapter exactly once at startup and threads the
//! resulting `Arc<dyn CmsAdapter>` through every consumer. Nothing else in
//! the system ever inspects the host version.

use crate::adapter::CmsAdapter;
use crate::host::InMemoryHost;
use crate::legacy::LegacyAdapter;
use crate::modern::ModernAdapter;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Supported host CMS major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostVersion {
    /// Major version 1: plain entity properties.
    Legacy,
    /// Major version 2+: structured field values.
    Modern,
}

/// Constructs the adapter for a known host version.
pub fn adapter_for(version: HostVersion, host: Arc<InMemoryHost>) -> Arc<dyn CmsAdapter> {
    info!(?version, "selecting CMS adapter");
    match version {
        HostVersion::Legacy => Arc::new(LegacyAdapter::new(host)),
        HostVersion::Modern => Arc::new(ModernAdapter::new(host)),
    }
}

/// Detects the host version from its `core.version` state entry and
/// constructs the matching adapter. Hosts that do not report a version are
/// treated as legacy.
pub fn adapter_for_detected(host: Arc<InMemoryHost>) -> Arc<dyn CmsAdapter> {
    let reported = host
        .state("core.version")
        .unwrap_or(json!("1"))
        .as_str()
        .and_then(|v| v.split('.').next()?.parse::<u32>().ok())
        .unwrap_or(1);
    let version = if reported >= 2 {
        HostVersion::Modern
    } else {
        HostVersion::Legacy
    };
    adapter_for(version, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifelike_model::Entity;
    use serde_json::json;

    #[test]
    fn detection_defaults_to_legacy() {
        let host = Arc::new(InMemoryHost::new("/srv/cms"));
        let adapter = adapter_for_detected(host);
        // Legacy adapters read plain properties.
        let mut entity = Entity::new("user", "user");
        adapter.set_entity_property(&mut entity, "mail", json!("a@b.com"));
        assert_eq!(entity.data["mail"], json!("a@b.com"));
    }

    #[test]
    fn detection_picks_modern_for_version_two() {
        let host = Arc::new(InMemoryHost::new("/srv/cms"));
        host.set_state("core.version", json!("2.7"));
        let adapter = adapter_for_detected(host);
        let mut entity = Entity::new("user", "user");
        adapter.set_entity_property(&mut entity, "mail", json!("a@b.com"));
        assert_eq!(entity.data["mail"], json!({"value": "a@b.com"}));
    }

    #[test]
    fn detection_tolerates_garbage_version_strings() {
        let host = Arc::new(InMemoryHost::new("/srv/cms"));
        host.set_state("core.version", json!("not-a-version"));
        let adapter = adapter_for_detected(host);
        let mut entity = Entity::new("user", "user");
        adapter.set_entity_property(&mut entity, "mail", json!("a@b.com"));
        assert_eq!(entity.data["mail"], json!("a@b.com"));
    }
}
