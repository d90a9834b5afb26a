//! Error types for the CMS abstraction layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmsError {
    /// `create_entity` was asked for a type the adapter does not support.
    /// Surfaced to the caller — entity creation is a deliberate action,
    /// never a passive lifecycle interception.
    #[error("unsupported entity type: {0}")]
    UnsupportedEntityType(String),

    #[error("entity not found: {0}")]
    EntityNotFound(u64),

    #[error("file save failed: {0}")]
    FileSave(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
