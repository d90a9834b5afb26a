//! Host-agnostic content model for Lifelike.
//!
//! Defines the semantic types the enrichment pipeline and CMS adapters
//! exchange:
//! - [`Entity`] — a mutable content record (type, bundle, JSON field data)
//! - [`EntitySpec`] — a request to create a minimal entity of some type
//! - [`FieldFilter`] — declarative include/exclude spec limiting which fields
//!   an operation may touch
//! - [`FieldDefinition`] — one entry of the host's field catalog
//! - [`Vocabulary`], [`FileSpec`], [`SavedFile`] — passthrough records for the
//!   thin host subsystems downstream enrichment logic needs
//!
//! Nothing in this crate performs I/O or knows which host CMS version is
//! active; the shape of individual field *values* is interpreted only by the
//! version adapters in `lifelike-cms`.

mod entity;
mod field;
mod filter;

pub use entity::{Entity, EntitySpec};
pub use field::{FieldDefinition, FieldKind, FileSpec, SavedFile, Vocabulary};
pub use filter::FieldFilter;
