//! CMS abstraction layer for Lifelike.
//!
//! Wraps all host-specific entity/field/config access behind the
//! [`CmsAdapter`] capability trait so the detector, pipeline, and lifecycle
//! glue are version-agnostic. One concrete adapter exists per supported host
//! major version:
//! - [`LegacyAdapter`] — hosts that store entity values as plain properties
//! - [`ModernAdapter`] — hosts that store structured `{ "value": … }` field
//!   values
//!
//! Exactly one adapter is active per process, selected once at startup via
//! [`adapter_for`] (or [`adapter_for_detected`]) and injected into every
//! consumer as an explicit dependency. The adapter holds no per-entity state,
//! so reuse across sequential lifecycle callbacks is safe.

mod adapter;
mod error;
mod host;
mod legacy;
mod modern;
mod version;

pub use adapter::{CmsAdapter, LogSeverity, GENERATED_MAIL_SUFFIX};
pub use error::CmsError;
pub use host::InMemoryHost;
pub use legacy::LegacyAdapter;
pub use modern::ModernAdapter;
pub use version::{adapter_for, adapter_for_detected, HostVersion};
