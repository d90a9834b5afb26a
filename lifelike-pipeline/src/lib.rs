//! Dummy detection and field-filtered enrichment for Lifelike.
//!
//! Augments machine-generated placeholder content with more realistic values
//! before the host persists it, without ever touching content a human author
//! created or edited. The flow for one lifecycle callback:
//!
//! detect → filter → enrich → validate → (on failure) recover
//!
//! - [`DummyDetector`] — classifies an entity as placeholder vs authored
//! - [`ContentEnricher`] / [`EntityValidator`] — the external collaborators
//!   that compute replacement values and reject bad results
//! - [`EnrichmentPipeline`] — orchestrates one invocation; all collaborator
//!   failures are contained at its boundary, logged, and swallowed so a bug
//!   in enrichment logic can never block a real save
//! - [`UserLifecycle`] / [`EntityLifecycle`] — per-entity-type glue mapping
//!   the host's lifecycle callbacks onto pipeline invocations with the right
//!   field filter
//! - [`LifecycleSignals`] — host-version-fragile signal names, kept as
//!   configuration instead of hardcode

mod detect;
mod enrich;
mod lifecycle;
mod pipeline;
mod signals;

pub use detect::DummyDetector;
pub use enrich::{AcceptAll, ContentEnricher, EntityValidator, FieldOverlayEnricher};
pub use lifecycle::{EntityLifecycle, LifecycleContext, UserLifecycle};
pub use pipeline::{EnrichmentAttempt, EnrichmentPipeline, PipelineOutcome};
pub use signals::LifecycleSignals;
