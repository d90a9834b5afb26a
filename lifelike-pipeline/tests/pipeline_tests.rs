mod common;

use common::{FailingEnricher, PanickingEnricher, RecordingAdapter, TrackingEnricher};
use anyhow::bail;
use lifelike_cms::{adapter_for, CmsAdapter, HostVersion, InMemoryHost, LogSeverity};
use lifelike_model::{Entity, FieldFilter};
use lifelike_pipeline::{
    AcceptAll, ContentEnricher, EnrichmentPipeline, EntityValidator, PipelineOutcome,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn recording_adapter() -> Arc<RecordingAdapter> {
    let host = Arc::new(InMemoryHost::new("/srv/cms"));
    Arc::new(RecordingAdapter::new(adapter_for(
        HostVersion::Legacy,
        host,
    )))
}

fn dummy_user() -> Entity {
    let mut user = Entity::new("user", "user");
    user.data["mail"] = json!("a@b.invalid");
    user.data["name"] = json!("123456");
    user
}

fn authored_user() -> Entity {
    let mut user = Entity::new("user", "user");
    user.data["mail"] = json!("a@b.com");
    user.data["name"] = json!("alice");
    user
}

// ── Authored content is never touched ────────────────────────────

#[test]
fn authored_content_is_skipped() {
    let adapter = recording_adapter();
    let enricher = Arc::new(TrackingEnricher::over(&["name", "mail"]));
    let pipeline = EnrichmentPipeline::new(
        adapter.clone() as Arc<dyn CmsAdapter>,
        enricher.clone(),
        Arc::new(AcceptAll),
    );

    let mut user = authored_user();
    let before = user.data.clone();
    let outcome = pipeline.process(&mut user, "user", &FieldFilter::Unrestricted);

    assert_eq!(outcome, PipelineOutcome::Skipped);
    assert_eq!(user.data, before);
    assert!(enricher.touched_fields().is_empty());
}

// ── Dummy content is enriched through the filter ─────────────────

#[test]
fn dummy_content_is_enriched() {
    let adapter = recording_adapter();
    let enricher = Arc::new(TrackingEnricher::over(&["name", "signature"]));
    let pipeline = EnrichmentPipeline::new(
        adapter.clone() as Arc<dyn CmsAdapter>,
        enricher.clone(),
        Arc::new(AcceptAll),
    );

    let mut user = dummy_user();
    let outcome = pipeline.process(&mut user, "user", &FieldFilter::Unrestricted);

    assert_eq!(outcome, PipelineOutcome::Enriched);
    assert_eq!(user.data["name"], json!("enriched-name"));
    assert_eq!(user.data["signature"], json!("enriched-signature"));
    assert!(adapter.log_entries().is_empty());
}

#[test]
fn filter_limits_what_enrichment_touches() {
    let adapter = recording_adapter();
    let enricher = Arc::new(TrackingEnricher::over(&["name", "signature"]));
    let pipeline = EnrichmentPipeline::new(
        adapter as Arc<dyn CmsAdapter>,
        enricher.clone(),
        Arc::new(AcceptAll),
    );

    let mut user = dummy_user();
    pipeline.process(&mut user, "user", &FieldFilter::exclude(["signature"]));

    assert_eq!(enricher.touched_fields(), vec!["name".to_string()]);
    assert!(!user.has_field("signature"));
}

// ── Recovery boundary ────────────────────────────────────────────

#[test]
fn enricher_failure_is_recovered_with_one_log_entry() {
    let adapter = recording_adapter();
    let pipeline = EnrichmentPipeline::new(
        adapter.clone() as Arc<dyn CmsAdapter>,
        Arc::new(FailingEnricher {
            message: "no replacement values for bundle".to_string(),
        }),
        Arc::new(AcceptAll),
    );

    let mut user = dummy_user();
    let outcome = pipeline.process(&mut user, "user", &FieldFilter::Unrestricted);

    assert_eq!(outcome, PipelineOutcome::Recovered);
    // Partial mutation stands exactly as it was at the point of failure.
    assert_eq!(user.data["name"], json!("partially enriched"));

    let logs = adapter.log_entries();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].0.contains("no replacement values for bundle"));
    assert_eq!(logs[0].1, LogSeverity::Error);
}

#[test]
fn validator_rejection_is_recovered() {
    struct RejectEverything;
    impl EntityValidator for RejectEverything {
        fn validate(&self, _entity: &Entity, _entity_type: &str) -> anyhow::Result<()> {
            bail!("mail field violates profile constraints")
        }
    }

    let adapter = recording_adapter();
    let pipeline = EnrichmentPipeline::new(
        adapter.clone() as Arc<dyn CmsAdapter>,
        Arc::new(TrackingEnricher::over(&["name"])),
        Arc::new(RejectEverything),
    );

    let mut user = dummy_user();
    let outcome = pipeline.process(&mut user, "user", &FieldFilter::Unrestricted);

    assert_eq!(outcome, PipelineOutcome::Recovered);
    // Enrichment had already run; the mutation stands.
    assert_eq!(user.data["name"], json!("enriched-name"));

    let logs = adapter.log_entries();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].0.contains("mail field violates profile constraints"));
}

#[test]
fn panic_in_enricher_does_not_escape() {
    let adapter = recording_adapter();
    let pipeline = EnrichmentPipeline::new(
        adapter.clone() as Arc<dyn CmsAdapter>,
        Arc::new(PanickingEnricher),
        Arc::new(AcceptAll),
    );

    let mut user = dummy_user();
    let outcome = pipeline.process(&mut user, "user", &FieldFilter::Unrestricted);

    assert_eq!(outcome, PipelineOutcome::Recovered);
    let logs = adapter.log_entries();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].0.contains("enrichment step exploded"));
}

#[test]
fn recovery_leaves_pipeline_reusable() {
    let adapter = recording_adapter();
    struct FlakyEnricher {
        calls: std::sync::Mutex<u32>,
    }
    impl ContentEnricher for FlakyEnricher {
        fn enrich(
            &self,
            entity: &mut Entity,
            _entity_type: &str,
            _filter: &FieldFilter,
        ) -> anyhow::Result<()> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls == 1 {
                bail!("transient failure");
            }
            entity.data["name"] = json!("second try");
            Ok(())
        }
    }

    let pipeline = EnrichmentPipeline::new(
        adapter.clone() as Arc<dyn CmsAdapter>,
        Arc::new(FlakyEnricher {
            calls: std::sync::Mutex::new(0),
        }),
        Arc::new(AcceptAll),
    );

    let mut user = dummy_user();
    assert_eq!(
        pipeline.process(&mut user, "user", &FieldFilter::Unrestricted),
        PipelineOutcome::Recovered
    );
    assert_eq!(
        pipeline.process(&mut user, "user", &FieldFilter::Unrestricted),
        PipelineOutcome::Enriched
    );
    assert_eq!(user.data["name"], json!("second try"));
}

// ── Marker-based detection feeds the pipeline too ────────────────

#[test]
fn marker_flagged_content_item_is_enriched() {
    let adapter = recording_adapter();
    let enricher = Arc::new(TrackingEnricher::over(&["title"]));
    let pipeline = EnrichmentPipeline::new(
        adapter as Arc<dyn CmsAdapter>,
        enricher,
        Arc::new(AcceptAll),
    );

    let mut item = Entity::new("content-item", "article");
    item.data["devel_generate"] = json!(true);
    let outcome = pipeline.process(&mut item, "content-item", &FieldFilter::Unrestricted);

    assert_eq!(outcome, PipelineOutcome::Enriched);
    assert_eq!(item.data["title"], json!("enriched-title"));
}
