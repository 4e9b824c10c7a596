//! Integration tests for the discovery pipeline.
//!
//! These exercise the full supervisor loop end to end:
//! 1. Sources run in declared order
//! 2. Aggregation is lossless
//! 3. Validation drops junk and merges duplicates
//! 4. Enrichment assigns ids / applies the headquarters fallback
//! 5. Failure isolation and resumability hold

use std::time::Duration;

use discovery::{
    next_step, DiscoveryConfig, DiscoveryPipeline, FailingSource, LocationCandidate, MockSource,
    NextStep, SessionStatus, SlowSource, SourceKind, StaticHeadquarters,
};

fn candidate(source: SourceKind, city: &str, name: &str) -> LocationCandidate {
    LocationCandidate::new(source, city).with_name(name)
}

#[tokio::test]
async fn test_fuzzy_merge_keeps_one_per_location() {
    // Scenario: two sources report the same Austin office under names
    // where one contains the other.
    let pipeline = DiscoveryPipeline::new()
        .with_source(
            MockSource::new(SourceKind::Maps)
                .with_candidate(candidate(SourceKind::Maps, "Austin", "Acme Austin Office")),
        )
        .with_source(
            MockSource::new(SourceKind::WebSearch)
                .with_candidate(candidate(SourceKind::WebSearch, "Austin", "Acme Austin")),
        )
        .with_source(MockSource::new(SourceKind::Filings));

    let session = pipeline.run("Acme Corp", None).await;

    assert_eq!(session.status, SessionStatus::Completed);
    let final_locations = session.final_locations.as_ref().unwrap();
    assert_eq!(final_locations.len(), 1);
    assert_eq!(final_locations[0].city, "Austin");
    // First seen (declared source order) wins.
    assert_eq!(final_locations[0].source, SourceKind::Maps);
}

#[tokio::test]
async fn test_all_sources_empty_completes_with_nothing() {
    let pipeline = DiscoveryPipeline::new()
        .with_source(MockSource::new(SourceKind::Maps))
        .with_source(MockSource::new(SourceKind::WebSearch))
        .with_headquarters(StaticHeadquarters::empty());

    let session = pipeline.run("Nobody Knows Ltd", None).await;

    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.final_locations.as_ref().unwrap().len(), 0);
    assert!(session.errors.is_empty());
    assert!(session.log.iter().any(|l| l.contains("no locations found")));
}

#[tokio::test]
async fn test_source_failure_is_isolated() {
    let pipeline = DiscoveryPipeline::new()
        .with_source(FailingSource::new(SourceKind::Maps, "quota exceeded"))
        .with_source(
            MockSource::new(SourceKind::WebSearch)
                .with_candidate(candidate(SourceKind::WebSearch, "Oslo", "Acme Oslo")),
        );

    let session = pipeline.run("Acme Corp", None).await;

    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.errors.len(), 1);
    assert!(session.errors[0].contains("quota exceeded"));
    // The failed slot exists and is empty; the healthy source still counts.
    assert!(session.source_results[&SourceKind::Maps].is_empty());
    assert_eq!(session.final_locations.as_ref().unwrap().len(), 1);
}

#[tokio::test]
async fn test_placeholder_candidates_are_dropped() {
    let pipeline = DiscoveryPipeline::new()
        .with_source(
            MockSource::new(SourceKind::Maps)
                .with_candidate(candidate(SourceKind::Maps, "unknown location", "Acme")),
        )
        .with_source(
            MockSource::new(SourceKind::Directory)
                .with_candidate(candidate(SourceKind::Directory, "Unknown Location", "Branch")),
        )
        .with_headquarters(StaticHeadquarters::empty());

    let session = pipeline.run("Acme Corp", None).await;

    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.aggregated.as_ref().unwrap().len(), 2);
    assert!(session.deduplicated.as_ref().unwrap().is_empty());
}

#[tokio::test]
async fn test_finished_session_routes_to_end_and_rerun_is_noop() {
    let pipeline = DiscoveryPipeline::new().with_source(
        MockSource::new(SourceKind::Maps)
            .with_candidate(candidate(SourceKind::Maps, "Austin", "HQ")),
    );

    let mut session = pipeline.run("Acme Corp", None).await;
    assert_eq!(session.status, SessionStatus::Completed);

    assert_eq!(
        next_step(&session, &pipeline.declared_order()),
        NextStep::End
    );

    let before_log = session.log.clone();
    let before_final = session.final_locations.clone();
    pipeline.run_to_completion(&mut session).await.unwrap();

    assert_eq!(session.log, before_log);
    assert_eq!(
        session.final_locations.as_ref().unwrap().len(),
        before_final.as_ref().unwrap().len()
    );
}

#[tokio::test]
async fn test_aggregation_is_lossless_and_stages_non_expansive() {
    let pipeline = DiscoveryPipeline::new()
        .with_source(MockSource::new(SourceKind::Maps).with_candidates(vec![
            candidate(SourceKind::Maps, "Austin", "Acme Austin"),
            candidate(SourceKind::Maps, "Boston", "Acme Boston"),
        ]))
        .with_source(
            MockSource::new(SourceKind::WebSearch).with_candidates(vec![
                candidate(SourceKind::WebSearch, "Austin", "Acme Austin Office"),
                candidate(SourceKind::WebSearch, "", "No City"),
            ]),
        )
        .with_source(MockSource::new(SourceKind::Filings));

    let session = pipeline.run("Acme Corp", None).await;

    let aggregated = session.aggregated.as_ref().unwrap();
    let deduplicated = session.deduplicated.as_ref().unwrap();
    let final_locations = session.final_locations.as_ref().unwrap();

    assert_eq!(aggregated.len(), session.source_candidate_count());
    assert!(final_locations.len() <= deduplicated.len());
    assert!(deduplicated.len() <= aggregated.len());
    assert!(deduplicated.iter().all(|c| !c.city.trim().is_empty()));
}

#[tokio::test]
async fn test_enrichment_assigns_stable_ids() {
    let pipeline = DiscoveryPipeline::new().with_source(
        MockSource::new(SourceKind::Maps).with_candidates(vec![
            candidate(SourceKind::Maps, "Austin", "HQ"),
            candidate(SourceKind::Maps, "Oslo", ""),
        ]),
    );

    let session = pipeline.run("Acme Corp", None).await;

    let final_locations = session.final_locations.as_ref().unwrap();
    assert_eq!(final_locations[0].id.as_deref(), Some("LOC_001"));
    assert_eq!(final_locations[1].id.as_deref(), Some("LOC_002"));
    assert_eq!(final_locations[1].name, "Acme Corp - Oslo");
}

#[tokio::test]
async fn test_headquarters_fallback_seeds_final_list() {
    let pipeline = DiscoveryPipeline::new()
        .with_source(MockSource::new(SourceKind::Maps))
        .with_headquarters(StaticHeadquarters::default());

    let session = pipeline.run("Microsoft Corporation", None).await;

    assert_eq!(session.status, SessionStatus::Completed);
    let final_locations = session.final_locations.as_ref().unwrap();
    assert_eq!(final_locations.len(), 1);
    assert_eq!(final_locations[0].city, "Redmond");
    assert_eq!(final_locations[0].source, SourceKind::KnownHeadquarters);
}

#[tokio::test(start_paused = true)]
async fn test_slow_source_times_out_and_run_completes() {
    let config = DiscoveryConfig::new().with_source_timeout(Duration::from_secs(2));
    let pipeline = DiscoveryPipeline::new()
        .with_config(config)
        .with_source(SlowSource::new(SourceKind::SiteCrawl, Duration::from_secs(600)))
        .with_source(
            MockSource::new(SourceKind::Directory)
                .with_candidate(candidate(SourceKind::Directory, "Oslo", "Acme Oslo")),
        );

    let session = pipeline.run("Acme Corp", None).await;

    assert_eq!(session.status, SessionStatus::Completed);
    assert!(session.errors.iter().any(|e| e.contains("timed out")));
    assert_eq!(session.final_locations.as_ref().unwrap().len(), 1);
}

#[tokio::test]
async fn test_iteration_cap_marks_session_failed() {
    // A cap too small for the stage count trips the contract check.
    let pipeline = DiscoveryPipeline::new()
        .with_config(DiscoveryConfig::new().with_max_iterations(1))
        .with_source(MockSource::new(SourceKind::Maps))
        .with_source(MockSource::new(SourceKind::WebSearch));

    let session = pipeline.run("Acme Corp", None).await;

    assert_eq!(session.status, SessionStatus::Failed);
    assert!(session.final_locations.is_none());
    assert!(session
        .errors
        .iter()
        .any(|e| e.contains("iteration limit")));
}

#[tokio::test]
async fn test_resume_partial_session() {
    let maps = MockSource::new(SourceKind::Maps)
        .with_candidate(candidate(SourceKind::Maps, "Austin", "HQ"));
    let pipeline = DiscoveryPipeline::new()
        .with_source(maps)
        .with_source(
            MockSource::new(SourceKind::WebSearch)
                .with_candidate(candidate(SourceKind::WebSearch, "Oslo", "Acme Oslo")),
        );

    // Simulate a prior partial run: the maps slot is already present.
    let mut session = discovery::DiscoverySession::new("Acme Corp", None);
    session
        .source_results
        .insert(SourceKind::Maps, vec![candidate(SourceKind::Maps, "Austin", "HQ")]);

    pipeline.run_to_completion(&mut session).await.unwrap();

    assert_eq!(session.status, SessionStatus::Completed);
    // The pre-filled stage was not re-executed.
    assert_eq!(session.source_results[&SourceKind::Maps].len(), 1);
    assert_eq!(session.final_locations.as_ref().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sources_receive_normalized_url() {
    let maps = MockSource::new(SourceKind::Maps);
    let mut session = discovery::DiscoverySession::new("Acme Corp", Some("  acme.com  "));
    assert_eq!(session.company_url, "https://acme.com");

    discovery::run_source_stage(&mut session, &maps, None).await;
    assert_eq!(
        maps.called_with(),
        vec![("Acme Corp".to_string(), "https://acme.com".to_string())]
    );

    // Sentinel URLs reach sources as the empty string, not the sentinel.
    let pipeline = DiscoveryPipeline::new().with_source(MockSource::new(SourceKind::Maps));
    let session2 = pipeline.run("Acme Corp", Some("n/a")).await;
    assert_eq!(session2.company_url, "");
    assert_eq!(session2.status, SessionStatus::Completed);
}

#[tokio::test]
async fn test_summary_reports_per_source_counts() {
    let pipeline = DiscoveryPipeline::new()
        .with_source(
            MockSource::new(SourceKind::Maps)
                .with_candidate(candidate(SourceKind::Maps, "Austin", "HQ")),
        )
        .with_source(FailingSource::new(SourceKind::Filings, "down"));

    let session = pipeline.run("Acme Corp", Some("acme.com")).await;
    let summary = session.summary();

    assert_eq!(summary.status, SessionStatus::Completed);
    assert!(summary.url_provided);
    assert_eq!(summary.total_locations, 1);
    assert_eq!(summary.candidates_per_source[&SourceKind::Maps], 1);
    assert_eq!(summary.candidates_per_source[&SourceKind::Filings], 0);
    assert_eq!(summary.error_count, 1);
}
