//! Integration tests for the full enrichment run.
//!
//! These drive the pipeline through the public API with mock
//! collaborators and a real file-backed store, covering the paths a
//! scheduled run actually takes: overlapping queries, partial failures,
//! the optional analysis step, and fatal storage errors.

use chrono::NaiveDate;
use std::sync::Arc;

use enrichment::testing::{MockAnalyst, MockEventSource};
use enrichment::{
    AnalysisBrief, Category, EventDocument, EventStore, JsonFileStore, Jurisdiction, MemoryStore,
    Pipeline, PipelineConfig, QuerySpec, RegulatoryEvent, RiskLevel, Severity, TimeWindow,
    WeeklySnapshot, MAX_HISTORY_WEEKS,
};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn window() -> TimeWindow {
    TimeWindow::ending_at("2024-01-12T00:00:00Z".parse().unwrap(), 7)
}

fn single_query_config() -> PipelineConfig {
    PipelineConfig::new()
        .with_queries([QuerySpec::new("cryptocurrency exchanges", "regulatory action")])
}

fn brief() -> AnalysisBrief {
    AnalysisBrief {
        risk_level: RiskLevel::Elevated,
        summary: "Enforcement pressure increased.".to_string(),
        key_developments: vec![],
        trends: vec!["More coordinated actions".to_string()],
        outlook: "Further actions likely.".to_string(),
        recommendations: vec![],
    }
}

#[tokio::test]
async fn overlapping_batches_collapse_and_classify() {
    // Two batches report the same action; descriptions agree on the
    // first 80 characters and diverge after.
    let padding = "additional regulator commentary follows in the full text of the press release";
    let source = MockEventSource::new()
        .with_batch(
            "cryptocurrency exchanges",
            "regulatory action",
            vec![RegulatoryEvent::new()
                .with_entity("Binance")
                .with_description(format!("SEC fine imposed {padding} - first wire"))
                .with_timestamp("2024-01-10T00:00:00Z")],
        )
        .with_batch(
            "cryptocurrency exchanges",
            "sanctions",
            vec![RegulatoryEvent::new()
                .with_entity("Binance")
                .with_description(format!("SEC fine imposed {padding} - second wire"))
                .with_timestamp("2024-01-09T00:00:00Z")],
        );
    let store = MemoryStore::new();

    let config = PipelineConfig::new().with_queries([
        QuerySpec::new("cryptocurrency exchanges", "regulatory action"),
        QuerySpec::new("cryptocurrency exchanges", "sanctions"),
    ]);
    let pipeline = Pipeline::new(source, store).with_config(config);
    let report = pipeline.run_at(day("2024-01-12"), window()).await.unwrap();

    assert_eq!(report.raw_events, 2);
    assert_eq!(report.unique_events, 1);
    assert_eq!(report.high, 1);
    assert_eq!(report.critical, 0);
}

#[tokio::test]
async fn run_persists_through_a_real_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let source = MockEventSource::new().with_batch(
        "cryptocurrency exchanges",
        "regulatory action",
        vec![
            RegulatoryEvent::new()
                .with_entity("Binance")
                .with_description("SEC fine imposed")
                .with_timestamp("2024-01-10T00:00:00Z"),
            RegulatoryEvent::new()
                .with_entity("Unknown protocol")
                .with_description("undated chatter"),
        ],
    );

    let pipeline = Pipeline::new(source, JsonFileStore::new(dir.path().join("data")))
        .with_config(single_query_config());
    let report = pipeline.run_at(day("2024-01-12"), window()).await.unwrap();
    assert_eq!(report.unique_events, 2);

    // Reopen the store cold, the way the next run (or a dashboard)
    // would, and check the persisted shapes.
    let store = JsonFileStore::new(dir.path().join("data"));
    let document = store.load_events().await.unwrap().unwrap();
    let events = document.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].entity.as_deref(), Some("Binance"));
    assert_eq!(events[0].severity, Some(Severity::High));
    assert_eq!(events[0].jurisdiction, Some(Jurisdiction::UnitedStates));
    assert_eq!(events[0].category, Some(Category::Enforcement));
    // The undated event sorts last and still carries every label.
    assert_eq!(events[1].severity, Some(Severity::Low));
    assert_eq!(events[1].jurisdiction, Some(Jurisdiction::Other));
    assert_eq!(events[1].category, Some(Category::General));

    let history = store.load_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].week, day("2024-01-12"));
    assert_eq!(history[0].count, 2);
    assert_eq!(history[0].high, 1);
}

#[tokio::test]
async fn analysis_success_rewrites_the_event_store() {
    let dir = tempfile::tempdir().unwrap();
    let source = MockEventSource::new().with_batch(
        "cryptocurrency exchanges",
        "regulatory action",
        vec![RegulatoryEvent::new()
            .with_entity("Binance")
            .with_description("SEC fine imposed")],
    );

    let pipeline = Pipeline::new(source, JsonFileStore::new(dir.path().join("data")))
        .with_config(single_query_config())
        .with_analyst(MockAnalyst::new().with_brief(brief()));
    let report = pipeline.run_at(day("2024-01-12"), window()).await.unwrap();
    assert!(report.analyzed);

    let store = JsonFileStore::new(dir.path().join("data"));
    match store.load_events().await.unwrap().unwrap() {
        EventDocument::Analyzed(set) => {
            assert_eq!(set.analysis.risk_level, RiskLevel::Elevated);
            assert_eq!(set.events.len(), 1);
        }
        EventDocument::Events(_) => panic!("expected the analyzed wrapper"),
    }
}

#[tokio::test]
async fn analyst_failure_leaves_plain_events_persisted() {
    let source = MockEventSource::new().with_batch(
        "cryptocurrency exchanges",
        "regulatory action",
        vec![RegulatoryEvent::new()
            .with_entity("Binance")
            .with_description("SEC fine imposed")],
    );
    let store = MemoryStore::new();

    let pipeline = Pipeline::new(source, store)
        .with_config(single_query_config())
        .with_analyst(MockAnalyst::new().failing());
    let report = pipeline.run_at(day("2024-01-12"), window()).await.unwrap();

    assert!(!report.analyzed);
}

#[tokio::test]
async fn history_rolls_forward_and_stays_bounded() {
    let mut seeded = Vec::new();
    for week in 0..MAX_HISTORY_WEEKS {
        seeded.push(WeeklySnapshot {
            week: day("2023-01-01") + chrono::Duration::weeks(week as i64),
            count: 1,
            critical: 0,
            high: 0,
        });
    }
    let evicted = seeded[0].week;

    let source = MockEventSource::new();
    let store = Arc::new(MemoryStore::new().with_history(seeded));
    let pipeline =
        Pipeline::new(source, Arc::clone(&store)).with_config(single_query_config());
    let report = pipeline.run_at(day("2024-01-12"), window()).await.unwrap();

    assert_eq!(report.history_len, MAX_HISTORY_WEEKS);
    let history = store.history();
    assert_eq!(history.len(), MAX_HISTORY_WEEKS);
    assert_eq!(history.last().unwrap().week, day("2024-01-12"));
    assert!(history.iter().all(|s| s.week != evicted));
}

#[tokio::test]
async fn storage_failure_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the data directory should be makes every save fail.
    let blocker = dir.path().join("data");
    tokio::fs::write(&blocker, b"in the way").await.unwrap();

    let source = MockEventSource::new().with_batch(
        "cryptocurrency exchanges",
        "regulatory action",
        vec![RegulatoryEvent::new().with_entity("Binance")],
    );
    let pipeline = Pipeline::new(source, JsonFileStore::new(&blocker))
        .with_config(single_query_config());

    let result = pipeline.run_at(day("2024-01-12"), window()).await;
    assert!(result.is_err());
}
