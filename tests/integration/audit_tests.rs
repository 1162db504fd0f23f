//! Integration tests for the audit pipeline
//!
//! These tests drive reports through the full lifecycle against wiremock
//! servers, with stub narrative generators standing in for the AI service.

use async_trait::async_trait;
use sitesage::config::{Config, CrawlerConfig, ReportFormat};
use sitesage::output::{render_report, write_report, OutputError};
use sitesage::report::{
    run_audit, AuditSummary, Insights, MemoryReportStore, NarrativeError, NarrativeGenerator,
    ReportId, ReportStatus, ReportStore, StoreError, StoreResult, StoredReport,
};
use sitesage::scoring::ScoreBreakdown;
use sitesage::{Coordinator, CrawlResult, SiteSageError};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Narrative generator that echoes the score back
#[derive(Default)]
struct EchoNarrative {
    calls: AtomicUsize,
}

#[async_trait]
impl NarrativeGenerator for EchoNarrative {
    async fn generate(
        &self,
        summary: &AuditSummary,
        score: &ScoreBreakdown,
    ) -> Result<Insights, NarrativeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let recommendations = score
            .issues
            .iter()
            .map(|issue| format!("Fix: {}", issue))
            .chain((0..10).map(|i| format!("Extra advice {}", i)))
            .collect();

        Ok(Insights::new(
            format!(
                "{} scored {:.2} with {} links",
                summary.url, score.overall_score, summary.total_links
            ),
            recommendations,
            Some("echo".to_string()),
        ))
    }
}

/// Narrative generator whose service is always down
struct FailingNarrative;

#[async_trait]
impl NarrativeGenerator for FailingNarrative {
    async fn generate(
        &self,
        _summary: &AuditSummary,
        _score: &ScoreBreakdown,
    ) -> Result<Insights, NarrativeError> {
        Err(NarrativeError::Unavailable("connection refused".to_string()))
    }
}

/// Memory store whose writes can be made to fail
#[derive(Default)]
struct UnreliableStore {
    inner: MemoryReportStore,
    fail_save_results: bool,
    fail_completion: bool,
}

impl ReportStore for UnreliableStore {
    fn create_report(&mut self, url: &str) -> StoreResult<ReportId> {
        self.inner.create_report(url)
    }

    fn get_report(&self, id: ReportId) -> StoreResult<StoredReport> {
        self.inner.get_report(id)
    }

    fn list_reports(&self, skip: usize, limit: usize) -> StoreResult<Vec<StoredReport>> {
        self.inner.list_reports(skip, limit)
    }

    fn delete_report(&mut self, id: ReportId) -> StoreResult<()> {
        self.inner.delete_report(id)
    }

    fn set_status(&mut self, id: ReportId, status: ReportStatus) -> StoreResult<()> {
        if self.fail_completion && status == ReportStatus::Completed {
            return Err(StoreError::Backend("connection lost".to_string()));
        }
        self.inner.set_status(id, status)
    }

    fn save_results(
        &mut self,
        id: ReportId,
        crawl: &CrawlResult,
        score: &ScoreBreakdown,
    ) -> StoreResult<()> {
        if self.fail_save_results {
            return Err(StoreError::Backend("disk full".to_string()));
        }
        self.inner.save_results(id, crawl, score)
    }

    fn save_insights(&mut self, id: ReportId, insights: Insights) -> StoreResult<()> {
        self.inner.save_insights(id, insights)
    }

    fn mark_failed(&mut self, id: ReportId, message: &str) -> StoreResult<()> {
        self.inner.mark_failed(id, message)
    }
}

fn test_coordinator() -> Coordinator {
    Coordinator::new(Config {
        crawler: CrawlerConfig {
            page_timeout_secs: 5,
            probe_timeout_secs: 2,
            ..Default::default()
        },
        ..Default::default()
    })
}

async fn start_site() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><head><title>Audit Target</title></head><body>
                    <h1>Welcome</h1>
                    <a href="/docs">Docs</a>
                    <a href="/dead">Dead</a>
                    </body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_audit_completes_with_insights() {
    let mock_server = start_site().await;
    let url = format!("{}/", mock_server.uri());

    let coordinator = test_coordinator();
    let narrative = EchoNarrative::default();
    let mut store = MemoryReportStore::new();
    let id = store.create_report(&url).unwrap();

    let scored = run_audit(&coordinator, &mut store, Some(&narrative), id)
        .await
        .expect("Audit failed");

    assert_eq!(narrative.calls.load(Ordering::SeqCst), 1);

    let report = store.get_report(id).unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert!(report.completed_at.is_some());
    assert!(report.error_message.is_none());
    assert_eq!(report.overall_score(), Some(scored.overall_score));
    assert_eq!(report.grade(), Some(scored.grade));
    assert!(scored.issues.contains(&"1 broken links detected".to_string()));

    let crawl = report.crawl.as_ref().unwrap();
    assert_eq!(crawl.broken_links.len(), 1);

    let insights = report.insights.as_ref().unwrap();
    assert!(insights.summary.starts_with(&url));
    assert!(insights.summary.ends_with("with 2 links"));
    assert_eq!(insights.recommendations.len(), 5);
    assert_eq!(insights.model_used.as_deref(), Some("echo"));
}

#[tokio::test]
async fn test_narrative_failure_still_completes() {
    let mock_server = start_site().await;

    let coordinator = test_coordinator();
    let mut store = MemoryReportStore::new();
    let id = store
        .create_report(&format!("{}/", mock_server.uri()))
        .unwrap();

    run_audit(&coordinator, &mut store, Some(&FailingNarrative), id)
        .await
        .expect("Audit failed");

    let report = store.get_report(id).unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert!(report.insights.is_none());
    assert!(report.score.is_some());
}

#[tokio::test]
async fn test_failed_audit_cannot_be_rendered() {
    let coordinator = Coordinator::new(Config {
        crawler: CrawlerConfig {
            page_timeout_secs: 2,
            probe_timeout_secs: 1,
            ..Default::default()
        },
        ..Default::default()
    });
    let mut store = MemoryReportStore::new();
    let id = store.create_report("http://127.0.0.1:1/").unwrap();

    let err = run_audit(&coordinator, &mut store, None, id)
        .await
        .unwrap_err();
    assert!(matches!(err, SiteSageError::Crawl(_)));

    let report = store.get_report(id).unwrap();
    assert_eq!(report.status, ReportStatus::Failed);
    assert!(report.error_message.is_some());
    assert!(matches!(
        render_report(&report, ReportFormat::Markdown),
        Err(OutputError::NotCompleted(_))
    ));
}

#[tokio::test]
async fn test_completed_audit_renders_both_formats() {
    let mock_server = start_site().await;

    let coordinator = test_coordinator();
    let mut store = MemoryReportStore::new();
    let id = store
        .create_report(&format!("{}/", mock_server.uri()))
        .unwrap();
    let scored = run_audit(&coordinator, &mut store, None, id)
        .await
        .expect("Audit failed");
    let report = store.get_report(id).unwrap();

    let markdown = render_report(&report, ReportFormat::Markdown).unwrap();
    assert!(markdown.contains("## Broken Links"));
    assert!(markdown.contains("/dead | HTTP 404 |"));
    assert!(markdown.contains(&format!("{:.2} / 100", scored.overall_score)));

    let json = render_report(&report, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["crawl"]["title"], "Audit Target");
    assert_eq!(value["crawl"]["total_links"], 2);
    assert_eq!(value["score"]["overall_score"], scored.overall_score);

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.json");
    write_report(&report, ReportFormat::Json, &out).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), json);
}

#[tokio::test]
async fn test_completed_report_cannot_be_rerun() {
    let mock_server = start_site().await;

    let coordinator = test_coordinator();
    let mut store = MemoryReportStore::new();
    let id = store
        .create_report(&format!("{}/", mock_server.uri()))
        .unwrap();

    run_audit(&coordinator, &mut store, None, id)
        .await
        .expect("Audit failed");

    let err = run_audit(&coordinator, &mut store, None, id)
        .await
        .unwrap_err();
    assert!(matches!(err, SiteSageError::Store(_)));
    assert_eq!(store.get_report(id).unwrap().status, ReportStatus::Completed);
}

#[tokio::test]
async fn test_store_failure_marks_report_failed() {
    let mock_server = start_site().await;

    let coordinator = test_coordinator();
    let mut store = UnreliableStore {
        fail_save_results: true,
        ..Default::default()
    };
    let id = store
        .create_report(&format!("{}/", mock_server.uri()))
        .unwrap();

    let err = run_audit(&coordinator, &mut store, None, id)
        .await
        .unwrap_err();
    assert!(matches!(err, SiteSageError::Store(StoreError::Backend(_))));

    let report = store.get_report(id).unwrap();
    assert_eq!(report.status, ReportStatus::Failed);
    assert!(report.completed_at.is_some());
    assert!(report
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("disk full")));
}

#[tokio::test]
async fn test_completion_failure_marks_report_failed() {
    let mock_server = start_site().await;

    let coordinator = test_coordinator();
    let mut store = UnreliableStore {
        fail_completion: true,
        ..Default::default()
    };
    let id = store
        .create_report(&format!("{}/", mock_server.uri()))
        .unwrap();

    assert!(run_audit(&coordinator, &mut store, None, id).await.is_err());

    let report = store.get_report(id).unwrap();
    assert_eq!(report.status, ReportStatus::Failed);
    assert!(report
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("connection lost")));
}
