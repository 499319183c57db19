// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::fakes::{FakeCrawler, FakeEngine, RecordingVerifier};
use super::helpers::{target_list, ScanDirs};
use a11y_crawl::application::scan_runner::ScanRunner;
use a11y_crawl::config::settings::Settings;
use a11y_crawl::domain::services::verification_service::PagesScannedVerifier;
use a11y_crawl::utils::errors::{LoadError, RunError, WorkerError};
use std::sync::Arc;

struct Harness {
    engine: Arc<FakeEngine>,
    crawler: Arc<FakeCrawler>,
    verifier: Arc<RecordingVerifier>,
}

impl Harness {
    fn new(engine: FakeEngine, crawler: FakeCrawler) -> Self {
        Self {
            engine: Arc::new(engine),
            crawler: Arc::new(crawler),
            verifier: Arc::new(RecordingVerifier::new()),
        }
    }

    fn runner(&self, settings: Settings) -> ScanRunner {
        ScanRunner::new(
            settings,
            self.engine.clone(),
            self.crawler.clone(),
            self.verifier.clone(),
        )
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_scan_registers_estimates_and_verifies() {
    let dirs = ScanDirs::new();
    dirs.write(&dirs.crawl, "central.csv", &target_list(8));

    let harness = Harness::new(FakeEngine::new(), FakeCrawler::new());
    let summary = harness.runner(dirs.settings(4)).run().await.unwrap();

    assert_eq!(summary.load.files_read, 1);
    assert_eq!(summary.analytics.registered_targets, 8);
    assert_eq!(summary.analytics.base_urls.len(), 8);
    // Estimate is queue length times the per-domain cap (5)
    assert_eq!(summary.analytics.est_num_pages_in_test, 40);
    assert_eq!(summary.analytics.total_pages_scanned(), 8);
    assert_eq!(summary.workers.len(), 4);
    assert!(summary.verification.passed);

    assert_eq!(harness.verifier.calls(), 1);
    let seen = harness.verifier.last_snapshot().unwrap();
    assert_eq!(seen.registered_targets, 8);
    assert_eq!(harness.engine.counters().closed(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_header_only_list_still_runs_every_stage() {
    let dirs = ScanDirs::new();
    dirs.write(&dirs.crawl, "empty.csv", "organisation,url\n");

    let harness = Harness::new(FakeEngine::new(), FakeCrawler::new());
    let summary = harness.runner(dirs.settings(4)).run().await.unwrap();

    assert_eq!(summary.analytics.registered_targets, 0);
    assert_eq!(summary.analytics.est_num_pages_in_test, 0);
    assert_eq!(harness.engine.counters().opened(), 4);
    assert_eq!(harness.engine.counters().closed(), 4);
    assert_eq!(harness.crawler.calls(), 0);
    assert_eq!(harness.verifier.calls(), 1);
}

#[tokio::test]
async fn test_nocrawl_mode_estimates_one_page_per_target() {
    let dirs = ScanDirs::new();
    dirs.write(&dirs.crawl, "crawl.csv", &target_list(10));
    dirs.write(
        &dirs.nocrawl,
        "pages.csv",
        "organisation,url\nOrg A,https://a.govt.nz/about\nOrg B,https://b.govt.nz/contact\nOrg C,https://c.govt.nz\n",
    );

    let mut settings = dirs.settings(1);
    settings.scan.nocrawl_mode = true;
    settings.scan.max_links_per_domain = 50;

    let harness = Harness::new(FakeEngine::new(), FakeCrawler::new());
    let summary = harness.runner(settings).run().await.unwrap();

    assert_eq!(summary.load.source_dir, dirs.nocrawl);
    assert_eq!(summary.load.max_links_per_domain, 1);
    assert_eq!(summary.analytics.registered_targets, 3);
    assert_eq!(summary.analytics.est_num_pages_in_test, 3);
    assert_eq!(
        harness.crawler.visited_urls(),
        vec![
            "https://a.govt.nz/about",
            "https://b.govt.nz/contact",
            "https://c.govt.nz",
        ]
    );
}

#[tokio::test]
async fn test_filters_limit_registered_targets() {
    let dirs = ScanDirs::new();
    dirs.write(
        &dirs.crawl,
        "mixed.csv",
        "organisation,url\n\
         Department of Conservation,https://doc.govt.nz\n\
         Department of Conservation,https://doc-shop.com\n\
         Ministry for the Environment,https://environment.govt.nz\n",
    );

    let mut settings = dirs.settings(1);
    settings.scan.filter_to_organisations = vec!["Conservation".to_string()];
    settings.scan.filter_to_domains = vec!["govt.nz".to_string()];

    let harness = Harness::new(FakeEngine::new(), FakeCrawler::new());
    let summary = harness.runner(settings).run().await.unwrap();

    assert_eq!(summary.load.skipped_rows, 2);
    assert_eq!(summary.analytics.registered_targets, 1);
    assert_eq!(harness.crawler.visited_urls(), vec!["https://doc.govt.nz"]);
}

#[tokio::test]
async fn test_missing_directory_fails_before_any_browser_opens() {
    let dirs = ScanDirs::new();
    let mut settings = dirs.settings(4);
    settings.scan.base_urls_crawl_path = dirs.crawl.join("missing");

    let harness = Harness::new(FakeEngine::new(), FakeCrawler::new());
    let result = harness.runner(settings).run().await;

    assert!(matches!(result, Err(RunError::Load(LoadError::ReadDir { .. }))));
    assert_eq!(harness.engine.counters().opened(), 0);
    assert_eq!(harness.verifier.calls(), 0);
}

#[tokio::test]
async fn test_zero_threads_is_rejected_before_loading() {
    let dirs = ScanDirs::new();
    dirs.write(&dirs.crawl, "central.csv", &target_list(3));

    let harness = Harness::new(FakeEngine::new(), FakeCrawler::new());
    let result = harness.runner(dirs.settings(0)).run().await;

    assert!(matches!(result, Err(RunError::Config(_))));
    assert_eq!(harness.engine.counters().opened(), 0);
    assert_eq!(harness.crawler.calls(), 0);
    assert_eq!(harness.verifier.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_worker_failure_skips_verification() {
    let dirs = ScanDirs::new();
    dirs.write(&dirs.crawl, "central.csv", &target_list(6));

    let harness = Harness::new(
        FakeEngine::new(),
        FakeCrawler::new().fatal_on("https://site4.govt.nz"),
    );
    let result = harness.runner(dirs.settings(4)).run().await;

    assert!(matches!(
        result,
        Err(RunError::Worker(WorkerError::Crawl { .. }))
    ));
    assert_eq!(harness.engine.counters().closed(), 4);
    assert_eq!(harness.verifier.calls(), 0);
}

#[tokio::test]
async fn test_default_verifier_writes_report_to_results_path() {
    let dirs = ScanDirs::new();
    dirs.write(&dirs.crawl, "central.csv", &target_list(2));
    let settings = dirs.settings(1);

    let runner = ScanRunner::new(
        settings,
        Arc::new(FakeEngine::new()),
        Arc::new(FakeCrawler::new()),
        Arc::new(PagesScannedVerifier::new(Some(dirs.results.clone()))),
    );
    let summary = runner.run().await.unwrap();

    assert!(summary.verification.passed);
    let written = std::fs::read_to_string(dirs.results.join(PagesScannedVerifier::REPORT_FILE))
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(report["total_pages_scanned"], 2);
    assert_eq!(report["est_num_pages_in_test"], 10);
}
