// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::load_targets::{LoadReport, TargetLoader};
use crate::config::settings::Settings;
use crate::domain::services::analytics::{Analytics, AnalyticsSnapshot};
use crate::domain::services::crawl_service::Crawler;
use crate::domain::services::verification_service::{VerificationReport, Verifier};
use crate::engines::traits::BrowserEngine;
use crate::presentation::output;
use crate::queue::target_queue::TargetQueue;
use crate::utils::errors::RunError;
use crate::workers::{WorkerManager, WorkerReport};
use std::sync::Arc;
use tracing::info;

/// 扫描结果汇总
#[derive(Debug)]
pub struct RunSummary {
    pub load: LoadReport,
    pub workers: Vec<WorkerReport>,
    pub analytics: AnalyticsSnapshot,
    pub verification: VerificationReport,
}

/// 扫描运行器
///
/// 组合导入、工作器池与结果校验：
/// 导入目标 -> 记录预计页面数 -> 运行工作器 -> 校验最终统计
pub struct ScanRunner {
    settings: Settings,
    browser: Arc<dyn BrowserEngine>,
    crawler: Arc<dyn Crawler>,
    verifier: Arc<dyn Verifier>,
}

impl ScanRunner {
    pub fn new(
        settings: Settings,
        browser: Arc<dyn BrowserEngine>,
        crawler: Arc<dyn Crawler>,
        verifier: Arc<dyn Verifier>,
    ) -> Self {
        Self {
            settings,
            browser,
            crawler,
            verifier,
        }
    }

    pub async fn run(&self) -> Result<RunSummary, RunError> {
        // Settings may be built by hand; a zero-sized pool would never drain the queue
        self.settings.validate()?;

        output::print_start_banner();

        let analytics = Arc::new(Analytics::new());
        let loaded = TargetLoader::new(&self.settings.scan, &analytics).load()?;
        output::print_target_count(loaded.queue.len());

        // Computed once; never revisited as crawling discovers more or fewer pages
        let estimate = loaded.queue.len() * loaded.report.max_links_per_domain;
        analytics.set_estimated_pages(estimate);
        info!("Estimated number of pages in scan: {}", estimate);

        let queue: Arc<dyn TargetQueue> = loaded.queue.clone();
        let manager = WorkerManager::new(
            queue,
            analytics.clone(),
            self.browser.clone(),
            self.crawler.clone(),
        );
        let workers = manager.run(self.settings.scan.thread_count).await?;

        let snapshot = analytics.snapshot();
        let verification = self.verifier.verify(&snapshot).await?;

        output::print_completion_banner(&self.settings.output.results_path);

        Ok(RunSummary {
            load: loaded.report,
            workers,
            analytics: snapshot,
            verification,
        })
    }
}
