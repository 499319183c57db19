// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use a11y_crawl::application::scan_runner::ScanRunner;
use a11y_crawl::config::settings::Settings;
use a11y_crawl::domain::services::crawl_service::BrowserCrawler;
use a11y_crawl::domain::services::verification_service::PagesScannedVerifier;
use a11y_crawl::engines::chromium_engine::ChromiumEngine;
use a11y_crawl::utils::telemetry;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 主函数
///
/// 应用程序入口点：加载配置、组装协作者并运行一次完整扫描
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();

    // 2. Load configuration, optionally from an explicit file
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Settings::new().context("Failed to load configuration")?,
    };
    info!("Configuration loaded");

    // 3. Initialize collaborators
    let scope = settings.scan.effective_scope();
    let browser = Arc::new(ChromiumEngine::new(settings.browser.clone()));
    let crawler = Arc::new(BrowserCrawler::new(scope.max_links_per_domain));
    let verifier = Arc::new(PagesScannedVerifier::new(Some(
        settings.output.results_path.clone(),
    )));

    // 4. Run the scan
    let runner = ScanRunner::new(settings, browser, crawler, verifier);
    match runner.run().await {
        Ok(summary) => {
            if !summary.verification.passed {
                warn!(
                    "{} website(s) produced no scanned pages",
                    summary.verification.base_urls_without_pages.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            error!("Scan failed: {}", e);
            Err(e.into())
        }
    }
}
