// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::analytics::AnalyticsSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// 校验报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub total_pages_scanned: usize,
    pub est_num_pages_in_test: usize,
    pub pages_failed_total: usize,
    /// 没有任何页面扫描成功的基础URL
    pub base_urls_without_pages: Vec<String>,
    pub passed: bool,
}

/// 校验服务特质
///
/// 所有工作器结束后调用一次，读取最终的统计快照
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, snapshot: &AnalyticsSnapshot) -> Result<VerificationReport>;
}

/// 按已扫描页面数校验结果
///
/// 每个注册过的基础URL至少要有一个页面扫描成功，否则报告未通过。
/// 设置了结果目录时，报告会写入 `verification_report.json`。
pub struct PagesScannedVerifier {
    results_path: Option<PathBuf>,
}

impl PagesScannedVerifier {
    pub const REPORT_FILE: &'static str = "verification_report.json";

    pub fn new(results_path: Option<PathBuf>) -> Self {
        Self { results_path }
    }

    pub fn build_report(snapshot: &AnalyticsSnapshot) -> VerificationReport {
        let base_urls_without_pages: Vec<String> = snapshot
            .pages_scanned
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(url, _)| url.clone())
            .collect();

        VerificationReport {
            total_pages_scanned: snapshot.total_pages_scanned(),
            est_num_pages_in_test: snapshot.est_num_pages_in_test,
            pages_failed_total: snapshot.total_pages_failed(),
            passed: base_urls_without_pages.is_empty(),
            base_urls_without_pages,
        }
    }

    async fn write_report(&self, report: &VerificationReport) -> Result<()> {
        let Some(dir) = &self.results_path else {
            return Ok(());
        };

        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create results directory {}", dir.display()))?;

        let path = dir.join(Self::REPORT_FILE);
        let body = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Verification report written to {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl Verifier for PagesScannedVerifier {
    async fn verify(&self, snapshot: &AnalyticsSnapshot) -> Result<VerificationReport> {
        let report = Self::build_report(snapshot);

        for url in &report.base_urls_without_pages {
            warn!("No pages were scanned for {}", url);
        }
        info!(
            "Verified {} page(s) across {} website(s), estimate was {}",
            report.total_pages_scanned,
            snapshot.base_urls.len(),
            report.est_num_pages_in_test
        );

        self.write_report(&report).await?;
        Ok(report)
    }
}
