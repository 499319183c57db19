// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use a11y_crawl::domain::models::target::TargetRecord;
use a11y_crawl::domain::services::analytics::{Analytics, AnalyticsSnapshot};
use a11y_crawl::domain::services::crawl_service::Crawler;
use a11y_crawl::domain::services::verification_service::{
    PagesScannedVerifier, VerificationReport, Verifier,
};
use a11y_crawl::engines::traits::{BrowserEngine, BrowserSession, PageSnapshot};
use a11y_crawl::utils::errors::{BrowserError, CrawlError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 浏览器打开与关闭的计数
#[derive(Default)]
pub struct EngineCounters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub closed_ids: Mutex<Vec<usize>>,
}

impl EngineCounters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn closed_ids(&self) -> Vec<usize> {
        let mut ids = self.closed_ids.lock().unwrap().clone();
        ids.sort_unstable();
        ids
    }
}

pub struct FakeEngine {
    counters: Arc<EngineCounters>,
    fail_open_for: Option<usize>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(EngineCounters::default()),
            fail_open_for: None,
        }
    }

    /// 指定工作器打开浏览器时失败
    pub fn failing_open_for(worker_id: usize) -> Self {
        Self {
            fail_open_for: Some(worker_id),
            ..Self::new()
        }
    }

    pub fn counters(&self) -> Arc<EngineCounters> {
        self.counters.clone()
    }
}

#[async_trait]
impl BrowserEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn open(&self, worker_id: usize) -> Result<Box<dyn BrowserSession>, BrowserError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        if self.fail_open_for == Some(worker_id) {
            return Err(BrowserError::Launch(format!(
                "no browser for worker {worker_id}"
            )));
        }
        Ok(Box::new(FakeSession {
            worker_id,
            counters: self.counters.clone(),
        }))
    }
}

struct FakeSession {
    worker_id: usize,
    counters: Arc<EngineCounters>,
}

#[async_trait]
impl BrowserSession for FakeSession {
    fn worker_id(&self) -> usize {
        self.worker_id
    }

    async fn visit(&mut self, url: &str) -> Result<PageSnapshot, BrowserError> {
        Ok(PageSnapshot {
            requested_url: url.to_string(),
            final_url: url.to_string(),
            html: "<html><body><h1>ok</h1></body></html>".to_string(),
        })
    }

    async fn shutdown(self: Box<Self>) -> Result<(), BrowserError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        self.counters.closed_ids.lock().unwrap().push(self.worker_id);
        Ok(())
    }
}

/// 记录每次调用的爬取器
///
/// 每个目标访问一个页面；可以让指定URL触发致命错误、普通错误或 panic。
#[derive(Default)]
pub struct FakeCrawler {
    visited: Mutex<Vec<(usize, String)>>,
    fatal_on: Option<String>,
    soft_fail_on: Option<String>,
    panic_on: Option<String>,
    delay: Option<Duration>,
}

impl FakeCrawler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fatal_on(mut self, url: &str) -> Self {
        self.fatal_on = Some(url.to_string());
        self
    }

    pub fn soft_fail_on(mut self, url: &str) -> Self {
        self.soft_fail_on = Some(url.to_string());
        self
    }

    pub fn panic_on(mut self, url: &str) -> Self {
        self.panic_on = Some(url.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.visited.lock().unwrap().len()
    }

    pub fn visited_urls(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap()
            .iter()
            .map(|(_, url)| url.clone())
            .collect()
    }

    pub fn visited_by(&self) -> Vec<usize> {
        self.visited
            .lock()
            .unwrap()
            .iter()
            .map(|(worker_id, _)| *worker_id)
            .collect()
    }
}

#[async_trait]
impl Crawler for FakeCrawler {
    async fn crawl_target(
        &self,
        session: &mut dyn BrowserSession,
        target: TargetRecord,
        analytics: &Analytics,
    ) -> Result<usize, CrawlError> {
        self.visited
            .lock()
            .unwrap()
            .push((session.worker_id(), target.url.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fatal_on.as_deref() == Some(target.url.as_str()) {
            return Err(CrawlError::Browser(BrowserError::Disconnected(
                "browser went away".to_string(),
            )));
        }
        if self.soft_fail_on.as_deref() == Some(target.url.as_str()) {
            return Err(CrawlError::Other("page refused".to_string()));
        }
        if self.panic_on.as_deref() == Some(target.url.as_str()) {
            panic!("crawler blew up on {}", target.url);
        }

        session.visit(&target.url).await?;
        analytics.record_page_scanned(&target.url);
        Ok(1)
    }
}

/// 记录调用次数与最后一次快照的校验器
#[derive(Default)]
pub struct RecordingVerifier {
    calls: AtomicUsize,
    last: Mutex<Option<AnalyticsSnapshot>>,
}

impl RecordingVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_snapshot(&self) -> Option<AnalyticsSnapshot> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Verifier for RecordingVerifier {
    async fn verify(&self, snapshot: &AnalyticsSnapshot) -> anyhow::Result<VerificationReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(snapshot.clone());
        Ok(PagesScannedVerifier::build_report(snapshot))
    }
}
