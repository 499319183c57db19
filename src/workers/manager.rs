// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::analytics::Analytics;
use crate::domain::services::crawl_service::Crawler;
use crate::engines::traits::BrowserEngine;
use crate::queue::target_queue::TargetQueue;
use crate::utils::errors::WorkerError;
use crate::workers::crawl_worker::{CrawlWorker, WorkerReport};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, Instrument};

/// 工作管理器
///
/// 创建固定数量的工作器并等待全部结束。共享的队列、统计与协作者
/// 由调用方构造后注入，每个工作器持有各自的 `Arc` 句柄。
pub struct WorkerManager {
    queue: Arc<dyn TargetQueue>,
    analytics: Arc<Analytics>,
    browser: Arc<dyn BrowserEngine>,
    crawler: Arc<dyn Crawler>,
}

impl WorkerManager {
    pub fn new(
        queue: Arc<dyn TargetQueue>,
        analytics: Arc<Analytics>,
        browser: Arc<dyn BrowserEngine>,
        crawler: Arc<dyn Crawler>,
    ) -> Self {
        Self {
            queue,
            analytics,
            browser,
            crawler,
        }
    }

    fn build_worker(&self, worker_id: usize) -> CrawlWorker {
        CrawlWorker::new(
            worker_id,
            self.queue.clone(),
            self.analytics.clone(),
            self.browser.clone(),
            self.crawler.clone(),
        )
    }

    /// 运行工作器直到全部结束
    ///
    /// `thread_count == 1` 时直接在当前任务上运行唯一的工作器，不创建新任务。
    /// 否则启动 `thread_count` 个工作器，编号为 `0..thread_count`，
    /// 即使有工作器失败也会等待其余工作器结束，然后返回编号最小的失败。
    ///
    /// # 参数
    ///
    /// * `thread_count` - 要启动的工作器数量
    pub async fn run(&self, thread_count: usize) -> Result<Vec<WorkerReport>, WorkerError> {
        if thread_count == 1 {
            info!("Running a single worker without spawning");
            let report = self
                .build_worker(0)
                .run()
                .instrument(info_span!("worker", worker_id = 0))
                .await?;
            return Ok(vec![report]);
        }

        let handles = self.start_workers(thread_count);
        let reports = Self::join_all(handles).await?;

        info!("All {} workers complete", thread_count);
        Ok(reports)
    }

    /// 启动工作进程
    fn start_workers(
        &self,
        count: usize,
    ) -> Vec<(usize, JoinHandle<Result<WorkerReport, WorkerError>>)> {
        (0..count)
            .map(|worker_id| {
                let worker = self.build_worker(worker_id);
                let handle = tokio::spawn(
                    worker
                        .run()
                        .instrument(info_span!("worker", worker_id = worker_id)),
                );
                (worker_id, handle)
            })
            .collect()
    }

    async fn join_all(
        handles: Vec<(usize, JoinHandle<Result<WorkerReport, WorkerError>>)>,
    ) -> Result<Vec<WorkerReport>, WorkerError> {
        let mut reports = Vec::with_capacity(handles.len());
        let mut first_error: Option<WorkerError> = None;

        // Every handle is awaited; a failure never leaves the rest unjoined
        for (worker_id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(WorkerError::Panicked {
                    worker_id,
                    message: e.to_string(),
                }),
            };

            match outcome {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("Worker {} failed: {}", worker_id, e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(reports),
        }
    }
}
