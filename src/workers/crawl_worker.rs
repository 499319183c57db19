// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::analytics::Analytics;
use crate::domain::services::crawl_service::Crawler;
use crate::engines::traits::BrowserEngine;
use crate::queue::target_queue::TargetQueue;
use crate::utils::errors::WorkerError;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 工作器运行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub targets_processed: usize,
}

/// 爬取工作器
///
/// 整个生命周期内独占一个浏览器会话，不断从共享队列取出目标直到队列为空。
/// 无论爬取正常结束、返回错误还是发生 panic，浏览器都会在返回前关闭。
pub struct CrawlWorker {
    worker_id: usize,
    queue: Arc<dyn TargetQueue>,
    analytics: Arc<Analytics>,
    browser: Arc<dyn BrowserEngine>,
    crawler: Arc<dyn Crawler>,
}

impl CrawlWorker {
    /// 创建新的爬取工作器实例
    pub fn new(
        worker_id: usize,
        queue: Arc<dyn TargetQueue>,
        analytics: Arc<Analytics>,
        browser: Arc<dyn BrowserEngine>,
        crawler: Arc<dyn Crawler>,
    ) -> Self {
        Self {
            worker_id,
            queue,
            analytics,
            browser,
            crawler,
        }
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    /// 运行工作器直到队列为空
    pub async fn run(self) -> Result<WorkerReport, WorkerError> {
        let worker_id = self.worker_id;
        info!("Crawl worker {} started with {} browser", worker_id, self.browser.name());

        let mut session = self
            .browser
            .open(worker_id)
            .await
            .map_err(|source| WorkerError::BrowserOpen { worker_id, source })?;

        let crawl = AssertUnwindSafe(self.crawler.run(
            session.as_mut(),
            self.queue.as_ref(),
            self.analytics.as_ref(),
        ))
        .catch_unwind()
        .await;

        // Release the browser before looking at how the crawl ended
        let closed = self.browser.close(session).await;

        let targets_processed = match crawl {
            Ok(Ok(processed)) => processed,
            Ok(Err(source)) => {
                if let Err(e) = closed {
                    warn!("Worker {} also failed to close its browser: {}", worker_id, e);
                }
                error!("Crawl worker {} aborted: {}", worker_id, source);
                return Err(WorkerError::Crawl { worker_id, source });
            }
            Err(payload) => {
                if let Err(e) = closed {
                    warn!("Worker {} also failed to close its browser: {}", worker_id, e);
                }
                let message = panic_message(payload.as_ref());
                error!("Crawl worker {} panicked: {}", worker_id, message);
                return Err(WorkerError::Panicked { worker_id, message });
            }
        };

        closed.map_err(|source| WorkerError::BrowserClose { worker_id, source })?;

        info!(
            "Crawl worker {} finished after {} target(s)",
            worker_id, targets_processed
        );
        Ok(WorkerReport {
            worker_id,
            targets_processed,
        })
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
