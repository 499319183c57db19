// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{BrowserEngine, BrowserSession, PageSnapshot};
use crate::utils::errors::BrowserError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Chromium 浏览器引擎
///
/// 基于 chromiumoxide 实现，每个工作器启动（或连接）一个独立的浏览器
pub struct ChromiumEngine {
    settings: BrowserSettings,
}

impl ChromiumEngine {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    fn remote_debugging_url(&self) -> Option<String> {
        self.settings
            .remote_debugging_url
            .clone()
            .or_else(|| std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok())
    }

    fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.page_timeout_secs)
    }

    /// 每个工作器使用独立的用户数据目录，避免并发启动时互相锁定配置文件
    pub fn user_data_dir_for(worker_id: usize) -> PathBuf {
        std::env::temp_dir().join(format!(
            "a11y-crawl-{}-worker-{}",
            std::process::id(),
            worker_id
        ))
    }

    fn launch_config(&self, worker_id: usize) -> Result<BrowserConfig, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.page_timeout())
            .user_data_dir(Self::user_data_dir_for(worker_id))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !self.settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(BrowserError::Launch)
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    fn name(&self) -> &'static str {
        "chromium"
    }

    async fn open(&self, worker_id: usize) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let remote = self.remote_debugging_url();

        let (browser, mut handler) = if let Some(ref url) = remote {
            info!("Worker {} connecting to remote Chrome at {}", worker_id, url);
            Browser::connect(url.as_str())
                .await
                .map_err(|e| BrowserError::Launch(format!("Failed to connect to remote Chrome: {}", e)))?
        } else {
            debug!("Worker {} launching Chrome", worker_id);
            Browser::launch(self.launch_config(worker_id)?)
                .await
                .map_err(|e| BrowserError::Launch(e.to_string()))?
        };

        // Drive the CDP connection until the browser goes away
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(BrowserError::Launch(format!("Failed to open page: {}", e)));
            }
        };

        // A launched browser owns its profile directory; a remote one does not
        let profile_dir = remote
            .is_none()
            .then(|| Self::user_data_dir_for(worker_id));

        Ok(Box::new(ChromiumSession {
            worker_id,
            browser,
            page,
            handler,
            profile_dir,
            page_timeout: self.page_timeout(),
        }))
    }
}

/// Chromium 浏览器会话
pub struct ChromiumSession {
    worker_id: usize,
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    /// 启动的浏览器使用的配置目录，连接远程浏览器时为空
    profile_dir: Option<PathBuf>,
    page_timeout: Duration,
}

impl ChromiumSession {
    fn page_error(&self, url: &str, reason: impl ToString) -> BrowserError {
        if self.handler.is_finished() {
            BrowserError::Disconnected(format!("worker {}: {}", self.worker_id, reason.to_string()))
        } else {
            BrowserError::Navigation {
                url: url.to_string(),
                reason: reason.to_string(),
            }
        }
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    fn worker_id(&self) -> usize {
        self.worker_id
    }

    async fn visit(&mut self, url: &str) -> Result<PageSnapshot, BrowserError> {
        let navigation = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| self.page_error(url, e))?;
            let html = self
                .page
                .content()
                .await
                .map_err(|e| self.page_error(url, e))?;
            let final_url = self
                .page
                .url()
                .await
                .map_err(|e| self.page_error(url, e))?
                .unwrap_or_else(|| url.to_string());

            Ok::<_, BrowserError>(PageSnapshot {
                requested_url: url.to_string(),
                final_url,
                html,
            })
        };

        tokio::time::timeout(self.page_timeout, navigation)
            .await
            .map_err(|_| BrowserError::Timeout(url.to_string()))?
    }

    async fn shutdown(self: Box<Self>) -> Result<(), BrowserError> {
        let ChromiumSession {
            worker_id,
            mut browser,
            page,
            handler,
            profile_dir,
            ..
        } = *self;

        if let Err(e) = page.close().await {
            warn!("Worker {} failed to close page: {}", worker_id, e);
        }

        let result = if profile_dir.is_some() {
            match browser.close().await {
                Ok(_) => browser
                    .wait()
                    .await
                    .map(|_| ())
                    .map_err(|e| BrowserError::Close(e.to_string())),
                Err(e) => Err(BrowserError::Close(e.to_string())),
            }
        } else {
            Ok(())
        };

        handler.abort();

        if let Some(dir) = &profile_dir {
            remove_profile_dir(worker_id, dir).await;
        }

        debug!("Worker {} browser released", worker_id);
        result
    }
}

/// 删除浏览器配置目录，失败只记录警告
async fn remove_profile_dir(worker_id: usize, dir: &Path) {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => debug!("Worker {} removed profile {}", worker_id, dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Worker {} failed to remove profile {}: {}",
            worker_id,
            dir.display(),
            e
        ),
    }
}
