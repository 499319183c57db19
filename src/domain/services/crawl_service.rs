// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::target::TargetRecord;
use crate::domain::services::analytics::Analytics;
use crate::engines::traits::BrowserSession;
use crate::queue::target_queue::TargetQueue;
use crate::utils::errors::CrawlError;
use crate::utils::url_utils;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument, warn};
use url::Url;

/// 不送入浏览器审计的文件类型
const SKIPPED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "zip", "csv", "jpg", "jpeg", "png",
    "gif", "svg", "mp3", "mp4",
];

/// 爬取服务特质
///
/// `crawl_target` 处理单个目标；`run` 不断从共享队列中取出目标直到队列为空。
/// 单个目标的非致命错误在这里被吸收，只有致命错误才会返回给工作器。
#[async_trait]
pub trait Crawler: Send + Sync {
    /// 爬取单个目标，返回成功扫描的页面数
    async fn crawl_target(
        &self,
        session: &mut dyn BrowserSession,
        target: TargetRecord,
        analytics: &Analytics,
    ) -> Result<usize, CrawlError>;

    /// 持续处理队列中的目标，返回处理过的目标数量
    async fn run(
        &self,
        session: &mut dyn BrowserSession,
        queue: &dyn TargetQueue,
        analytics: &Analytics,
    ) -> Result<usize, CrawlError> {
        let mut processed = 0;

        while let Some(target) = queue.dequeue() {
            let base_url = target.url.clone();
            processed += 1;

            match self.crawl_target(session, target, analytics).await {
                Ok(pages) => debug!("Finished {} with {} page(s)", base_url, pages),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Skipping {}: {}", base_url, e);
                    analytics.record_page_failed(&base_url);
                }
            }
        }

        Ok(processed)
    }
}

/// 基于浏览器的爬取器
///
/// 从基础URL开始按广度优先访问同一主机下的页面，每个域名最多访问
/// `max_links_per_domain` 个页面。
#[derive(Debug, Clone)]
pub struct BrowserCrawler {
    max_links_per_domain: usize,
}

impl BrowserCrawler {
    pub fn new(max_links_per_domain: usize) -> Self {
        Self {
            max_links_per_domain,
        }
    }

    pub fn max_links_per_domain(&self) -> usize {
        self.max_links_per_domain
    }
}

#[async_trait]
impl Crawler for BrowserCrawler {
    #[instrument(skip_all, fields(worker_id = session.worker_id(), base_url = %target.url))]
    async fn crawl_target(
        &self,
        session: &mut dyn BrowserSession,
        target: TargetRecord,
        analytics: &Analytics,
    ) -> Result<usize, CrawlError> {
        let base = Url::parse(&target.url).map_err(|source| CrawlError::InvalidBaseUrl {
            url: target.url.clone(),
            source,
        })?;
        // Redirect targets (apex to www and the like) count as the same site
        let mut hosts: HashSet<String> = base.host_str().map(str::to_string).into_iter().collect();

        let mut frontier = VecDeque::from([target.url.clone()]);
        let mut seen: HashSet<String> = HashSet::from([target.url.clone(), base.to_string()]);
        let mut pages = 0;

        while pages < self.max_links_per_domain {
            let Some(url) = frontier.pop_front() else {
                break;
            };

            match session.visit(&url).await {
                Ok(snapshot) => {
                    pages += 1;
                    analytics.record_page_scanned(&target.url);

                    if let Ok(landed) = Url::parse(&snapshot.final_url) {
                        if let Some(host) = landed.host_str() {
                            hosts.insert(host.to_string());
                        }
                        seen.insert(landed.to_string());
                    }

                    if pages < self.max_links_per_domain {
                        let links = extract_same_host_links(&snapshot.html, &snapshot.final_url, &hosts);
                        for link in links {
                            if seen.insert(link.clone()) {
                                frontier.push_back(link);
                            }
                        }
                    }
                }
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    warn!("Failed to visit {}: {}", url, e);
                    analytics.record_page_failed(&target.url);
                }
            }
        }

        Ok(pages)
    }
}

/// 提取同一站点下可审计的链接
///
/// 相对链接基于页面URL解析，去掉片段，跳过非 http(s) 链接、`hosts` 之外的主机与文件下载
pub fn extract_same_host_links(html: &str, page_url: &str, hosts: &HashSet<String>) -> Vec<String> {
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut unique = HashSet::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Ok(mut absolute) = url_utils::resolve_url(&base, href.trim()) else {
            continue;
        };

        if !matches!(absolute.scheme(), "http" | "https") {
            continue;
        }
        if !absolute.host_str().is_some_and(|h| hosts.contains(h)) {
            continue;
        }
        if is_file_download(&absolute) {
            continue;
        }

        absolute.set_fragment(None);
        let link = absolute.to_string();
        if unique.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

fn is_file_download(url: &Url) -> bool {
    url.path()
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            SKIPPED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
