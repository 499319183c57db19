// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod fakes;

use a11y_crawl::config::settings::{BrowserSettings, OutputSettings, ScanSettings, Settings};
use a11y_crawl::domain::models::target::TargetRecord;
use a11y_crawl::queue::target_queue::{InMemoryTargetQueue, TargetQueue};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// 扫描用的临时目录
///
/// 包含 crawl、nocrawl 与 results 三个子目录
pub struct ScanDirs {
    _root: TempDir,
    pub crawl: PathBuf,
    pub nocrawl: PathBuf,
    pub results: PathBuf,
}

impl ScanDirs {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let crawl = root.path().join("crawl");
        let nocrawl = root.path().join("nocrawl");
        let results = root.path().join("results");
        fs::create_dir_all(&crawl).unwrap();
        fs::create_dir_all(&nocrawl).unwrap();
        Self {
            _root: root,
            crawl,
            nocrawl,
            results,
        }
    }

    pub fn write(&self, dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    pub fn settings(&self, thread_count: usize) -> Settings {
        Settings {
            scan: ScanSettings {
                thread_count,
                base_urls_crawl_path: self.crawl.clone(),
                base_urls_nocrawl_path: self.nocrawl.clone(),
                nocrawl_mode: false,
                max_links_per_domain: 5,
                shuffle_base_urls: false,
                filter_to_organisations: Vec::new(),
                filter_to_domains: Vec::new(),
            },
            browser: BrowserSettings {
                headless: true,
                chrome_executable: None,
                remote_debugging_url: None,
                page_timeout_secs: 5,
            },
            output: OutputSettings {
                results_path: self.results.clone(),
            },
        }
    }
}

/// 生成 `count` 行的目标列表
pub fn target_list(count: usize) -> String {
    let mut body = String::from("organisation,url,sector\n");
    for n in 0..count {
        body.push_str(&format!("Org {n},https://site{n}.govt.nz,Central\n"));
    }
    body
}

/// 按顺序放入目标的内存队列
pub fn queue_of(urls: &[String]) -> Arc<InMemoryTargetQueue> {
    let queue = Arc::new(InMemoryTargetQueue::new());
    for url in urls {
        queue.enqueue(TargetRecord::new("Org", url.clone()));
    }
    queue
}

pub fn site_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|n| format!("https://site{n}.govt.nz"))
        .collect()
}
