// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 扫描统计
///
/// 在启动工作器之前创建，按引用共享给所有工作器与校验步骤。
/// 所有记录方法都自带同步，调用方不需要额外加锁。
#[derive(Debug)]
pub struct Analytics {
    /// 基础URL -> 已扫描页面数
    pages_scanned: DashMap<String, usize>,
    /// 基础URL -> 失败页面数
    pages_failed: DashMap<String, usize>,
    /// 注册次数（重复的基础URL会被计数多次）
    registered_targets: AtomicUsize,
    /// 预计扫描的页面总数
    est_num_pages_in_test: AtomicUsize,
    started_at: DateTime<Utc>,
}

/// 统计快照
///
/// 工作器全部结束后交给校验步骤的只读视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    pub base_urls: BTreeSet<String>,
    pub registered_targets: usize,
    pub pages_scanned: BTreeMap<String, usize>,
    pub pages_failed: BTreeMap<String, usize>,
    pub est_num_pages_in_test: usize,
    pub started_at: DateTime<Utc>,
}

impl AnalyticsSnapshot {
    pub fn total_pages_scanned(&self) -> usize {
        self.pages_scanned.values().sum()
    }

    pub fn total_pages_failed(&self) -> usize {
        self.pages_failed.values().sum()
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

impl Analytics {
    pub fn new() -> Self {
        Self {
            pages_scanned: DashMap::new(),
            pages_failed: DashMap::new(),
            registered_targets: AtomicUsize::new(0),
            est_num_pages_in_test: AtomicUsize::new(0),
            started_at: Utc::now(),
        }
    }

    /// 注册一个基础URL
    ///
    /// 在工作器启动前调用。重复注册不会重置已有计数，但注册次数仍会增加。
    pub fn register_base_url(&self, base_url: &str) {
        self.pages_scanned.entry(base_url.to_string()).or_insert(0);
        self.registered_targets.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录一次成功扫描的页面
    pub fn record_page_scanned(&self, base_url: &str) {
        *self.pages_scanned.entry(base_url.to_string()).or_insert(0) += 1;
    }

    /// 记录一次失败的页面访问
    pub fn record_page_failed(&self, base_url: &str) {
        *self.pages_failed.entry(base_url.to_string()).or_insert(0) += 1;
    }

    pub fn set_estimated_pages(&self, estimate: usize) {
        self.est_num_pages_in_test.store(estimate, Ordering::SeqCst);
    }

    pub fn estimated_pages(&self) -> usize {
        self.est_num_pages_in_test.load(Ordering::SeqCst)
    }

    pub fn registered_targets(&self) -> usize {
        self.registered_targets.load(Ordering::SeqCst)
    }

    pub fn distinct_base_urls(&self) -> usize {
        self.pages_scanned.len()
    }

    pub fn pages_scanned_for(&self, base_url: &str) -> Option<usize> {
        self.pages_scanned.get(base_url).map(|count| *count)
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let pages_scanned: BTreeMap<String, usize> = self
            .pages_scanned
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        let pages_failed = self
            .pages_failed
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();

        AnalyticsSnapshot {
            base_urls: pages_scanned.keys().cloned().collect(),
            registered_targets: self.registered_targets(),
            pages_scanned,
            pages_failed,
            est_num_pages_in_test: self.estimated_pages(),
            started_at: self.started_at,
        }
    }
}
