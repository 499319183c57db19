// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供爬取工作器与工作器管理功能
/// 包括浏览器会话的生命周期管理和并发控制
pub mod crawl_worker;
pub mod manager;

pub use crawl_worker::{CrawlWorker, WorkerReport};
pub use manager::WorkerManager;
