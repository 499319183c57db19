// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use thiserror::Error;

/// 目标列表加载错误类型
///
/// 任何一个变体都会中止整个扫描，不会启动任何工作器
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("无法读取目标目录 {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无法读取目标文件 {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("目标文件缺少表头: {0}")]
    MissingHeader(PathBuf),

    #[error("目标文件 {path} 缺少列: {column}")]
    MissingColumn { path: PathBuf, column: &'static str },
}

/// 浏览器错误类型
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("浏览器启动失败: {0}")]
    Launch(String),

    #[error("页面导航失败 {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("页面加载超时: {0}")]
    Timeout(String),

    #[error("浏览器连接已断开: {0}")]
    Disconnected(String),

    #[error("浏览器关闭失败: {0}")]
    Close(String),
}

impl BrowserError {
    /// 判断错误是否意味着会话已不可用
    ///
    /// 会话不可用时继续爬取没有意义，需要上报给工作器
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BrowserError::Launch(_) | BrowserError::Disconnected(_) | BrowserError::Close(_)
        )
    }
}

/// 爬取错误类型
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),

    #[error("无效的基础URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("爬取错误: {0}")]
    Other(String),
}

impl CrawlError {
    /// 是否需要上报给工作器（终止该工作器）
    pub fn is_fatal(&self) -> bool {
        match self {
            CrawlError::Browser(e) => e.is_fatal(),
            CrawlError::InvalidBaseUrl { .. } | CrawlError::Other(_) => false,
        }
    }
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("工作器 {worker_id} 无法打开浏览器: {source}")]
    BrowserOpen {
        worker_id: usize,
        #[source]
        source: BrowserError,
    },

    #[error("工作器 {worker_id} 无法关闭浏览器: {source}")]
    BrowserClose {
        worker_id: usize,
        #[source]
        source: BrowserError,
    },

    #[error("工作器 {worker_id} 爬取失败: {source}")]
    Crawl {
        worker_id: usize,
        #[source]
        source: CrawlError,
    },

    #[error("工作器 {worker_id} 异常退出: {message}")]
    Panicked { worker_id: usize, message: String },
}

impl WorkerError {
    pub fn worker_id(&self) -> usize {
        match self {
            WorkerError::BrowserOpen { worker_id, .. }
            | WorkerError::BrowserClose { worker_id, .. }
            | WorkerError::Crawl { worker_id, .. }
            | WorkerError::Panicked { worker_id, .. } => *worker_id,
        }
    }
}

/// 扫描运行错误类型
#[derive(Error, Debug)]
pub enum RunError {
    #[error("扫描配置无效: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("目标加载失败: {0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Worker(#[from] WorkerError),

    #[error("结果校验失败: {0}")]
    Verification(#[from] anyhow::Error),
}
