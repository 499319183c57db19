// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::BrowserError;
use async_trait::async_trait;

/// 页面快照
///
/// 一次页面访问的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    /// 请求的URL
    pub requested_url: String,
    /// 跳转后的最终URL
    pub final_url: String,
    /// 渲染后的 HTML
    pub html: String,
}

/// 浏览器会话
///
/// 由单个工作器独占，生命周期与工作器相同，不会在工作器之间传递
#[async_trait]
pub trait BrowserSession: Send {
    /// 所属工作器编号
    fn worker_id(&self) -> usize;

    /// 访问页面并返回渲染结果
    async fn visit(&mut self, url: &str) -> Result<PageSnapshot, BrowserError>;

    /// 结束会话，释放底层浏览器资源
    async fn shutdown(self: Box<Self>) -> Result<(), BrowserError>;
}

/// 浏览器引擎特质
///
/// 负责为每个工作器打开与关闭浏览器会话
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// 获取引擎名称
    fn name(&self) -> &'static str;

    /// 为指定工作器打开一个新的会话
    async fn open(&self, worker_id: usize) -> Result<Box<dyn BrowserSession>, BrowserError>;

    /// 关闭会话并释放浏览器
    async fn close(&self, session: Box<dyn BrowserSession>) -> Result<(), BrowserError> {
        session.shutdown().await
    }
}
