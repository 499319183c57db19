// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 统计服务（analytics）：跨工作器共享的扫描统计
/// - 爬取服务（crawl_service）：单个目标的页面访问与链接发现
/// - 导入过滤（ingestion_filter）：按组织与域名白名单筛选目标
/// - 校验服务（verification_service）：扫描结束后的结果校验
pub mod analytics;
pub mod crawl_service;
pub mod ingestion_filter;
pub mod verification_service;
