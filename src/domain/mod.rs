// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：扫描目标等核心数据结构
/// - 服务（services）：导入过滤、统计汇总、爬取与结果校验
///
/// 领域层不依赖于具体的浏览器实现，只依赖引擎层定义的接口。
pub mod models;
pub mod services;
