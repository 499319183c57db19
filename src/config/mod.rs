// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理扫描配置，包括并发数、目标目录、过滤白名单与浏览器设置
pub mod settings;
