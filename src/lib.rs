// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 扫描流程编排与目标导入
pub mod application;

/// 配置模块
///
/// 处理扫描配置与环境变量
pub mod config;

/// 领域模块
///
/// 包含扫描目标、统计、爬取与校验服务
pub mod domain;

/// 引擎模块
///
/// 浏览器会话接口与 chromiumoxide 实现
pub mod engines;

/// 表示层模块
///
/// 终端输出
pub mod presentation;

/// 队列模块
///
/// 工作器共享的目标队列
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现爬取工作器与工作器池管理
pub mod workers;
