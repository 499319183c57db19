// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供共享的目标队列
/// 导入阶段一次性填充，扫描阶段由所有工作器并发取出
pub mod target_queue;
