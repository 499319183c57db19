// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 扫描目标（target）：目标列表中的一行，即分发给工作器的最小工作单元
pub mod target;
