// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// - 目标导入（load_targets）：读取目标列表并构建共享队列
pub mod load_targets;
