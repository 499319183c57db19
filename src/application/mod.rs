// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含扫描流程的编排与用例实现
pub mod scan_runner;
pub mod use_cases;
