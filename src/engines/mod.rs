// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 定义浏览器会话接口，并提供基于 chromiumoxide 的实现
pub mod chromium_engine;
pub mod traits;
