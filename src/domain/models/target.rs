// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 扫描目标
///
/// 目标列表文件中的一行：组织、URL 以及其余透传列。
/// 导入时构造一次，之后不再修改；出队后由单个工作器独占。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// 组织名称
    pub organisation: String,
    /// 目标URL（导入后为规范化后的基础URL）
    pub url: String,
    /// 其余列，按表头名称保存
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl TargetRecord {
    pub fn new(organisation: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            organisation: organisation.into(),
            url: url.into(),
            fields: BTreeMap::new(),
        }
    }

    /// 由表头与一行数据构造目标
    ///
    /// 与表头对齐的列按名称保存；行比表头短时缺失的列视为空字符串，
    /// 比表头长时多出的列被忽略。
    pub fn from_row<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut fields: BTreeMap<String, String> = headers
            .into_iter()
            .zip(values)
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();

        let organisation = fields.remove("organisation").unwrap_or_default();
        let url = fields.remove("url").unwrap_or_default();

        Self {
            organisation,
            url,
            fields,
        }
    }

    /// 返回替换了URL的新目标
    pub fn with_url(self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self
        }
    }

    /// 读取透传列
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
