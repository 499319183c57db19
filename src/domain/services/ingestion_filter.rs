// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ScanSettings;
use crate::domain::models::target::TargetRecord;

/// 导入过滤器
///
/// 根据组织白名单与域名白名单决定是否跳过一条目标记录。
/// 两个名单都是子串匹配：组织名单匹配 organisation 列，域名名单匹配 url 列。
#[derive(Debug, Clone, Default)]
pub struct IngestionFilter {
    organisations: Vec<String>,
    domains: Vec<String>,
}

impl IngestionFilter {
    pub fn new(organisations: Vec<String>, domains: Vec<String>) -> Self {
        Self {
            organisations,
            domains,
        }
    }

    pub fn from_settings(settings: &ScanSettings) -> Self {
        Self::new(
            settings.filter_to_organisations.clone(),
            settings.filter_to_domains.clone(),
        )
    }

    /// 判断记录是否应被跳过
    ///
    /// - 两个名单都为空：从不跳过
    /// - 只设置组织名单：组织不匹配时跳过
    /// - 只设置域名名单：域名不匹配时跳过
    /// - 两个名单都设置：必须同时匹配，否则跳过
    pub fn should_skip(&self, record: &TargetRecord) -> bool {
        let org_active = !self.organisations.is_empty();
        let domain_active = !self.domains.is_empty();

        let found_org = org_active
            && self
                .organisations
                .iter()
                .any(|org| record.organisation.contains(org.as_str()));
        let found_domain = domain_active
            && self
                .domains
                .iter()
                .any(|domain| record.url.contains(domain.as_str()));

        match (org_active, domain_active) {
            (true, true) => !(found_org && found_domain),
            (true, false) => !found_org,
            (false, true) => !found_domain,
            (false, false) => false,
        }
    }
}
