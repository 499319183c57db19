// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// 应用程序配置设置
///
/// 包含扫描、浏览器与输出三部分配置，整个扫描期间只读
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 扫描配置
    pub scan: ScanSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 输出配置
    pub output: OutputSettings,
}

/// 扫描配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScanSettings {
    /// 并发工作器数量
    #[validate(range(min = 1))]
    pub thread_count: usize,
    /// 爬取模式下的目标列表目录
    pub base_urls_crawl_path: PathBuf,
    /// 非爬取模式下的目标列表目录
    pub base_urls_nocrawl_path: PathBuf,
    /// 非爬取模式：每个域名只访问一个页面
    pub nocrawl_mode: bool,
    /// 每个域名最多访问的页面数
    #[validate(range(min = 1))]
    pub max_links_per_domain: usize,
    /// 是否打乱目标顺序
    pub shuffle_base_urls: bool,
    /// 组织白名单（子串匹配）
    #[serde(default)]
    pub filter_to_organisations: Vec<String>,
    /// 域名白名单（子串匹配）
    #[serde(default)]
    pub filter_to_domains: Vec<String>,
}

/// 本次扫描实际生效的范围
///
/// 非爬取模式下目录切换为 nocrawl 目录，页面上限固定为 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanScope {
    pub source_dir: PathBuf,
    pub max_links_per_domain: usize,
}

impl ScanSettings {
    pub fn effective_scope(&self) -> ScanScope {
        if self.nocrawl_mode {
            ScanScope {
                source_dir: self.base_urls_nocrawl_path.clone(),
                max_links_per_domain: 1,
            }
        } else {
            ScanScope {
                source_dir: self.base_urls_crawl_path.clone(),
                max_links_per_domain: self.max_links_per_domain,
            }
        }
    }
}

/// 浏览器配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BrowserSettings {
    /// 是否无头模式运行
    pub headless: bool,
    /// Chrome 可执行文件路径，未设置时自动探测
    pub chrome_executable: Option<PathBuf>,
    /// 远程调试地址，设置后连接已有的 Chrome 而不是启动新进程
    pub remote_debugging_url: Option<String>,
    /// 单个页面的加载超时时间（秒）
    #[validate(range(min = 1))]
    pub page_timeout_secs: u64,
}

/// 输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 结果目录
    pub results_path: PathBuf,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、config/default、config/{APP_ENVIRONMENT} 与环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// 从指定的配置文件加载
    ///
    /// 文件必须存在；环境变量仍然可以覆盖文件中的值
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let mut builder = Config::builder()
            // Scan defaults
            .set_default("scan.thread_count", 4)?
            .set_default("scan.base_urls_crawl_path", "./base_urls/crawl")?
            .set_default("scan.base_urls_nocrawl_path", "./base_urls/nocrawl")?
            .set_default("scan.nocrawl_mode", false)?
            .set_default("scan.max_links_per_domain", 20)?
            .set_default("scan.shuffle_base_urls", true)?
            .set_default("scan.filter_to_organisations", Vec::<String>::new())?
            .set_default("scan.filter_to_domains", Vec::<String>::new())?
            // Browser defaults
            .set_default("browser.headless", true)?
            .set_default("browser.page_timeout_secs", 30)?
            // Output defaults
            .set_default("output.results_path", "./results")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("A11Y_CRAWL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("scan.filter_to_organisations")
                    .with_list_parse_key("scan.filter_to_domains")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid scan settings: {}", e)))?;
        self.browser
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid browser settings: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
