// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ScanSettings;
use crate::domain::models::target::TargetRecord;
use crate::domain::services::analytics::Analytics;
use crate::domain::services::ingestion_filter::IngestionFilter;
use crate::queue::target_queue::{InMemoryTargetQueue, TargetQueue};
use crate::utils::errors::LoadError;
use crate::utils::url_utils::normalize_url;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 目标列表文件的扩展名
const LIST_EXTENSION: &str = "csv";

/// 必须存在的表头列
const REQUIRED_COLUMNS: [&str; 2] = ["organisation", "url"];

/// 导入统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 实际读取的目录
    pub source_dir: PathBuf,
    pub files_read: usize,
    pub rows_read: usize,
    /// 被白名单过滤掉的行
    pub skipped_rows: usize,
    /// URL 无法解析而被丢弃的行
    pub rejected_rows: usize,
    /// 生效的每域名页面上限
    pub max_links_per_domain: usize,
}

/// 导入结果
pub struct LoadedTargets {
    pub queue: Arc<InMemoryTargetQueue>,
    pub report: LoadReport,
}

/// 目标导入器
///
/// 读取目录下所有目标列表文件，经过过滤与规范化后放入共享队列，
/// 并在返回前把每个目标注册到统计中。
pub struct TargetLoader<'a> {
    settings: &'a ScanSettings,
    analytics: &'a Analytics,
    filter: IngestionFilter,
}

impl<'a> TargetLoader<'a> {
    pub fn new(settings: &'a ScanSettings, analytics: &'a Analytics) -> Self {
        Self {
            settings,
            analytics,
            filter: IngestionFilter::from_settings(settings),
        }
    }

    /// 导入目标，按配置决定是否打乱顺序
    pub fn load(&self) -> Result<LoadedTargets, LoadError> {
        self.load_with_rng(&mut rand::rng())
    }

    /// 使用指定的随机数生成器导入目标
    pub fn load_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<LoadedTargets, LoadError> {
        // The nocrawl override is resolved once, before any row is read
        let scope = self.settings.effective_scope();
        let queue = Arc::new(InMemoryTargetQueue::new());
        let mut report = LoadReport {
            source_dir: scope.source_dir.clone(),
            max_links_per_domain: scope.max_links_per_domain,
            ..LoadReport::default()
        };

        for path in list_files(&scope.source_dir)? {
            self.load_file(&path, queue.as_ref(), &mut report)?;
            report.files_read += 1;
        }

        if self.settings.shuffle_base_urls {
            queue.shuffle(rng);
        }

        info!(
            "Loaded {} target(s) from {} file(s) in {} ({} filtered, {} rejected)",
            queue.len(),
            report.files_read,
            report.source_dir.display(),
            report.skipped_rows,
            report.rejected_rows
        );

        Ok(LoadedTargets { queue, report })
    }

    fn load_file(
        &self,
        path: &Path,
        queue: &InMemoryTargetQueue,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        let read_error = |source: csv::Error| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(read_error)?;

        let headers = reader.headers().map_err(read_error)?.clone();
        if headers.is_empty() {
            return Err(LoadError::MissingHeader(path.to_path_buf()));
        }
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                });
            }
        }

        debug!("Reading targets from {}", path.display());

        for (index, row) in reader.records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(read_error(e)),
                Err(e) => {
                    warn!("Rejecting row {} of {}: {}", index + 2, path.display(), e);
                    report.rows_read += 1;
                    report.rejected_rows += 1;
                    continue;
                }
            };
            report.rows_read += 1;

            let record = TargetRecord::from_row(headers.iter(), row.iter());
            if self.filter.should_skip(&record) {
                report.skipped_rows += 1;
                continue;
            }

            let normalized = match normalize_url(record.url.trim()) {
                Ok(url) => url,
                Err(e) => {
                    warn!(
                        "Rejecting row {} of {}: invalid URL {:?}: {}",
                        index + 2,
                        path.display(),
                        record.url,
                        e
                    );
                    report.rejected_rows += 1;
                    continue;
                }
            };

            let record = record.with_url(normalized);
            self.analytics.register_base_url(&record.url);
            queue.enqueue(record);
        }

        Ok(())
    }
}

/// 列出目录下的目标列表文件，按文件名排序
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_dir_error = |source: std::io::Error| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        let is_list = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(LIST_EXTENSION));

        if is_list && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "load_targets_test.rs"]
mod tests;
