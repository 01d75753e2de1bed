//! CSV seed importer
//!
//! 逐行导入，单行失败只记录不中断；重复导入不会产生重复数据。

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::Result;
use crate::services::import_validation::{ImportRowError, validate_venue_row};
use crate::storage::{InsertOutcome, SeaOrmStorage};
use crate::utils::csv_handler::{CsvReadResult, import_from_csv};

/// 导入结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total_rows: usize,
    pub inserted: usize,
    pub skipped_existing: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows: {} inserted, {} already present, {} failed",
            self.total_rows, self.inserted, self.skipped_existing, self.failed
        )
    }
}

impl ImportReport {
    fn record_failure(&mut self, error: &ImportRowError) {
        warn!("Import: {}", error);
        self.failed += 1;
        self.errors.push(error.to_string());
    }
}

pub struct ImportService {
    storage: Arc<SeaOrmStorage>,
}

impl ImportService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 从 CSV 文件导入
    pub async fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<ImportReport> {
        info!("Importing venues from {}", path.as_ref().display());
        let rows = import_from_csv(path)?;
        self.import_rows(rows).await
    }

    /// 导入已读取的 CSV 行
    pub async fn import_rows(&self, read: CsvReadResult) -> Result<ImportReport> {
        let mut report = ImportReport {
            total_rows: read.total_rows(),
            ..Default::default()
        };

        for (row_num, message) in read.errors {
            report.record_failure(&ImportRowError {
                row_num,
                entity_id: None,
                error: crate::errors::VenueError::import(message),
            });
        }

        for (row_num, row) in read.rows {
            let seed = match validate_venue_row(row, row_num) {
                Ok(seed) => seed,
                Err(e) => {
                    report.record_failure(&e);
                    continue;
                }
            };

            match self.storage.import_venue(&seed).await {
                Ok(InsertOutcome::Inserted) => report.inserted += 1,
                Ok(InsertOutcome::AlreadyExists) => report.skipped_existing += 1,
                Err(error) => report.record_failure(&ImportRowError {
                    row_num,
                    entity_id: Some(seed.entity.entity_id.clone()),
                    error,
                }),
            }

            let processed = report.inserted + report.skipped_existing + report.failed;
            if processed % 1000 == 0 {
                info!("Import progress: {}/{}", processed, report.total_rows);
            }
        }

        info!("Import finished: {}", report);
        Ok(report)
    }
}
