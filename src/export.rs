//! CSV output files: the flat export and the run log.

use anyhow::{Context, Result};
use std::fs::File;

use crate::models::{CostRow, RunLogRow};

pub const EXPORT_HEADER: [&str; 8] = [
    "account_id",
    "account_name",
    "period_start",
    "period_end",
    "granularity",
    "service",
    "amount",
    "unit",
];

/// Single writer for the flat export file, opened once per run. The header
/// goes out immediately so even a run that yields zero rows leaves a valid
/// CSV behind.
pub struct ExportWriter {
    inner: csv::Writer<File>,
    rows_written: u64,
}

impl ExportWriter {
    pub fn create(path: &str) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("create output csv {path}"))?;
        let mut inner = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        inner
            .write_record(EXPORT_HEADER)
            .context("write csv header")?;
        Ok(ExportWriter {
            inner,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, rows: &[CostRow]) -> Result<()> {
        for row in rows {
            self.inner.serialize(row).context("write cost row")?;
        }
        self.rows_written += rows.len() as u64;
        Ok(())
    }

    /// Flush and return the number of data rows written.
    pub fn finish(mut self) -> Result<u64> {
        self.inner.flush().context("flush output csv")?;
        Ok(self.rows_written)
    }
}

/// Overwrite the run log with this run's single summary row.
pub fn write_run_log(path: &str, row: &RunLogRow) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create run log {path}"))?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(row).context("write run log row")?;
    writer.flush().context("flush run log")?;
    Ok(())
}
