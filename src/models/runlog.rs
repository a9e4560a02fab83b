use serde::Serialize;

/// Row written to `logs.csv` after each run.
#[derive(Serialize, Debug)]
pub struct RunLogRow {
    pub run_started_at_utc: String,
    pub run_finished_at_utc: String,
    pub data_start_date: String,
    pub data_end_date: String,
    pub granularity: String,
    pub group_by: String,
    pub rows_written: u64,
}
