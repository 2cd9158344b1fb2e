use std::path::PathBuf;

/// Default location of the records file, relative to the working directory.
pub const DEFAULT_RECORDS_PATH: &str = "records.csv";

/// Configuration for the leaderboard service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path of the CSV file holding the record table.
    pub records_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from(DEFAULT_RECORDS_PATH),
        }
    }
}
