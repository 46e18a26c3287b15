// Application state module
// Read-only state shared by all connection tasks

use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// The service holds no mutable state: datasets are re-read from disk on
/// every request, so sharing the configuration is all that is needed.
pub struct AppState {
    pub config: Config,
    /// Resolved dataset directory, joined with the fixed dataset filenames
    pub dataset_dir: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let dataset_dir = PathBuf::from(&config.datasets.dir);
        Self {
            config,
            dataset_dir,
        }
    }
}
