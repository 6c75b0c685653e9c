use std::path::PathBuf;

use thiserror::Error;

use super::category::StatCategory;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to read {category} stats from {}: {source}", path.display())]
    Io {
        category: StatCategory,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {category} stats in {}: {source}", path.display())]
    Json {
        category: StatCategory,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
