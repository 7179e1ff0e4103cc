use crate::domain::models::rates::RateTable;
use crate::domain::ports::RateTableSource;
use crate::error::AppError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Per-property rate exports on disk: `{rates_dir}/{property_id}.csv`. The
/// property id keys the lookup, so each property carries its own table
/// instead of one hardcoded global file.
pub struct CsvRateSource {
    rates_dir: PathBuf,
}

impl CsvRateSource {
    pub fn new(rates_dir: impl Into<PathBuf>) -> Self {
        Self { rates_dir: rates_dir.into() }
    }
}

#[async_trait]
impl RateTableSource for CsvRateSource {
    async fn load(&self, property_id: &str) -> Result<Option<RateTable>, AppError> {
        // Property ids come from the channel manager; refuse anything that
        // could escape the rates directory.
        if property_id.contains('/') || property_id.contains('\\') || property_id.contains("..") {
            return Err(AppError::Validation(format!(
                "Invalid property id: {}",
                property_id
            )));
        }

        let path = self.rates_dir.join(format!("{}.csv", property_id));
        let csv_text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No rate table for property {}, pricing will use defaults", property_id);
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::Upstream(format!(
                    "Failed to read rate table {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let table = RateTable::from_csv(&csv_text)?;
        debug!("Loaded {} rate entries for property {}", table.len(), property_id);
        Ok(Some(table))
    }
}
