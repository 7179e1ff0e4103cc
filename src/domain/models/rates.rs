use crate::error::AppError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One row of the per-property rate export. At most one entry per date; a
/// date missing from the table means "use the default nightly rate."
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RateEntry {
    pub date: NaiveDate,
    pub nightly_price: f64,
    pub min_stay: u32,
    pub available: bool,
}

/// Date-keyed rate table parsed from a PriceLabs-style CSV export.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    entries: HashMap<NaiveDate, RateEntry>,
}

impl RateTable {
    pub fn get(&self, date: NaiveDate) -> Option<&RateEntry> {
        self.entries.get(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, entry: RateEntry) {
        self.entries.insert(entry.date, entry);
    }

    /// Parses a rate export. The header row is matched by name so column
    /// order in the upstream export can shift without breaking ingestion;
    /// rows with an unparseable date or price are skipped, matching the
    /// tolerant behavior of the channel-manager exports we receive.
    pub fn from_csv(csv_text: &str) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(csv_text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::Upstream(format!("Unreadable rate table header: {}", e)))?
            .clone();

        let col = |pred: &dyn Fn(&str) -> bool| {
            headers.iter().position(|h| pred(&h.to_ascii_lowercase()))
        };

        let date_idx = col(&|h| h == "date")
            .ok_or_else(|| AppError::Upstream("Rate table has no date column".to_string()))?;
        let price_idx = col(&|h| h.contains("price"))
            .ok_or_else(|| AppError::Upstream("Rate table has no price column".to_string()))?;
        let min_stay_idx = col(&|h| h.contains("min"));
        let available_idx = col(&|h| h.contains("avail"));

        let mut table = RateTable::default();
        for record in reader.records() {
            let record =
                record.map_err(|e| AppError::Upstream(format!("Unreadable rate table row: {}", e)))?;

            let Some(date) = record
                .get(date_idx)
                .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
            else {
                continue;
            };
            let Some(nightly_price) = record.get(price_idx).and_then(|v| v.parse::<f64>().ok())
            else {
                continue;
            };

            let min_stay = min_stay_idx
                .and_then(|i| record.get(i))
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(1);
            let available = available_idx
                .and_then(|i| record.get(i))
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true);

            table.insert(RateEntry { date, nightly_price, min_stay, available });
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Day,Season,Min Stay,Price with Default Customization,Base Price,Available
2025-03-09,Sun,High,2,1800,1500,true
2025-03-10,Mon,High,2,1750.50,1500,true
not-a-date,Mon,High,2,1000,1500,true
2025-03-11,Tue,High,3,,1500,false
";

    #[test]
    fn test_parses_rows_by_header_name() {
        let table = RateTable::from_csv(SAMPLE).unwrap();
        assert_eq!(table.len(), 2);

        let mar9 = table.get(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()).unwrap();
        assert_eq!(mar9.nightly_price, 1800.0);
        assert_eq!(mar9.min_stay, 2);
        assert!(mar9.available);

        let mar10 = table.get(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()).unwrap();
        assert_eq!(mar10.nightly_price, 1750.50);
    }

    #[test]
    fn test_skips_malformed_rows() {
        let table = RateTable::from_csv(SAMPLE).unwrap();
        // "not-a-date" and the empty-price row were dropped, not errors.
        assert!(table.get(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()).is_none());
    }

    #[test]
    fn test_missing_date_column_is_an_error() {
        let err = RateTable::from_csv("Price,Available\n100,true\n").unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
