pub mod csv_rate_source;
