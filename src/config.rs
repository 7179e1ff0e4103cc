use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub pricing: PricingConfig,
    pub rates_dir: String,
    pub feed_timeout_secs: u64,
    pub calendar_uid_domain: String,
}

/// Fee schedule applied to every direct booking.
#[derive(Clone)]
pub struct PricingConfig {
    pub default_nightly_rate: f64,
    pub cleaning_fee: f64,
    pub service_fee_pct: f64,
    pub default_min_stay: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_nightly_rate: 1500.0,
            cleaning_fee: 500.0,
            service_fee_pct: 0.12,
            default_min_stay: 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            pricing: PricingConfig {
                default_nightly_rate: env_f64("DEFAULT_NIGHTLY_RATE", 1500.0),
                cleaning_fee: env_f64("CLEANING_FEE", 500.0),
                service_fee_pct: env_f64("SERVICE_FEE_PCT", 0.12),
                default_min_stay: env::var("DEFAULT_MIN_STAY").ok().and_then(|v| v.parse().ok()).unwrap_or(2),
            },
            rates_dir: env::var("RATES_DIR").unwrap_or_else(|_| "./rates".to_string()),
            feed_timeout_secs: env::var("FEED_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(30),
            calendar_uid_domain: env::var("CALENDAR_UID_DOMAIN").unwrap_or_else(|_| "rightstay.local".to_string()),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
