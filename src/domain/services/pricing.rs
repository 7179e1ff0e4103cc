use crate::config::PricingConfig;
use crate::domain::models::rates::RateTable;
use crate::error::AppError;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NightlyPrice {
    pub date: NaiveDate,
    pub price: f64,
}

/// Derived, never persisted. Arithmetic stays at full f64 precision here;
/// rounding to cents happens only when a response DTO is built.
#[derive(Debug, Serialize, Clone)]
pub struct PricingBreakdown {
    pub number_of_nights: i64,
    pub nightly_prices: Vec<NightlyPrice>,
    pub base_price: f64,
    pub average_price_per_night: f64,
    pub cleaning_fee: f64,
    pub service_fee: f64,
    pub total: f64,
    /// True when any night fell back to the default rate: the whole
    /// breakdown is then an estimate, not a quoted price.
    pub using_default_pricing: bool,
    pub minimum_stay: u32,
    /// Advisory only. A short stay still gets a full quote; the caller
    /// decides whether to surface the shortfall.
    pub meets_minimum_stay: bool,
}

/// Prices a stay over `[check_in, check_out)` against the property's rate
/// table. Nights absent from the table are charged at the default nightly
/// rate and taint the breakdown as an estimate.
pub fn quote(
    check_in: NaiveDate,
    check_out: NaiveDate,
    table: &RateTable,
    cfg: &PricingConfig,
) -> Result<PricingBreakdown, AppError> {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(AppError::Validation(
            "Check-out date must be after check-in date".to_string(),
        ));
    }

    let minimum_stay = table
        .get(check_in)
        .map(|e| e.min_stay)
        .unwrap_or(cfg.default_min_stay);
    let meets_minimum_stay = nights >= i64::from(minimum_stay);

    let mut nightly_prices = Vec::with_capacity(nights as usize);
    let mut base_price = 0.0;
    let mut using_default_pricing = false;

    let mut night = check_in;
    while night < check_out {
        let price = match table.get(night) {
            Some(entry) => entry.nightly_price,
            None => {
                using_default_pricing = true;
                cfg.default_nightly_rate
            }
        };
        nightly_prices.push(NightlyPrice { date: night, price });
        base_price += price;
        night = night
            .succ_opt()
            .ok_or_else(|| AppError::Validation(format!("Date out of range at {}", night)))?;
    }

    let cleaning_fee = cfg.cleaning_fee;
    let service_fee = base_price * cfg.service_fee_pct;

    Ok(PricingBreakdown {
        number_of_nights: nights,
        average_price_per_night: base_price / nights as f64,
        base_price,
        nightly_prices,
        cleaning_fee,
        service_fee,
        total: base_price + cleaning_fee + service_fee,
        using_default_pricing,
        minimum_stay,
        meets_minimum_stay,
    })
}
