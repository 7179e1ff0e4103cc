use crate::domain::models::availability::BlockedDateEntry;
use crate::error::AppError;
use chrono::NaiveDate;
use icalendar::{Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime};
use tracing::debug;

/// Origin tag stamped on every entry; upstream feeds are channel-manager
/// exports (Airbnb et al.) and all flow through the same pipe.
const FEED_SOURCE: &str = "airbnb";
const DEFAULT_REASON: &str = "Booked";

/// Expands every VEVENT in an iCalendar feed into one blocked-date entry per
/// calendar day of `[DTSTART, DTEND)`. The end date is exclusive, matching
/// the nightly-stay convention: a reservation ending on day E frees day E.
///
/// Overlapping events may emit duplicate dates; the ledger replace treats
/// any blocked entry for a date as blocking, so duplicates are harmless.
pub fn parse_feed(feed_text: &str) -> Result<Vec<BlockedDateEntry>, AppError> {
    // The strict parser rejects non-calendar text (truncated feeds, upstream
    // HTML error pages) instead of yielding an empty calendar. An empty
    // result here would otherwise wipe the ledger on the next reconcile.
    let unfolded = icalendar::parser::unfold(feed_text);
    let parsed = icalendar::parser::read_calendar(&unfolded)
        .map_err(|e| AppError::Upstream(format!("Failed to parse iCal feed: {}", e)))?;
    let calendar = Calendar::from(parsed);

    let mut blocked = Vec::new();

    for component in &calendar.components {
        let CalendarComponent::Event(event) = component else {
            continue;
        };

        let Some(start) = event.get_start().map(to_naive_date) else {
            debug!("Skipping VEVENT without DTSTART");
            continue;
        };
        let Some(end) = event.get_end().map(to_naive_date) else {
            debug!("Skipping VEVENT without DTEND");
            continue;
        };

        let reason = event.get_summary().unwrap_or(DEFAULT_REASON).to_string();

        let mut day = start;
        while day < end {
            blocked.push(BlockedDateEntry {
                date: day,
                reason: reason.clone(),
                source: FEED_SOURCE.to_string(),
            });
            day = day.succ_opt().ok_or_else(|| {
                AppError::Upstream(format!("Event date out of range at {}", day))
            })?;
        }
    }

    debug!("Parsed {} blocked dates from feed", blocked.len());
    Ok(blocked)
}

/// Day granularity: date-typed values are used as-is, date-time values are
/// truncated to their calendar day (midnight normalization).
fn to_naive_date(value: DatePerhapsTime) -> NaiveDate {
    match value {
        DatePerhapsTime::Date(date) => date,
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(dt)) => dt.date(),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => dt.date_naive(),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => {
            date_time.date()
        }
    }
}
