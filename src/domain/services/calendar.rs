use crate::domain::models::booking::Booking;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

/// Renders confirmed/completed bookings as an iCalendar document for
/// re-syndication to other calendar consumers (Airbnb import, etc.).
///
/// Each event's UID is derived from the booking id, so repeated exports of
/// the same booking are idempotent from the consumer's point of view.
pub fn generate_export(bookings: &[Booking], uid_domain: &str) -> String {
    let mut calendar = Calendar::new().name("Direct Stay Bookings").done();

    for booking in bookings {
        let event = IcalEvent::new()
            .uid(&booking_uid(&booking.id, uid_domain))
            .summary("Booked")
            .description(&format!(
                "Booking: {}\nApartment: {}\nStatus: {:?}",
                booking.booking_reference, booking.apartment_id, booking.booking_status
            ))
            .starts(booking.check_in_date)
            .ends(booking.check_out_date)
            .done();

        calendar.push(event);
    }

    calendar.to_string()
}

pub fn booking_uid(booking_id: &str, uid_domain: &str) -> String {
    format!("booking-{}@{}", booking_id, uid_domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{Booking, NewBookingParams};
    use chrono::NaiveDate;

    fn sample_booking() -> Booking {
        Booking::new(NewBookingParams {
            apartment_id: "apt-1".into(),
            guest_id: "g-1".into(),
            channel_id: "c-1".into(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            accommodation_total: 4500.0,
            cleaning_fee: 500.0,
            extra_charges: 540.0,
            notes: None,
        })
    }

    #[test]
    fn test_uid_is_stable_across_exports() {
        let booking = sample_booking();
        let expected = format!("UID:booking-{}@stays.test", booking.id);

        let first = generate_export(std::slice::from_ref(&booking), "stays.test");
        let second = generate_export(std::slice::from_ref(&booking), "stays.test");

        assert!(first.contains(&expected));
        assert!(second.contains(&expected));
    }

    #[test]
    fn test_export_contains_stay_range_and_reference() {
        let booking = sample_booking();
        let ics = generate_export(std::slice::from_ref(&booking), "stays.test");

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("SUMMARY:Booked"));
        assert!(ics.contains(&booking.booking_reference));
        assert!(ics.contains("20250309"));
        assert!(ics.contains("20250312"));
    }

    #[test]
    fn test_empty_booking_set_is_a_valid_calendar() {
        let ics = generate_export(&[], "stays.test");
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
