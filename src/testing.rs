use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::{
    reservations::{Reservation, ReservationStatus},
    reviews::Review,
    times::ReservationTime,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

pub fn reservation(id: &str, date: NaiveDate, stylist_id: &str, hour: u32, minute: u32) -> Reservation {
    Reservation {
        id: id.to_string(),
        customer_name: "Kim".to_string(),
        customer_phone: "010-1234-5678".to_string(),
        service_id: "cut".to_string(),
        stylist_id: stylist_id.to_string(),
        date,
        time: ReservationTime::new(hour, minute),
        status: ReservationStatus::Pending,
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        confirmation_note: None,
        confirmed_by: None,
        confirmed_at: None,
        cancelled_by: None,
        cancelled_at: None,
        has_review: false,
    }
}

pub fn review(id: &str, reservation_id: &str, rating: f32, content: &str) -> Review {
    Review {
        id: id.to_string(),
        reservation_id: reservation_id.to_string(),
        customer_name: "Kim".to_string(),
        stylist_id: "stylist1".to_string(),
        service_id: "cut".to_string(),
        rating,
        content: content.to_string(),
        images: vec![],
        created_at: Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap(),
    }
}
