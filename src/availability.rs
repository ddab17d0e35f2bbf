//! Bookable half-hour slots for a stylist, a service and a date.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    catalog,
    models::{
        reservations::Reservation,
        services::Service,
        stylists::Stylist,
        times::{ReservationTime, TimeSlot, SLOT_MINUTES},
    },
};

/// How two occupied intervals `[start, end)` are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Intervals that only share an endpoint do not conflict.
    HalfOpen,
    /// Intervals that touch at an endpoint conflict as well, so back-to-back
    /// bookings are refused.
    Inclusive,
}

impl Default for OverlapPolicy {
    fn default() -> Self {
        OverlapPolicy::HalfOpen
    }
}

impl OverlapPolicy {
    fn overlaps(self, (a_start, a_end): (u32, u32), (b_start, b_end): (u32, u32)) -> bool {
        match self {
            OverlapPolicy::HalfOpen => a_start < b_end && a_end > b_start,
            OverlapPolicy::Inclusive => a_start <= b_end && a_end >= b_start,
        }
    }
}

pub fn time_slots(
    stylist: &Stylist,
    service: &Service,
    date: NaiveDate,
    reservations: &[Reservation],
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    time_slots_with_policy(
        stylist,
        service,
        date,
        reservations,
        now,
        OverlapPolicy::default(),
    )
}

/// Slots cover `[start hour, end hour)` of the stylist's day in ascending order.
///
/// Days off yield nothing. On the day of `now`, slots that already started are
/// left out. A slot is unavailable when the service would run past closing
/// time, or when it collides with another active booking of the same stylist
/// on that date; each booking occupies the duration of its own service.
pub fn time_slots_with_policy(
    stylist: &Stylist,
    service: &Service,
    date: NaiveDate,
    reservations: &[Reservation],
    now: NaiveDateTime,
    policy: OverlapPolicy,
) -> Vec<TimeSlot> {
    let hours = &stylist.availability;
    if hours.is_day_off(date) {
        return Vec::new();
    }

    let closing = hours.closing_minutes();
    let booked: Vec<(u32, u32)> = reservations
        .iter()
        .filter(|r| r.stylist_id == stylist.id && r.date == date && r.is_active())
        .map(|r| {
            let duration = catalog::find_service(&r.service_id)
                .map_or(service.duration_minutes, |s| s.duration_minutes);
            let start = r.time.minutes_from_midnight();
            (start, start + duration)
        })
        .collect();

    let mut slots = Vec::new();
    for hour in hours.start_hour()..hours.end_hour() {
        for &minute in SLOT_MINUTES.iter() {
            let time = ReservationTime::new(hour, minute);
            if date == now.date() && has_passed(time, now) {
                continue;
            }

            let start = time.minutes_from_midnight();
            let end = start + service.duration_minutes;
            let exceeds_hours = end > closing;
            let is_booked = booked
                .iter()
                .any(|&interval| policy.overlaps(interval, (start, end)));

            slots.push(TimeSlot {
                hour,
                minute,
                available: !exceeds_hours && !is_booked,
            });
        }
    }
    slots
}

/// Slots of every stylist on `date`, keyed by stylist id.
pub fn slots_for_date(
    stylists: &[Stylist],
    service: &Service,
    date: NaiveDate,
    reservations: &[Reservation],
    now: NaiveDateTime,
) -> BTreeMap<String, Vec<TimeSlot>> {
    stylists
        .iter()
        .map(|stylist| {
            (
                stylist.id.clone(),
                time_slots(stylist, service, date, reservations, now),
            )
        })
        .collect()
}

fn has_passed(time: ReservationTime, now: NaiveDateTime) -> bool {
    time.as_naive_time()
        .map_or(false, |slot_start| slot_start < now.time())
}
