use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{StorageError, StorageResult},
    models::{
        reservations::{Reservation, ReservationStatus, UpdateReservation},
        reviews::Review,
    },
    storage::BookingStorage,
};

/// Audit name used when the acting admin did not give one.
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// A customer's reservations, matched on exact name and phone.
pub fn customer_reservations<S: BookingStorage + ?Sized>(
    storage: &S,
    customer_name: &str,
    customer_phone: &str,
) -> StorageResult<Vec<Reservation>> {
    if customer_name.is_empty() || customer_phone.is_empty() {
        return Ok(Vec::new());
    }
    let mut reservations: Vec<_> = storage
        .list_reservations()?
        .into_iter()
        .filter(|r| r.belongs_to(customer_name, customer_phone))
        .collect();
    reservations.sort_by_key(|r| (r.date, r.time));
    Ok(reservations)
}

/// Reservation `id` if it belongs to the customer. Someone else's
/// reservation is reported as missing.
pub fn owned_reservation<S: BookingStorage + ?Sized>(
    storage: &S,
    id: &str,
    customer_name: &str,
    customer_phone: &str,
) -> StorageResult<Reservation> {
    storage
        .get_reservation(id)?
        .filter(|r| r.belongs_to(customer_name, customer_phone))
        .ok_or_else(|| StorageError::not_found("reservation", id))
}

pub fn cancel_by_customer<S: BookingStorage + ?Sized>(
    storage: &S,
    id: &str,
    customer_name: &str,
    customer_phone: &str,
    now: DateTime<Utc>,
) -> StorageResult<()> {
    let reservation = owned_reservation(storage, id, customer_name, customer_phone)?;
    cancel(storage, &reservation, customer_name.to_string(), now)
}

pub fn delete_by_customer<S: BookingStorage + ?Sized>(
    storage: &S,
    id: &str,
    customer_name: &str,
    customer_phone: &str,
) -> StorageResult<()> {
    owned_reservation(storage, id, customer_name, customer_phone)?;
    storage.delete_reservation(id)
}

pub fn confirm_by_admin<S: BookingStorage + ?Sized>(
    storage: &S,
    id: &str,
    note: String,
    admin_name: Option<&str>,
    now: DateTime<Utc>,
) -> StorageResult<()> {
    let reservation = storage
        .get_reservation(id)?
        .ok_or_else(|| StorageError::not_found("reservation", id))?;
    if reservation.status != ReservationStatus::Pending {
        return Err(StorageError::Invalid(format!(
            "Only pending reservations can be confirmed, this one is {}",
            reservation.status
        )));
    }
    storage.update_reservation(
        id,
        UpdateReservation::confirm(note, admin_or_default(admin_name), now),
    )
}

pub fn cancel_by_admin<S: BookingStorage + ?Sized>(
    storage: &S,
    id: &str,
    admin_name: Option<&str>,
    now: DateTime<Utc>,
) -> StorageResult<()> {
    let reservation = storage
        .get_reservation(id)?
        .ok_or_else(|| StorageError::not_found("reservation", id))?;
    cancel(storage, &reservation, admin_or_default(admin_name), now)
}

fn cancel<S: BookingStorage + ?Sized>(
    storage: &S,
    reservation: &Reservation,
    by: String,
    now: DateTime<Utc>,
) -> StorageResult<()> {
    if reservation.status == ReservationStatus::Cancelled {
        return Err(StorageError::invalid("Reservation is already cancelled"));
    }
    storage.update_reservation(&reservation.id, UpdateReservation::cancel(by, now))
}

fn admin_or_default(admin_name: Option<&str>) -> String {
    match admin_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_ADMIN_NAME.to_string(),
    }
}

/// What a customer writes; everything else is taken from the reservation.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub rating: f32,
    pub content: String,
    pub images: Vec<String>,
}

/// Creates or replaces the review of a confirmed reservation the customer owns.
pub fn write_review<S: BookingStorage + ?Sized>(
    storage: &S,
    reservation_id: &str,
    customer_name: &str,
    customer_phone: &str,
    draft: ReviewDraft,
    now: DateTime<Utc>,
) -> StorageResult<Review> {
    let reservation = owned_reservation(storage, reservation_id, customer_name, customer_phone)?;
    if reservation.status != ReservationStatus::Confirmed {
        return Err(StorageError::invalid(
            "Only confirmed reservations can be reviewed",
        ));
    }

    storage.upsert_review(Review {
        id: Uuid::new_v4().to_string(),
        reservation_id: reservation.id,
        customer_name: reservation.customer_name,
        stylist_id: reservation.stylist_id,
        service_id: reservation.service_id,
        rating: draft.rating,
        content: draft.content,
        images: draft.images,
        created_at: now,
    })
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub service_id: Option<String>,
    pub stylist_id: Option<String>,
    pub limit: Option<usize>,
}

/// Reviews newest first. A service filter takes precedence over a stylist filter.
pub fn search_reviews<S: BookingStorage + ?Sized>(
    storage: &S,
    filter: &ReviewFilter,
) -> StorageResult<Vec<Review>> {
    let mut reviews: Vec<_> = storage
        .list_reviews()?
        .into_iter()
        .filter(|review| match (&filter.service_id, &filter.stylist_id) {
            (Some(service_id), _) => &review.service_id == service_id,
            (None, Some(stylist_id)) => &review.stylist_id == stylist_id,
            (None, None) => true,
        })
        .collect();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = filter.limit {
        reviews.truncate(limit);
    }
    Ok(reviews)
}
