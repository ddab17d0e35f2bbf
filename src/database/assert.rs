use anyhow::bail;

use crate::{
    catalog,
    models::{reservations::Reservation, reviews::Review, services::Service, stylists::Stylist},
    storage::BookingStorage,
};

pub fn assert_service(service_id: &str) -> anyhow::Result<&'static Service> {
    match catalog::find_service(service_id) {
        Some(service) => Ok(service),
        None => bail!("No such service"),
    }
}

pub fn assert_stylist(storage: &dyn BookingStorage, stylist_id: &str) -> anyhow::Result<Stylist> {
    match storage.get_stylist(stylist_id)? {
        Some(stylist) => Ok(stylist),
        None => bail!("No such stylist"),
    }
}

pub fn assert_reservation(
    storage: &dyn BookingStorage,
    reservation_id: &str,
) -> anyhow::Result<Reservation> {
    match storage.get_reservation(reservation_id)? {
        Some(reservation) => Ok(reservation),
        None => bail!("No such reservation"),
    }
}

pub fn assert_review(storage: &dyn BookingStorage, review_id: &str) -> anyhow::Result<Review> {
    match storage.get_review(review_id)? {
        Some(review) => Ok(review),
        None => bail!("No such review"),
    }
}
