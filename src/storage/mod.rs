//! Persistence contract and its implementation over a plain key-value store.
//!
//! Every collection is kept as one JSON array under its own key, so any backend
//! that can get and set strings can hold the whole salon.

mod memory;

pub use self::memory::MemoryStore;

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    catalog,
    error::{StorageError, StorageResult},
    models::{
        reservations::{Reservation, UpdateReservation},
        reviews::Review,
        stylists::Stylist,
    },
};

pub const RESERVATIONS_KEY: &str = "hairnow_reservations";
pub const STYLISTS_KEY: &str = "hairnow_stylists";
pub const REVIEWS_KEY: &str = "hairnow_reviews";

/// Non-cancelled reservations allowed per calendar date, across all stylists.
pub const DEFAULT_DAILY_LIMIT: usize = 3;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

pub trait BookingStorage: Send + Sync {
    fn list_reservations(&self) -> StorageResult<Vec<Reservation>>;
    /// Fails with [`StorageError::CapacityExceeded`] when the date is full.
    fn create_reservation(&self, reservation: Reservation) -> StorageResult<()>;
    /// Unknown ids are ignored.
    fn update_reservation(&self, id: &str, update: UpdateReservation) -> StorageResult<()>;
    fn delete_reservation(&self, id: &str) -> StorageResult<()>;

    fn list_stylists(&self) -> StorageResult<Vec<Stylist>>;
    /// Inserts, or replaces the stylist with the same id.
    fn save_stylist(&self, stylist: Stylist) -> StorageResult<()>;
    fn delete_stylist(&self, id: &str) -> StorageResult<()>;

    fn list_reviews(&self) -> StorageResult<Vec<Review>>;
    /// One review per reservation. Updating keeps the stored id and `created_at`,
    /// and marks the reservation as reviewed.
    fn upsert_review(&self, review: Review) -> StorageResult<Review>;
    /// Clears the reservation's review flag as well.
    fn delete_review(&self, id: &str) -> StorageResult<()>;

    fn list_reservations_by_date(&self, date: NaiveDate) -> StorageResult<Vec<Reservation>> {
        Ok(self
            .list_reservations()?
            .into_iter()
            .filter(|reservation| reservation.date == date)
            .collect())
    }

    fn get_reservation(&self, id: &str) -> StorageResult<Option<Reservation>> {
        Ok(self
            .list_reservations()?
            .into_iter()
            .find(|reservation| reservation.id == id))
    }

    fn get_stylist(&self, id: &str) -> StorageResult<Option<Stylist>> {
        Ok(self
            .list_stylists()?
            .into_iter()
            .find(|stylist| stylist.id == id))
    }

    fn get_review(&self, id: &str) -> StorageResult<Option<Review>> {
        Ok(self.list_reviews()?.into_iter().find(|review| review.id == id))
    }

    fn get_review_by_reservation(&self, reservation_id: &str) -> StorageResult<Option<Review>> {
        Ok(self
            .list_reviews()?
            .into_iter()
            .find(|review| review.reservation_id == reservation_id))
    }
}

pub struct KvStorage<S> {
    store: S,
    daily_limit: usize,
    // serialises read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> KvStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_daily_limit(store, DEFAULT_DAILY_LIMIT)
    }

    pub fn with_daily_limit(store: S, daily_limit: usize) -> Self {
        Self {
            store,
            daily_limit,
            write_lock: Mutex::new(()),
        }
    }

    pub fn daily_limit(&self) -> usize {
        self.daily_limit
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| StorageError::Poisoned)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<Vec<T>>> {
        let raw = match self.store.get(key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        serde_json::from_str(&raw).map(Some).map_err(|source| {
            log::warn!("stored collection `{}` could not be parsed: {}", key, source);
            StorageError::Corrupted {
                key: key.to_string(),
                source,
            }
        })
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> StorageResult<()> {
        let raw = serde_json::to_string(items).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &raw)
    }

    fn reservations(&self) -> StorageResult<Vec<Reservation>> {
        Ok(self.load(RESERVATIONS_KEY)?.unwrap_or_default())
    }

    fn stylists(&self) -> StorageResult<Vec<Stylist>> {
        Ok(self
            .load(STYLISTS_KEY)?
            .unwrap_or_else(catalog::default_stylists))
    }

    fn reviews(&self) -> StorageResult<Vec<Review>> {
        Ok(self.load(REVIEWS_KEY)?.unwrap_or_default())
    }
}

impl<S: KeyValueStore> BookingStorage for KvStorage<S> {
    fn list_reservations(&self) -> StorageResult<Vec<Reservation>> {
        self.reservations()
    }

    fn create_reservation(&self, reservation: Reservation) -> StorageResult<()> {
        let _guard = self.lock()?;
        let mut reservations = self.reservations()?;

        let booked = reservations
            .iter()
            .filter(|r| r.date == reservation.date && r.is_active())
            .count();
        if booked >= self.daily_limit {
            log::warn!(
                "reservation for {} rejected: {} of {} already booked",
                reservation.date,
                booked,
                self.daily_limit
            );
            return Err(StorageError::CapacityExceeded {
                date: reservation.date,
                limit: self.daily_limit,
            });
        }

        log::info!(
            "reservation {} created for {} {} with {}",
            reservation.id,
            reservation.date,
            reservation.time,
            reservation.stylist_id
        );
        reservations.push(reservation);
        self.save(RESERVATIONS_KEY, &reservations)
    }

    fn update_reservation(&self, id: &str, update: UpdateReservation) -> StorageResult<()> {
        let _guard = self.lock()?;
        let mut reservations = self.reservations()?;

        match reservations.iter_mut().find(|r| r.id == id) {
            Some(reservation) => {
                if let Some(status) = update.status {
                    log::info!("reservation {} is now {}", id, status);
                }
                update.apply(reservation);
            }
            None => {
                log::debug!("update of unknown reservation {} ignored", id);
                return Ok(());
            }
        }
        self.save(RESERVATIONS_KEY, &reservations)
    }

    fn delete_reservation(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;
        let mut reservations = self.reservations()?;
        reservations.retain(|r| r.id != id);
        self.save(RESERVATIONS_KEY, &reservations)
    }

    fn list_stylists(&self) -> StorageResult<Vec<Stylist>> {
        self.stylists()
    }

    fn save_stylist(&self, stylist: Stylist) -> StorageResult<()> {
        stylist.validate()?;

        let _guard = self.lock()?;
        let mut stylists = self.stylists()?;
        match stylists.iter_mut().find(|s| s.id == stylist.id) {
            Some(existing) => *existing = stylist,
            None => stylists.push(stylist),
        }
        self.save(STYLISTS_KEY, &stylists)
    }

    fn delete_stylist(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;
        let mut stylists = self.stylists()?;
        stylists.retain(|s| s.id != id);
        self.save(STYLISTS_KEY, &stylists)
    }

    fn list_reviews(&self) -> StorageResult<Vec<Review>> {
        self.reviews()
    }

    fn upsert_review(&self, mut review: Review) -> StorageResult<Review> {
        review.validate()?;

        let _guard = self.lock()?;
        let mut reservations = self.reservations()?;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == review.reservation_id)
            .ok_or_else(|| StorageError::not_found("reservation", &review.reservation_id))?;

        let mut reviews = self.reviews()?;
        match reviews
            .iter_mut()
            .find(|r| r.reservation_id == review.reservation_id)
        {
            Some(existing) => {
                review.id = existing.id.clone();
                review.created_at = existing.created_at;
                *existing = review.clone();
            }
            None => reviews.push(review.clone()),
        }
        reservation.has_review = true;

        self.save(REVIEWS_KEY, &reviews)?;
        self.save(RESERVATIONS_KEY, &reservations)?;
        Ok(review)
    }

    fn delete_review(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;
        let mut reviews = self.reviews()?;
        let reservation_id = match reviews.iter().find(|r| r.id == id) {
            Some(review) => review.reservation_id.clone(),
            None => return Ok(()),
        };

        let mut reservations = self.reservations()?;
        if let Some(reservation) = reservations.iter_mut().find(|r| r.id == reservation_id) {
            reservation.has_review = false;
            self.save(RESERVATIONS_KEY, &reservations)?;
        }

        reviews.retain(|r| r.id != id);
        self.save(REVIEWS_KEY, &reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::reservations::ReservationStatus,
        testing::{date, reservation, review},
    };

    fn storage() -> KvStorage<MemoryStore> {
        KvStorage::new(MemoryStore::new())
    }

    #[test]
    fn fourth_reservation_of_a_day_is_rejected() {
        let storage = storage();
        let day = date(2024, 6, 4);
        for (i, stylist) in ["stylist1", "stylist2", "stylist3"].iter().enumerate() {
            storage
                .create_reservation(reservation(&format!("r{}", i), day, stylist, 10 + i as u32, 0))
                .unwrap();
        }

        let err = storage
            .create_reservation(reservation("r4", day, "stylist1", 15, 0))
            .unwrap_err();
        assert!(matches!(err, StorageError::CapacityExceeded { limit: 3, .. }));

        // other dates are unaffected
        storage
            .create_reservation(reservation("r5", date(2024, 6, 5), "stylist1", 15, 0))
            .unwrap();
    }

    #[test]
    fn cancelled_reservations_free_capacity() {
        let storage = storage();
        let day = date(2024, 6, 4);
        for i in 0..3 {
            storage
                .create_reservation(reservation(&format!("r{}", i), day, "stylist1", 10 + i, 0))
                .unwrap();
        }
        storage
            .update_reservation(
                "r1",
                UpdateReservation {
                    status: Some(ReservationStatus::Cancelled),
                    ..Default::default()
                },
            )
            .unwrap();

        storage
            .create_reservation(reservation("r4", day, "stylist1", 15, 0))
            .unwrap();
        assert_eq!(storage.list_reservations_by_date(day).unwrap().len(), 4);
    }

    #[test]
    fn corrupted_collection_is_reported() {
        let store = MemoryStore::new();
        store.set(RESERVATIONS_KEY, "{not json").unwrap();
        let storage = KvStorage::new(store);

        let err = storage.list_reservations().unwrap_err();
        assert!(matches!(err, StorageError::Corrupted { ref key, .. } if key == RESERVATIONS_KEY));
        // writes do not clobber the unreadable data
        assert!(storage
            .create_reservation(reservation("r1", date(2024, 6, 4), "stylist1", 10, 0))
            .is_err());
    }

    #[test]
    fn stylists_start_from_defaults() {
        let storage = storage();
        assert_eq!(storage.list_stylists().unwrap().len(), 3);

        let mut stylist = storage.get_stylist("stylist2").unwrap().unwrap();
        stylist.experience = 6;
        storage.save_stylist(stylist).unwrap();
        storage.delete_stylist("stylist3").unwrap();

        let stylists = storage.list_stylists().unwrap();
        assert_eq!(stylists.len(), 2);
        assert_eq!(storage.get_stylist("stylist2").unwrap().unwrap().experience, 6);

        storage.delete_stylist("stylist1").unwrap();
        storage.delete_stylist("stylist2").unwrap();
        assert!(storage.list_stylists().unwrap().is_empty());
    }

    #[test]
    fn invalid_stylist_is_not_saved() {
        let storage = storage();
        let mut stylist = storage.get_stylist("stylist1").unwrap().unwrap();
        stylist.name = String::new();
        assert!(matches!(
            storage.save_stylist(stylist),
            Err(StorageError::Invalid(_))
        ));
    }

    #[test]
    fn review_upsert_keeps_identity() {
        let storage = storage();
        storage
            .create_reservation(reservation("r1", date(2024, 6, 4), "stylist1", 10, 0))
            .unwrap();

        let first = storage.upsert_review(review("v1", "r1", 4.0, "good")).unwrap();
        assert!(storage.get_reservation("r1").unwrap().unwrap().has_review);

        let mut second = review("v2", "r1", 5.0, "even better");
        second.created_at = first.created_at + chrono::Duration::days(1);
        second.images = vec!["data:image/png;base64,AAAA".to_string()];
        let saved = storage.upsert_review(second).unwrap();

        assert_eq!(saved.id, "v1");
        assert_eq!(saved.created_at, first.created_at);
        assert_eq!(saved.rating, 5.0);
        assert_eq!(saved.content, "even better");
        assert_eq!(saved.images.len(), 1);
        assert_eq!(storage.list_reviews().unwrap(), vec![saved]);
    }

    #[test]
    fn review_needs_existing_reservation() {
        let storage = storage();
        let err = storage
            .upsert_review(review("v1", "missing", 4.0, "good"))
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { kind: "reservation", .. }));
        assert!(storage.list_reviews().unwrap().is_empty());
    }

    #[test]
    fn deleting_review_clears_flag() {
        let storage = storage();
        storage
            .create_reservation(reservation("r1", date(2024, 6, 4), "stylist1", 10, 0))
            .unwrap();
        storage.upsert_review(review("v1", "r1", 3.5, "fine")).unwrap();

        storage.delete_review("v1").unwrap();
        assert!(storage.list_reviews().unwrap().is_empty());
        assert!(!storage.get_reservation("r1").unwrap().unwrap().has_review);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let storage = storage();
        storage
            .update_reservation("nope", UpdateReservation::review_flag(true))
            .unwrap();
        storage.delete_reservation("nope").unwrap();
        storage.delete_review("nope").unwrap();
        assert!(storage.list_reservations().unwrap().is_empty());
    }
}
