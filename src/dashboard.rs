//! Admin view over all reservations.
//!
//! The dashboard keeps a snapshot and never reloads on its own: whoever owns
//! it calls [`Dashboard::refresh`], typically when [`Dashboard::is_stale`]
//! says the refresh interval has passed. Writes made elsewhere in between are
//! only visible after the next refresh.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    error::StorageResult,
    models::{
        reservations::{Reservation, ReservationStatus},
        reviews::Review,
    },
    storage::BookingStorage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ReservationStatus),
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    fn matches(self, reservation: &Reservation) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => reservation.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(StatusFilter::All),
            status => status.parse().map(StatusFilter::Only),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub reviews: usize,
}

pub fn stats(reservations: &[Reservation], reviews: &[Review]) -> DashboardStats {
    let count = |status: ReservationStatus| {
        reservations
            .iter()
            .filter(|r| r.status == status)
            .count()
    };
    DashboardStats {
        total: reservations.len(),
        pending: count(ReservationStatus::Pending),
        confirmed: count(ReservationStatus::Confirmed),
        cancelled: count(ReservationStatus::Cancelled),
        reviews: reviews.len(),
    }
}

/// Reservations in the status tab whose customer name (case-insensitive),
/// phone or date contains `query`.
pub fn filter_reservations<'a>(
    reservations: &'a [Reservation],
    status: StatusFilter,
    query: &str,
) -> Vec<&'a Reservation> {
    let query = query.trim().to_lowercase();
    reservations
        .iter()
        .filter(|r| status.matches(r))
        .filter(|r| {
            query.is_empty()
                || r.customer_name.to_lowercase().contains(&query)
                || r.customer_phone.contains(&query)
                || r.date.to_string().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    reservations: Vec<Reservation>,
    reviews: Vec<Review>,
    refreshed_at: Option<DateTime<Utc>>,
    refresh_interval: Duration,
}

impl Dashboard {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            reservations: Vec::new(),
            reviews: Vec::new(),
            refreshed_at: None,
            refresh_interval,
        }
    }

    pub fn refresh<S: BookingStorage + ?Sized>(
        &mut self,
        storage: &S,
        now: DateTime<Utc>,
    ) -> StorageResult<()> {
        self.reservations = storage.list_reservations()?;
        self.reviews = storage.list_reviews()?;
        self.refreshed_at = Some(now);
        log::debug!("dashboard refreshed with {} reservations", self.reservations.len());
        Ok(())
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.refreshed_at {
            Some(at) => now - at >= self.refresh_interval,
            None => true,
        }
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn filter(&self, status: StatusFilter, query: &str) -> Vec<&Reservation> {
        filter_reservations(&self.reservations, status, query)
    }

    pub fn stats(&self) -> DashboardStats {
        stats(&self.reservations, &self.reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bookings,
        storage::{KvStorage, MemoryStore},
        testing::{date, reservation, review},
    };

    fn sample() -> Vec<Reservation> {
        let mut confirmed = reservation("r2", date(2024, 6, 5), "stylist2", 11, 0);
        confirmed.status = ReservationStatus::Confirmed;
        confirmed.customer_name = "Lee Sora".to_string();
        confirmed.customer_phone = "010-5555-1234".to_string();
        let mut cancelled = reservation("r3", date(2024, 6, 6), "stylist1", 12, 0);
        cancelled.status = ReservationStatus::Cancelled;
        vec![
            reservation("r1", date(2024, 6, 4), "stylist1", 10, 0),
            confirmed,
            cancelled,
        ]
    }

    fn ids(reservations: Vec<&Reservation>) -> Vec<&str> {
        reservations.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn counts_by_status() {
        assert_eq!(
            stats(&sample(), &[review("v1", "r2", 5.0, "Lovely")]),
            DashboardStats {
                total: 3,
                pending: 1,
                confirmed: 1,
                cancelled: 1,
                reviews: 1,
            }
        );
    }

    #[test]
    fn filter_combines_tab_and_query() {
        let reservations = sample();
        assert_eq!(
            ids(filter_reservations(&reservations, StatusFilter::All, "")),
            vec!["r1", "r2", "r3"]
        );
        assert_eq!(
            ids(filter_reservations(&reservations, StatusFilter::All, "SORA")),
            vec!["r2"]
        );
        assert_eq!(
            ids(filter_reservations(&reservations, StatusFilter::All, "5555")),
            vec!["r2"]
        );
        assert_eq!(
            ids(filter_reservations(&reservations, StatusFilter::All, "2024-06-06")),
            vec!["r3"]
        );
        assert_eq!(
            ids(filter_reservations(
                &reservations,
                StatusFilter::Only(ReservationStatus::Pending),
                "kim"
            )),
            vec!["r1"]
        );
    }

    #[test]
    fn status_filter_parses_tabs() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "cancelled".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ReservationStatus::Cancelled)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn snapshot_changes_only_on_refresh() {
        let storage = KvStorage::new(MemoryStore::new());
        storage
            .create_reservation(reservation("r1", date(2024, 6, 4), "stylist1", 10, 0))
            .unwrap();

        let start: DateTime<Utc> = "2024-06-01T09:00:00Z".parse().unwrap();
        let mut dashboard = Dashboard::new(Duration::seconds(60));
        assert!(dashboard.is_stale(start));
        dashboard.refresh(&storage, start).unwrap();
        assert!(!dashboard.is_stale(start + Duration::seconds(59)));
        assert!(dashboard.is_stale(start + Duration::seconds(60)));

        // a write from elsewhere
        bookings::cancel_by_admin(&storage, "r1", None, start).unwrap();
        assert_eq!(dashboard.stats().pending, 1);

        dashboard
            .refresh(&storage, start + Duration::seconds(60))
            .unwrap();
        assert_eq!(dashboard.stats().pending, 0);
        assert_eq!(dashboard.stats().cancelled, 1);
        assert_eq!(dashboard.reservations().len(), 1);
        assert_eq!(dashboard.stats().reviews, 0);
    }
}
