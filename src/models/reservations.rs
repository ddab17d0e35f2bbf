use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::times::ReservationTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Unknown reservation status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_id: String,
    pub stylist_id: String,
    pub date: NaiveDate,
    pub time: ReservationTime,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_review: bool,
}

impl Reservation {
    /// Counts against the daily cap and blocks time slots.
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }

    pub fn belongs_to(&self, customer_name: &str, customer_phone: &str) -> bool {
        self.customer_name == customer_name && self.customer_phone == customer_phone
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservation {
    pub status: Option<ReservationStatus>,
    pub confirmation_note: Option<String>,
    pub confirmed_by: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub has_review: Option<bool>,
}

impl UpdateReservation {
    pub fn confirm(note: String, by: String, at: DateTime<Utc>) -> Self {
        Self {
            status: Some(ReservationStatus::Confirmed),
            confirmation_note: Some(note),
            confirmed_by: Some(by),
            confirmed_at: Some(at),
            ..Default::default()
        }
    }

    pub fn cancel(by: String, at: DateTime<Utc>) -> Self {
        Self {
            status: Some(ReservationStatus::Cancelled),
            cancelled_by: Some(by),
            cancelled_at: Some(at),
            ..Default::default()
        }
    }

    pub fn review_flag(has_review: bool) -> Self {
        Self {
            has_review: Some(has_review),
            ..Default::default()
        }
    }

    pub fn apply(self, reservation: &mut Reservation) {
        if let Some(status) = self.status {
            reservation.status = status;
        }
        if self.confirmation_note.is_some() {
            reservation.confirmation_note = self.confirmation_note;
        }
        if self.confirmed_by.is_some() {
            reservation.confirmed_by = self.confirmed_by;
        }
        if self.confirmed_at.is_some() {
            reservation.confirmed_at = self.confirmed_at;
        }
        if self.cancelled_by.is_some() {
            reservation.cancelled_by = self.cancelled_by;
        }
        if self.cancelled_at.is_some() {
            reservation.cancelled_at = self.cancelled_at;
        }
        if let Some(has_review) = self.has_review {
            reservation.has_review = has_review;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_stored_shape() {
        let reservation: Reservation = serde_json::from_value(json!({
            "id": "r1",
            "customerName": "Kim",
            "customerPhone": "010-1234-5678",
            "serviceId": "cut",
            "stylistId": "stylist1",
            "date": "2024-06-04",
            "time": { "hour": 10, "minute": 30 },
            "status": "pending",
            "createdAt": "2024-06-01T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(reservation.time, ReservationTime::new(10, 30));
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert!(!reservation.has_review);
        assert!(reservation.is_active());
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut reservation: Reservation = serde_json::from_value(json!({
            "id": "r1", "customerName": "Kim", "customerPhone": "010-1234-5678",
            "serviceId": "cut", "stylistId": "stylist1", "date": "2024-06-04",
            "time": { "hour": 10, "minute": 0 }, "status": "pending",
            "createdAt": "2024-06-01T09:00:00Z", "confirmationNote": "see you"
        }))
        .unwrap();

        UpdateReservation::review_flag(true).apply(&mut reservation);
        assert!(reservation.has_review);
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.confirmation_note.as_deref(), Some("see you"));

        let at = "2024-06-02T09:00:00Z".parse().unwrap();
        UpdateReservation::cancel("Kim".to_string(), at).apply(&mut reservation);
        assert_eq!(reservation.status, ReservationStatus::Cancelled);
        assert_eq!(reservation.cancelled_at, Some(at));
        assert!(!reservation.is_active());
    }

    #[test]
    fn status_parses_from_str() {
        assert_eq!(
            "confirmed".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Confirmed
        );
        assert!("done".parse::<ReservationStatus>().is_err());
    }
}
