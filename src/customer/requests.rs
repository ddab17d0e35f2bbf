use serde::Deserialize;

use crate::models::times::ReservationTime;

#[derive(Deserialize)]
pub struct SearchServiceRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchStylistRequest {
    pub specialty: Option<String>,
    /// Only stylists working on this date, `YYYY-MM-DD`.
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchDateRequest {
    pub stylist_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchTimeSlotRequest {
    pub stylist_id: String,
    pub service_id: String,
    pub date: String,
}

#[derive(Deserialize)]
pub struct ReserveRequest {
    pub service_id: Option<String>,
    pub stylist_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<ReservationTime>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
}

#[derive(Deserialize)]
pub struct MyReservationRequest {
    pub customer_name: String,
    pub customer_phone: String,
}

#[derive(Deserialize)]
pub struct CancelReservationRequest {
    pub reservation_id: String,
    pub customer_name: String,
    pub customer_phone: String,
}

#[derive(Deserialize)]
pub struct DeleteReservationRequest {
    pub reservation_id: String,
    pub customer_name: String,
    pub customer_phone: String,
}

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub reservation_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub rating: f32,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct SearchReviewRequest {
    pub service_id: Option<String>,
    pub stylist_id: Option<String>,
    pub limit: Option<usize>,
}
