use serde::Deserialize;

use crate::models::stylists::Stylist;

#[derive(Deserialize)]
pub struct SearchReservationRequest {
    /// `all`, `pending`, `confirmed` or `cancelled`.
    pub status: Option<String>,
    pub query: Option<String>,
    #[serde(default)]
    pub refresh: bool,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct ConfirmReservationRequest {
    pub reservation_id: String,
    pub admin_name: Option<String>,
    #[serde(default)]
    pub note: String,
}

#[derive(Deserialize)]
pub struct CancelReservationRequest {
    pub reservation_id: String,
    pub admin_name: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteReservationRequest {
    pub reservation_id: String,
}

#[derive(Deserialize)]
pub struct SaveStylistRequest {
    pub stylist: Stylist,
}

#[derive(Deserialize)]
pub struct DeleteStylistRequest {
    pub stylist_id: String,
}

#[derive(Deserialize)]
pub struct DeleteReviewRequest {
    pub review_id: String,
}
