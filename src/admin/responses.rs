use serde::Serialize;

use crate::{dashboard::DashboardStats, protocol::ReservationItem};

#[derive(Default, Serialize)]
pub struct SearchReservationResponse {
    pub success: bool,
    pub err: String,
    pub stats: DashboardStats,
    /// Matches before pagination.
    pub total: usize,
    pub refreshed_at: String,
    pub reservations: Vec<ReservationItem>,
}

crate::impl_err_response! {
    SearchReservationResponse,
}
