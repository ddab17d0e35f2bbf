use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    models::{services::Service, stylists::Stylist},
    protocol::{ReservationItem, ReviewItem},
};

#[derive(Default, Serialize)]
pub struct SearchServiceResponse {
    pub success: bool,
    pub err: String,
    pub services: Vec<Service>,
}

#[derive(Default, Serialize)]
pub struct SearchStylistResponse {
    pub success: bool,
    pub err: String,
    pub stylists: Vec<Stylist>,
}

#[derive(Default, Serialize)]
pub struct SearchDateItem {
    pub date: String,
    pub weekday: String,
    /// The chosen stylist's day off.
    pub closed: bool,
}

#[derive(Default, Serialize)]
pub struct SearchDateResponse {
    pub success: bool,
    pub err: String,
    pub dates: Vec<SearchDateItem>,
}

#[derive(Default, Serialize)]
pub struct SearchTimeSlotItem {
    pub time: String,
    pub hour: u32,
    pub minute: u32,
    pub available: bool,
}

#[derive(Default, Serialize)]
pub struct SearchTimeSlotResponse {
    pub success: bool,
    pub err: String,
    pub slots: Vec<SearchTimeSlotItem>,
}

#[derive(Default, Serialize)]
pub struct ReserveResponse {
    pub success: bool,
    pub err: String,
    /// Step the form stopped at, 5 once the reservation is stored.
    pub step: u8,
    pub errors: BTreeMap<String, String>,
    pub reservation_id: String,
}

#[derive(Default, Serialize)]
pub struct MyReservationResponse {
    pub success: bool,
    pub err: String,
    pub reservations: Vec<ReservationItem>,
}

#[derive(Default, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub err: String,
    pub review_id: String,
}

#[derive(Default, Serialize)]
pub struct SearchReviewResponse {
    pub success: bool,
    pub err: String,
    pub reviews: Vec<ReviewItem>,
}

crate::impl_err_response! {
    SearchServiceResponse,
    SearchStylistResponse,
    SearchDateResponse,
    SearchTimeSlotResponse,
    ReserveResponse,
    MyReservationResponse,
    ReviewResponse,
    SearchReviewResponse,
}
