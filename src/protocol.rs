use serde::Serialize;

use crate::{
    catalog,
    models::{reservations::Reservation, reviews::Review, stylists::Stylist},
    utils::format_date_str,
};

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: "".to_string(),
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err<S: ToString>(err: S) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}

/// A reservation with its service and stylist names resolved.
#[derive(Default, Serialize)]
pub struct ReservationItem {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_id: String,
    pub service_name: String,
    pub stylist_id: String,
    pub stylist_name: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub created_at: String,
    pub confirmation_note: Option<String>,
    pub confirmed_by: Option<String>,
    pub confirmed_at: Option<String>,
    pub cancelled_by: Option<String>,
    pub cancelled_at: Option<String>,
    pub has_review: bool,
}

impl ReservationItem {
    pub fn new(data: Reservation, stylists: &[Stylist]) -> Self {
        Self {
            service_name: catalog::service_name(&data.service_id).to_string(),
            stylist_name: catalog::stylist_name(stylists, &data.stylist_id).to_string(),
            date: format_date_str(data.date),
            time: data.time.to_string(),
            status: data.status.to_string(),
            created_at: data.created_at.to_rfc3339(),
            confirmed_at: data.confirmed_at.map(|t| t.to_rfc3339()),
            cancelled_at: data.cancelled_at.map(|t| t.to_rfc3339()),
            id: data.id,
            customer_name: data.customer_name,
            customer_phone: data.customer_phone,
            service_id: data.service_id,
            stylist_id: data.stylist_id,
            confirmation_note: data.confirmation_note,
            confirmed_by: data.confirmed_by,
            cancelled_by: data.cancelled_by,
            has_review: data.has_review,
        }
    }
}

#[derive(Default, Serialize)]
pub struct ReviewItem {
    pub id: String,
    pub reservation_id: String,
    pub customer_name: String,
    pub service_id: String,
    pub service_name: String,
    pub stylist_id: String,
    pub stylist_name: String,
    pub rating: f32,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: String,
}

impl ReviewItem {
    pub fn new(data: Review, stylists: &[Stylist]) -> Self {
        Self {
            service_name: catalog::service_name(&data.service_id).to_string(),
            stylist_name: catalog::stylist_name(stylists, &data.stylist_id).to_string(),
            created_at: data.created_at.to_rfc3339(),
            id: data.id,
            reservation_id: data.reservation_id,
            customer_name: data.customer_name,
            service_id: data.service_id,
            stylist_id: data.stylist_id,
            rating: data.rating,
            content: data.content,
            images: data.images,
        }
    }
}
