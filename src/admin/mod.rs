mod requests;
mod responses;

use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;

use crate::{
    bookings,
    dashboard::{Dashboard, StatusFilter},
    database::assert,
    protocol::{ReservationItem, SimpleResponse},
    state::AppState,
    storage::BookingStorage,
    utils,
};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_reservation)
        .service(confirm_reservation)
        .service(cancel_reservation)
        .service(delete_reservation)
        .service(save_stylist)
        .service(delete_stylist)
        .service(delete_review);
}

crate::post_funcs! {
    (search_reservation, "/search_reservation", SearchReservationRequest, SearchReservationResponse),
    (confirm_reservation, "/confirm_reservation", ConfirmReservationRequest, SimpleResponse),
    (cancel_reservation, "/cancel_reservation", CancelReservationRequest, SimpleResponse),
    (delete_reservation, "/delete_reservation", DeleteReservationRequest, SimpleResponse),
    (save_stylist, "/save_stylist", SaveStylistRequest, SimpleResponse),
    (delete_stylist, "/delete_stylist", DeleteStylistRequest, SimpleResponse),
    (delete_review, "/delete_review", DeleteReviewRequest, SimpleResponse),
}

/// Admin writes show up on the dashboard right away.
fn refresh_after_write(
    storage: &dyn BookingStorage,
    dashboard: &mut Dashboard,
) -> anyhow::Result<()> {
    dashboard.refresh(storage, Utc::now())?;
    Ok(())
}

async fn search_reservation_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchReservationRequest>,
) -> anyhow::Result<SearchReservationResponse> {
    let info = info.into_inner();

    let status: StatusFilter = info.status.as_deref().unwrap_or("all").parse()?;
    let query = info.query.unwrap_or_default();
    let refresh = info.refresh;
    let now = Utc::now();
    let (stats, refreshed_at, mut matches, stylists) = state
        .with_dashboard(move |storage, dashboard| {
            if refresh || dashboard.is_stale(now) {
                dashboard.refresh(storage, now)?;
            }
            let matches: Vec<_> = dashboard
                .filter(status, &query)
                .into_iter()
                .cloned()
                .collect();
            Ok((
                dashboard.stats(),
                dashboard.refreshed_at(),
                matches,
                storage.list_stylists()?,
            ))
        })
        .await?;

    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = matches.len();
    let reservations = utils::paginate(matches, info.first_index, info.limit)
        .into_iter()
        .map(|data| ReservationItem::new(data, &stylists))
        .collect();

    Ok(SearchReservationResponse {
        success: true,
        err: "".to_string(),
        stats,
        total,
        refreshed_at: refreshed_at.map_or_else(String::new, |at| at.to_rfc3339()),
        reservations,
    })
}

async fn confirm_reservation_impl(
    state: web::Data<AppState>,
    info: web::Json<ConfirmReservationRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    let now = Utc::now();
    state
        .with_dashboard(move |storage, dashboard| {
            bookings::confirm_by_admin(
                storage,
                &info.reservation_id,
                info.note,
                info.admin_name.as_deref(),
                now,
            )?;
            refresh_after_write(storage, dashboard)
        })
        .await?;

    Ok(SimpleResponse::ok())
}

async fn cancel_reservation_impl(
    state: web::Data<AppState>,
    info: web::Json<CancelReservationRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    let now = Utc::now();
    state
        .with_dashboard(move |storage, dashboard| {
            bookings::cancel_by_admin(
                storage,
                &info.reservation_id,
                info.admin_name.as_deref(),
                now,
            )?;
            refresh_after_write(storage, dashboard)
        })
        .await?;

    Ok(SimpleResponse::ok())
}

async fn delete_reservation_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteReservationRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    state
        .with_dashboard(move |storage, dashboard| {
            assert::assert_reservation(storage, &info.reservation_id)?;
            storage.delete_reservation(&info.reservation_id)?;
            refresh_after_write(storage, dashboard)
        })
        .await?;

    Ok(SimpleResponse::ok())
}

async fn save_stylist_impl(
    state: web::Data<AppState>,
    info: web::Json<SaveStylistRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    state
        .run(move |storage| {
            storage.save_stylist(info.stylist)?;
            Ok(())
        })
        .await?;

    Ok(SimpleResponse::ok())
}

async fn delete_stylist_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteStylistRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    state
        .run(move |storage| {
            assert::assert_stylist(storage, &info.stylist_id)?;
            storage.delete_stylist(&info.stylist_id)?;
            Ok(())
        })
        .await?;

    Ok(SimpleResponse::ok())
}

async fn delete_review_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteReviewRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    state
        .with_dashboard(move |storage, dashboard| {
            assert::assert_review(storage, &info.review_id)?;
            storage.delete_review(&info.review_id)?;
            refresh_after_write(storage, dashboard)
        })
        .await?;

    Ok(SimpleResponse::ok())
}
