mod requests;
mod responses;

use std::collections::BTreeMap;

use actix_web::{post, web, HttpResponse, Responder};
use chrono::{Duration, Local, Utc};

use crate::{
    availability,
    bookings::{self, ReviewDraft, ReviewFilter},
    catalog,
    database::assert,
    protocol::{ReservationItem, ReviewItem, SimpleResponse},
    state::AppState,
    utils,
    wizard::{ReservationWizard, Step},
};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_service)
        .service(search_stylist)
        .service(search_date)
        .service(search_time_slot)
        .service(reserve)
        .service(my_reservation)
        .service(cancel_reservation)
        .service(delete_reservation)
        .service(review)
        .service(search_review);
}

crate::post_funcs! {
    (search_service, "/services", SearchServiceRequest, SearchServiceResponse),
    (search_stylist, "/stylists", SearchStylistRequest, SearchStylistResponse),
    (search_date, "/dates", SearchDateRequest, SearchDateResponse),
    (search_time_slot, "/time_slots", SearchTimeSlotRequest, SearchTimeSlotResponse),
    (reserve, "/reserve", ReserveRequest, ReserveResponse),
    (my_reservation, "/my_reservations", MyReservationRequest, MyReservationResponse),
    (cancel_reservation, "/cancel_reservation", CancelReservationRequest, SimpleResponse),
    (delete_reservation, "/delete_reservation", DeleteReservationRequest, SimpleResponse),
    (review, "/review", ReviewRequest, ReviewResponse),
    (search_review, "/search_review", SearchReviewRequest, SearchReviewResponse),
}

async fn search_service_impl(
    _state: web::Data<AppState>,
    info: web::Json<SearchServiceRequest>,
) -> anyhow::Result<SearchServiceResponse> {
    let info = info.into_inner();

    let pattern = info.name.unwrap_or_default().trim().to_lowercase();
    let services = catalog::services()
        .iter()
        .filter(|service| service.name.to_lowercase().contains(&pattern))
        .cloned()
        .collect();

    Ok(SearchServiceResponse {
        success: true,
        err: "".to_string(),
        services,
    })
}

async fn search_stylist_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchStylistRequest>,
) -> anyhow::Result<SearchStylistResponse> {
    let info = info.into_inner();

    let date = info.date.map(utils::parse_date_str).transpose()?;
    let specialty = info.specialty.filter(|specialty| !specialty.is_empty());
    let stylists = state
        .run(move |storage| Ok(storage.list_stylists()?))
        .await?
        .into_iter()
        .filter(|stylist| {
            specialty
                .as_ref()
                .map_or(true, |specialty| stylist.specialties.contains(specialty))
        })
        .filter(|stylist| date.map_or(true, |date| !stylist.availability.is_day_off(date)))
        .collect();

    Ok(SearchStylistResponse {
        success: true,
        err: "".to_string(),
        stylists,
    })
}

async fn search_date_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchDateRequest>,
) -> anyhow::Result<SearchDateResponse> {
    let info = info.into_inner();

    let stylist = match info.stylist_id {
        Some(stylist_id) => Some(
            state
                .run(move |storage| assert::assert_stylist(storage, &stylist_id))
                .await?,
        ),
        None => None,
    };

    let today = Local::now().date_naive();
    let dates = utils::upcoming_dates(today, utils::BOOKING_HORIZON_DAYS)
        .into_iter()
        .map(|date| SearchDateItem {
            date: utils::format_date_str(date),
            weekday: date.format("%a").to_string(),
            closed: stylist
                .as_ref()
                .map_or(false, |stylist| stylist.availability.is_day_off(date)),
        })
        .collect();

    Ok(SearchDateResponse {
        success: true,
        err: "".to_string(),
        dates,
    })
}

async fn search_time_slot_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchTimeSlotRequest>,
) -> anyhow::Result<SearchTimeSlotResponse> {
    let info = info.into_inner();

    let date = utils::parse_date_str(&info.date)?;
    let service = assert::assert_service(&info.service_id)?;
    let now = Local::now().naive_local();
    let slots = state
        .run(move |storage| {
            let stylist = assert::assert_stylist(storage, &info.stylist_id)?;
            let reservations = storage.list_reservations_by_date(date)?;
            Ok(availability::time_slots(
                &stylist,
                service,
                date,
                &reservations,
                now,
            ))
        })
        .await?;

    let slots = slots
        .into_iter()
        .map(|slot| SearchTimeSlotItem {
            time: slot.time().to_string(),
            hour: slot.hour,
            minute: slot.minute,
            available: slot.available,
        })
        .collect();

    Ok(SearchTimeSlotResponse {
        success: true,
        err: "".to_string(),
        slots,
    })
}

async fn reserve_impl(
    state: web::Data<AppState>,
    info: web::Json<ReserveRequest>,
) -> anyhow::Result<ReserveResponse> {
    let info = info.into_inner();

    let now = Local::now().naive_local();
    let today = now.date();
    let last_day = today + Duration::days(utils::BOOKING_HORIZON_DAYS - 1);
    let created_at = Utc::now();
    state
        .run_booking(move |storage| {
            let mut wizard = ReservationWizard::new();
            wizard.limit_dates(today, last_day);
            if let Some(service) = info.service_id.as_deref().and_then(catalog::find_service) {
                wizard.select_service(service.clone());
            }
            if let Some(stylist_id) = &info.stylist_id {
                if let Some(stylist) = storage.get_stylist(stylist_id)? {
                    wizard.select_stylist(stylist);
                }
            }
            if let Some(date) = info.date.as_deref() {
                wizard.select_date_str(date);
            }
            if let Some(time) = info.time {
                wizard.select_time(time);
            }
            wizard.set_customer_info(
                info.customer_name,
                utils::format_phone(info.customer_phone.trim()),
            );

            while wizard.step() < Step::CustomerInfo && wizard.advance() {}

            let reservation_id = if wizard.step() == Step::CustomerInfo {
                wizard.submit_if_available(storage, now, created_at)?
            } else {
                None
            };
            Ok(reserve_response(&wizard, reservation_id))
        })
        .await
}

fn reserve_response(wizard: &ReservationWizard, reservation_id: Option<String>) -> ReserveResponse {
    let errors: BTreeMap<String, String> = wizard
        .errors()
        .iter()
        .map(|(field, message)| (field.to_string(), message.clone()))
        .collect();
    let step = wizard.step().number();

    match reservation_id {
        Some(reservation_id) => ReserveResponse {
            success: true,
            err: "".to_string(),
            step,
            errors,
            reservation_id,
        },
        None => ReserveResponse {
            success: false,
            err: errors
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| "Reservation failed".to_string()),
            step,
            errors,
            reservation_id: "".to_string(),
        },
    }
}

async fn my_reservation_impl(
    state: web::Data<AppState>,
    info: web::Json<MyReservationRequest>,
) -> anyhow::Result<MyReservationResponse> {
    let info = info.into_inner();

    let phone = utils::format_phone(info.customer_phone.trim());
    let (reservations, stylists) = state
        .run(move |storage| {
            let reservations =
                bookings::customer_reservations(storage, info.customer_name.trim(), &phone)?;
            Ok((reservations, storage.list_stylists()?))
        })
        .await?;

    let reservations = reservations
        .into_iter()
        .map(|data| ReservationItem::new(data, &stylists))
        .collect();

    Ok(MyReservationResponse {
        success: true,
        err: "".to_string(),
        reservations,
    })
}

async fn cancel_reservation_impl(
    state: web::Data<AppState>,
    info: web::Json<CancelReservationRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    let phone = utils::format_phone(info.customer_phone.trim());
    let now = Utc::now();
    state
        .run(move |storage| {
            bookings::cancel_by_customer(
                storage,
                &info.reservation_id,
                info.customer_name.trim(),
                &phone,
                now,
            )?;
            Ok(())
        })
        .await?;

    Ok(SimpleResponse::ok())
}

async fn delete_reservation_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteReservationRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();

    let phone = utils::format_phone(info.customer_phone.trim());
    state
        .run(move |storage| {
            bookings::delete_by_customer(
                storage,
                &info.reservation_id,
                info.customer_name.trim(),
                &phone,
            )?;
            Ok(())
        })
        .await?;

    Ok(SimpleResponse::ok())
}

async fn review_impl(
    state: web::Data<AppState>,
    info: web::Json<ReviewRequest>,
) -> anyhow::Result<ReviewResponse> {
    let info = info.into_inner();

    let phone = utils::format_phone(info.customer_phone.trim());
    let now = Utc::now();
    let saved = state
        .run(move |storage| {
            let draft = ReviewDraft {
                rating: info.rating,
                content: info.content,
                images: info.images,
            };
            Ok(bookings::write_review(
                storage,
                &info.reservation_id,
                info.customer_name.trim(),
                &phone,
                draft,
                now,
            )?)
        })
        .await?;

    Ok(ReviewResponse {
        success: true,
        err: "".to_string(),
        review_id: saved.id,
    })
}

async fn search_review_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchReviewRequest>,
) -> anyhow::Result<SearchReviewResponse> {
    let info = info.into_inner();

    let filter = ReviewFilter {
        service_id: info.service_id.filter(|id| !id.is_empty()),
        stylist_id: info.stylist_id.filter(|id| !id.is_empty()),
        limit: info.limit,
    };
    let (reviews, stylists) = state
        .run(move |storage| {
            Ok((
                bookings::search_reviews(storage, &filter)?,
                storage.list_stylists()?,
            ))
        })
        .await?;

    let reviews = reviews
        .into_iter()
        .map(|data| ReviewItem::new(data, &stylists))
        .collect();

    Ok(SearchReviewResponse {
        success: true,
        err: "".to_string(),
        reviews,
    })
}
