#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:literal, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    state: web::Data<AppState>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](state, info).await {
                        Ok(response) => response,
                        Err(err) => {
                            log::debug!("{} failed: {:#}", $url, err);
                            <$response>::err(err.to_string())
                        }
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use anyhow::Context;
use chrono::{Duration, NaiveDate};

/// How many days ahead, today included, a reservation can be made.
pub const BOOKING_HORIZON_DAYS: i64 = 14;

const DATE_FMT: &str = "%Y-%m-%d";

pub fn parse_date_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.as_ref().trim(), DATE_FMT).context("Invalid date, expected YYYY-MM-DD")
}

pub fn format_date_str(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

pub fn upcoming_dates(start: NaiveDate, days: i64) -> Vec<NaiveDate> {
    (0..days.max(0)).map(|offset| start + Duration::days(offset)).collect()
}

/// Inserts dashes into a bare 10 or 11 digit number (`0212345678` becomes
/// `021-234-5678`). Anything else comes back untouched.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != phone.len() {
        return phone.to_string();
    }
    match digits.len() {
        10 => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
        _ => phone.to_string(),
    }
}

/// `[first_index, first_index + limit)` of `items`.
pub fn paginate<T>(items: Vec<T>, first_index: Option<i64>, limit: Option<i64>) -> Vec<T> {
    let first_index = first_index.unwrap_or(0).max(0) as usize;
    let limit = limit.unwrap_or(30).max(0) as usize;
    items.into_iter().skip(first_index).take(limit).collect()
}
