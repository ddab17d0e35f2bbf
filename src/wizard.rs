//! Step-by-step reservation form: service, stylist, date and time, customer info.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::{
    availability,
    error::StorageResult,
    models::{
        reservations::{Reservation, ReservationStatus},
        services::Service,
        stylists::Stylist,
        times::{ReservationTime, TimeSlot},
    },
    storage::BookingStorage,
    utils,
};

pub const FIELD_SERVICE: &str = "service";
pub const FIELD_STYLIST: &str = "stylist";
pub const FIELD_DATE: &str = "date";
pub const FIELD_TIME: &str = "time";
pub const FIELD_NAME: &str = "name";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_SUBMIT: &str = "submit";

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3,4}-[0-9]{4}$").expect("phone pattern is valid"));

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Service = 1,
    Stylist = 2,
    DateTime = 3,
    CustomerInfo = 4,
    Complete = 5,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    fn next(self) -> Self {
        match self {
            Step::Service => Step::Stylist,
            Step::Stylist => Step::DateTime,
            Step::DateTime => Step::CustomerInfo,
            Step::CustomerInfo | Step::Complete => Step::Complete,
        }
    }

    fn prev(self) -> Self {
        match self {
            Step::Service | Step::Stylist => Step::Service,
            Step::DateTime => Step::Stylist,
            Step::CustomerInfo => Step::DateTime,
            Step::Complete => Step::CustomerInfo,
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::Service
    }
}

pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Default)]
pub struct ReservationWizard {
    step: Step,
    service: Option<Service>,
    stylist: Option<Stylist>,
    date: Option<NaiveDate>,
    /// Raw date input that could not be parsed.
    unparsed_date: Option<String>,
    /// First and last bookable date, inclusive.
    date_window: Option<(NaiveDate, NaiveDate)>,
    time: Option<ReservationTime>,
    customer_name: String,
    customer_phone: String,
    errors: FieldErrors,
    submitted: Option<Reservation>,
}

impl ReservationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn stylist(&self) -> Option<&Stylist> {
        self.stylist.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<ReservationTime> {
        self.time
    }

    /// The reservation stored by a successful [`submit`](Self::submit).
    pub fn submitted(&self) -> Option<&Reservation> {
        self.submitted.as_ref()
    }

    pub fn select_service(&mut self, service: Service) {
        self.service = Some(service);
    }

    pub fn select_stylist(&mut self, stylist: Stylist) {
        self.stylist = Some(stylist);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.unparsed_date = None;
    }

    /// Selects a `YYYY-MM-DD` date. Malformed input is reported under the
    /// date field when the date step is validated.
    pub fn select_date_str(&mut self, input: &str) {
        match utils::parse_date_str(input) {
            Ok(date) => self.select_date(date),
            Err(_) => {
                self.date = None;
                self.unparsed_date = Some(input.to_string());
            }
        }
    }

    /// Restricts the selectable dates to `first..=last`.
    pub fn limit_dates(&mut self, first: NaiveDate, last: NaiveDate) {
        self.date_window = Some((first, last));
    }

    pub fn select_time(&mut self, time: ReservationTime) {
        self.time = Some(time);
    }

    pub fn set_customer_info<N: Into<String>, P: Into<String>>(&mut self, name: N, phone: P) {
        self.customer_name = name.into();
        self.customer_phone = phone.into();
    }

    /// Replaces the error map with the problems of the current step.
    pub fn validate_current_step(&mut self) -> bool {
        let mut errors = FieldErrors::new();

        match self.step {
            Step::Service => {
                if self.service.is_none() {
                    errors.insert(FIELD_SERVICE, "Please select a service.".to_string());
                }
            }
            Step::Stylist => {
                if self.stylist.is_none() {
                    errors.insert(FIELD_STYLIST, "Please select a stylist.".to_string());
                }
            }
            Step::DateTime => {
                match (self.date, &self.unparsed_date, self.date_window) {
                    (None, Some(input), _) => {
                        errors.insert(
                            FIELD_DATE,
                            format!("`{}` is not a valid date, expected YYYY-MM-DD.", input),
                        );
                    }
                    (None, None, _) => {
                        errors.insert(FIELD_DATE, "Please select a date.".to_string());
                    }
                    (Some(date), _, Some((first, last))) if date < first || date > last => {
                        errors.insert(
                            FIELD_DATE,
                            format!(
                                "{} cannot be booked, please pick a date from {} to {}.",
                                date, first, last
                            ),
                        );
                    }
                    (Some(_), _, _) => {}
                }
                match self.time {
                    None => {
                        errors.insert(FIELD_TIME, "Please select a time.".to_string());
                    }
                    Some(time) if time.as_naive_time().is_none() => {
                        errors.insert(FIELD_TIME, format!("{} is not a bookable time.", time));
                    }
                    Some(_) => {}
                }
            }
            Step::CustomerInfo => {
                if self.customer_name.trim().is_empty() {
                    errors.insert(FIELD_NAME, "Please enter your name.".to_string());
                }
                if !is_valid_phone(&self.customer_phone) {
                    errors.insert(
                        FIELD_PHONE,
                        "Please enter a phone number like 010-1234-5678.".to_string(),
                    );
                }
            }
            Step::Complete => {}
        }

        let is_valid = errors.is_empty();
        self.errors = errors;
        is_valid
    }

    /// Moves to the next step when the current one is valid. Customer info is
    /// left through [`submit`](Self::submit) only.
    pub fn advance(&mut self) -> bool {
        if !self.validate_current_step() {
            return false;
        }
        match self.step {
            Step::CustomerInfo | Step::Complete => false,
            step => {
                self.step = step.next();
                true
            }
        }
    }

    pub fn retreat(&mut self) {
        if self.step != Step::Service {
            self.step = self.step.prev();
        }
    }

    /// Slots for the selected stylist, service and date, once all three are known.
    pub fn time_slots<S: BookingStorage + ?Sized>(
        &self,
        storage: &S,
        now: NaiveDateTime,
    ) -> StorageResult<Vec<TimeSlot>> {
        let (service, stylist, date) = match (&self.service, &self.stylist, self.date) {
            (Some(service), Some(stylist), Some(date)) => (service, stylist, date),
            _ => return Ok(Vec::new()),
        };
        let reservations = storage.list_reservations_by_date(date)?;
        Ok(availability::time_slots(
            stylist,
            service,
            date,
            &reservations,
            now,
        ))
    }

    /// Checks the selected time against the bookings stored right now. A time
    /// that is no longer available is reported under the time field.
    pub fn check_selected_time<S: BookingStorage + ?Sized>(
        &mut self,
        storage: &S,
        now: NaiveDateTime,
    ) -> StorageResult<bool> {
        let time = match self.time {
            Some(time) => time,
            None => return Ok(false),
        };
        let is_available = self
            .time_slots(storage, now)?
            .iter()
            .any(|slot| slot.available && slot.time() == time);
        if !is_available {
            self.errors.insert(
                FIELD_TIME,
                format!("{} is no longer available, please pick another time.", time),
            );
        }
        Ok(is_available)
    }

    /// [`check_selected_time`](Self::check_selected_time) followed by
    /// [`submit`](Self::submit). Callers that race for the same slot must
    /// serialise calls to this.
    pub fn submit_if_available<S: BookingStorage + ?Sized>(
        &mut self,
        storage: &S,
        now: NaiveDateTime,
        created_at: DateTime<Utc>,
    ) -> StorageResult<Option<String>> {
        if !self.validate_current_step() || !self.check_selected_time(storage, now)? {
            return Ok(None);
        }
        Ok(self.submit(storage, created_at))
    }

    /// Stores the reservation as pending and completes the wizard, returning
    /// its id. Validation problems and storage rejections (such as a fully
    /// booked day) end up in [`errors`](Self::errors) instead.
    pub fn submit<S: BookingStorage + ?Sized>(
        &mut self,
        storage: &S,
        now: DateTime<Utc>,
    ) -> Option<String> {
        if self.step != Step::CustomerInfo {
            self.errors = FieldErrors::new();
            self.errors.insert(
                FIELD_SUBMIT,
                "Please complete the previous steps first.".to_string(),
            );
            return None;
        }
        if !self.validate_current_step() {
            return None;
        }

        let (service, stylist, date, time) =
            match (&self.service, &self.stylist, self.date, self.time) {
                (Some(service), Some(stylist), Some(date), Some(time)) => {
                    (service, stylist, date, time)
                }
                _ => {
                    self.errors.insert(
                        FIELD_SUBMIT,
                        "The reservation details are incomplete.".to_string(),
                    );
                    return None;
                }
            };

        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.clone(),
            service_id: service.id.clone(),
            stylist_id: stylist.id.clone(),
            date,
            time,
            status: ReservationStatus::Pending,
            created_at: now,
            confirmation_note: None,
            confirmed_by: None,
            confirmed_at: None,
            cancelled_by: None,
            cancelled_at: None,
            has_review: false,
        };

        match storage.create_reservation(reservation.clone()) {
            Ok(()) => {
                let id = reservation.id.clone();
                self.submitted = Some(reservation);
                self.step = Step::Complete;
                Some(id)
            }
            Err(err) => {
                log::warn!("reservation submission failed: {}", err);
                self.errors.insert(FIELD_SUBMIT, err.to_string());
                None
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
