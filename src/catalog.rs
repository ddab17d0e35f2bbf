//! Built-in reference data: the service menu and the stylists a fresh salon starts with.

use std::collections::BTreeSet;

use chrono::NaiveTime;
use once_cell::sync::Lazy;

use crate::models::{
    services::Service,
    stylists::{Availability, Stylist},
};

/// Shown in place of names that can no longer be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

pub static SERVICES: Lazy<Vec<Service>> = Lazy::new(|| {
    vec![
        service("cut", "Cut", "Classic haircut", 25000, 60),
        service("color", "Color", "Trendy hair coloring", 80000, 120),
        service("perm", "Perm", "Volume wave perm", 100000, 150),
        service("treatment", "Treatment", "Intensive care for damaged hair", 50000, 60),
        service("styling", "Styling", "Styling for a special day", 40000, 60),
    ]
});

pub fn services() -> &'static [Service] {
    &SERVICES
}

pub fn find_service(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|service| service.id == id)
}

pub fn service_name(id: &str) -> &'static str {
    find_service(id).map_or(UNKNOWN_NAME, |service| service.name.as_str())
}

pub fn stylist_name<'a>(stylists: &'a [Stylist], id: &str) -> &'a str {
    stylists
        .iter()
        .find(|stylist| stylist.id == id)
        .map_or(UNKNOWN_NAME, |stylist| stylist.name.as_str())
}

pub fn default_stylists() -> Vec<Stylist> {
    vec![
        stylist(
            "stylist1",
            "Mia Kim",
            "Head Designer",
            "https://picsum.photos/id/64/300/300",
            &["Cut", "Color"],
            8,
            (10, 19),
            &[0, 1],
        ),
        stylist(
            "stylist2",
            "Stella Lee",
            "Designer",
            "https://picsum.photos/id/65/300/300",
            &["Perm", "Treatment"],
            5,
            (11, 20),
            &[0, 3],
        ),
        stylist(
            "stylist3",
            "Harper Park",
            "Senior Designer",
            "https://picsum.photos/id/91/300/300",
            &["Styling", "Cut"],
            7,
            (10, 19),
            &[0, 2],
        ),
    ]
}

fn service(id: &str, name: &str, description: &str, price: u32, duration_minutes: u32) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        duration_minutes,
    }
}

#[allow(clippy::too_many_arguments)]
fn stylist(
    id: &str,
    name: &str,
    position: &str,
    profile_image: &str,
    specialties: &[&str],
    experience: u32,
    (open, close): (u32, u32),
    days_off: &[u32],
) -> Stylist {
    Stylist {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        profile_image: profile_image.to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        experience,
        availability: Availability {
            start: NaiveTime::from_hms_opt(open, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(close, 0, 0).unwrap_or(NaiveTime::MIN),
            days_off: days_off.iter().copied().collect::<BTreeSet<_>>(),
        },
    }
}
