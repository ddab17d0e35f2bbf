use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stylist {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub profile_image: String,
    pub specialties: BTreeSet<String>,
    #[serde(default)]
    pub experience: u32,
    pub availability: Availability,
}

/// Daily working hours plus the weekdays (0 = Sunday .. 6 = Saturday) off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub days_off: BTreeSet<u32>,
}

impl Availability {
    pub fn is_day_off(&self, date: NaiveDate) -> bool {
        self.days_off
            .contains(&date.weekday().num_days_from_sunday())
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn end_hour(&self) -> u32 {
        self.end.hour()
    }

    /// Closing time in minutes from midnight.
    pub fn closing_minutes(&self) -> u32 {
        self.end.hour() * 60 + self.end.minute()
    }
}

impl Stylist {
    pub fn validate(&self) -> StorageResult<()> {
        if self.id.trim().is_empty() {
            return Err(StorageError::invalid("Stylist id must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(StorageError::invalid("Please enter a name"));
        }
        if self.position.trim().is_empty() {
            return Err(StorageError::invalid("Please enter a position"));
        }
        if self.specialties.iter().all(|s| s.trim().is_empty()) {
            return Err(StorageError::invalid(
                "Please enter at least one specialty",
            ));
        }
        if self.availability.start > self.availability.end {
            return Err(StorageError::invalid(
                "Opening time must not be after closing time",
            ));
        }
        if let Some(day) = self.availability.days_off.iter().find(|&&d| d > 6) {
            return Err(StorageError::Invalid(format!(
                "Day off {} is not a weekday (0-6)",
                day
            )));
        }
        Ok(())
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stylist() -> Stylist {
        serde_json::from_value(json!({
            "id": "stylist9",
            "name": "Jamie",
            "position": "Designer",
            "profileImage": "",
            "specialties": ["Cut"],
            "experience": 3,
            "availability": { "start": "10:00", "end": "19:30", "daysOff": [0, 1] }
        }))
        .unwrap()
    }

    #[test]
    fn working_hours_are_read_from_hhmm() {
        let stylist = stylist();
        assert_eq!(stylist.availability.start_hour(), 10);
        assert_eq!(stylist.availability.end_hour(), 19);
        assert_eq!(stylist.availability.closing_minutes(), 19 * 60 + 30);

        let value = serde_json::to_value(&stylist).unwrap();
        assert_eq!(value["availability"]["end"], "19:30");
    }

    #[test]
    fn sunday_is_weekday_zero() {
        let stylist = stylist();
        // 2024-06-02 is a Sunday, 2024-06-04 a Tuesday
        assert!(stylist
            .availability
            .is_day_off(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()));
        assert!(!stylist
            .availability
            .is_day_off(NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut s = stylist();
        assert!(s.validate().is_ok());

        s.position = "  ".to_string();
        assert!(s.validate().is_err());

        let mut s = stylist();
        s.specialties.clear();
        assert!(s.validate().is_err());

        let mut s = stylist();
        s.availability.days_off.insert(7);
        assert!(s.validate().is_err());
    }

    #[test]
    fn malformed_hours_fail_to_parse() {
        let res: Result<Stylist, _> = serde_json::from_value(json!({
            "id": "x", "name": "x", "position": "x", "specialties": ["Cut"],
            "availability": { "start": "ten", "end": "19:00" }
        }));
        assert!(res.is_err());
    }
}
