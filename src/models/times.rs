use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Minutes past the hour at which a slot may start.
pub const SLOT_MINUTES: [u32; 2] = [0, 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReservationTime {
    pub hour: u32,
    pub minute: u32,
}

impl ReservationTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// `None` when the time is not a real clock time or not on a slot boundary.
    pub fn as_naive_time(&self) -> Option<NaiveTime> {
        if !SLOT_MINUTES.contains(&self.minute) {
            return None;
        }
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }
}

impl fmt::Display for ReservationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    pub available: bool,
}

impl TimeSlot {
    pub fn time(&self) -> ReservationTime {
        ReservationTime::new(self.hour, self.minute)
    }
}
