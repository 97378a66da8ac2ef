//! Date helper functions

use chrono::{DateTime, Local, TimeZone, Utc};

/// Build timestamp shown in the footer
#[derive(Debug, Clone)]
pub struct BuildStamp {
    pub year: String,
    pub formatted: String,
}

/// Stamp for `now`, in `tz` when given and local time otherwise
pub fn build_stamp(now: DateTime<Utc>, tz: Option<chrono_tz::Tz>) -> BuildStamp {
    match tz {
        Some(tz) => stamp(&now.with_timezone(&tz)),
        None => stamp(&now.with_timezone(&Local)),
    }
}

fn stamp<Tz: TimeZone>(date: &DateTime<Tz>) -> BuildStamp
where
    Tz::Offset: std::fmt::Display,
{
    BuildStamp {
        year: date.format("%Y").to_string(),
        formatted: date.format("%B %-d, %Y %H:%M %Z").to_string(),
    }
}
