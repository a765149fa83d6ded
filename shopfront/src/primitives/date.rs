use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicI32, Ordering};

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel for "no offset pushed by the host".
const OFFSET_UNSET: i32 = i32::MIN;

/// UTC offset of the device zone in seconds, as last pushed by the host.
static DEVICE_UTC_OFFSET_SECONDS: AtomicI32 = AtomicI32::new(OFFSET_UNSET);

/// Sets the device's current UTC offset in minutes, e.g. `420` for Indochina Time.
///
/// The host calls this at startup and whenever the device zone changes. Until it is called
/// the offset is read from the system zone. Returns `false` and keeps the previous offset
/// when `offset_minutes` is not within a day.
#[uniffi::export]
pub fn set_device_utc_offset(offset_minutes: i32) -> bool {
    let Some(offset) = offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
    else {
        crate::warn!("date.offset_rejected minutes={offset_minutes}");
        return false;
    };

    DEVICE_UTC_OFFSET_SECONDS.store(offset.local_minus_utc(), Ordering::Relaxed);
    crate::debug!("date.offset_set minutes={offset_minutes}");
    true
}

/// The device's current UTC offset in minutes.
#[uniffi::export]
#[must_use]
pub fn device_utc_offset_minutes() -> i32 {
    device_utc_offset().local_minus_utc() / 60
}

/// The device zone: the offset pushed by the host, or the system zone's current offset.
#[must_use]
pub fn device_utc_offset() -> FixedOffset {
    let seconds = DEVICE_UTC_OFFSET_SECONDS.load(Ordering::Relaxed);
    if seconds != OFFSET_UNSET {
        if let Some(offset) = FixedOffset::east_opt(seconds) {
            return offset;
        }
    }
    *Local::now().offset()
}

/// A calendar date without time of day, e.g. a birth date.
///
/// Crosses the FFI boundary as an ISO-8601 `YYYY-MM-DD` string. In storage it is written as
/// an RFC 3339 timestamp at midnight with an explicit `+00:00` offset
/// (`2000-05-17T00:00:00+00:00`).
///
/// Parsing accepts a plain date or any RFC 3339 timestamp:
/// - a timestamp with a numeric offset keeps the date it names in that offset;
/// - a `Z` timestamp is an instant written by JavaScript's `Date.toISOString()` from the
///   user's local midnight, so it is read in the device zone (see [`device_utc_offset`]).
///
/// # Examples
/// ```
/// use chrono::FixedOffset;
/// use shopfront::primitives::CalendarDate;
///
/// let ict = FixedOffset::east_opt(7 * 3600).unwrap();
/// let date = CalendarDate::parse_in("1990-04-05T17:00:00.000Z", ict).unwrap();
/// assert_eq!(date.to_string(), "1990-04-06");
/// assert_eq!(date.to_timestamp(), "1990-04-06T00:00:00+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

uniffi::custom_type!(CalendarDate, String, {
    try_lift: |value| Ok(CalendarDate::from_str(&value)?),
    lower: |date| date.to_string(),
});

/// Errors raised while parsing a [`CalendarDate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    /// Neither a `YYYY-MM-DD` date nor an RFC 3339 timestamp.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl CalendarDate {
    /// Wraps a chrono date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a date from its parts, `None` if the parts don't form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date on the device calendar.
    #[must_use]
    pub fn today() -> Self {
        Self::at(Utc::now(), device_utc_offset())
    }

    /// The calendar date of `instant` in the zone `offset`.
    #[must_use]
    pub fn at(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self(instant.with_timezone(&offset).date_naive())
    }

    /// Parses `s`, reading `Z` timestamps in the zone `device_offset`.
    ///
    /// # Errors
    /// `DateParseError::InvalidDate` if `s` is neither a `YYYY-MM-DD` date nor an
    /// RFC 3339 timestamp.
    pub fn parse_in(s: &str, device_offset: FixedOffset) -> Result<Self, DateParseError> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }

        let timestamp = DateTime::parse_from_rfc3339(s)
            .map_err(|_| DateParseError::InvalidDate(s.to_string()))?;
        if s.ends_with('Z') || s.ends_with('z') {
            Ok(Self::at(timestamp.with_timezone(&Utc), device_offset))
        } else {
            Ok(Self(timestamp.date_naive()))
        }
    }

    /// The wrapped chrono date.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// RFC 3339 timestamp at midnight with a `+00:00` offset, the storage representation.
    #[must_use]
    pub fn to_timestamp(&self) -> String {
        self.0
            .and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
    }

    /// Whole years elapsed from `self` to `on`.
    ///
    /// One year is subtracted while `on` has not yet reached the anniversary's month and
    /// day. Negative when `self` is after `on`.
    #[must_use]
    pub fn years_until(&self, on: Self) -> i32 {
        let (birth, on) = (self.0, on.0);
        let mut years = on.year() - birth.year();
        if (on.month(), on.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        years
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_in(s, device_utc_offset())
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_timestamp())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
