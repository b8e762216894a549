use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of days before the effective expiry date at which a seasoning
/// stops being `fresh` and becomes `expiring_soon`.
pub const WARNING_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Qualitative freshness bucket of a seasoning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// More than [`WARNING_DAYS`] days left.
    Fresh,
    /// Between 0 and [`WARNING_DAYS`] days left, inclusive.
    ExpiringSoon,
    /// The effective expiry date has passed.
    Expired,
    /// Neither an expiry nor a best-before date is known.
    Unknown,
}

impl ExpiryStatus {
    /// Returns the wire representation (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day count and status computed for one effective expiry date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpiryInfo {
    /// `None` exactly when `status` is [`ExpiryStatus::Unknown`].
    pub days_until_expiry: Option<i64>,
    pub status: ExpiryStatus,
}

impl ExpiryInfo {
    pub const UNKNOWN: ExpiryInfo = ExpiryInfo {
        days_until_expiry: None,
        status: ExpiryStatus::Unknown,
    };
}

/// Whole days from `as_of` until `expiry_date`, rounded up.
///
/// Computed on the epoch milliseconds of both instants, so one millisecond
/// past a day boundary already counts as the next day. Sub-millisecond
/// precision is dropped from each instant before subtracting.
pub fn days_until_expiry(expiry_date: DateTime<Utc>, as_of: DateTime<Utc>) -> i64 {
    let millis = expiry_date.timestamp_millis() - as_of.timestamp_millis();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Maps a signed day count onto a status. Never returns `Unknown`.
pub fn expiry_status_from(days: i64) -> ExpiryStatus {
    if days < 0 {
        ExpiryStatus::Expired
    } else if days <= WARNING_DAYS {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Fresh
    }
}

pub fn expiry_status(expiry_date: Option<DateTime<Utc>>, as_of: DateTime<Utc>) -> ExpiryInfo {
    match expiry_date {
        Some(date) => {
            let days = days_until_expiry(date, as_of);
            ExpiryInfo {
                days_until_expiry: Some(days),
                status: expiry_status_from(days),
            }
        }
        None => ExpiryInfo::UNKNOWN,
    }
}
