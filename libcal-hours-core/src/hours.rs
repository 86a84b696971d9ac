//! Provider payload types.
//!
//! These mirror the JSON returned by the LibCal hours-grid API. Decoding is
//! lenient at the day level: a single malformed day entry is skipped rather
//! than failing the whole payload.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{HoursError, HoursResult};
use crate::i18n::{Localize, TextKey};

/// Full hours-grid response: one entry per location of the institution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoursGrid {
    #[serde(default)]
    pub locations: Vec<LocationHours>,
}

impl HoursGrid {
    pub fn from_json(json: &str) -> HoursResult<Self> {
        serde_json::from_str(json).map_err(|e| HoursError::Serialization(e.to_string()))
    }

    /// Take ownership of a single location's hours, by exact name.
    pub fn into_location(self, name: &str) -> HoursResult<LocationHours> {
        self.locations
            .into_iter()
            .find(|loc| loc.name == name)
            .ok_or_else(|| HoursError::LocationNotFound(name.to_string()))
    }

    pub fn location_names(&self) -> Vec<&str> {
        self.locations.iter().map(|loc| loc.name.as_str()).collect()
    }
}

/// Hours for one location, as a list of week records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationHours {
    pub name: String,

    #[serde(default)]
    pub weeks: Vec<WeekRecord>,
}

impl LocationHours {
    pub fn new(name: impl Into<String>, weeks: Vec<WeekRecord>) -> Self {
        LocationHours {
            name: name.into(),
            weeks,
        }
    }
}

/// One week of hours, keyed by weekday name ("Monday", ...).
///
/// Keys keep the order they had in the payload. Entries that failed to
/// decode are kept as `None` so they can be counted, but never yielded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekRecord {
    days: Vec<(String, Option<RawDayEntry>)>,
}

impl WeekRecord {
    pub fn from_days<I, K>(days: I) -> Self
    where
        I: IntoIterator<Item = (K, RawDayEntry)>,
        K: Into<String>,
    {
        WeekRecord {
            days: days.into_iter().map(|(k, d)| (k.into(), Some(d))).collect(),
        }
    }

    /// Well-formed day entries, in payload order.
    pub fn days(&self) -> impl Iterator<Item = &RawDayEntry> {
        self.days.iter().filter_map(|(_, day)| day.as_ref())
    }

    pub fn malformed_count(&self) -> usize {
        self.days.iter().filter(|(_, day)| day.is_none()).count()
    }
}

impl<'de> Deserialize<'de> for WeekRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeekVisitor;

        impl<'de> Visitor<'de> for WeekVisitor {
            type Value = WeekRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of weekday names to day entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<WeekRecord, A::Error> {
                let mut days = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    let day = match serde_json::from_value::<RawDayEntry>(value) {
                        Ok(day) => Some(day),
                        Err(e) => {
                            tracing::debug!(weekday = %key, error = %e, "skipping malformed day entry");
                            None
                        }
                    };
                    days.push((key, day));
                }
                Ok(WeekRecord { days })
            }

            // An empty week is encoded as `[]` rather than `{}`
            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<WeekRecord, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(WeekRecord::default())
            }
        }

        deserializer.deserialize_any(WeekVisitor)
    }
}

/// Hours for a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawDayEntry {
    pub date: NaiveDate,
    pub times: StatusBlock,
}

impl RawDayEntry {
    pub fn new(date: NaiveDate, times: StatusBlock) -> Self {
        RawDayEntry { date, times }
    }
}

/// A single opening range, e.g. "9am" to "5pm". Times are provider text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRange {
    pub from: String,
    pub to: String,
}

impl HoursRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        HoursRange {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Opening status of a day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireTimes")]
pub enum StatusBlock {
    TwentyFourHours,
    Closed,
    /// Opening ranges in provider order. May be empty.
    Ranges(Vec<HoursRange>),
    Unknown,
}

impl StatusBlock {
    /// Text shown in the hours column. Only the first range is displayed.
    pub fn display_text<L: Localize + ?Sized>(&self, labels: &L) -> String {
        match self {
            StatusBlock::TwentyFourHours => labels.text(TextKey::TwentyFourHours).into_owned(),
            StatusBlock::Closed => labels.text(TextKey::Closed).into_owned(),
            StatusBlock::Ranges(ranges) => match ranges.first() {
                Some(range) => format!("{} - {}", range.from, range.to),
                None => labels.text(TextKey::NotAvailable).into_owned(),
            },
            StatusBlock::Unknown => labels.text(TextKey::NotAvailable).into_owned(),
        }
    }
}

/// The `times` object as sent by the provider. Fields stay loosely typed so
/// an odd `hours` value never hides a usable `status`.
#[derive(Deserialize)]
struct WireTimes {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    hours: Option<Value>,
}

impl From<WireTimes> for StatusBlock {
    fn from(wire: WireTimes) -> Self {
        match wire.status.as_ref().and_then(Value::as_str) {
            Some("24hours") => StatusBlock::TwentyFourHours,
            Some("closed") => StatusBlock::Closed,
            _ => match wire.hours.as_ref().and_then(Value::as_array) {
                // Stop at the first incomplete range so a broken leading range reads as n/a
                Some(hours) => StatusBlock::Ranges(
                    hours
                        .iter()
                        .map_while(|r| {
                            let from = r.get("from")?.as_str()?;
                            let to = r.get("to")?.as_str()?;
                            Some(HoursRange::new(from, to))
                        })
                        .collect(),
                ),
                None => StatusBlock::Unknown,
            },
        }
    }
}
