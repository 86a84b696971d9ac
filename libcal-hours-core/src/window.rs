//! Rolling window of display days.
//!
//! Week records from the provider are flattened into a date-keyed map, then
//! a window of `num_days` consecutive dates starting today is carved out of
//! it. Dates the provider did not cover are shown as "n/a".

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{HoursError, HoursResult};
use crate::hours::{StatusBlock, WeekRecord};
use crate::i18n::{Localize, TextKey};

/// One row of the hours table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDay {
    pub date: NaiveDate,
    pub text: String,
    pub is_today: bool,
}

impl DisplayDay {
    /// Full weekday name, e.g. "Monday".
    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    /// Abbreviated month and day, e.g. "Oct 5".
    pub fn short_date(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// Current calendar date in `tz`. This is the only timezone-aware step.
pub fn today_in(tz: Tz) -> NaiveDate {
    today_at(Utc::now(), tz)
}

/// Calendar date of the instant `now` as seen from `tz`.
pub fn today_at(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Flatten all week records into one map keyed by date.
/// On duplicate dates the later record wins.
pub fn flatten_weeks(weeks: &[WeekRecord]) -> HashMap<NaiveDate, StatusBlock> {
    let mut days = HashMap::new();
    for day in weeks.iter().flat_map(|week| week.days()) {
        days.insert(day.date, day.times.clone());
    }
    days
}

/// Build the window of `num_days` consecutive days starting at `today`.
///
/// Fails only when `weeks` is empty. Gaps in the provider data become "n/a".
pub fn build_window<L: Localize + ?Sized>(
    weeks: &[WeekRecord],
    num_days: usize,
    today: NaiveDate,
    labels: &L,
) -> HoursResult<Vec<DisplayDay>> {
    if weeks.is_empty() {
        return Err(HoursError::EmptyData);
    }

    let texts: HashMap<NaiveDate, String> = flatten_weeks(weeks)
        .into_iter()
        .map(|(date, times)| (date, times.display_text(labels)))
        .collect();

    let mut window = Vec::with_capacity(num_days);
    for (i, date) in today.iter_days().take(num_days).enumerate() {
        let text = match texts.get(&date) {
            Some(text) => text.clone(),
            None => labels.text(TextKey::NotAvailable).into_owned(),
        };
        window.push(DisplayDay {
            date,
            text,
            is_today: i == 0,
        });
    }

    Ok(window)
}

/// Last date covered by a window of `num_days` starting at `today`.
pub fn window_end(today: NaiveDate, num_days: usize) -> Option<NaiveDate> {
    let offset = u64::try_from(num_days.checked_sub(1)?).ok()?;
    today.checked_add_days(Days::new(offset))
}
