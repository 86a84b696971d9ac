//! Rendering entry point: fetch, window, table.
//!
//! `HoursRenderer` takes its collaborators explicitly: the hours source,
//! the text catalog and the timezone that decides what "today" is.

use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tokio::time::timeout;

use crate::error::{HoursError, HoursResult};
use crate::hours::WeekRecord;
use crate::i18n::Localize;
use crate::shortcode::ShortcodeAttrs;
use crate::source::HoursSource;
use crate::table::render_table;
use crate::window::{DisplayDay, build_window, today_in};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HoursRenderer<S, L> {
    source: S,
    labels: L,
    timezone: Tz,
    ignore_cache: bool,
    fetch_timeout: Duration,
    today: Option<NaiveDate>,
}

impl<S: HoursSource, L: Localize> HoursRenderer<S, L> {
    pub fn new(source: S, labels: L, timezone: Tz) -> Self {
        HoursRenderer {
            source,
            labels,
            timezone,
            ignore_cache: false,
            fetch_timeout: FETCH_TIMEOUT,
            today: None,
        }
    }

    pub fn ignore_cache(mut self, ignore_cache: bool) -> Self {
        self.ignore_cache = ignore_cache;
        self
    }

    pub fn fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Pin "today" to a fixed date instead of the clock.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn current_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| today_in(self.timezone))
    }

    /// Render the hours table, or an empty string if anything fails.
    /// Failures are logged, never returned.
    pub async fn render(&self, attrs: &ShortcodeAttrs) -> String {
        match self.try_render(attrs).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(location = %attrs.location, error = %e, "failed to render hours");
                String::new()
            }
        }
    }

    pub async fn try_render(&self, attrs: &ShortcodeAttrs) -> HoursResult<String> {
        let days = self.preview(attrs).await?;
        Ok(render_table(&days, attrs.num_weeks(), &self.labels))
    }

    /// Location names the source offers, under the same fetch timeout.
    pub async fn locations(&self) -> HoursResult<Vec<String>> {
        timeout(self.fetch_timeout, self.source.location_names(self.ignore_cache))
            .await
            .map_err(|_| HoursError::FetchTimeout(self.fetch_timeout.as_secs()))?
    }

    /// The window of days that `render` would show.
    pub async fn preview(&self, attrs: &ShortcodeAttrs) -> HoursResult<Vec<DisplayDay>> {
        let hours = timeout(
            self.fetch_timeout,
            self.source.fetch_hours(&attrs.location, self.ignore_cache),
        )
        .await
        .map_err(|_| HoursError::FetchTimeout(self.fetch_timeout.as_secs()))??;

        let today = self.current_date();
        tracing::debug!(
            location = %hours.name,
            weeks = hours.weeks.len(),
            malformed = hours.weeks.iter().map(WeekRecord::malformed_count).sum::<usize>(),
            %today,
            num_days = attrs.num_days(),
            "building hours window"
        );

        build_window(&hours.weeks, attrs.num_days(), today, &self.labels)
    }
}
