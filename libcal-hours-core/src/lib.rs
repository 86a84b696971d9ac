//! Core types for libcal-hours.
//!
//! This crate turns a LibCal hours-grid payload into an HTML table of
//! opening hours for a rolling window that starts today:
//! - `hours` models the provider payload
//! - `window` flattens week records into a dense, date-indexed window
//! - `table` renders that window as markup
//! - `render` wires a `HoursSource` and a `Localize` implementation together

pub mod config;
pub mod error;
pub mod hours;
pub mod i18n;
pub mod render;
pub mod shortcode;
pub mod source;
pub mod table;
pub mod window;

pub use error::{HoursError, HoursResult};
pub use hours::{HoursGrid, HoursRange, LocationHours, RawDayEntry, StatusBlock, WeekRecord};
pub use i18n::{Catalog, Localize, TextKey};
pub use render::HoursRenderer;
pub use shortcode::{MAX_WEEKS, ShortcodeAttrs};
pub use source::{HoursSource, StaticSource};
pub use window::DisplayDay;
