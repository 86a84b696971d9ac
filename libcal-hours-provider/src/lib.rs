//! libcal-hours-provider - LibCal hours-grid API client
//!
//! Fetches the hours grid for an institution and hands single locations
//! to the renderer through `HoursSource`.

mod client;

pub use client::LibCalClient;
