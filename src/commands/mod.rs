pub mod config;
pub mod locations;
pub mod render;
pub mod show;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use libcal_hours_core::config::HoursConfig;
use libcal_hours_core::{Catalog, HoursRenderer, ShortcodeAttrs, StaticSource};
use libcal_hours_provider::LibCalClient;

use crate::source::CliSource;

/// Which table to render.
#[derive(Args)]
pub struct WindowArgs {
    /// Location name, exactly as it appears in LibCal
    #[arg(short, long, default_value = "")]
    pub location: String,

    /// Weeks to show (1-3, anything else shows 3)
    #[arg(short = 'w', long)]
    pub num_weeks: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

impl WindowArgs {
    pub fn attrs(&self) -> ShortcodeAttrs {
        ShortcodeAttrs {
            location: self.location.clone(),
            num_weeks: self.num_weeks.clone(),
        }
    }
}

/// Where hours come from.
#[derive(Args)]
pub struct SourceArgs {
    /// Read a saved hours-grid response instead of calling the API
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Ask the API for fresh data
    #[arg(long)]
    pub ignore_cache: bool,
}

impl SourceArgs {
    pub fn load(&self, config: &HoursConfig) -> Result<CliSource> {
        Ok(match &self.file {
            Some(path) => CliSource::File(StaticSource::from_file(path)?),
            None => CliSource::Api(LibCalClient::from_config(config)?),
        })
    }
}

/// Build a renderer from the config file and command-line options.
pub fn load_renderer(source: &SourceArgs, today: Option<NaiveDate>) -> Result<HoursRenderer<CliSource, Catalog>> {
    let config = HoursConfig::load()?;
    tracing::debug!(file = ?source.file, institution = ?config.institution_id, "loading hours source");

    let mut renderer = HoursRenderer::new(source.load(&config)?, config.catalog(), config.timezone()?)
        .ignore_cache(source.ignore_cache || config.ignore_cache)
        .fetch_timeout(config.fetch_timeout());

    if let Some(today) = today {
        renderer = renderer.today(today);
    }

    Ok(renderer)
}
