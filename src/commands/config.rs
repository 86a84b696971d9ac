use anyhow::Result;
use libcal_hours_core::config::HoursConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let path = HoursConfig::config_path()?;
    let config = HoursConfig::load()?;

    println!("{}", path.display());

    let institution = config.institution_id.as_deref().unwrap_or("(not set)");
    println!("   {} {}", "institution_id:".dimmed(), institution);
    println!("   {} {}", "timezone:".dimmed(), config.timezone()?);
    println!();

    println!("{}", "Effective settings:".bold());
    print!("{}", config.to_toml()?);

    Ok(())
}
