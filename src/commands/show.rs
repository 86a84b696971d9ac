use anyhow::Result;
use libcal_hours_core::DisplayDay;
use libcal_hours_core::table::DAYS_PER_BLOCK;
use libcal_hours_core::window::window_end;
use owo_colors::OwoColorize;

use super::{SourceArgs, WindowArgs, load_renderer};

pub async fn run(window: WindowArgs, source: SourceArgs, json: bool) -> Result<()> {
    let renderer = load_renderer(&source, window.today)?;
    let attrs = window.attrs();
    let days = renderer.preview(&attrs).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    if let Some(first) = days.first() {
        let range = match window_end(first.date, days.len()) {
            Some(last) => format!("{} - {}", first.short_date(), last.format("%b %-d")),
            None => first.short_date(),
        };
        println!("{} {}", attrs.location.bold(), range.dimmed());
    }

    for line in render_lines(&days) {
        println!("{line}");
    }

    Ok(())
}

/// One terminal line per day, with a blank line between weeks.
fn render_lines(days: &[DisplayDay]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, day) in days.iter().enumerate() {
        if i > 0 && i % DAYS_PER_BLOCK == 0 {
            lines.push(String::new());
        }

        let row = format!("  {:<10} {:<7} {}", day.weekday_name(), day.short_date(), day.text);
        if day.is_today {
            lines.push(row.green().bold().to_string());
        } else {
            lines.push(row);
        }
    }

    lines
}
