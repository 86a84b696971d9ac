use anyhow::Result;
use owo_colors::OwoColorize;

use super::{SourceArgs, load_renderer};

pub async fn run(source: SourceArgs) -> Result<()> {
    let renderer = load_renderer(&source, None)?;
    let names = renderer.locations().await?;

    if names.is_empty() {
        println!("{}", "No locations found".dimmed());
        return Ok(());
    }

    for name in names {
        println!("{name}");
    }

    Ok(())
}
