use anyhow::Result;

use super::{SourceArgs, WindowArgs, load_renderer};

pub async fn run(window: WindowArgs, source: SourceArgs) -> Result<()> {
    let renderer = load_renderer(&source, window.today)?;

    let html = renderer.render(&window.attrs()).await;
    if !html.is_empty() {
        println!("{html}");
    }

    Ok(())
}
