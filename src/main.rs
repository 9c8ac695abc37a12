//! # overlay-text CLI
//!
//! Usage:
//!   overlay-text job.json -o overlay.png
//!   echo '{ "content": "Price: 19.99" }' | overlay-text -o overlay.png
//!   overlay-text --example > job.json

use std::{
    env, fs,
    io::{self, Read},
};

use anyhow::{Context, Result};
use overlay_text::{OverlayStyle, OverlaySystem};
use serde::Deserialize;

/// One rendering request: a style and newline-separated list items.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Job {
    #[serde(default)]
    style: OverlayStyle,
    content: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_job_json());
        return Ok(());
    }

    let input = if let Some(path) = input_path(&args) {
        fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read job from stdin")?;
        buf
    };

    let output_path = output_path(&args);

    let job: Job = serde_json::from_str(&input).context("failed to parse job json")?;
    log::debug!("job style: {:?}", job.style);

    let system = OverlaySystem::new(job.style).context("failed to set up overlay fonts")?;
    let metrics = system
        .render_text_to_file(&job.content, &output_path)
        .with_context(|| format!("failed to render overlay to {output_path}"))?;

    log::info!(
        "wrote {} items ({}x{}) to {output_path}",
        metrics.item_count,
        metrics.canvas_size[0],
        metrics.canvas_size[1]
    );
    eprintln!(
        "Written {}x{} overlay to {}",
        metrics.canvas_size[0], metrics.canvas_size[1], output_path
    );

    Ok(())
}

/// First positional argument, skipping the value that follows `-o`.
fn input_path(args: &[String]) -> Option<&str> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "-o" {
            rest.next();
        } else if !arg.starts_with('-') {
            return Some(arg);
        }
    }
    None
}

fn output_path(args: &[String]) -> String {
    args.windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "overlay.png".to_string())
}

fn example_job_json() -> &'static str {
    r##"{
  "style": {
    "canvas_width": 1080,
    "panel_color": "#000000B3",
    "highlight_color": "#FFCC00",
    "regular_color": "#FFFFFF",
    "highlight_font": { "kind": "system", "families": ["sans-serif"], "bold": true },
    "regular_font": { "kind": "system", "families": ["sans-serif"] },
    "font_size": 40,
    "highlight_font_size": 40
  },
  "content": "Price: 19.99 dollars, tax included\nShipping: free on orders over fifty dollars\nReturns: thirty days, no questions asked"
}
"##
}
