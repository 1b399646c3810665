//! The report pipeline: resolve the reference day, load the dataset,
//! render every requested chart.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

use epicurves_calendar::RefDay;
use epicurves_dataset::load_path;
use epicurves_render::{RenderOptions, render_report};

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let ref_day = resolve_ref_day(cli.today.as_deref())?;
    info!(
        year = ref_day.year(),
        month = ref_day.month(),
        day = ref_day.day(),
        "reference day resolved"
    );

    let regions = load_path(&cli.input, ref_day)
        .with_context(|| format!("loading dataset from {}", cli.input.display()))?;

    let options = RenderOptions {
        output_dir: cli.output_dir,
        open_images: !cli.no_open,
        ..RenderOptions::default()
    };
    let written = render_report(&regions, ref_day, &options).context("rendering charts")?;

    if written.is_empty() {
        println!("no charts requested by the dataset (all drawplot flags unset)");
    }
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Picks the day all observation offsets are measured from: an explicit
/// `--today` override, or the local wall-clock date.
fn resolve_ref_day(today: Option<&str>) -> Result<RefDay> {
    let date = match today {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("invalid --today value {text:?}, expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    RefDay::new(date.year(), date.month() as u8, date.day() as u8)
        .context("reference day is not a valid calendar date")
}
