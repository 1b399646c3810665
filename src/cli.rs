use std::path::PathBuf;

use clap::Parser;

/// Epicurves epidemic case-curve projection.
#[derive(Parser)]
#[command(
    name = "epicurves",
    version,
    about = "Project regional case curves against hospital capacity"
)]
pub struct Cli {
    /// Path to the CSV case table.
    pub input: PathBuf,

    /// Directory the chart PNG files are written into.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Reference day override (YYYY-MM-DD); defaults to the local date.
    #[arg(long)]
    pub today: Option<String>,

    /// Do not open finished charts in the image viewer.
    #[arg(long)]
    pub no_open: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
