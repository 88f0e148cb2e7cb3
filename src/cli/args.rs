use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nyc-housing-deck",
    version,
    about = "Scrollytelling slide deck for the New York housing dataset"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the deck into a directory of static HTML pages.
    Build(BuildArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Listing CSV, plain or gzip-compressed.
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    /// Chart container width in pixels.
    #[arg(long, default_value_t = 960.0)]
    pub width: f64,

    /// Chart container height in pixels.
    #[arg(long, default_value_t = 560.0)]
    pub height: f64,

    /// Page title prefix. Falls back to DECK_TITLE, then a built-in title.
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, default_value_t = false)]
    pub no_zip: bool,

    /// Also write every chart as standalone SVG and PDF figures.
    #[arg(long, default_value_t = false)]
    pub export_figures: bool,
}
