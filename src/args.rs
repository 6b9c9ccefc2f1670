use clap::{Parser, ValueEnum};
use page_audit::config::NarratorKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-audit")]
#[command(about = "Fetches a web page and prints a structured quality report")]
#[command(version)]
pub struct Args {
    /// Address of the page to analyze
    pub url: String,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fetch timeout in seconds (overrides the configuration file)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Narrative generator (overrides the configuration file)
    #[arg(short, long, value_enum)]
    pub narrator: Option<NarratorArg>,

    /// Print the report on a single line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NarratorArg {
    None,
    Template,
    Chat,
}

/// Convert from CLI argument narrator to configuration narrator
pub fn convert_narrator(arg: NarratorArg) -> NarratorKind {
    match arg {
        NarratorArg::None => NarratorKind::None,
        NarratorArg::Template => NarratorKind::Template,
        NarratorArg::Chat => NarratorKind::Chat,
    }
}
