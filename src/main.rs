use clap::Parser;
use page_audit::config::AnalyzerConfig;
use page_audit::{AnalysisReport, AnalyzeError, Analyzer};
use std::process::ExitCode;

mod args;
use args::{Args, convert_narrator};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    match run(&args).await {
        Ok(report) => match print_report(&report, args.compact) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                ::log::error!("Failed to serialize report: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            ::log::error!("Analysis of {} failed: {}", args.url, e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<AnalysisReport, AnalyzeError> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    }
    .with_env_overrides();

    if let Some(timeout) = args.timeout {
        config.fetch.timeout_secs = timeout;
    }
    if let Some(narrator) = args.narrator {
        config.narrator.kind = convert_narrator(narrator);
    }

    ::log::info!("Starting analysis of {}", args.url);
    let analyzer = Analyzer::new(config).with_configured_narrator()?;
    analyzer.analyze(&args.url).await
}

fn print_report(report: &AnalysisReport, compact: bool) -> serde_json::Result<()> {
    let json = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    println!("{}", json);
    Ok(())
}
