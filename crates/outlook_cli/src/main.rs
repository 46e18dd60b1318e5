//! Outlook CLI.
//!
//! Reads a JSON bundle of loader overlays, resolves it and prints the run as
//! JSON for the renderer, calendar and publisher collaborators.

mod error;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use error::CliError;
use log::info;
use outlook_core::{
    default_log_level, init_logging, CalendarDay, DateIndex, NotificationPayload, OutlookService,
    ResolvedOverlay, RunReport, SeverityCatalog, SourceOverlay, StyledRegion, VersionTie,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

const NO_OUTLOOK_MESSAGE: &str = "No outlook issued for this period";

#[derive(Parser)]
#[command(name = "outlook")]
#[command(about = "Resolve convective outlook overlays into a dated partition", long_about = None)]
struct Args {
    /// JSON array of loader overlays
    input: PathBuf,

    /// Alternate severity catalog (JSON)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Query instant on the local clock, e.g. 2024-08-01T12:00 (default: now)
    #[arg(long, value_parser = parse_instant)]
    at: Option<NaiveDateTime>,

    /// Absolute directory for rolling log files (logging is off when omitted)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Serialize)]
struct CliReport<'a> {
    instant: NaiveDateTime,
    authoritative: Option<OverlayView<'a>>,
    message: Option<&'static str>,
    tie: Option<VersionTie>,
    skipped: usize,
    repair_failures: usize,
    clipped_away: usize,
    issues: Vec<String>,
    date_index: DateIndex,
    calendar: Vec<CalendarDay>,
    notification: Option<NotificationPayload>,
}

#[derive(Debug, Serialize)]
struct OverlayView<'a> {
    identifier: &'a str,
    version: u32,
    layers: Vec<StyledRegion<'a>>,
}

impl<'a> OverlayView<'a> {
    fn new(resolved: &'a ResolvedOverlay, catalog: &SeverityCatalog) -> Self {
        Self {
            identifier: resolved.overlay.identifier(),
            version: resolved.overlay.validity().version,
            layers: resolved.partition.styled(catalog),
        }
    }
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(output) => println!("{output}"),
        Err(err) => err.exit(),
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).map_err(CliError::LoggingInit)?;
    }

    let catalog = match &args.catalog {
        Some(path) => SeverityCatalog::from_json_str(&read(path)?)?,
        None => SeverityCatalog::default(),
    };
    let sources: Vec<SourceOverlay> =
        serde_json::from_str(&read(&args.input)?).map_err(|error| CliError::Bundle {
            path: args.input.clone(),
            error,
        })?;

    let service = OutlookService::new(catalog);
    let report = service.ingest(sources);
    let instant = args.at.unwrap_or_else(|| Local::now().naive_local());
    render(&service, &report, instant)
}

fn render(
    service: &OutlookService,
    report: &RunReport,
    instant: NaiveDateTime,
) -> Result<String, CliError> {
    let selection = service.authoritative(report, instant);
    let date_index = report.date_index();
    let calendar = service.calendar(&date_index);

    let output = CliReport {
        instant,
        authoritative: selection
            .overlay
            .map(|resolved| OverlayView::new(resolved, service.catalog())),
        message: selection.overlay.is_none().then_some(NO_OUTLOOK_MESSAGE),
        tie: selection.tie.clone(),
        skipped: report.skipped_count(),
        repair_failures: report.repair_failure_count(),
        clipped_away: report.clipped_away,
        issues: report.issues.iter().map(ToString::to_string).collect(),
        date_index,
        calendar,
        notification: NotificationPayload::for_latest(&report.overlays),
    };
    info!(
        "event=report_rendered module=cli status=ok instant={} authoritative={}",
        instant,
        selection.identifier().unwrap_or("none")
    );
    serde_json::to_string_pretty(&output).map_err(CliError::Output)
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|error| CliError::Read {
        path: path.to_path_buf(),
        error,
    })
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map_err(|err| format!("expected YYYY-MM-DDTHH:MM, got `{raw}`: {err}"))
}
