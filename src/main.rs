use std::path::PathBuf;

use anyhow::{Context, Result};

use mackolik_odds::config::ScrapeConfig;
use mackolik_odds::dates::date_range;
use mackolik_odds::ingest::run_ingest;
use mackolik_odds::logging;
use mackolik_odds::sink::CsvSink;
use mackolik_odds::source::MackolikSource;

const USAGE: &str = "usage: mackolik_odds --start DD/MM/YYYY [--end DD/MM/YYYY] [--out PATH] [--no-header]";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let mut cfg = ScrapeConfig::from_env();
    if let Some(out) = arg_value(&args, "--out") {
        cfg.out_path = PathBuf::from(out);
    }
    if has_flag(&args, "--no-header") {
        cfg.write_header = false;
    }

    let start = arg_value(&args, "--start").context(USAGE)?;
    let end = arg_value(&args, "--end");
    let dates = date_range(&start, end.as_deref())?;

    let mut sink = CsvSink::open(&cfg.out_path, cfg.write_header)?;
    let match_delay = cfg.match_delay;
    let source = MackolikSource::new(cfg)?;
    let summary = run_ingest(&source, &mut sink, &dates, match_delay)?;

    println!("Mackolik ingest complete");
    println!("CSV: {}", summary.out_path.display());
    println!("Dates: {}/{}", summary.dates_succeeded, summary.dates_total);
    println!(
        "Matches written: {}/{}",
        summary.matches_written, summary.matches_listed
    );

    let date_errors = summary.date_errors().collect::<Vec<_>>();
    if !date_errors.is_empty() {
        println!("Date errors: {}", date_errors.len());
        for (date, err) in date_errors.iter().take(8) {
            println!(" - {date}: {err}");
        }
    }
    let skipped = summary.skipped().collect::<Vec<_>>();
    if !skipped.is_empty() {
        println!("Skipped matches: {}", skipped.len());
        for (date, skip) in skipped.iter().take(12) {
            println!(
                " - {date} {} ({}): {}",
                skip.match_id, skip.fixture, skip.reason
            );
        }
    }

    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
