use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::dates::format_date;
use crate::match_list::ListedMatch;
use crate::normalize::normalize;
use crate::record::MatchRecord;
use crate::sink::CsvSink;
use crate::source::MatchSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSkip {
    pub match_id: String,
    pub fixture: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct DateIngestSummary {
    pub date: String,
    pub matches_listed: usize,
    pub matches_written: usize,
    pub skipped: Vec<MatchSkip>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub out_path: PathBuf,
    pub dates_total: usize,
    pub dates_succeeded: usize,
    pub matches_listed: usize,
    pub matches_written: usize,
    pub per_date: Vec<DateIngestSummary>,
}

impl IngestSummary {
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &MatchSkip)> + '_ {
        self.per_date
            .iter()
            .flat_map(|d| d.skipped.iter().map(move |s| (d.date.as_str(), s)))
    }

    pub fn date_errors(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.per_date
            .iter()
            .filter_map(|d| d.error.as_deref().map(|e| (d.date.as_str(), e)))
    }
}

/// Fetch, normalize and append every match for each date.
///
/// A failing match is skipped and recorded; a failing listing skips its date.
/// Only output errors abort the run.
pub fn run_ingest(
    source: &dyn MatchSource,
    sink: &mut CsvSink,
    dates: &[NaiveDate],
    match_delay: Duration,
) -> Result<IngestSummary> {
    let mut per_date = Vec::with_capacity(dates.len());
    let mut dates_succeeded = 0usize;
    let mut matches_listed = 0usize;
    let mut matches_written = 0usize;

    for date in dates {
        let day = format_date(*date);
        info!(date = %day, "fetching matches");
        let mut summary = DateIngestSummary {
            date: day.clone(),
            ..Default::default()
        };

        let listed = match source.matches_on(*date) {
            Ok(listed) => listed,
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(date = %day, %reason, "listing failed, skipping date");
                summary.error = Some(reason);
                per_date.push(summary);
                continue;
            }
        };
        summary.matches_listed = listed.len();

        let mut batch = Vec::with_capacity(listed.len());
        for (idx, listed_match) in listed.iter().enumerate() {
            match build_record(source, listed_match) {
                Ok(record) => batch.push(record),
                Err(reason) => {
                    warn!(
                        date = %day,
                        match_id = %listed_match.id,
                        %reason,
                        "skipping match"
                    );
                    summary.skipped.push(MatchSkip {
                        match_id: listed_match.id.clone(),
                        fixture: format!("{} - {}", listed_match.meta.home, listed_match.meta.away),
                        reason,
                    });
                }
            }
            if !match_delay.is_zero() && idx + 1 < listed.len() {
                thread::sleep(match_delay);
            }
        }

        if !batch.is_empty() {
            summary.matches_written = sink.append(&batch)?;
        }
        info!(
            date = %day,
            written = summary.matches_written,
            skipped = summary.skipped.len(),
            "matches written"
        );

        matches_listed += summary.matches_listed;
        matches_written += summary.matches_written;
        dates_succeeded += 1;
        per_date.push(summary);
    }

    Ok(IngestSummary {
        out_path: sink.path().to_path_buf(),
        dates_total: dates.len(),
        dates_succeeded,
        matches_listed,
        matches_written,
        per_date,
    })
}

fn build_record(source: &dyn MatchSource, listed: &ListedMatch) -> Result<MatchRecord, String> {
    let blocks = source
        .odds_blocks(&listed.id)
        .map_err(|err| format!("{err:#}"))?;
    let odds = normalize(&blocks).map_err(|err| err.to_string())?;
    Ok(MatchRecord::assemble(listed.meta.clone(), odds))
}
