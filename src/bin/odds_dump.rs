use anyhow::{Context, Result, anyhow};

use mackolik_odds::config::ScrapeConfig;
use mackolik_odds::logging;
use mackolik_odds::normalize::normalize;
use mackolik_odds::odds_table::extract_odds_blocks;
use mackolik_odds::record::{HEADER, META_FIELDS};
use mackolik_odds::source::MackolikSource;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init();

    let match_id = parse_id_arg().context("usage: odds_dump --id MATCH_ID [--raw]")?;
    let raw = std::env::args().any(|a| a == "--raw");

    let source = MackolikSource::new(ScrapeConfig::from_env())?;
    let html = source.match_page(&match_id)?;
    let blocks = extract_odds_blocks(&html);

    if raw {
        let json = serde_json::to_string_pretty(&blocks).context("serialize odds blocks")?;
        println!("{json}");
    }

    println!("Match {match_id}: {} odds tables", blocks.len());
    let odds = normalize(&blocks).map_err(|err| anyhow!("match {match_id}: {err}"))?;
    for (slot, value) in odds.fields().enumerate() {
        let value = if value.is_empty() { "-" } else { value };
        println!("{:>2} {:<7} {value}", slot, HEADER[META_FIELDS + slot]);
    }
    Ok(())
}

fn parse_id_arg() -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(id) = arg.strip_prefix("--id=") {
            let trimmed = id.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == "--id" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
