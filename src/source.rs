use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::config::ScrapeConfig;
use crate::dates::format_date;
use crate::http_client::{get_text_with_retry, http_client};
use crate::match_list::{ListedMatch, parse_livedata_json};
use crate::odds_table::{OddsBlock, extract_odds_blocks};

/// Where listed matches and their raw odds tables come from.
pub trait MatchSource {
    fn matches_on(&self, date: NaiveDate) -> Result<Vec<ListedMatch>>;

    fn odds_blocks(&self, match_id: &str) -> Result<Vec<OddsBlock>>;
}

pub struct MackolikSource {
    client: &'static Client,
    cfg: ScrapeConfig,
}

impl MackolikSource {
    pub fn new(cfg: ScrapeConfig) -> Result<Self> {
        let client = http_client(&cfg)?;
        Ok(Self { client, cfg })
    }

    pub fn match_page(&self, match_id: &str) -> Result<String> {
        let url = self.cfg.match_url_for(match_id);
        get_text_with_retry(self.client, &url, &self.cfg.retry)
            .with_context(|| format!("match page {match_id}"))
    }
}

impl MatchSource for MackolikSource {
    fn matches_on(&self, date: NaiveDate) -> Result<Vec<ListedMatch>> {
        let day = format_date(date);
        let url = self.cfg.livedata_url_for(&day);
        let body = get_text_with_retry(self.client, &url, &self.cfg.retry)
            .with_context(|| format!("livedata for {day}"))?;
        parse_livedata_json(&body).with_context(|| format!("livedata for {day}"))
    }

    fn odds_blocks(&self, match_id: &str) -> Result<Vec<OddsBlock>> {
        let html = self.match_page(match_id)?;
        Ok(extract_odds_blocks(&html))
    }
}
