use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::record::MatchMeta;

// Positional columns of a livedata `m` row.
const COL_ID: usize = 0;
const COL_HOME: usize = 2;
const COL_AWAY: usize = 4;
const COL_HT_SCORE: usize = 7;
const COL_CODE: usize = 14;
const COL_TIME: usize = 16;
const COL_SPORT: usize = 23;
const COL_FT_HOME: usize = 29;
const COL_FT_AWAY: usize = 30;
const COL_DATE: usize = 35;
const COL_INFO: usize = 36;
const INFO_SEASON: usize = 5;
const INFO_LEAGUE: usize = 9;

const SPORT_FOOTBALL: i64 = 1;

/// A match from the daily listing: its archive id plus the CSV metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedMatch {
    pub id: String,
    pub meta: MatchMeta,
}

/// Football matches with a betting code from a livedata response body.
pub fn parse_livedata_json(raw: &str) -> Result<Vec<ListedMatch>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid livedata json")?;
    let Some(rows) = root.get("m").and_then(|v| v.as_array()) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for row in rows {
        let Some(cols) = row.as_array() else {
            continue;
        };
        if !is_football_with_odds(cols) {
            continue;
        }
        match parse_row(cols) {
            Some(listed) => out.push(listed),
            None => debug!(row = %row, "skipping incomplete livedata row"),
        }
    }
    Ok(out)
}

fn is_football_with_odds(cols: &[Value]) -> bool {
    let sport = cols.get(COL_SPORT).and_then(as_int);
    // A non-numeric code still marks a match with odds; only absent or zero do not.
    let has_code = match cols.get(COL_CODE) {
        None | Some(Value::Null) => false,
        Some(code) => as_int(code) != Some(0),
    };
    sport == Some(SPORT_FOOTBALL) && has_code
}

fn parse_row(cols: &[Value]) -> Option<ListedMatch> {
    let id = cols.get(COL_ID).and_then(text).filter(|s| !s.is_empty())?;
    let info = cols.get(COL_INFO)?.as_array()?;
    let ft_home = cols.get(COL_FT_HOME).and_then(text)?;
    let ft_away = cols.get(COL_FT_AWAY).and_then(text)?;

    Some(ListedMatch {
        id,
        meta: MatchMeta {
            date: cols.get(COL_DATE).and_then(text)?,
            season: info.get(INFO_SEASON).and_then(text).unwrap_or_default(),
            time: cols.get(COL_TIME).and_then(text).unwrap_or_default(),
            code: cols.get(COL_CODE).and_then(text)?,
            league: info.get(INFO_LEAGUE).and_then(text).unwrap_or_default(),
            home: cols.get(COL_HOME).and_then(text)?,
            away: cols.get(COL_AWAY).and_then(text)?,
            halftime_score: cols.get(COL_HT_SCORE).and_then(text).unwrap_or_default(),
            fulltime_score: format!("{ft_home}-{ft_away}"),
        },
    })
}

fn as_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, sport: i64, code: i64) -> Value {
        let mut cols = vec![Value::Null; 37];
        cols[COL_ID] = id.into();
        cols[COL_HOME] = "West Bromwich".into();
        cols[COL_AWAY] = "Fulham".into();
        cols[COL_HT_SCORE] = "0-1".into();
        cols[COL_CODE] = code.into();
        cols[COL_TIME] = "14:45".into();
        cols[COL_SPORT] = sport.into();
        cols[COL_FT_HOME] = "1".into();
        cols[COL_FT_AWAY] = 2i64.into();
        cols[COL_DATE] = "01/01/2013".into();
        let mut info = vec![Value::Null; 10];
        info[INFO_SEASON] = "2012/2013".into();
        info[INFO_LEAGUE] = "İNP".into();
        cols[COL_INFO] = Value::Array(info);
        Value::Array(cols)
    }

    #[test]
    fn maps_positional_columns() {
        let body = serde_json::json!({ "m": [row(972904, 1, 502)] }).to_string();
        let listed = parse_livedata_json(&body).expect("valid body");
        assert_eq!(listed.len(), 1);
        let m = &listed[0];
        assert_eq!(m.id, "972904");
        assert_eq!(m.meta.code, "502");
        assert_eq!(m.meta.season, "2012/2013");
        assert_eq!(m.meta.league, "İNP");
        assert_eq!(m.meta.fulltime_score, "1-2");
        assert_eq!(m.meta.halftime_score, "0-1");
    }

    #[test]
    fn drops_other_sports_and_matches_without_code() {
        let body =
            serde_json::json!({ "m": [row(1, 2, 502), row(2, 1, 0), row(3, 1, 777)] }).to_string();
        let listed = parse_livedata_json(&body).expect("valid body");
        let ids: Vec<&str> = listed.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn non_numeric_code_is_kept_and_missing_code_dropped() {
        let mut lettered = row(4, 1, 0);
        lettered[COL_CODE] = "A12".into();
        let mut string_zero = row(5, 1, 0);
        string_zero[COL_CODE] = " 0 ".into();
        let mut missing = row(6, 1, 0);
        missing[COL_CODE] = Value::Null;

        let body = serde_json::json!({ "m": [lettered, string_zero, missing] }).to_string();
        let listed = parse_livedata_json(&body).expect("valid body");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "4");
        assert_eq!(listed[0].meta.code, "A12");
    }

    #[test]
    fn short_rows_are_skipped() {
        let body = serde_json::json!({ "m": [[1, 2, 3]] }).to_string();
        assert!(parse_livedata_json(&body).expect("valid body").is_empty());
    }
}
