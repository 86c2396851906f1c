use anyhow::{Context, Result, anyhow};
use chrono::{Duration, NaiveDate};

/// Date format used by the listing endpoint and the CSV output.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .with_context(|| format!("invalid date {raw:?}, expected DD/MM/YYYY"))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Every day from `start` to `end` inclusive, or just `start` without an end.
pub fn date_range(start: &str, end: Option<&str>) -> Result<Vec<NaiveDate>> {
    let start = parse_date(start)?;
    let Some(end) = end.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(vec![start]);
    };
    let end = parse_date(end)?;
    if end < start {
        return Err(anyhow!(
            "end date {} is before start date {}",
            format_date(end),
            format_date(start)
        ));
    }

    let mut out = Vec::new();
    let mut day = start;
    while day <= end {
        out.push(day);
        day += Duration::days(1);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_date_without_end() {
        let days = date_range("30/04/2017", None).expect("valid");
        assert_eq!(days.len(), 1);
        assert_eq!(format_date(days[0]), "30/04/2017");

        let days = date_range("30/04/2017", Some("  ")).expect("valid");
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn range_crosses_month_boundary() {
        let days = date_range("30/04/2017", Some("02/05/2017")).expect("valid");
        let formatted: Vec<String> = days.into_iter().map(format_date).collect();
        assert_eq!(formatted, vec!["30/04/2017", "01/05/2017", "02/05/2017"]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(date_range("02/05/2017", Some("30/04/2017")).is_err());
    }

    #[test]
    fn rejects_iso_dates() {
        assert!(parse_date("2017-04-30").is_err());
    }
}
