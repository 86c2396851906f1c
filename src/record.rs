use crate::normalize::NormalizedOdds;
use crate::scheme::SLOT_COUNT;

pub const META_FIELDS: usize = 9;
pub const RECORD_FIELDS: usize = META_FIELDS + SLOT_COUNT;

/// CSV column names in record order.
pub const HEADER: [&str; RECORD_FIELDS] = [
    "Date", "Season", "Time", "Code", "League", "Home", "Away", "HT", "FT", // match
    "MS1", "MSX", "MS2", // match result
    "H", "H1", "HX", "H2", "H", // handicap
    "IY1.5A", "IY1.5U", "1.5A", "1.5U", "2.5A", "2.5U", "3.5A", "3.5U", // over/under
    "KGV", "KGY", // both teams to score
    "IY1", "IY0", "IY2", // first-half result
    "1X", "12", "X2", // double chance
    "TG01", "TG23", "TG46", "TG7", // total goals
    "1/1", "1/X", "1/2", "X/1", "X/X", "X/2", "2/1", "2/X", "2/2",
];

/// Fixed metadata for one listed match, in CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchMeta {
    pub date: String,
    pub season: String,
    pub time: String,
    pub code: String,
    pub league: String,
    pub home: String,
    pub away: String,
    pub halftime_score: String,
    pub fulltime_score: String,
}

impl MatchMeta {
    pub fn fields(&self) -> [&str; META_FIELDS] {
        [
            &self.date,
            &self.season,
            &self.time,
            &self.code,
            &self.league,
            &self.home,
            &self.away,
            &self.halftime_score,
            &self.fulltime_score,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub meta: MatchMeta,
    pub odds: NormalizedOdds,
}

impl MatchRecord {
    pub fn assemble(meta: MatchMeta, odds: NormalizedOdds) -> Self {
        Self { meta, odds }
    }

    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(RECORD_FIELDS);
        out.extend(self.meta.fields());
        out.extend(self.odds.fields());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_has_one_field_per_column() {
        let meta = MatchMeta {
            date: "01/01/2013".to_string(),
            season: "2012/2013".to_string(),
            time: "14:45".to_string(),
            code: "502".to_string(),
            league: "İNP".to_string(),
            home: "West Bromwich".to_string(),
            away: "Fulham".to_string(),
            halftime_score: "0-1".to_string(),
            fulltime_score: "1-2".to_string(),
        };
        let record = MatchRecord::assemble(meta, NormalizedOdds::default());
        let fields = record.fields();
        assert_eq!(fields.len(), HEADER.len());
        assert_eq!(fields[0], "01/01/2013");
        assert_eq!(fields[8], "1-2");
        assert!(fields[META_FIELDS..].iter().all(|f| f.is_empty()));
    }

    #[test]
    fn header_matches_slot_layout() {
        assert_eq!(HEADER[META_FIELDS], "MS1");
        assert_eq!(HEADER[META_FIELDS + 28], "1/1");
        assert_eq!(HEADER[RECORD_FIELDS - 1], "2/2");
    }
}
