use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

static ODDS_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.iddaa-ms-h").expect("static odds table selector"));
// Alternate-tab rows repeat values already present in the primary rows.
static ODDS_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr:not(.iddaa-tab-alt)").expect("static odds row selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("static cell selector"));

/// One odds table from a match page: a label row followed by value rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OddsBlock {
    pub labels: Vec<String>,
    pub value_rows: Vec<Vec<String>>,
}

impl OddsBlock {
    /// Split a table's rows into the label row and its value rows.
    ///
    /// A table whose first row carries no label cells has nothing to map and
    /// yields `None`; cell-less rows after it are dropped.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Option<Self> {
        let mut rows = rows.into_iter();
        let labels = rows.next()?;
        if labels.is_empty() {
            return None;
        }
        Some(Self {
            labels,
            value_rows: rows.filter(|cells| !cells.is_empty()).collect(),
        })
    }
}

pub fn extract_odds_blocks(html: &str) -> Vec<OddsBlock> {
    let document = Html::parse_document(html);
    document
        .select(&ODDS_TABLE)
        .filter_map(|table| OddsBlock::from_rows(table_rows(table)))
        .collect()
}

fn table_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    table
        .select(&ODDS_ROW)
        .map(|row| {
            row.select(&CELL)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
