use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::normalize::OddsError;

/// Number of odds slots in a normalized record.
pub const SLOT_COUNT: usize = 37;

/// First slot of the 3x3 first-half / full-time matrix.
pub const HT_FT_OFFSET: usize = 28;
pub const HT_FT_ROWS: usize = 3;
pub const HT_FT_COLS: usize = 3;

pub const MATCH_RESULT: &str = "Maç Sonucu";
pub const HT_FT_RESULT: &str = "İlk Yarı / Maç Sonucu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeEntry {
    pub category: &'static str,
    pub expected_count: usize,
    pub output_offset: usize,
}

// label, values consumed, first output slot
const SCHEME: &[(&str, usize, usize)] = &[
    (MATCH_RESULT, 3, 0),
    ("Handikap", 5, 3),
    ("IY 1,5 Gol", 2, 8),
    ("AÜ 1,5 Gol", 2, 10),
    ("AÜ 2,5 Gol", 2, 12),
    ("AÜ 3,5 Gol", 2, 14),
    ("Karşılıklı Gol", 2, 16),
    ("İlk Yarı Sonucu", 3, 18),
    ("Çifte Şans", 3, 21),
    ("Toplam Gol", 4, 24),
];

static REGISTRY: Lazy<HashMap<&'static str, SchemeEntry>> = Lazy::new(|| {
    SCHEME
        .iter()
        .map(|&(category, expected_count, output_offset)| {
            (
                category,
                SchemeEntry {
                    category,
                    expected_count,
                    output_offset,
                },
            )
        })
        .collect()
});

/// Resolve a category label exactly as it appears on the odds page.
pub fn lookup(label: &str) -> Result<SchemeEntry, OddsError> {
    REGISTRY
        .get(label)
        .copied()
        .ok_or_else(|| OddsError::UnknownCategory {
            label: label.to_string(),
        })
}

/// Registry entries in output-slot order.
pub fn entries() -> Vec<SchemeEntry> {
    let mut out: Vec<SchemeEntry> = REGISTRY.values().copied().collect();
    out.sort_by_key(|e| e.output_offset);
    out
}
