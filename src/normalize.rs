use thiserror::Error;
use tracing::debug;

use crate::odds_table::OddsBlock;
use crate::scheme::{
    self, HT_FT_COLS, HT_FT_OFFSET, HT_FT_RESULT, HT_FT_ROWS, MATCH_RESULT, SLOT_COUNT,
    SchemeEntry,
};

/// Placeholder the odds page uses for a market without a quote.
const DASH: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    #[error("unknown odds category {label:?}")]
    UnknownCategory { label: String },

    #[error("malformed odds block {labels:?}: {reason}")]
    MalformedOddsBlock { labels: Vec<String>, reason: String },
}

impl OddsError {
    fn malformed(block: &OddsBlock, reason: impl Into<String>) -> Self {
        OddsError::MalformedOddsBlock {
            labels: block.labels.clone(),
            reason: reason.into(),
        }
    }
}

/// The fixed 37-slot odds record. `None` is the empty-value marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOdds {
    slots: [Option<String>; SLOT_COUNT],
}

impl Default for NormalizedOdds {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }
}

impl NormalizedOdds {
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|v| v.as_deref())
    }

    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Slot values as CSV fields; the empty marker becomes `""`.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|v| v.as_deref().unwrap_or(""))
    }

    fn set(&mut self, slot: usize, raw: &str) {
        self.slots[slot] = clean_value(raw);
    }
}

fn clean_value(raw: &str) -> Option<String> {
    let v = raw.trim();
    if v.is_empty() || v == DASH {
        None
    } else {
        Some(v.to_string())
    }
}

/// Map a match's raw odds blocks onto the fixed slot layout.
///
/// Any unknown category or shape mismatch fails the whole match; a partially
/// filled record is never returned.
pub fn normalize(blocks: &[OddsBlock]) -> Result<NormalizedOdds, OddsError> {
    let mut out = NormalizedOdds::default();
    for block in blocks {
        match block.labels.as_slice() {
            [] => return Err(OddsError::malformed(block, "block has no labels")),
            [single] if single == HT_FT_RESULT => fill_ht_ft_matrix(block, &mut out)?,
            [single] if single == MATCH_RESULT => continue,
            [single] => {
                debug!(label = %single, "skipping single-category block without slots");
            }
            _ => fill_shared_row(block, &mut out)?,
        }
    }
    Ok(out)
}

fn fill_shared_row(block: &OddsBlock, out: &mut NormalizedOdds) -> Result<(), OddsError> {
    let entries = block
        .labels
        .iter()
        .map(|label| scheme::lookup(label))
        .collect::<Result<Vec<SchemeEntry>, _>>()?;
    let expected: usize = entries.iter().map(|e| e.expected_count).sum();

    let Some(values) = block.value_rows.first() else {
        return Err(OddsError::malformed(block, "no value row"));
    };
    for (idx, row) in block.value_rows.iter().enumerate() {
        if row.len() != expected {
            return Err(OddsError::malformed(
                block,
                format!("expected {expected} values in row {idx}, found {}", row.len()),
            ));
        }
    }

    let mut cursor = 0usize;
    for entry in &entries {
        cursor = write_category(entry, values, cursor, out);
    }
    debug_assert_eq!(cursor, values.len());
    Ok(())
}

/// Copy one category's values starting at `cursor`; returns the advanced cursor.
fn write_category(
    entry: &SchemeEntry,
    values: &[String],
    cursor: usize,
    out: &mut NormalizedOdds,
) -> usize {
    for local in 0..entry.expected_count {
        out.set(entry.output_offset + local, &values[cursor + local]);
    }
    cursor + entry.expected_count
}

fn fill_ht_ft_matrix(block: &OddsBlock, out: &mut NormalizedOdds) -> Result<(), OddsError> {
    if block.value_rows.len() != HT_FT_ROWS {
        return Err(OddsError::malformed(
            block,
            format!(
                "expected {HT_FT_ROWS} matrix rows, found {}",
                block.value_rows.len()
            ),
        ));
    }
    let mut slot = HT_FT_OFFSET;
    for row in &block.value_rows {
        if row.len() != HT_FT_COLS {
            return Err(OddsError::malformed(
                block,
                format!("expected {HT_FT_COLS} matrix columns, found {}", row.len()),
            ));
        }
        for value in row {
            out.set(slot, value);
            slot += 1;
        }
    }
    Ok(())
}
