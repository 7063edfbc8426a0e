//! Per-category highscore tables: a fixed number of slots, ranked descending
//! by score, with sentinel entries filling the unused tail.

pub mod remote;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Score held by unfilled slots. Real scores can go negative on a bad run,
/// but only down to what the formulas produce; a slot is a sentinel when it
/// also carries no name.
pub const SENTINEL_SCORE: i64 = -1;

/// One slot in a category's table. `switch_trace` records the traffic-light
/// program changes of the run as provenance; ranking only looks at `score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub name: String,
    #[serde(default)]
    pub switch_trace: Vec<String>,
    pub score: i64,
}

impl HighscoreEntry {
    pub fn new(name: impl Into<String>, switch_trace: Vec<String>, score: i64) -> Self {
        HighscoreEntry {
            name: name.into(),
            switch_trace,
            score,
        }
    }

    pub fn sentinel() -> Self {
        HighscoreEntry {
            name: String::new(),
            switch_trace: Vec::new(),
            score: SENTINEL_SCORE,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty() && self.score == SENTINEL_SCORE
    }
}

/// Mapping from category to its ranked slots. Every row always holds exactly
/// `size` entries, sorted descending, sentinels only at the tail.
#[derive(Debug, Clone)]
pub struct HighscoreTable {
    size: usize,
    categories: BTreeMap<String, Vec<HighscoreEntry>>,
}

impl HighscoreTable {
    pub fn new(size: usize) -> Self {
        HighscoreTable {
            size,
            categories: BTreeMap::new(),
        }
    }

    /// Build a table from loaded rows, padding or truncating each row to
    /// `size` so the length invariant holds regardless of the source.
    pub fn from_rows(size: usize, rows: BTreeMap<String, Vec<HighscoreEntry>>) -> Self {
        let mut table = HighscoreTable::new(size);
        for (category, mut row) in rows {
            normalize_row(&mut row, size);
            table.categories.insert(category, row);
        }
        table
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn categories(&self) -> &BTreeMap<String, Vec<HighscoreEntry>> {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Slots of one category; `None` if nothing was ever recorded for it.
    pub fn entries(&self, category: &str) -> Option<&[HighscoreEntry]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Rank an entry into a category. The entry takes the first slot whose
    /// holder scored strictly less, everything below shifts down and the last
    /// slot drops off. Equal scores never displace an earlier holder. Returns
    /// the 0-based rank, or `None` when the entry did not make the table.
    pub fn insert(&mut self, category: &str, entry: HighscoreEntry) -> Option<usize> {
        let size = self.size;
        let row = self
            .categories
            .entry(category.to_string())
            .or_insert_with(|| vec![HighscoreEntry::sentinel(); size]);
        normalize_row(row, size);
        let rank = row.iter().position(|slot| slot.score < entry.score)?;
        row.insert(rank, entry);
        row.truncate(size);
        Some(rank)
    }

    /// Drop all recorded scores.
    pub fn clear(&mut self) {
        self.categories.clear();
    }

    /// Merge rows from another source, replacing same-named categories.
    pub fn merge_rows(&mut self, rows: BTreeMap<String, Vec<HighscoreEntry>>) {
        for (category, mut row) in rows {
            normalize_row(&mut row, self.size);
            self.categories.insert(category, row);
        }
    }
}

fn normalize_row(row: &mut Vec<HighscoreEntry>, size: usize) {
    if row.len() < size {
        row.resize(size, HighscoreEntry::sentinel());
    } else {
        row.truncate(size);
    }
}
