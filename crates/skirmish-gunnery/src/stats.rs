//! Segmented GuessFactor statistics.
//!
//! One histogram family per opponent archetype, segmented by combat mode,
//! lateral-velocity band, and distance band. Counts only ever grow; the
//! store lives for the whole session so learning carries across rounds.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use skirmish_core::constants::*;
use skirmish_core::enums::CombatMode;

/// One row of guess-factor counts.
pub type FactorRow = [u32; GUESS_BINS];

type ModeTable = [[[FactorRow; DISTANCE_SEGMENTS]; LATERAL_SEGMENTS]; COMBAT_MODE_COUNT];

/// Addresses one histogram row within an archetype's table. Together with
/// the archetype key this is a stable reference to the row a wave will
/// update when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    pub mode: CombatMode,
    pub lateral: usize,
    pub distance: usize,
}

/// Process-wide histogram repository, keyed by opponent archetype.
#[derive(Debug, Default)]
pub struct GuessFactorStore {
    tables: HashMap<String, Box<ModeTable>>,
}

impl GuessFactorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pooling key for an opponent name: everything before the first
    /// space, so "Crusher (1)" and "Crusher (2)" share one table.
    pub fn archetype_key(name: &str) -> &str {
        name.split(' ').next().unwrap_or(name)
    }

    /// The row for a segment, if the archetype has been seen.
    pub fn row(&self, archetype: &str, segment: SegmentKey) -> Option<&FactorRow> {
        self.tables
            .get(archetype)
            .map(|table| &table[segment.mode.index()][segment.lateral][segment.distance])
    }

    /// Count one observed guess factor. Creates the archetype table on
    /// first use; the bin index is clamped before the array access.
    pub fn record(&mut self, archetype: &str, segment: SegmentKey, bin: usize) {
        let table = self
            .tables
            .entry(archetype.to_string())
            .or_insert_with(|| Box::new([[[[0; GUESS_BINS]; DISTANCE_SEGMENTS]; LATERAL_SEGMENTS]; COMBAT_MODE_COUNT]));
        let row = &mut table[segment.mode.index()][segment.lateral][segment.distance];
        row[bin.min(GUESS_BINS - 1)] += 1;
    }

    /// The most-visited bin of a segment's row. Ties break toward the
    /// middle (head-on) bin by starting the scan there; an unseen
    /// archetype also yields the middle bin.
    pub fn best_bin(&self, archetype: &str, segment: SegmentKey) -> usize {
        let Some(row) = self.row(archetype, segment) else {
            return MIDDLE_BIN;
        };
        let mut best = MIDDLE_BIN;
        for (index, count) in row.iter().enumerate() {
            if row[best] < *count {
                best = index;
            }
        }
        best
    }

    /// Total count across every archetype and segment. Monotonically
    /// non-decreasing over the store's lifetime.
    pub fn total(&self) -> u64 {
        self.tables
            .values()
            .flat_map(|table| table.iter())
            .flatten()
            .flatten()
            .flatten()
            .map(|&count| count as u64)
            .sum()
    }

    /// Number of distinct archetypes learned so far.
    pub fn archetype_count(&self) -> usize {
        self.tables.len()
    }
}

/// Guess factor represented by a bin index.
pub fn bin_to_factor(bin: usize) -> f64 {
    (bin as f64 - MIDDLE_BIN as f64) / MIDDLE_BIN as f64
}

/// Bin index for a guess factor in [-1, 1], clamped to the valid range.
pub fn factor_to_bin(guess_factor: f64) -> usize {
    let raw = (GUESS_BINS - 1) as f64 / 2.0 * (guess_factor + 1.0);
    raw.round().clamp(0.0, (GUESS_BINS - 1) as f64) as usize
}

/// Lateral-velocity segment for an observation. The last segment is
/// reserved for a standstill; moving opponents land in a band by the
/// magnitude of their velocity component perpendicular to the line of fire.
pub fn lateral_segment(heading: f64, absolute_bearing: f64, velocity: f64) -> usize {
    if velocity == 0.0 {
        return STATIONARY_SEGMENT;
    }
    let lateral_speed = ((heading - absolute_bearing).sin() * velocity).abs();
    ((lateral_speed / LATERAL_SPEED_PER_SEGMENT) as usize).min(STATIONARY_SEGMENT - 1)
}

/// Distance segment for an observation, clamped to the table range.
pub fn distance_segment(distance: f64) -> usize {
    ((distance.max(0.0) / DISTANCE_SEGMENT_SIZE) as usize).min(DISTANCE_SEGMENTS - 1)
}
