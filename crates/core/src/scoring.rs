//! Scoring module - line clear points
//!
//! Points depend only on how many lines a single lock cleared. There is no
//! level multiplier, combo or back-to-back bonus.

use crate::types::LINE_SCORES;

/// Points awarded per simultaneous line clear count (index 0..=4)
pub type ScoreTable = [u32; 5];

/// Points for clearing `lines` rows at once.
///
/// Counts above 4 cannot happen with tetrominoes on a normal board but are
/// scored as 4 rather than rejected.
pub fn line_clear_points(table: &ScoreTable, lines: u32) -> u32 {
    let idx = (lines as usize).min(table.len() - 1);
    table[idx]
}

/// Points under the default table
pub fn calculate_line_score(lines: u32) -> u32 {
    line_clear_points(&LINE_SCORES, lines)
}
