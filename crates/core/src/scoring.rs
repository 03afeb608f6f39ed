//! Scoring module - line-clear points, attack yield and difficulty
//!
//! - Points are quadratic in the number of lines cleared by one lock:
//!   `lines * 10 * lines` (1 → 10, 2 → 40, 3 → 90, 4 → 160).
//! - A clear of `k` lines sends `k - 1` garbage lines to a linked opponent,
//!   so singles never attack.
//! - The level rises every 10 lines; each level shortens the automatic
//!   descent interval by 100ms down to a 100ms floor.

use crate::types::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORE_UNIT, MIN_DROP_MS};

/// Result of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub lines: u32,
    pub points: u32,
    /// Garbage lines owed to the opponent (before checking one is linked).
    pub garbage: u32,
}

/// Calculate line clear score
pub fn calculate_line_score(lines: u32) -> u32 {
    lines
        .saturating_mul(LINE_SCORE_UNIT)
        .saturating_mul(lines)
}

/// Garbage lines produced by clearing `lines` rows at once
pub fn garbage_yield(lines: u32) -> u32 {
    lines.saturating_sub(1)
}

/// Score one lock event
pub fn calculate_score(lines: u32) -> ScoreResult {
    ScoreResult {
        lines,
        points: calculate_line_score(lines),
        garbage: garbage_yield(lines),
    }
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Automatic descent interval for a cumulative line count (in milliseconds)
pub fn get_drop_interval_ms(total_lines: u32) -> u32 {
    let level = calculate_level(total_lines);
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(MIN_DROP_MS)
}
