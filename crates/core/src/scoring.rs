//! Scoring module - line-clear points, levels and drop speed
//!
//! - A clear awards `LINE_CLEAR_POINTS[lines] * level`.
//! - Level is `total_lines / 10 + 1`.
//! - The drop interval shrinks by 100ms per level down to a 100ms floor.

use std::time::Duration;

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_CLEAR_POINTS,
};

/// Points for clearing `lines` rows in one lock at `level` (1-based).
///
/// More than four rows cannot happen with tetrominoes; such counts are paid
/// like four.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base = LINE_CLEAR_POINTS[lines.min(LINE_CLEAR_POINTS.len() - 1)];
    base.saturating_mul(level)
}

/// Level for a running total of cleared lines (1-based).
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Drop interval for a level, in milliseconds.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    BASE_DROP_MS
        .saturating_sub(steps.saturating_mul(DROP_INTERVAL_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

pub fn get_drop_interval(level: u32) -> Duration {
    Duration::from_millis(get_drop_interval_ms(level) as u64)
}
