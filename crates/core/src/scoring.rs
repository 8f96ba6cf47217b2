//! Scoring module - line clear points, drop points, levels and fall speed

use crate::types::{
    FALL_INTERVALS, FALL_INTERVAL_FLOOR_MS, FALL_INTERVAL_MIN_MS, LINES_PER_LEVEL,
};

/// Base points for 0..=4 cleared rows at level 0.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Calculate line clear score (classic rules)
/// lines: number of rows cleared in one lock
/// level: current level (0-based)
///
/// Clears of more than four rows (large custom shapes can't, but scripted
/// boards can) score like four.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level + 1)
}

/// Calculate drop score
/// soft_drop: +1 per row
/// hard_drop: +2 per row
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows * 2
    } else {
        rows
    }
}

/// Level increases every ten lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Fall interval for a level, scaled from the 1000ms reference table to `base_ms`.
pub fn fall_interval_ms(level: u32, base_ms: u32) -> u32 {
    let reference = FALL_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(FALL_INTERVAL_FLOOR_MS);
    let scaled = (base_ms as u64 * reference as u64 / 1000) as u32;
    scaled.max(FALL_INTERVAL_MIN_MS.min(base_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
        assert_eq!(calculate_line_score(6, 0), 1200);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10);
        assert_eq!(calculate_drop_score(10, true), 20);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(29), 2);
        assert_eq!(calculate_level(100), 10);
    }

    #[test]
    fn test_fall_intervals() {
        assert_eq!(fall_interval_ms(0, 1000), 1000);
        assert_eq!(fall_interval_ms(5, 1000), 320);
        assert_eq!(fall_interval_ms(8, 1000), 160);
        assert_eq!(fall_interval_ms(9, 1000), 120);
        assert_eq!(fall_interval_ms(40, 1000), 120);
    }

    #[test]
    fn test_fall_interval_scales_and_clamps() {
        assert_eq!(fall_interval_ms(0, 500), 500);
        assert_eq!(fall_interval_ms(1, 500), 400);
        // 500 * 120 / 1000 = 60, clamped to the 100ms minimum.
        assert_eq!(fall_interval_ms(20, 500), 100);
        // A base already under the minimum is never slowed down.
        assert_eq!(fall_interval_ms(20, 50), 50);
    }
}
