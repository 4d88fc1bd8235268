//! Scoring module - Guideline line-clear scoring with modern bonuses
//!
//! - Line clears use the Guideline table (100/300/500/800) times `level + 1`.
//! - T-Spin clears use the T-Spin tables instead of the line-clear table.
//! - B2B applies a 3/2 multiplier to the base clear points (before combo bonus).
//! - Combo bonus is `combo_base * combo_index * (level + 1)`.

use crate::types::{
    TSpinKind, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, LINES_PER_LEVEL, LINE_SCORES,
    TSPIN_MINI_SCORES, TSPIN_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear (includes B2B multiplier, excludes combo bonus).
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
    pub qualifies_for_b2b: bool,
    /// Whether a B2B multiplier was applied to this clear.
    pub b2b_applied: bool,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level + 1)
}

/// Calculate T-spin score
pub fn calculate_tspin_score(tspin: TSpinKind, lines: usize, level: u32) -> u32 {
    let base = match tspin {
        TSpinKind::Full => TSPIN_SCORES.get(lines).copied().unwrap_or(0),
        TSpinKind::Mini => TSPIN_MINI_SCORES.get(lines).copied().unwrap_or(0),
        TSpinKind::None => 0,
    };
    base.saturating_mul(level + 1)
}

/// Calculate combo bonus.
///
/// `combo_index` semantics:
/// - `-1`: no combo chain
/// - `0`: first clear in chain (no bonus)
/// - `1+`: bonus applies as `combo_base * combo_index * (level + 1)`
pub fn calculate_combo_bonus(combo_index: i32, level: u32) -> u32 {
    if combo_index <= 0 {
        return 0;
    }
    COMBO_BASE
        .saturating_mul(combo_index as u32)
        .saturating_mul(level + 1)
}

/// Check if this clear qualifies for back-to-back
/// B2B applies to: T-spin full with any lines, or Tetris (4 lines)
pub fn qualifies_for_b2b(tspin: TSpinKind, lines: usize) -> bool {
    matches!(
        (tspin, lines),
        (TSpinKind::Full, 1..=4) | // T-spin full with lines
        (TSpinKind::None, 4) // Tetris
    )
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points
        .saturating_mul(B2B_NUMERATOR)
        .saturating_div(B2B_DENOMINATOR)
}

/// Calculate complete score for a lock.
///
/// Notes:
/// - T-Spin uses its table score instead of the line-clear score.
/// - B2B applies a multiplier to the base clear points.
/// - Combo bonus is added after the base clear points.
pub fn calculate_score(
    lines: usize,
    level: u32,
    tspin: TSpinKind,
    combo_index: i32,
    previous_b2b: bool,
) -> ScoreResult {
    let qualifies_b2b = qualifies_for_b2b(tspin, lines);

    let base_points = match tspin {
        TSpinKind::Full | TSpinKind::Mini => calculate_tspin_score(tspin, lines, level),
        TSpinKind::None => calculate_line_score(lines, level),
    };

    let b2b_applied = qualifies_b2b && previous_b2b;
    let line_clear_score = if b2b_applied {
        apply_b2b_multiplier(base_points)
    } else {
        base_points
    };

    let combo_bonus = calculate_combo_bonus(combo_index, level);
    let total = line_clear_score.saturating_add(combo_bonus);

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total,
        qualifies_for_b2b: qualifies_b2b,
        b2b_applied,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * 2
    } else {
        cells
    }
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Get the gravity interval (steps per row) for a level.
/// The last table entry applies to every level past the end of the table.
pub fn gravity_interval(table: &[u32], level: u32) -> u32 {
    table
        .get(level as usize)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(1)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guideline_line_scores() {
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(1, 0), 100);
        assert_eq!(calculate_line_score(2, 0), 300);
        assert_eq!(calculate_line_score(3, 0), 500);
        assert_eq!(calculate_line_score(4, 0), 800);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 100 * 6);
        assert_eq!(calculate_line_score(4, 5), 800 * 6);
    }

    #[test]
    fn test_tspin_scores() {
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 0, 0), 400);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 1, 0), 800);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 2, 0), 1200);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 3, 0), 1600);

        assert_eq!(calculate_tspin_score(TSpinKind::Mini, 0, 0), 100);
        assert_eq!(calculate_tspin_score(TSpinKind::Mini, 1, 0), 200);
        assert_eq!(calculate_tspin_score(TSpinKind::Mini, 2, 0), 400);

        assert_eq!(calculate_tspin_score(TSpinKind::Full, 1, 2), 800 * 3);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(calculate_combo_bonus(-1, 0), 0);
        assert_eq!(calculate_combo_bonus(0, 0), 0);
        assert_eq!(calculate_combo_bonus(1, 0), 50);
        assert_eq!(calculate_combo_bonus(3, 1), 300);
    }

    #[test]
    fn test_huge_level_and_combo_saturate() {
        assert_eq!(calculate_line_score(4, u32::MAX / 2), u32::MAX);
        assert_eq!(calculate_tspin_score(TSpinKind::Full, 3, u32::MAX / 2), u32::MAX);
        assert_eq!(calculate_combo_bonus(i32::MAX, 1000), u32::MAX);
    }

    #[test]
    fn test_b2b_qualification() {
        assert!(qualifies_for_b2b(TSpinKind::Full, 1));
        assert!(qualifies_for_b2b(TSpinKind::None, 4));

        assert!(!qualifies_for_b2b(TSpinKind::Full, 0));
        assert!(!qualifies_for_b2b(TSpinKind::Mini, 1));
        assert!(!qualifies_for_b2b(TSpinKind::None, 3));
    }

    #[test]
    fn test_full_score_calculation() {
        // First clear of a chain: plain table score.
        let result = calculate_score(1, 0, TSpinKind::None, 0, false);
        assert_eq!(result.total, 100);

        // Second consecutive clear has combo bonus (combo_index = 1).
        let result = calculate_score(2, 0, TSpinKind::None, 1, false);
        assert_eq!(result.line_clear_score, 300);
        assert_eq!(result.combo_bonus, 50);
        assert_eq!(result.total, 350);

        // Back-to-back Tetris multiplies the base clear points only.
        let result = calculate_score(4, 0, TSpinKind::None, 1, true);
        assert_eq!(result.line_clear_score, 1200);
        assert_eq!(result.combo_bonus, 50);
        assert_eq!(result.total, 1250);
        assert!(result.b2b_applied);
    }

    #[test]
    fn test_mini_tspin_never_gets_b2b_multiplier() {
        let result = calculate_score(1, 0, TSpinKind::Mini, 0, true);
        assert_eq!(result.line_clear_score, 200);
        assert!(!result.qualifies_for_b2b);
        assert!(!result.b2b_applied);
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
    }

    #[test]
    fn test_gravity_interval_clamps_to_last_entry() {
        let table = [30, 20, 10];
        assert_eq!(gravity_interval(&table, 0), 30);
        assert_eq!(gravity_interval(&table, 2), 10);
        assert_eq!(gravity_interval(&table, 50), 10);
        assert_eq!(gravity_interval(&[], 3), 1);
        assert_eq!(gravity_interval(&[0], 0), 1);
    }
}
