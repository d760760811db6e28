use serde::{Deserialize, Serialize};

/// Weights of the fixed-policy rubric. The font weight applies to the SUM of
/// the style and size scores (0–200), so perfect formatting is worth 50.
pub const SECTION_WEIGHT: f64 = 0.50;
pub const SPELLING_WEIGHT: f64 = 0.25;
pub const FONT_WEIGHT: f64 = 0.25;

/// Points deducted per distinct unknown token.
pub const SPELLING_PENALTY: f64 = 10.0;

/// Reported fixed-policy scores never exceed this.
pub const SCORE_CEILING: f64 = 100.0;

/// Per-criterion view of how a score was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rubric", rename_all = "snake_case")]
pub enum ScoreBreakdown {
    FixedPolicy {
        section_percentage: f64,
        spelling_score: f64,
        font_style_score: f64,
        font_size_score: f64,
        /// Rounded weighted sum before the ceiling; up to 125.
        raw_total: f64,
    },
    ReferenceDerived {
        present_sections: usize,
        budget_ok: bool,
        timeline_ok: bool,
        max_score: usize,
    },
}

/// Share of required sections found, in percent. `total` must be non-zero.
pub fn section_percentage(present: usize, total: usize) -> f64 {
    debug_assert!(total > 0, "section set cannot be empty");
    100.0 * present as f64 / total as f64
}

pub fn spelling_score(unknown_count: usize) -> f64 {
    if unknown_count == 0 {
        return 100.0;
    }
    (100.0 - SPELLING_PENALTY * unknown_count as f64).max(0.0)
}

pub fn flag_score(ok: bool) -> f64 {
    if ok {
        100.0
    } else {
        0.0
    }
}

/// Weighted fixed-policy total, rounded half-to-even, without the ceiling.
pub fn fixed_policy_total(
    section_percentage: f64,
    spelling_score: f64,
    font_style_score: f64,
    font_size_score: f64,
) -> f64 {
    (SECTION_WEIGHT * section_percentage
        + SPELLING_WEIGHT * spelling_score
        + FONT_WEIGHT * (font_style_score + font_size_score))
        .round_ties_even()
}

/// Reference-derived percentage, rounded to two decimals.
///
/// Each present section, a passing budget check and a passing timeline check
/// are worth one point out of `sections + 2`.
pub fn reference_percentage(
    present: usize,
    total_sections: usize,
    budget_ok: bool,
    timeline_ok: bool,
) -> f64 {
    let max_score = total_sections + 2;
    let earned = present + usize::from(budget_ok) + usize::from(timeline_ok);
    round_to_hundredths(100.0 * earned as f64 / max_score as f64)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
