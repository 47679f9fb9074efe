//! Scoring weights for the static evaluation
//!
//! A sub-board line scores by how many of the player's marks already sit on
//! it, as long as the opponent has not marked any cell of it.

/// Win-chance scores for a single line of a sub-board
pub struct WinChance;

impl WinChance {
    /// Opponent holds a cell on the line, so it can never be won
    pub const BLOCKED: f64 = 0.0;
    /// Open line with none of the player's marks
    pub const EMPTY_LINE: f64 = 0.1;
    /// Open line with one mark
    pub const ONE_MARK: f64 = 0.3;
    /// Open line with two marks, one move from winning the sub-board
    pub const TWO_MARKS: f64 = 0.6;
    /// Completed line: the sub-board is won
    pub const COMPLETE: f64 = 1.0;
}

/// Scale applied to the raw value difference before `tanh` squashes it into `(-1, 1)`
pub const RESCALING_FACTOR: f64 = 0.6;

/// Score of an open line holding `marks` of the player's marks.
///
/// Counts above three cannot happen on a 3-cell line and score as blocked.
#[inline]
pub fn line_score(marks: usize) -> f64 {
    const SCORES: [f64; 4] = [
        WinChance::EMPTY_LINE,
        WinChance::ONE_MARK,
        WinChance::TWO_MARKS,
        WinChance::COMPLETE,
    ];
    SCORES.get(marks).copied().unwrap_or(WinChance::BLOCKED)
}

/// Squash a raw value difference into `(-1, 1)`
#[inline]
pub fn rescale(raw: f64) -> f64 {
    (raw * RESCALING_FACTOR).tanh()
}
