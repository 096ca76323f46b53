//! Contest score -> rating contribution
//!
//! Converts a participant's contest score into a normalized contribution in
//! [0, 100]. The two knobs the historical formula variants disagreed on are
//! explicit policy parameters here instead of hard-coded behavior.

use crate::domain::entities::ContestResult;

/// How the field size `n` entering the formula is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSizePolicy {
    /// `n = max(participant_count, min)` - avoids over-rewarding tiny
    /// contests. `min = 10` matches the original formula.
    Floored { min: u32 },
    /// `n = participant_count`, no floor.
    Exact,
}

/// Which score counts as the contest winner's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerScorePolicy {
    /// The points of the first official-group result, falling back to the
    /// maximum score when no official result is present.
    FirstOfficial,
    /// The maximum score over all results.
    MaxPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub field_size: FieldSizePolicy,
    pub winner_score: WinnerScorePolicy,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            field_size: FieldSizePolicy::Floored { min: 10 },
            winner_score: WinnerScorePolicy::FirstOfficial,
        }
    }
}

impl ScoringPolicy {
    /// Rating contribution for one result.
    ///
    /// `max_points == 0` is a degenerate contest with no scoring signal;
    /// a sole participant trivially tops the field. Otherwise the
    /// `(2n-2)/(n+place-2)` term decays as place grows, and the outer
    /// 50-scale is clamped to 100.
    pub fn contribution(
        &self,
        max_points: f64,
        participant_count: u32,
        points: f64,
        place: u32,
    ) -> f64 {
        if max_points == 0.0 || participant_count == 0 {
            return 0.0;
        }
        if participant_count == 1 {
            return 100.0;
        }
        let n = match self.field_size {
            FieldSizePolicy::Floored { min } => participant_count.max(min),
            FieldSizePolicy::Exact => participant_count,
        } as f64;
        let place = place as f64;
        (50.0 * points / max_points * (2.0 * n - 2.0) / (n + place - 2.0)).min(100.0)
    }

    /// The winner score a contest's contributions are normalized against.
    pub fn winner_points(&self, results: &[ContestResult]) -> f64 {
        let max = results.iter().map(|r| r.points).fold(0.0_f64, f64::max);
        match self.winner_score {
            WinnerScorePolicy::FirstOfficial => results
                .iter()
                .find(|r| r.user_group == 0)
                .map(|r| r.points)
                .unwrap_or(max),
            WinnerScorePolicy::MaxPoints => max,
        }
    }
}
