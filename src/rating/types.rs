/// Binary duel outcome from the subject's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Numeric score used by the rating update: 1 for a win, 0 for a loss.
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
        }
    }
}

/// Locally predicted rating movement for both sides of one duel.
///
/// The two deltas are independent computations over each participant's own
/// rating and games-played count; the server remains authoritative for the
/// persisted values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelProjection {
    pub winner_delta: f64,
    pub loser_delta: f64,
}
