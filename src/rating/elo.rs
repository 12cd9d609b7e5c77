use crate::config::settings::RatingSettings;
use crate::domain::Card;

use super::types::{DuelProjection, Outcome};

/// Probability that a card rated `rating` beats one rated `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// Adaptive K: smaller swings once a card is highly rated, larger ones while
/// it has few recorded games.
pub fn k_factor(rating: f64, games_played: i32, config: &RatingSettings) -> f64 {
    if rating >= config.high_rating_threshold {
        return config.k_high_rating;
    }
    if games_played < config.provisional_games {
        config.k_provisional
    } else {
        config.k_standard
    }
}

/// Rating delta for one participant of a duel, computed from its own rating
/// and games-played count against the opponent's rating.
pub fn elo_delta(
    rating: f64,
    opponent: f64,
    outcome: Outcome,
    games_played: i32,
    config: &RatingSettings,
) -> f64 {
    let k = k_factor(rating, games_played, config);
    let expected = expected_score(rating, opponent);
    k * (outcome.score() - expected)
}

/// Predict both deltas of a duel before the authoritative store confirms it.
pub fn project_duel(winner: &Card, loser: &Card, config: &RatingSettings) -> DuelProjection {
    DuelProjection {
        winner_delta: elo_delta(winner.elo, loser.elo, Outcome::Win, winner.games_played, config),
        loser_delta: elo_delta(loser.elo, winner.elo, Outcome::Loss, loser.games_played, config),
    }
}
