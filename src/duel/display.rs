use chrono::{DateTime, Utc};

use crate::domain::Card;
use crate::rating::DuelProjection;

/// One side of a resolved duel: the card as it was displayed before the
/// duel, plus the locally predicted movement.
#[derive(Debug, Clone)]
pub struct ParticipantSnapshot {
    pub card: Card,
    pub predicted_delta: f64,
    pub predicted_rating: f64,
}

/// Ephemeral record of the last resolved duel, kept for a bounded display
/// window and then cleared. Owned exclusively by the session; the predicted
/// values are an optimistic projection, not authoritative state.
#[derive(Debug, Clone)]
pub struct DuelDisplayRecord {
    pub winner: ParticipantSnapshot,
    pub loser: ParticipantSnapshot,
    pub resolved_at: DateTime<Utc>,
    seq: u64,
}

impl DuelDisplayRecord {
    pub(crate) fn new(seq: u64, winner: &Card, loser: &Card, projection: DuelProjection) -> Self {
        Self {
            winner: ParticipantSnapshot {
                card: winner.clone(),
                predicted_delta: projection.winner_delta,
                predicted_rating: winner.elo + projection.winner_delta,
            },
            loser: ParticipantSnapshot {
                card: loser.clone(),
                predicted_delta: projection.loser_delta,
                predicted_rating: loser.elo + projection.loser_delta,
            },
            resolved_at: Utc::now(),
            seq,
        }
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}
