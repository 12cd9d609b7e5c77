use serde::{Deserialize, Serialize};

/// A rated catalog card as served by the catalog API.
///
/// `wins + losses == games_played` holds for any fully reconciled record;
/// the rating is unbounded and centered near 1000 by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub image: String,
    pub set_name: String,
    pub series: String,
    pub artist: Option<String>,
    pub elo: f64,
    #[serde(default)]
    pub games_played: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elo_history: Option<Vec<EloHistoryPoint>>,
}

impl Card {
    pub fn win_rate(&self) -> f64 {
        if self.games_played <= 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.games_played)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloHistoryPoint {
    pub t: i64,
    pub r: f64,
}

/// Card detail as returned by the single-card lookup, with the optional
/// descriptive fields the list endpoints omit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: Card,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub set_id: Option<String>,
}

/// A single resolved comparison: one winner, one loser. One-shot; only the
/// session's display record outlives the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelOutcome {
    pub winner_id: String,
    pub loser_id: String,
}
