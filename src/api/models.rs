use serde::{Deserialize, Serialize};

use crate::domain::Card;

#[derive(Debug, Deserialize)]
pub struct PairResponse {
    pub a: Card,
    pub b: Card,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelPayload<'a> {
    pub winner_id: &'a str,
    pub loser_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct DeltaPair {
    pub winner: f64,
    pub loser: f64,
}

#[derive(Debug, Deserialize)]
pub struct DuelResponse {
    pub a: Card,
    pub b: Card,
    pub delta: DeltaPair,
}

/// Listing endpoints differ on whether they report a grand total; the ones
/// that do not return the full facet in one response.
#[derive(Debug, Deserialize)]
pub struct CardListResponse {
    pub items: Vec<Card>,
    #[serde(default)]
    pub total: Option<usize>,
}
