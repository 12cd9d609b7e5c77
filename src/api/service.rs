use async_trait::async_trait;

use crate::catalog::SortMode;
use crate::domain::{Card, CardDetail, DuelOutcome};
use crate::errors::ApiError;

/// Opaque listing facets, passed through to the catalog service. At most one
/// facet is expected per request; with none set, the global ranking is
/// listed.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub query: Option<String>,
    pub set_id: Option<String>,
    pub artist: Option<String>,
}

impl CardFilter {
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn for_set(set_id: impl Into<String>) -> Self {
        Self {
            set_id: Some(set_id.into()),
            ..Self::default()
        }
    }

    pub fn for_artist(artist: impl Into<String>) -> Self {
        Self {
            artist: Some(artist.into()),
            ..Self::default()
        }
    }
}

/// Authoritative result of a persisted duel. Consumed for telemetry only;
/// the session controller never blocks the next pair on it.
#[derive(Debug, Clone)]
pub struct DuelResolution {
    pub winner: Card,
    pub loser: Card,
    pub winner_delta: f64,
    pub loser_delta: f64,
}

/// The remote catalog/rating store. Pair selection, persistence and filter
/// evaluation all live behind this boundary.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_next_pair(&self) -> Result<(Card, Card), ApiError>;

    async fn submit_duel(&self, outcome: &DuelOutcome) -> Result<DuelResolution, ApiError>;

    /// List cards for a facet. `sort` is advisory for the server; callers
    /// re-sort client-side where canonical id order matters.
    async fn list_cards(
        &self,
        filter: &CardFilter,
        sort: SortMode,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Card>, usize), ApiError>;

    async fn get_card(&self, id: &str) -> Result<CardDetail, ApiError>;
}
