use anyhow::Result;
use async_trait::async_trait;
use log::info;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use urlencoding::encode;

use crate::api::models::{CardListResponse, DuelPayload, DuelResponse, PairResponse};
use crate::api::service::{CardFilter, CatalogService, DuelResolution};
use crate::catalog::SortMode;
use crate::config::settings::ClientSettings;
use crate::domain::{Card, CardDetail, DuelOutcome};
use crate::errors::ApiError;
use crate::http::RateLimitedClient;

/// HTTP implementation of the catalog service contract
pub struct CatalogClient {
    client: RateLimitedClient,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog API client
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).await?;
        let response = Self::ensure_success(response, url)?;
        Ok(response.json().await?)
    }

    fn ensure_success(
        response: reqwest::Response,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ApiError::UnexpectedStatus {
                status: response.status(),
                url: url.to_string(),
            })
        }
    }

    // --- URL builders ---

    fn pair_url(&self) -> String {
        format!("{}/pair", self.base_url)
    }

    fn duel_url(&self) -> String {
        format!("{}/duel", self.base_url)
    }

    fn leaderboard_url(&self, limit: usize, offset: usize) -> String {
        format!("{}/leaderboard?limit={}&offset={}", self.base_url, limit, offset)
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}/search?query={}", self.base_url, encode(query))
    }

    fn set_cards_url(&self, set_id: &str, sort: SortMode) -> String {
        format!(
            "{}/sets/{}/cards?sort={}",
            self.base_url,
            encode(set_id),
            sort.as_str()
        )
    }

    fn artist_cards_url(&self, artist: &str, sort: SortMode) -> String {
        format!(
            "{}/artists/{}/cards?sort={}",
            self.base_url,
            encode(artist),
            sort.as_str()
        )
    }

    fn card_url(&self, id: &str) -> String {
        format!("{}/cards/{}", self.base_url, encode(id))
    }
}

#[async_trait]
impl CatalogService for CatalogClient {
    async fn get_next_pair(&self) -> Result<(Card, Card), ApiError> {
        let response: PairResponse = self.get_json(&self.pair_url()).await?;
        Ok((response.a, response.b))
    }

    async fn submit_duel(&self, outcome: &DuelOutcome) -> Result<DuelResolution, ApiError> {
        let url = self.duel_url();
        let payload = DuelPayload {
            winner_id: &outcome.winner_id,
            loser_id: &outcome.loser_id,
        };

        let response = self.client.post_json(&url, &payload).await?;
        let response = Self::ensure_success(response, &url)?;
        let resolved: DuelResponse = response.json().await?;

        info!(
            "Duel persisted: {} beat {} ({:+.1} / {:+.1})",
            outcome.winner_id, outcome.loser_id, resolved.delta.winner, resolved.delta.loser
        );

        Ok(DuelResolution {
            winner: resolved.a,
            loser: resolved.b,
            winner_delta: resolved.delta.winner,
            loser_delta: resolved.delta.loser,
        })
    }

    async fn list_cards(
        &self,
        filter: &CardFilter,
        sort: SortMode,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Card>, usize), ApiError> {
        let url = if let Some(query) = filter.query.as_deref() {
            self.search_url(query)
        } else if let Some(set_id) = filter.set_id.as_deref() {
            self.set_cards_url(set_id, sort)
        } else if let Some(artist) = filter.artist.as_deref() {
            self.artist_cards_url(artist, sort)
        } else {
            self.leaderboard_url(limit, offset)
        };

        let response: CardListResponse = self.get_json(&url).await?;
        // Facet endpoints return the full result set without a total.
        let total = response.total.unwrap_or(response.items.len());
        Ok((response.items, total))
    }

    async fn get_card(&self, id: &str) -> Result<CardDetail, ApiError> {
        let url = self.card_url(id);
        let response = self.client.get(&url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                kind: "card",
                id: id.to_string(),
            });
        }

        let response = Self::ensure_success(response, &url)?;
        Ok(response.json().await?)
    }
}
