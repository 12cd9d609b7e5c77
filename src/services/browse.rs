use anyhow::Result;
use colored::Colorize;

use crate::api::{CardFilter, CatalogClient, CatalogService};
use crate::catalog::{CatalogView, SortMode};
use crate::config::settings::AppConfig;
use crate::domain::Card;

/// Read-only catalog views: leaderboard, set/artist listings, search and
/// single-card lookups. All ordering goes through the shared catalog view
/// so every listing agrees on set order.
pub struct BrowseService {
    client: CatalogClient,
    config: AppConfig,
}

impl BrowseService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = CatalogClient::new(&config.client)?;
        Ok(Self { client, config })
    }

    /// Global ranking, fetched page by page up to `limit` entries.
    pub async fn leaderboard(&self, limit: usize) -> Result<()> {
        let mut view = CatalogView::new(SortMode::EloDesc, self.config.display.page_size);

        while view.len() < limit && !view.is_exhausted() {
            let wanted = (limit - view.len()).min(view.page_size());
            let (items, total) = self
                .client
                .list_cards(&CardFilter::default(), view.sort(), wanted, view.next_offset())
                .await?;
            if items.is_empty() {
                break;
            }
            view.append_page(items, total);
        }

        print_ranking_header();
        for (index, card) in view.items().iter().enumerate() {
            print_ranking_row(index + 1, card);
        }
        println!("{} / {} shown", view.len(), view.total());
        Ok(())
    }

    /// Cards of one set, in the requested order. The set's full listing is
    /// fetched once; ordering is a client-side transform.
    pub async fn set_cards(&self, set_id: &str, sort: SortMode) -> Result<()> {
        self.listing(CardFilter::for_set(set_id), sort, || {
            format!("No cards found for set {set_id}.")
        })
        .await
    }

    /// Cards of one artist, in the requested order.
    pub async fn artist_cards(&self, artist: &str, sort: SortMode) -> Result<()> {
        self.listing(CardFilter::for_artist(artist), sort, || {
            format!("No cards found for artist {artist}.")
        })
        .await
    }

    /// Free-text search across names, sets and artists.
    pub async fn search(&self, query: &str) -> Result<()> {
        let (items, _) = self
            .client
            .list_cards(&CardFilter::for_query(query), SortMode::EloDesc, 0, 0)
            .await?;

        if items.is_empty() {
            println!("No results for \"{query}\".");
            return Ok(());
        }
        for card in &items {
            println!(
                "{} · {} · {} · ELO {}",
                card.name.bold(),
                card.set_name,
                card.series,
                card.elo.round() as i64,
            );
        }
        Ok(())
    }

    /// Single-card detail. A missing card is a terminal view for this
    /// lookup, not an error.
    pub async fn card(&self, id: &str) -> Result<()> {
        let detail = match self.client.get_card(id).await {
            Ok(detail) => detail,
            Err(error) if error.is_not_found() => {
                println!("Card not found.");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        let card = &detail.card;
        println!("{}", card.name.bold());
        println!("  {} · {}", card.set_name, card.series);
        println!("  Artist: {}", card.artist.as_deref().unwrap_or("Unknown"));
        if let Some(rarity) = detail.rarity.as_deref() {
            println!("  Rarity: {rarity}");
        }
        if let Some(release_date) = detail.release_date.as_deref() {
            println!("  Released: {release_date}");
        }
        println!("  ELO {}", card.elo.round() as i64);
        println!(
            "  Games {} · W/L {}/{} · Win rate {:.0}%",
            card.games_played,
            card.wins,
            card.losses,
            card.win_rate() * 100.0,
        );
        Ok(())
    }

    async fn listing(
        &self,
        filter: CardFilter,
        sort: SortMode,
        empty_message: impl Fn() -> String,
    ) -> Result<()> {
        let mut view = CatalogView::new(sort, self.config.display.page_size);
        let (items, total) = self.client.list_cards(&filter, sort, 0, 0).await?;
        view.append_page(items, total);

        if view.is_empty() {
            println!("{}", empty_message());
            return Ok(());
        }
        for card in &view.items() {
            println!(
                "{:12} {} · ELO {}",
                card.id,
                card.name,
                card.elo.round() as i64,
            );
        }
        Ok(())
    }
}

fn print_ranking_header() {
    println!(
        "{:>4}  {:28} {:>6} {:>9} {:>7}",
        "#".bold(),
        "Card".bold(),
        "ELO".bold(),
        "W/L".bold(),
        "Games".bold(),
    );
}

fn print_ranking_row(rank: usize, card: &Card) {
    println!(
        "{rank:>4}  {:28} {:>6} {:>9} {:>7}",
        card.name,
        card.elo.round() as i64,
        format!("{}/{}", card.wins, card.losses),
        card.games_played,
    );
}
