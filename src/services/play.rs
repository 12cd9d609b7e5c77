use std::sync::Arc;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::api::CatalogClient;
use crate::config::settings::AppConfig;
use crate::domain::Card;
use crate::duel::{DuelDisplayRecord, DuelSession};

/// Interactive duel loop on top of one `DuelSession`.
pub struct PlayService {
    session: DuelSession,
}

impl PlayService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Arc::new(CatalogClient::new(&config.client)?);
        let session = DuelSession::new(client, config.rating.clone(), &config.display);
        Ok(Self { session })
    }

    pub async fn run(&self, max_duels: Option<usize>) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("{}", "Card duel arena: pick the better card.".bold());
        if !self.fetch_with_retry(&mut lines).await? {
            return Ok(());
        }

        let mut played = 0usize;
        while max_duels.is_none_or(|max| played < max) {
            let snapshot = self.session.snapshot().await;
            let Some((a, b)) = snapshot.pair else { break };
            print_duel(&a, &b, snapshot.last_result.as_ref());

            let Some(line) = lines.next_line().await? else { break };
            let outcome = match line.trim() {
                "1" => {
                    played += 1;
                    self.session.choose(&a.id).await
                }
                "2" => {
                    played += 1;
                    self.session.choose(&b.id).await
                }
                "s" => self.session.fetch_next_pair().await,
                "q" => break,
                other => {
                    println!("Unrecognized choice: {other}");
                    continue;
                }
            };

            // Only the pair fetch can surface here; a failed submission is
            // already logged and dropped inside the session.
            if outcome.is_err() && !self.fetch_with_retry(&mut lines).await? {
                break;
            }
        }

        info!("Session finished after {played} duels");
        Ok(())
    }

    /// Fetch the next pair, prompting for a retry on network failure. The
    /// session stays in `Loading` between attempts. Returns false when the
    /// user gives up.
    async fn fetch_with_retry(&self, lines: &mut Lines<BufReader<Stdin>>) -> Result<bool> {
        loop {
            match self.session.fetch_next_pair().await {
                Ok(()) => return Ok(true),
                Err(error) => {
                    println!("{} {error}", "Network failure:".red());
                    println!("Retry? [y/N]");
                    let answer = lines.next_line().await?.unwrap_or_default();
                    if !answer.trim().eq_ignore_ascii_case("y") {
                        return Ok(false);
                    }
                }
            }
        }
    }
}

fn print_duel(a: &Card, b: &Card, last_result: Option<&DuelDisplayRecord>) {
    println!();
    if let Some(record) = last_result {
        println!(
            "Last duel: {} {}  /  {} {}",
            record.winner.card.name,
            format_delta(record.winner.predicted_delta),
            record.loser.card.name,
            format_delta(record.loser.predicted_delta),
        );
    }
    println!("  [1] {}", describe_card(a));
    println!("  [2] {}", describe_card(b));
    println!("{}", "[1]/[2] vote · [s] skip · [q] quit".dimmed());
}

fn describe_card(card: &Card) -> String {
    format!(
        "{} · {} · {} · ELO {} · {} games",
        card.name.bold(),
        card.set_name,
        card.series,
        card.elo.round() as i64,
        card.games_played,
    )
}

fn format_delta(delta: f64) -> ColoredString {
    let text = format!("{:+}", delta.round() as i64);
    if delta > 0.0 {
        text.green()
    } else {
        text.red()
    }
}
