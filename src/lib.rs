pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod duel;
pub mod errors;
pub mod http;
pub mod ordering;
pub mod rate_limiter;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::catalog::SortMode;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::browse::BrowseService;
use crate::services::play::PlayService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_play(duels: Option<usize>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = PlayService::new(config)?;
        service.run(duels).await
    })
}

pub fn handle_leaderboard(limit: usize) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = BrowseService::new(AppConfig::new())?;
        service.leaderboard(limit).await
    })
}

pub fn handle_set(set_id: &str, sort: &str) -> Result<()> {
    let sort = parse_sort(sort)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = BrowseService::new(AppConfig::new())?;
        service.set_cards(set_id, sort).await
    })
}

pub fn handle_artist(name: &str, sort: &str) -> Result<()> {
    let sort = parse_sort(sort)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = BrowseService::new(AppConfig::new())?;
        service.artist_cards(name, sort).await
    })
}

pub fn handle_search(query: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = BrowseService::new(AppConfig::new())?;
        service.search(query).await
    })
}

pub fn handle_card(id: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = BrowseService::new(AppConfig::new())?;
        service.card(id).await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "card_duel_ranking", &mut std::io::stdout());
    Ok(())
}

fn parse_sort(value: &str) -> Result<SortMode> {
    SortMode::parse(value).ok_or_else(|| {
        anyhow::anyhow!("Unknown sort mode: {value} (expected elo_desc, elo_asc, id_asc or id_desc)")
    })
}
