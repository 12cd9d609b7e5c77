use anyhow::Result;

use card_duel_ranking::cli::Command;
use card_duel_ranking::{
    handle_artist, handle_card, handle_completions, handle_leaderboard, handle_play,
    handle_search, handle_set, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Play { duels } => handle_play(*duels),
        Command::Leaderboard { limit } => handle_leaderboard(*limit),
        Command::Set { set_id, sort } => handle_set(set_id, sort),
        Command::Artist { name, sort } => handle_artist(name, sort),
        Command::Search { query } => handle_search(query),
        Command::Card { id } => handle_card(id),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
