use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "card-duel-ranking client")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start an interactive duel session
    Play {
        /// Stop after this many duels (unlimited by default)
        #[arg(short, long)]
        duels: Option<usize>,
    },
    /// Show the global ranking
    Leaderboard {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 25)]
        limit: usize,
    },
    /// List the cards of a set
    Set {
        /// Set identifier, e.g. base1
        set_id: String,
        /// Sort mode: elo_desc, elo_asc, id_asc or id_desc
        #[arg(short, long, default_value = "elo_desc")]
        sort: String,
    },
    /// List the cards of an artist
    Artist {
        /// Artist name
        name: String,
        /// Sort mode: elo_desc, elo_asc, id_asc or id_desc
        #[arg(short, long, default_value = "elo_desc")]
        sort: String,
    },
    /// Search cards by name, set or artist
    Search {
        /// Free-text query
        query: String,
    },
    /// Show one card's details
    Card {
        /// Card identifier, e.g. base1-4
        id: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
