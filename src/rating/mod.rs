pub mod elo;
pub mod types;

pub use elo::{elo_delta, expected_score, k_factor, project_duel};
pub use types::{DuelProjection, Outcome};
