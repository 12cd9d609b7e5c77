pub mod models;

pub use models::{Card, CardDetail, DuelOutcome, EloHistoryPoint};
