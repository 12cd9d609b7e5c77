#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub base_rating: f64,
    pub high_rating_threshold: f64,
    pub provisional_games: i32,
    pub k_high_rating: f64,
    pub k_provisional: f64,
    pub k_standard: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            base_rating: 1000.0,
            high_rating_threshold: 2400.0,
            provisional_games: 30,
            k_high_rating: 16.0,
            k_provisional: 32.0,
            k_standard: 24.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: std::env::var("CARD_DUEL_API_BASE")
                .unwrap_or_else(|_| "http://127.0.0.1:5000/api".to_string()),
            user_agent: "CardDuelRanking/1.0",
            timeout_secs: 30,
            rate_limit_ms: 100, // 10 req/sec
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    /// How long the last duel's result stays on screen before it is cleared.
    pub result_display_ms: u64,
    pub page_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            result_display_ms: 3500,
            page_size: 25,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub client: ClientSettings,
    pub display: DisplaySettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
