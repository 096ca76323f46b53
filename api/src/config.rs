//! Configuration
//!
//! Process-level settings come from the environment; the engine itself is
//! configured through an explicit [`BoardConfig`] handed to the services at
//! construction, never through module-level globals.

use std::env;
use std::time::Duration;

use crate::app::scoring::ScoringPolicy;
use crate::domain::entities::OnlineJudge;

#[derive(Clone)]
pub struct Config {
    /// Webhook secret for verifying judge-bot deliveries (HMAC-SHA256)
    pub webhook_secret: Option<String>,
    pub board: BoardConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut board = BoardConfig::default();
        if let Ok(name) = env::var("RATING_TABLE_NAME") {
            board.table_name = name;
        }
        if let Ok(name) = env::var("CONFIG_SHEET_NAME") {
            board.config_sheet = name;
        }
        board.codeforces_list_key = env::var("CODEFORCES_LIST_KEY").ok().filter(|k| !k.is_empty());
        if let Some(secs) = env::var("LOCK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            board.lock_timeout = Duration::from_secs(secs);
        }

        Self {
            webhook_secret: env::var("WEBHOOK_SECRET").ok(),
            board,
        }
    }
}

/// Engine configuration: one instance per backing workbook.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Sheet name of the cumulative leaderboard.
    pub table_name: String,
    /// Sheet holding the per-round-type rating coefficients.
    pub config_sheet: String,
    /// Judge systems the board tracks, in column order.
    pub judges: Vec<OnlineJudge>,
    /// Round-type keyword -> coefficient cell on the config sheet.
    /// Order matters: the first matching keyword wins.
    pub coefficient_rules: Vec<(String, String)>,
    /// Codeforces standings list key, appended to standings links when set.
    pub codeforces_list_key: Option<String>,
    /// Intensity constant for the rating-delta background blend.
    pub delta_intensity: f64,
    /// Bound on waiting for the dispatch lock.
    pub lock_timeout: Duration,
    pub scoring: ScoringPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            table_name: "Rating".to_string(),
            config_sheet: "Config".to_string(),
            judges: vec![
                OnlineJudge::Codeforces,
                OnlineJudge::AtCoder,
                OnlineJudge::Tlx,
            ],
            coefficient_rules: vec![
                ("AGC".to_string(), "B2".to_string()),
                ("ARC".to_string(), "B3".to_string()),
                ("ABC".to_string(), "B4".to_string()),
                ("Div. 1 + Div. 2".to_string(), "B5".to_string()),
                ("Div. 1".to_string(), "B6".to_string()),
                ("Div. 2".to_string(), "B7".to_string()),
                ("Div. 3".to_string(), "B8".to_string()),
                ("TROC".to_string(), "B9".to_string()),
            ],
            codeforces_list_key: None,
            delta_intensity: 800.0,
            lock_timeout: Duration::from_secs(30),
            scoring: ScoringPolicy::default(),
        }
    }
}
