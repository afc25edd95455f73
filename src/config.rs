use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};

pub const DEFAULT_BASE_URL: &str = "https://fbref.com";
pub const DEFAULT_COMPETITION_PATH: &str = "/en/comps/9/";

const HISTORY_PAGE: &str = "history/Premier-League-Seasons";
const CURRENT_STATS_PAGE: &str = "Premier-League-Stats";
const CURRENT_SCHEDULE_PAGE: &str = "schedule/Premier-League-Scores-and-Fixtures";

/// Clubs in the league right now. Only used to sanity-check the scraped
/// current season; update together with the season label each August.
pub const CURRENT_TEAMS: [&str; 20] = [
    "Manchester City",
    "Arsenal",
    "Liverpool",
    "Aston Villa",
    "Tottenham Hotspur",
    "Newcastle United",
    "Manchester United",
    "West Ham United",
    "Chelsea",
    "Brighton and Hove Albion",
    "Wolverhampton Wanderers",
    "Fulham",
    "Bournemouth",
    "Crystal Palace",
    "Brentford",
    "Everton",
    "Nottingham Forest",
    "Luton Town",
    "Burnley",
    "Sheffield United",
];

/// The env overrides accepted for a scrape run. Every field is optional;
/// the compiled-in defaults cover a normal run against fbref.com.
#[derive(Debug, Deserialize)]
struct ScrapeEnv {
    premscrape_base_url: Option<String>,
    premscrape_index_url: Option<String>,
    premscrape_competition_path: Option<String>,
    premscrape_current_season: Option<String>,
    premscrape_output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub competition_path: String,
    pub index_url: String,
    pub current_season_label: String,
    pub current_teams: Vec<String>,
    pub output_dir: PathBuf,
}

impl ScrapeConfig {
    pub fn new() -> anyhow::Result<Self> {
        let env = ScrapeEnv::load_from_env()?;
        Ok(Self::from_env(env))
    }

    fn from_env(env: ScrapeEnv) -> Self {
        let base_url = env
            .premscrape_base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let competition_path = env
            .premscrape_competition_path
            .unwrap_or_else(|| DEFAULT_COMPETITION_PATH.to_string());
        let index_url = env
            .premscrape_index_url
            .unwrap_or_else(|| format!("{base_url}{competition_path}{HISTORY_PAGE}"));
        let current_season_label = env
            .premscrape_current_season
            .unwrap_or_else(default_current_season_label);
        let output_dir = env
            .premscrape_output_dir
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            base_url,
            competition_path,
            index_url,
            current_season_label,
            current_teams: CURRENT_TEAMS.iter().map(|team| team.to_string()).collect(),
            output_dir,
        }
    }

    /// The year-less url fbref serves the in-progress season's standings at.
    pub fn current_stats_url(&self) -> String {
        format!(
            "{}{}{}",
            self.base_url, self.competition_path, CURRENT_STATS_PAGE
        )
    }

    /// The year-less url fbref serves the in-progress season's fixtures at.
    pub fn current_schedule_url(&self) -> String {
        format!(
            "{}{}{}",
            self.base_url, self.competition_path, CURRENT_SCHEDULE_PAGE
        )
    }
}

/// The league season rolls over in August.
fn default_current_season_label() -> String {
    let today = Utc::now();
    let start = if today.month() >= 8 {
        today.year()
    } else {
        today.year() - 1
    };
    format!("{start}/{}", start + 1)
}

pub struct SeasonYearExtractor {
    // Matches the "/YYYY-YYYY/" path segment historical season urls carry.
    year_segment_regex: Regex,
}

impl SeasonYearExtractor {
    pub fn new() -> anyhow::Result<Self> {
        let year_segment_regex = Regex::new(r"/(\d{4})-\d{4}/")?;
        Ok(Self { year_segment_regex })
    }

    /// The season's starting year, or `None` when the url has no year
    /// segment (the current-season sentinel).
    pub fn starting_year(&self, url: &str) -> Option<u16> {
        let caps = self.year_segment_regex.captures(url)?;
        caps.get(1)?.as_str().parse().ok()
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
