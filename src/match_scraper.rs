use log::warn;
use scraper::Html;
use serde::Serialize;

use crate::errors::ScrapeError;
use crate::link_scraper::SeasonLink;
use crate::requests::RequestClient;
use crate::score::split_score;
use crate::table::TableView;

const FIXTURES_CAPTION: &str = "Scores & Fixtures";

/// One fixture as published on a season's schedule page. Unplayed and
/// postponed fixtures keep `None` goals and stay in the output; downstream
/// consumers filter them.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub season: String,
    pub week: Option<u32>,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

#[derive(Debug)]
pub struct MatchScraper {
    pub link: SeasonLink,
}

impl MatchScraper {
    pub fn new(link: SeasonLink) -> Self {
        Self { link }
    }

    pub async fn scrape(&self, client: &RequestClient) -> Result<Vec<MatchRecord>, ScrapeError> {
        let markup = client.fetch_url_body(&self.link.url).await?;
        extract_season_matches(&markup, &self.link.label)
    }
}

/// Extracts every fixture row from the schedule table, splitting the
/// combined score token into home and away goals.
pub fn extract_season_matches(
    markup: &str,
    season: &str,
) -> Result<Vec<MatchRecord>, ScrapeError> {
    let document = Html::parse_document(markup);
    let fixtures = TableView::load(&document, &[FIXTURES_CAPTION], "fixtures", season)?;
    let date = fixtures.column(None, "Date")?;
    let home = fixtures.column(None, "Home")?;
    let score = fixtures.column(None, "Score")?;
    let away = fixtures.column(None, "Away")?;
    // Week and venue columns are not published for every era.
    let week = fixtures.column(None, "Wk").ok();
    let venue = fixtures.column(None, "Venue").ok();

    let mut matches = Vec::new();
    for row in 0..fixtures.rows() {
        let home_team = fixtures.text(row, home).to_string();
        let away_team = fixtures.text(row, away).to_string();
        if home_team.is_empty() && away_team.is_empty() {
            // Matchweek separator, not a fixture.
            continue;
        }
        let (home_goals, away_goals) = match split_score(fixtures.text(row, score)) {
            Ok(goals) => goals,
            Err(err) => {
                warn!("{season}: {err}; keeping the fixture without a result");
                (None, None)
            }
        };
        matches.push(MatchRecord {
            season: season.to_string(),
            week: week.and_then(|column| fixtures.text(row, column).parse().ok()),
            date: fixtures.text(row, date).to_string(),
            home_team,
            away_team,
            venue: venue
                .map(|column| fixtures.text(row, column).to_string())
                .unwrap_or_default(),
            home_goals,
            away_goals,
        });
    }
    Ok(matches)
}
