use log::warn;
use scraper::Html;
use serde::Serialize;

use crate::errors::ScrapeError;
use crate::link_scraper::SeasonLink;
use crate::requests::RequestClient;
use crate::schema::SchemaVariant;
use crate::table::TableView;

// Captions fbref uses for the per-season league table. The wording varies
// across eras.
const STANDINGS_CAPTIONS: [&str; 2] = ["Regular season Table", "League Table"];
const SHOOTING_CAPTION: &str = "Squad Shooting";
const PASSING_CAPTION: &str = "Squad Passing";
const PASS_TYPES_CAPTION: &str = "Squad Pass Types";
const MISC_CAPTION: &str = "Squad Miscellaneous Stats";

/// One team's standings row for one season. Fields outside the season's
/// schema variant stay `None` and export as empty cells.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonRecord {
    pub season: String,
    pub squad: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
    pub shots: Option<u32>,
    pub shots_on_target: Option<u32>,
    pub free_kick_goals: Option<u32>,
    pub penalty_goals: Option<u32>,
    pub passes_completed: Option<u32>,
    pub passes_attempted: Option<u32>,
    pub pass_completion_pct: Option<f32>,
    pub corner_kicks: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
    pub fouls: Option<u32>,
    pub penalties_conceded: Option<u32>,
    pub own_goals: Option<u32>,
}

#[derive(Debug)]
pub struct SeasonScraper {
    pub link: SeasonLink,
    pub variant: SchemaVariant,
}

impl SeasonScraper {
    pub fn new(link: SeasonLink) -> Self {
        let variant = SchemaVariant::for_starting_year(link.starting_year);
        Self { link, variant }
    }

    pub async fn scrape(&self, client: &RequestClient) -> Result<Vec<SeasonRecord>, ScrapeError> {
        let markup = client.fetch_url_body(&self.link.url).await?;
        extract_season_stats(&markup, &self.link.label, self.variant)
    }
}

/// Extracts one record per squad listed in the standings table, widened
/// with the aux-table columns the schema variant calls for. A missing
/// table or column skips the whole season.
pub fn extract_season_stats(
    markup: &str,
    season: &str,
    variant: SchemaVariant,
) -> Result<Vec<SeasonRecord>, ScrapeError> {
    let document = Html::parse_document(markup);
    let mut records = extract_standings(&document, season)?;
    if variant != SchemaVariant::Minimal {
        attach_shooting(&document, season, variant, &mut records)?;
        attach_misc(&document, season, variant, &mut records)?;
    }
    if variant == SchemaVariant::Full {
        attach_passing(&document, season, &mut records)?;
        attach_pass_types(&document, season, &mut records)?;
    }
    Ok(records)
}

fn extract_standings(document: &Html, season: &str) -> Result<Vec<SeasonRecord>, ScrapeError> {
    let standings = TableView::load(document, &STANDINGS_CAPTIONS, "standings", season)?;
    let squad = standings.column(None, "Squad")?;
    let wins = standings.column(None, "W")?;
    let draws = standings.column(None, "D")?;
    let losses = standings.column(None, "L")?;
    let goals_for = standings.column(None, "GF")?;
    let goals_against = standings.column(None, "GA")?;
    let points = standings.column(None, "Pts")?;

    let mut records = Vec::new();
    for row in 0..standings.rows() {
        let name = standings.text(row, squad);
        if name.is_empty() {
            continue;
        }
        records.push(SeasonRecord {
            season: season.to_string(),
            squad: name.to_string(),
            wins: standings.count(row, wins, "W")?,
            draws: standings.count(row, draws, "D")?,
            losses: standings.count(row, losses, "L")?,
            goals_for: standings.count(row, goals_for, "GF")?,
            goals_against: standings.count(row, goals_against, "GA")?,
            points: standings.count(row, points, "Pts")?,
            ..SeasonRecord::default()
        });
    }
    Ok(records)
}

fn attach_shooting(
    document: &Html,
    season: &str,
    variant: SchemaVariant,
    records: &mut [SeasonRecord],
) -> Result<(), ScrapeError> {
    let shooting = TableView::load(document, &[SHOOTING_CAPTION], "shooting", season)?;
    let squad = shooting.column(None, "Squad")?;
    let shots_on_target = shooting.column(Some("Standard"), "SoT")?;
    let penalty_goals = shooting.column(Some("Standard"), "PK")?;
    let full = variant == SchemaVariant::Full;
    let shots = if full {
        Some(shooting.column(Some("Standard"), "Sh")?)
    } else {
        None
    };
    let free_kicks = if full {
        Some(shooting.column(Some("Standard"), "FK")?)
    } else {
        None
    };

    let by_squad = shooting.index_by_squad(squad);
    for record in records.iter_mut() {
        let Some(&row) = by_squad.get(record.squad.as_str()) else {
            warn!("{season}: no shooting row for {}", record.squad);
            continue;
        };
        record.shots_on_target = Some(shooting.count(row, shots_on_target, "SoT")?);
        record.penalty_goals = Some(shooting.count(row, penalty_goals, "PK")?);
        if let Some(column) = shots {
            record.shots = Some(shooting.count(row, column, "Sh")?);
        }
        if let Some(column) = free_kicks {
            record.free_kick_goals = Some(shooting.count(row, column, "FK")?);
        }
    }
    Ok(())
}

fn attach_misc(
    document: &Html,
    season: &str,
    variant: SchemaVariant,
    records: &mut [SeasonRecord],
) -> Result<(), ScrapeError> {
    let misc = TableView::load(document, &[MISC_CAPTION], "misc", season)?;
    let squad = misc.column(None, "Squad")?;
    let yellow_cards = misc.column(Some("Performance"), "CrdY")?;
    let red_cards = misc.column(Some("Performance"), "CrdR")?;
    let fouls = misc.column(Some("Performance"), "Fls")?;
    let full = variant == SchemaVariant::Full;
    let penalties_conceded = if full {
        Some(misc.column(Some("Performance"), "PKcon")?)
    } else {
        None
    };
    let own_goals = if full {
        Some(misc.column(Some("Performance"), "OG")?)
    } else {
        None
    };

    let by_squad = misc.index_by_squad(squad);
    for record in records.iter_mut() {
        let Some(&row) = by_squad.get(record.squad.as_str()) else {
            warn!("{season}: no misc row for {}", record.squad);
            continue;
        };
        record.yellow_cards = Some(misc.count(row, yellow_cards, "CrdY")?);
        record.red_cards = Some(misc.count(row, red_cards, "CrdR")?);
        record.fouls = Some(misc.count(row, fouls, "Fls")?);
        if let Some(column) = penalties_conceded {
            record.penalties_conceded = Some(misc.count(row, column, "PKcon")?);
        }
        if let Some(column) = own_goals {
            record.own_goals = Some(misc.count(row, column, "OG")?);
        }
    }
    Ok(())
}

fn attach_passing(
    document: &Html,
    season: &str,
    records: &mut [SeasonRecord],
) -> Result<(), ScrapeError> {
    let passing = TableView::load(document, &[PASSING_CAPTION], "passing", season)?;
    let squad = passing.column(None, "Squad")?;
    // The passing table repeats Cmp/Att/Cmp% per distance band; only the
    // "Total" group is kept.
    let completed = passing.column(Some("Total"), "Cmp")?;
    let attempted = passing.column(Some("Total"), "Att")?;
    let completion_pct = passing.column(Some("Total"), "Cmp%")?;

    let by_squad = passing.index_by_squad(squad);
    for record in records.iter_mut() {
        let Some(&row) = by_squad.get(record.squad.as_str()) else {
            warn!("{season}: no passing row for {}", record.squad);
            continue;
        };
        record.passes_completed = Some(passing.count(row, completed, "Cmp")?);
        record.passes_attempted = Some(passing.count(row, attempted, "Att")?);
        record.pass_completion_pct = Some(passing.percent(row, completion_pct, "Cmp%")?);
    }
    Ok(())
}

fn attach_pass_types(
    document: &Html,
    season: &str,
    records: &mut [SeasonRecord],
) -> Result<(), ScrapeError> {
    let pass_types = TableView::load(document, &[PASS_TYPES_CAPTION], "pass types", season)?;
    let squad = pass_types.column(None, "Squad")?;
    let corner_kicks = pass_types.column(Some("Pass Types"), "CK")?;

    let by_squad = pass_types.index_by_squad(squad);
    for record in records.iter_mut() {
        let Some(&row) = by_squad.get(record.squad.as_str()) else {
            warn!("{season}: no pass types row for {}", record.squad);
            continue;
        };
        record.corner_kicks = Some(pass_types.count(row, corner_kicks, "CK")?);
    }
    Ok(())
}
