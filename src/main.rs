use dotenv::dotenv;
use log::{LevelFilter, error, info, warn};

use premscrape::aggregate::{concatenate, season_labels, unique_teams};
use premscrape::config::ScrapeConfig;
use premscrape::export::{write_column, write_records};
use premscrape::link_scraper::{SeasonLink, fetch_links};
use premscrape::{MatchRecord, MatchScraper, ScrapeContext, SeasonRecord, SeasonScraper};

// Page-kind fragments that tell standings and schedule links apart on the
// history index.
const STATS_MARKER: &str = "Premier-League-Stats";
const SCHEDULE_MARKER: &str = "schedule";

#[derive(Debug, Default)]
struct RunCounts {
    processed: usize,
    skipped: usize,
}

async fn run_season_scraper_job(
    ctx: &ScrapeContext,
    urls: Vec<String>,
) -> (Vec<SeasonLink>, Vec<SeasonRecord>, RunCounts) {
    let sentinel = ctx.config.current_stats_url();
    let mut links = Vec::new();
    let mut per_season = Vec::new();
    let mut counts = RunCounts::default();
    for url in urls {
        let link = match SeasonLink::from_url(
            url,
            &sentinel,
            &ctx.config.current_season_label,
            &ctx.year_extractor,
        ) {
            Ok(link) => link,
            Err(err) => {
                error!("skipping unlabelable season link: {err}");
                counts.skipped += 1;
                continue;
            }
        };
        links.push(link.clone());
        let scraper = SeasonScraper::new(link);
        info!(
            "scraping {} standings from {}",
            scraper.link.label, scraper.link.url
        );
        match scraper.scrape(&ctx.client).await {
            Ok(records) => {
                info!("{}: {} squads", scraper.link.label, records.len());
                per_season.push(records);
                counts.processed += 1;
            }
            Err(err) => {
                warn!("skipping season {}: {err}", scraper.link.label);
                counts.skipped += 1;
            }
        }
    }
    (links, concatenate(per_season), counts)
}

async fn run_match_scraper_job(
    ctx: &ScrapeContext,
    urls: Vec<String>,
) -> (Vec<MatchRecord>, RunCounts) {
    let sentinel = ctx.config.current_schedule_url();
    let mut per_season = Vec::new();
    let mut counts = RunCounts::default();
    for url in urls {
        let link = match SeasonLink::from_url(
            url,
            &sentinel,
            &ctx.config.current_season_label,
            &ctx.year_extractor,
        ) {
            Ok(link) => link,
            Err(err) => {
                error!("skipping unlabelable schedule link: {err}");
                counts.skipped += 1;
                continue;
            }
        };
        let scraper = MatchScraper::new(link);
        info!(
            "scraping {} fixtures from {}",
            scraper.link.label, scraper.link.url
        );
        match scraper.scrape(&ctx.client).await {
            Ok(records) => {
                info!("{}: {} fixtures", scraper.link.label, records.len());
                per_season.push(records);
                counts.processed += 1;
            }
            Err(err) => {
                warn!("skipping schedule {}: {err}", scraper.link.label);
                counts.skipped += 1;
            }
        }
    }
    (concatenate(per_season), counts)
}

/// The roster is validation input only: an unknown squad in the current
/// season usually means the roster constant is a season out of date.
fn validate_current_roster(config: &ScrapeConfig, standings: &[SeasonRecord]) {
    for record in standings
        .iter()
        .filter(|record| record.season == config.current_season_label)
    {
        if !config.current_teams.iter().any(|team| team == &record.squad) {
            warn!(
                "current season squad \"{}\" is not in the configured roster",
                record.squad
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let ctx = ScrapeContext::new()?;

    info!("discovering links from {}", ctx.config.index_url);
    let season_urls = fetch_links(
        &ctx.client,
        &ctx.config.index_url,
        &ctx.config.competition_path,
        STATS_MARKER,
        &ctx.config.base_url,
    )
    .await?;
    let schedule_urls = fetch_links(
        &ctx.client,
        &ctx.config.index_url,
        &ctx.config.competition_path,
        SCHEDULE_MARKER,
        &ctx.config.base_url,
    )
    .await?;
    info!(
        "found {} season links and {} schedule links",
        season_urls.len(),
        schedule_urls.len()
    );

    let (season_links, standings, season_counts) =
        run_season_scraper_job(&ctx, season_urls).await;
    let (matches, match_counts) = run_match_scraper_job(&ctx, schedule_urls).await;

    validate_current_roster(&ctx.config, &standings);

    let labels = season_labels(&season_links);
    let teams = unique_teams(&standings);

    let out = &ctx.config.output_dir;
    write_column(&out.join("seasons.csv"), "season", &labels)?;
    write_records(&out.join("standings.csv"), &standings)?;
    write_column(&out.join("teams.csv"), "team", &teams)?;
    write_records(&out.join("matches.csv"), &matches)?;

    info!(
        "seasons: {} processed, {} skipped; schedules: {} processed, {} skipped",
        season_counts.processed,
        season_counts.skipped,
        match_counts.processed,
        match_counts.skipped
    );
    info!(
        "wrote {} standings rows, {} match rows, {} distinct teams to {}",
        standings.len(),
        matches.len(),
        teams.len(),
        out.display()
    );
    Ok(())
}
