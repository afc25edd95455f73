pub mod aggregate;
pub mod config;
pub mod errors;
pub mod export;
pub mod link_scraper;
pub mod match_scraper;
pub mod ratelimit;
pub mod requests;
pub mod schema;
pub mod score;
pub mod scraping_context;
pub mod season_scraper;
pub mod table;
pub mod text_manipulators;

pub use errors::ScrapeError;
pub use link_scraper::SeasonLink;
pub use match_scraper::{MatchRecord, MatchScraper};
pub use schema::SchemaVariant;
pub use scraping_context::ScrapeContext;
pub use season_scraper::{SeasonRecord, SeasonScraper};
