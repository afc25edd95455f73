use thiserror::Error;

/// Everything that can go wrong while processing a single season or
/// schedule link. Per-link errors are logged and counted by the caller;
/// they never abort the whole run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no table captioned \"{caption}\" in the {season} page")]
    MissingTable { season: String, caption: String },

    #[error("the {season} {table} table has no \"{column}\" column")]
    MissingColumn {
        season: String,
        table: String,
        column: String,
    },

    #[error("unparseable {column} value \"{value}\" in the {season} {table} table")]
    CellParse {
        season: String,
        table: String,
        column: String,
        value: String,
    },

    #[error("unparseable score token \"{token}\"")]
    ScoreParse { token: String },

    #[error("no 4-digit season year in url {url}")]
    YearExtraction { url: String },
}
