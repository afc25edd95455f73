use scraper::{Html, Selector};

use crate::config::SeasonYearExtractor;
use crate::errors::ScrapeError;
use crate::requests::RequestClient;
use crate::text_manipulators::absolute_url;

/// One discovered season page, standings or schedule. The starting year
/// only picks the schema variant and is never exported.
#[derive(Debug, Clone)]
pub struct SeasonLink {
    pub url: String,
    pub label: String,
    pub starting_year: u16,
}

impl SeasonLink {
    /// Labels a discovered url. The current-season sentinel carries no
    /// year segment and takes its label from configuration; every other
    /// url must yield a 4-digit starting year.
    pub fn from_url(
        url: String,
        sentinel_url: &str,
        current_label: &str,
        extractor: &SeasonYearExtractor,
    ) -> Result<Self, ScrapeError> {
        if url == sentinel_url {
            let starting_year = current_label
                .split('/')
                .next()
                .and_then(|year| year.parse().ok())
                .ok_or_else(|| ScrapeError::YearExtraction { url: url.clone() })?;
            return Ok(SeasonLink {
                url,
                label: current_label.to_string(),
                starting_year,
            });
        }
        let Some(starting_year) = extractor.starting_year(&url) else {
            return Err(ScrapeError::YearExtraction { url });
        };
        let label = format!("{starting_year}/{}", starting_year + 1);
        Ok(SeasonLink {
            url,
            label,
            starting_year,
        })
    }
}

/// Every `<a href>` in `markup` containing both fragments, made absolute
/// against `base`. Exact duplicates are dropped, first occurrence kept.
pub fn discover_links(
    markup: &str,
    path_fragment: &str,
    marker_fragment: &str,
    base: &str,
) -> Vec<String> {
    let document = Html::parse_document(markup);
    let anchor_selector = Selector::parse("a").unwrap();
    let mut links: Vec<String> = Vec::new();
    for node in document.select(&anchor_selector) {
        let Some(href) = node.value().attr("href") else {
            continue;
        };
        if !(href.contains(path_fragment) && href.contains(marker_fragment)) {
            continue;
        }
        let url = absolute_url(base, href);
        if !links.contains(&url) {
            links.push(url);
        }
    }
    links
}

/// Fetches the index page and discovers matching links. An unreachable
/// index or an empty result is fatal to the run: there is nothing to
/// iterate over.
pub async fn fetch_links(
    client: &RequestClient,
    index_url: &str,
    path_fragment: &str,
    marker_fragment: &str,
    base: &str,
) -> anyhow::Result<Vec<String>> {
    let markup = client.fetch_url_body(index_url).await?;
    let links = discover_links(&markup, path_fragment, marker_fragment, base);
    if links.is_empty() {
        anyhow::bail!("no links matching \"{marker_fragment}\" found at {index_url}");
    }
    Ok(links)
}
