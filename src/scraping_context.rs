use crate::{
    config::{ScrapeConfig, SeasonYearExtractor},
    requests::RequestClient,
};

pub struct ScrapeContext {
    pub config: ScrapeConfig,
    pub year_extractor: SeasonYearExtractor,
    pub client: RequestClient,
}

impl ScrapeContext {
    pub fn new() -> anyhow::Result<Self> {
        let config = ScrapeConfig::new()?;
        let year_extractor = SeasonYearExtractor::new()?;
        let client = RequestClient::new()?;
        Ok(ScrapeContext {
            config,
            year_extractor,
            client,
        })
    }
}
