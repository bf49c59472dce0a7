use crate::summarizer::QuerySummarizer;
use crate::unsplash::{PhotoResult, UnsplashClient};

/// The smart search pipeline: distill the raw query into keywords, then
/// fetch photos for them. Both steps degrade instead of failing, so the
/// worst outcome is an empty result list.
pub struct VisualSearch {
    summarizer: QuerySummarizer,
    unsplash: UnsplashClient,
}

impl VisualSearch {
    pub fn new(summarizer: QuerySummarizer, unsplash: UnsplashClient) -> Self {
        Self { summarizer, unsplash }
    }

    pub async fn search(&self, raw_query: &str) -> Vec<PhotoResult> {
        let keywords = self.summarizer.summarize(raw_query).await;
        log::info!("smart search: '{raw_query}' -> keywords: '{keywords}'");
        self.unsplash.search(&keywords).await
    }
}
