//! Featured insights: the latest article, podcast, and video plus one blog
//! post, fetched together and normalized into display cards.

use std::time::Duration;

use tracing::{info, instrument, warn};

use vanguard_feeds::{ContentApi, build_client, fetch_feed, select_featured_post};
use vanguard_shared::{ContentConfig, ContentItem, Result};

use crate::normalize::{
    fallback_insights, normalize_article, normalize_external_post, normalize_podcast,
    normalize_video,
};

/// Per-request timeout for content fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fans out to the content API and the RSS proxy.
#[derive(Debug, Clone)]
pub struct Aggregator {
    api: ContentApi,
    config: ContentConfig,
}

impl Aggregator {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let client = build_client(Some(FETCH_TIMEOUT))?;
        let api = ContentApi::new(client, &config.backend_url)?;
        Ok(Self {
            api,
            config: config.clone(),
        })
    }

    /// Featured insights, or [`fallback_insights`] if any source fails.
    pub async fn featured_insights(&self) -> Vec<ContentItem> {
        match self.try_featured_insights().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "featured insights unavailable, using fallback");
                fallback_insights()
            }
        }
    }

    /// Fetch all four sources concurrently. The first failure aborts the
    /// whole aggregation.
    #[instrument(skip_all, fields(backend = %self.config.backend_url))]
    pub async fn try_featured_insights(&self) -> Result<Vec<ContentItem>> {
        let (articles, podcasts, videos, feed) = tokio::try_join!(
            self.api.articles(),
            self.api.podcasts(),
            self.api.videos(),
            fetch_feed(
                self.api.client(),
                &self.config.rss_proxy_url,
                &self.config.feed_url
            ),
        )?;

        let post = select_featured_post(
            feed.usable_items(),
            self.config.featured_month,
            self.config.featured_day,
        );

        let mut items = Vec::with_capacity(4);
        items.extend(articles.first().map(normalize_article));
        items.extend(podcasts.first().map(normalize_podcast));
        items.extend(videos.first().map(normalize_video));
        items.extend(post.map(|p| normalize_external_post(p, self.config.excerpt_chars)));

        info!(count = items.len(), "featured insights assembled");
        Ok(items)
    }
}
