//! RSS-to-JSON proxy client and featured-post selection.

use chrono::Datelike;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use vanguard_shared::{Result, VanguardError};

use crate::http::get_json;
use crate::lenient::{loose_object, loose_records, loose_text, loose_text_or_empty};
use crate::text::parse_loose_date;

/// Status value the proxy reports for a successfully converted feed.
pub const STATUS_OK: &str = "ok";

/// Payload returned by the rss2json proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RssFeed {
    #[serde(deserialize_with = "loose_text_or_empty")]
    pub status: String,
    #[serde(deserialize_with = "loose_records")]
    pub items: Vec<RssItem>,
}

impl RssFeed {
    /// Items, but only when the proxy reported success.
    pub fn usable_items(&self) -> &[RssItem] {
        if self.status == STATUS_OK {
            &self.items
        } else {
            &[]
        }
    }
}

/// A single feed entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RssItem {
    #[serde(deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub link: Option<String>,
    #[serde(rename = "pubDate", deserialize_with = "loose_text")]
    pub pub_date: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub content: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "loose_object")]
    pub enclosure: Option<Enclosure>,
}

/// Media enclosure; the proxy sends `{}` when the feed has none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enclosure {
    #[serde(deserialize_with = "loose_text")]
    pub link: Option<String>,
}

/// Build the proxy request URL for `feed_url`.
pub fn proxy_url(proxy: &str, feed_url: &str) -> Result<Url> {
    Url::parse_with_params(proxy, &[("rss_url", feed_url)])
        .map_err(|e| VanguardError::config(format!("invalid RSS proxy URL '{proxy}': {e}")))
}

/// Fetch `feed_url` through the proxy.
#[instrument(skip(client))]
pub async fn fetch_feed(client: &Client, proxy: &str, feed_url: &str) -> Result<RssFeed> {
    let url = proxy_url(proxy, feed_url)?;
    let feed: RssFeed = get_json(client, url.as_str()).await?;
    debug!(status = %feed.status, items = feed.items.len(), "feed received");
    Ok(feed)
}

/// Pick the post published on `month`/`day` (any year), else the first item.
pub fn select_featured_post(items: &[RssItem], month: u32, day: u32) -> Option<&RssItem> {
    items
        .iter()
        .find(|item| {
            item.pub_date
                .as_deref()
                .and_then(parse_loose_date)
                .is_some_and(|dt| dt.month() == month && dt.day() == day)
        })
        .or_else(|| items.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_client;

    fn item(title: &str, pub_date: &str) -> RssItem {
        RssItem {
            title: Some(title.into()),
            pub_date: Some(pub_date.into()),
            ..Default::default()
        }
    }

    #[test]
    fn selects_matching_month_day() {
        let items = vec![
            item("Latest", "2025-02-10 09:00:00"),
            item("Election week", "2024-11-06 12:00:00"),
            item("Older", "2024-10-01 08:00:00"),
        ];
        let post = select_featured_post(&items, 11, 6).unwrap();
        assert_eq!(post.title.as_deref(), Some("Election week"));
    }

    #[test]
    fn falls_back_to_first_item() {
        let items = vec![
            item("Latest", "2025-02-10 09:00:00"),
            item("Unparseable", "someday"),
        ];
        let post = select_featured_post(&items, 11, 6).unwrap();
        assert_eq!(post, &items[0]);
    }

    #[test]
    fn empty_feed_selects_nothing() {
        assert!(select_featured_post(&[], 11, 6).is_none());
    }

    #[test]
    fn usable_items_requires_ok_status() {
        let feed: RssFeed =
            serde_json::from_str(r#"{"status":"error","message":"rate limited","items":[{}]}"#)
                .unwrap();
        assert!(feed.usable_items().is_empty());
    }

    #[test]
    fn empty_enclosure_object_parses() {
        let json = r#"{"status":"ok","items":[{"title":"A","pubDate":"2024-11-06 10:00:00","enclosure":{}}]}"#;
        let feed: RssFeed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.items[0].enclosure, Some(Enclosure { link: None }));
    }

    #[test]
    fn malformed_items_and_enclosures_are_tolerated() {
        let json = r#"{"status":"ok","items":[null,{"title":"A","enclosure":[],"categories":["x"],"thumbnail":7}]}"#;
        let feed: RssFeed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.usable_items().len(), 1);
        assert_eq!(feed.items[0].enclosure, None);
        assert_eq!(feed.items[0].thumbnail.as_deref(), Some("7"));
    }

    #[test]
    fn proxy_url_encodes_feed() {
        let url = proxy_url(
            "https://api.rss2json.com/v1/api.json",
            "https://kenbanta.substack.com/feed",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.rss2json.com/v1/api.json?rss_url=https%3A%2F%2Fkenbanta.substack.com%2Ffeed"
        );
    }

    #[tokio::test]
    async fn fetch_feed_through_mock_proxy() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/v1/api.json"))
            .and(wiremock::matchers::query_param(
                "rss_url",
                "https://blog.example.com/feed",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
                r#"{"status":"ok","feed":{},"items":[{"title":"Hello","link":"https://blog.example.com/p/hello","pubDate":"2024-11-06 10:00:00"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = build_client(None).unwrap();
        let proxy = format!("{}/v1/api.json", server.uri());
        let feed = fetch_feed(&client, &proxy, "https://blog.example.com/feed")
            .await
            .unwrap();

        assert_eq!(feed.usable_items().len(), 1);
        assert_eq!(feed.items[0].link.as_deref(), Some("https://blog.example.com/p/hello"));
    }
}
