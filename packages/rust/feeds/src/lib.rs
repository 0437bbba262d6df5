//! HTTP clients for the site's content sources.
//!
//! This crate provides:
//! - [`content_api`]: articles, podcasts, and videos from the internal API
//! - [`events`]: upcoming event listings
//! - [`lenient`]: tolerant decoding of loosely-typed record fields
//! - [`rss`]: the RSS-to-JSON proxy and featured-post selection
//! - [`text`]: HTML stripping, excerpts, and date parsing for feed text

pub mod content_api;
pub mod events;
pub mod http;
pub mod lenient;
pub mod rss;
pub mod text;

pub use content_api::{
    ArticleRecord, Collection, ContentApi, PodcastRecord, VideoRecord, id_segment,
};
pub use events::EventRecord;
pub use http::{USER_AGENT, build_client, get_json, get_records};
pub use rss::{Enclosure, RssFeed, RssItem, fetch_feed, proxy_url, select_featured_post};
pub use text::{ELLIPSIS, format_long_date, parse_loose_date, strip_html, truncate_excerpt};
