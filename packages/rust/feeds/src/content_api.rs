//! Client for the internal content API (`/api/articles`, `/api/podcasts`, `/api/videos`).
//!
//! Records are loosely typed on the server side: every field is optional and
//! unknown fields are ignored.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use vanguard_shared::{Result, parse_http_url};

use crate::http::get_records;
use crate::lenient::loose_text;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// An entry from `/api/articles`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRecord {
    pub id: Option<Value>,
    #[serde(deserialize_with = "loose_text")]
    pub blog_title: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub description_teaser: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub author: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub type_content: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub featured_speaker_linkedin: Option<String>,
}

/// An entry from `/api/podcasts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodcastRecord {
    pub id: Option<Value>,
    #[serde(deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub featured_speaker: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub thumbnail: Option<String>,
}

/// An entry from `/api/videos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoRecord {
    pub id: Option<Value>,
    #[serde(deserialize_with = "loose_text")]
    pub vimeo_name: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub video_description: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub featured_speakers: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub headshot: Option<String>,
}

/// Render a record id (string or number) for use in a link path.
pub fn id_segment(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// ContentApi
// ---------------------------------------------------------------------------

/// Content collections served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Articles,
    Podcasts,
    Videos,
    Events,
}

impl Collection {
    /// Path segment under `/api/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Articles => "articles",
            Self::Podcasts => "podcasts",
            Self::Videos => "videos",
            Self::Events => "events",
        }
    }
}

/// Thin client over `{backend_url}/api/...`.
#[derive(Debug, Clone)]
pub struct ContentApi {
    client: Client,
    base_url: String,
}

impl ContentApi {
    /// Create a client rooted at `backend_url` (any path prefix is kept).
    pub fn new(client: Client, backend_url: &str) -> Result<Self> {
        parse_http_url("backend_url", backend_url)?;
        Ok(Self {
            client,
            base_url: backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of a collection endpoint.
    pub fn endpoint(&self, collection: Collection) -> String {
        format!("{}/api/{}", self.base_url, collection.as_str())
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    #[instrument(skip(self))]
    pub async fn articles(&self) -> Result<Vec<ArticleRecord>> {
        get_records(&self.client, &self.endpoint(Collection::Articles)).await
    }

    #[instrument(skip(self))]
    pub async fn podcasts(&self) -> Result<Vec<PodcastRecord>> {
        get_records(&self.client, &self.endpoint(Collection::Podcasts)).await
    }

    #[instrument(skip(self))]
    pub async fn videos(&self) -> Result<Vec<VideoRecord>> {
        get_records(&self.client, &self.endpoint(Collection::Videos)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_client;

    #[test]
    fn records_tolerate_missing_and_unknown_fields() {
        let json = r#"[{"id": 7, "blog_title": "Boards in Crisis", "views": 1200}, {}]"#;
        let parsed: Vec<ArticleRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].blog_title.as_deref(), Some("Boards in Crisis"));
        assert!(parsed[0].photo.is_none());
        assert_eq!(parsed[1], ArticleRecord::default());
    }

    #[test]
    fn mistyped_display_fields_decode_as_text_or_absent() {
        let json = r#"{"id": 3, "vimeo_name": "Fireside", "featured_speakers": ["Ann Lee", "Bo Park"], "duration": 12, "headshot": {"url": "x"}}"#;
        let video: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(video.featured_speakers.as_deref(), Some("Ann Lee, Bo Park"));
        assert_eq!(video.duration.as_deref(), Some("12"));
        assert!(video.headshot.is_none());
    }

    #[test]
    fn id_segment_handles_string_and_number() {
        assert_eq!(id_segment(Some(&Value::from(42))), "42");
        assert_eq!(id_segment(Some(&Value::from("rec9XyZ"))), "rec9XyZ");
        assert_eq!(id_segment(Some(&Value::Null)), "");
        assert_eq!(id_segment(None), "");
    }

    #[test]
    fn endpoint_keeps_prefix_and_trims_slash() {
        let client = build_client(None).unwrap();
        let api = ContentApi::new(client, "https://site.example.com/backend/").unwrap();
        assert_eq!(
            api.endpoint(Collection::Podcasts),
            "https://site.example.com/backend/api/podcasts"
        );
    }

    #[test]
    fn rejects_non_http_backend() {
        let client = build_client(None).unwrap();
        assert!(ContentApi::new(client, "file:///etc").is_err());
    }

    #[tokio::test]
    async fn fetches_collections() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/api/videos"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
                r#"[{"id":"v1","vimeo_name":"Leading Through Change","duration":"9 min watch"}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let api = ContentApi::new(build_client(None).unwrap(), &server.uri()).unwrap();
        let videos = api.videos().await.unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].vimeo_name.as_deref(), Some("Leading Through Change"));
        assert_eq!(id_segment(videos[0].id.as_ref()), "v1");
    }

    #[tokio::test]
    async fn skips_non_object_entries() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/api/podcasts"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
                r#"[null, {"id": 2, "title": "Talk", "duration": 45}, "junk"]"#,
            ))
            .mount(&server)
            .await;

        let api = ContentApi::new(build_client(None).unwrap(), &server.uri()).unwrap();
        let podcasts = api.podcasts().await.unwrap();

        assert_eq!(podcasts.len(), 1);
        assert_eq!(podcasts[0].title.as_deref(), Some("Talk"));
        assert_eq!(podcasts[0].duration.as_deref(), Some("45"));
    }
}
