//! Upcoming events from `/api/events`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use vanguard_shared::Result;

use crate::content_api::{Collection, ContentApi};
use crate::http::get_records;
use crate::lenient::{loose_text, loose_text_or_empty};
use crate::text::parse_loose_date;

/// An event listing as served by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    #[serde(deserialize_with = "loose_text_or_empty")]
    pub id: String,
    #[serde(deserialize_with = "loose_text_or_empty")]
    pub event_title: String,
    #[serde(deserialize_with = "loose_text")]
    pub date_time: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub listing_picture: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub registration_url: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub default_signup_url: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub more_details_url: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub speaker: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub session_leader_name: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub audience_network: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub location: Option<String>,
}

impl EventRecord {
    /// Parsed start date, if present and in a known format.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.start_date.as_deref().and_then(parse_loose_date)
    }

    /// Where the "Register" button points: details page, then the public
    /// signup page, then the generic registration URL.
    pub fn signup_link(&self) -> Option<&str> {
        [
            &self.more_details_url,
            &self.default_signup_url,
            &self.registration_url,
        ]
        .into_iter()
        .filter_map(|u| u.as_deref())
        .find(|u| !u.trim().is_empty())
    }
}

impl ContentApi {
    #[instrument(skip(self))]
    pub async fn events(&self) -> Result<Vec<EventRecord>> {
        get_records(self.client(), &self.endpoint(Collection::Events)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_client;
    use vanguard_shared::VanguardError;

    #[test]
    fn signup_link_priority() {
        let mut event = EventRecord {
            registration_url: Some("https://members.example.com/events".into()),
            default_signup_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(event.signup_link(), Some("https://members.example.com/events"));

        event.more_details_url = Some("https://example.com/details".into());
        assert_eq!(event.signup_link(), Some("https://example.com/details"));
    }

    #[test]
    fn starts_at_parses_iso_date() {
        let event = EventRecord {
            start_date: Some("2025-03-14".into()),
            ..Default::default()
        };
        assert!(event.starts_at().is_some());
        assert!(EventRecord::default().starts_at().is_none());
    }

    #[tokio::test]
    async fn events_error_is_surfaced() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/api/events"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = ContentApi::new(build_client(None).unwrap(), &server.uri()).unwrap();
        let err = api.events().await.unwrap_err();
        assert!(matches!(err, VanguardError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn events_parse() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/api/events"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
                r#"[{"id":"rec1","event_title":"GC Roundtable","start_date":"2025-03-14","location":"New York"}]"#,
            ))
            .mount(&server)
            .await;

        let api = ContentApi::new(build_client(None).unwrap(), &server.uri()).unwrap();
        let events = api.events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_title, "GC Roundtable");
        assert_eq!(events[0].location.as_deref(), Some("New York"));
    }
}
