//! Core domain types: display records and contact submissions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VanguardError;

// ---------------------------------------------------------------------------
// ContentItem
// ---------------------------------------------------------------------------

/// Source kind of a featured insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Article,
    Podcast,
    Video,
    ExternalPost,
}

impl ContentKind {
    /// Badge text shown on the card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Podcast => "Podcast",
            Self::Video => "Video",
            Self::ExternalPost => "Substack",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unified display record for an article, podcast, video, or external blog post.
///
/// Built fresh on every aggregation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub kind: ContentKind,
    pub category: String,
    pub title: String,
    pub description: String,
    pub author: String,
    /// Reading/listening time for internal content, publish date for external posts.
    pub duration_or_date: String,
    pub image_url: String,
    /// Site-relative path for internal content, absolute URL for external posts.
    pub link: String,
    pub is_external: bool,
}

// ---------------------------------------------------------------------------
// Contact submission
// ---------------------------------------------------------------------------

/// The fixed "area of interest" options offered by the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestArea {
    Advisory,
    Networking,
    Programs,
    Book,
    Membership,
    Other,
}

impl InterestArea {
    /// All options in form order.
    pub const ALL: [InterestArea; 6] = [
        Self::Advisory,
        Self::Networking,
        Self::Programs,
        Self::Book,
        Self::Membership,
        Self::Other,
    ];

    /// Wire value sent to the webhook.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Networking => "networking",
            Self::Programs => "programs",
            Self::Book => "book",
            Self::Membership => "membership",
            Self::Other => "other",
        }
    }

    /// Human-readable option text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Advisory => "Advisory Services",
            Self::Networking => "Networking & Events",
            Self::Programs => "Leadership Programs",
            Self::Book => "Book & Resources",
            Self::Membership => "Membership Information",
            Self::Other => "Other",
        }
    }
}

impl FromStr for InterestArea {
    type Err = VanguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|area| area.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                VanguardError::validation(format!(
                    "unknown interest area '{s}' (expected one of: advisory, networking, programs, book, membership, other)"
                ))
            })
    }
}

impl fmt::Display for InterestArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contact-form submission, timestamped at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub interest_area: Option<InterestArea>,
    pub message: String,
    /// ISO-8601 UTC timestamp, e.g. `2024-11-06T14:03:22.517Z`.
    pub timestamp: String,
    pub source_label: String,
}

impl ContactSubmission {
    /// Wire field names and values, in the order the webhook receives them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fullName", self.full_name.clone()),
            ("email", self.email.clone()),
            ("company", self.company.clone()),
            (
                "interestArea",
                self.interest_area
                    .map(|a| a.as_str().to_string())
                    .unwrap_or_default(),
            ),
            ("message", self.message.clone()),
            ("timestamp", self.timestamp.clone()),
            ("source", self.source_label.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_item_serializes_camel_case() {
        let item = ContentItem {
            kind: ContentKind::ExternalPost,
            category: "Ken Banta on Leadership".into(),
            title: "On Candor".into(),
            description: "Short excerpt".into(),
            author: "Ken Banta".into(),
            duration_or_date: "November 6, 2024".into(),
            image_url: "https://img.example.com/a.jpg".into(),
            link: "https://kenbanta.substack.com/p/on-candor".into(),
            is_external: true,
        };
        let json = serde_json::to_string(&item).expect("serialize");
        assert!(json.contains(r#""kind":"ExternalPost""#));
        assert!(json.contains(r#""durationOrDate":"November 6, 2024""#));
        assert!(json.contains(r#""isExternal":true"#));
    }

    #[test]
    fn interest_area_parses_wire_values() {
        assert_eq!("advisory".parse::<InterestArea>().unwrap(), InterestArea::Advisory);
        assert_eq!(" Book ".parse::<InterestArea>().unwrap(), InterestArea::Book);
        assert!("golf".parse::<InterestArea>().is_err());
        assert_eq!(InterestArea::Networking.label(), "Networking & Events");
    }

    #[test]
    fn form_fields_keep_wire_order() {
        let submission = ContactSubmission {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            company: String::new(),
            interest_area: None,
            message: "Hello".into(),
            timestamp: "2024-11-06T14:03:22.517Z".into(),
            source_label: "The Vanguard Network Contact Form".into(),
        };
        let names: Vec<&str> = submission.form_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            ["fullName", "email", "company", "interestArea", "message", "timestamp", "source"]
        );
        assert_eq!(submission.form_fields()[3].1, "");
    }
}
