//! Map provider records onto [`ContentItem`], filling in display defaults.

use vanguard_feeds::{
    ArticleRecord, PodcastRecord, RssItem, VideoRecord, format_long_date, id_segment,
    parse_loose_date, strip_html, truncate_excerpt,
};
use vanguard_shared::{ContentItem, ContentKind};

const IMAGE_BASE: &str = "https://images.unsplash.com/";

const ARTICLE_IMAGE: &str = "photo-1543132220-7bc04a0e790a";
const PODCAST_IMAGE: &str = "photo-1579525109384-ddf54825044f";
const VIDEO_IMAGE: &str = "photo-1562935345-5080389daccd";
const POST_IMAGE: &str = "photo-1454165804606-c3d57bc86b40";

/// Assumed title length when an article has no `blog_title`.
const DEFAULT_TITLE_CHARS: usize = 100;

fn image(id: &str) -> String {
    format!("{IMAGE_BASE}{id}")
}

/// First value that is present and not blank.
fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.trim().is_empty())
}

fn or_default(candidates: &[&Option<String>], default: &str) -> String {
    first_present(candidates).unwrap_or(default).to_string()
}

// ---------------------------------------------------------------------------
// Internal collections
// ---------------------------------------------------------------------------

pub fn normalize_article(record: &ArticleRecord) -> ContentItem {
    let title_chars = first_present(&[&record.blog_title])
        .map(|t| t.chars().count())
        .unwrap_or(DEFAULT_TITLE_CHARS);

    ContentItem {
        kind: ContentKind::Article,
        category: or_default(&[&record.category], "Leadership Development"),
        title: or_default(&[&record.blog_title, &record.title], "Leadership Insights"),
        description: or_default(
            &[&record.description, &record.summary],
            "Exploring leadership insights and organizational transformation.",
        ),
        author: or_default(&[&record.author], "Vanguard Faculty"),
        duration_or_date: format!("{} min read", title_chars.div_ceil(10)),
        image_url: first_present(&[&record.photo])
            .map(str::to_string)
            .unwrap_or_else(|| image(ARTICLE_IMAGE)),
        link: format!("/article/{}", id_segment(record.id.as_ref())),
        is_external: false,
    }
}

pub fn normalize_podcast(record: &PodcastRecord) -> ContentItem {
    ContentItem {
        kind: ContentKind::Podcast,
        category: or_default(&[&record.category], "Board Dynamics"),
        title: or_default(&[&record.title], "Leadership Insights Podcast"),
        description: or_default(
            &[&record.description],
            "A candid discussion with experienced leaders about governance and strategy.",
        ),
        author: or_default(&[&record.featured_speaker], "Member Contributor"),
        duration_or_date: or_default(&[&record.duration], "45 min listen"),
        image_url: first_present(&[&record.thumbnail])
            .map(str::to_string)
            .unwrap_or_else(|| image(PODCAST_IMAGE)),
        link: format!("/podcast/{}", id_segment(record.id.as_ref())),
        is_external: false,
    }
}

pub fn normalize_video(record: &VideoRecord) -> ContentItem {
    ContentItem {
        kind: ContentKind::Video,
        category: or_default(&[&record.category], "Personal Awareness"),
        title: or_default(
            &[&record.vimeo_name, &record.video_description],
            "Leadership Development Video",
        ),
        description: or_default(
            &[&record.description],
            "Understanding how leadership principles drive better strategic decisions.",
        ),
        author: or_default(&[&record.featured_speakers], "Affiliate Contributor"),
        duration_or_date: or_default(&[&record.duration], "12 min watch"),
        image_url: first_present(&[&record.headshot])
            .map(str::to_string)
            .unwrap_or_else(|| image(VIDEO_IMAGE)),
        link: format!("/video/{}", id_segment(record.id.as_ref())),
        is_external: false,
    }
}

// ---------------------------------------------------------------------------
// External blog
// ---------------------------------------------------------------------------

/// Normalize a feed post. The excerpt is the stripped description (or
/// content) cut to `excerpt_chars`.
pub fn normalize_external_post(item: &RssItem, excerpt_chars: usize) -> ContentItem {
    let body = first_present(&[&item.description, &item.content]).unwrap_or_default();
    let excerpt = truncate_excerpt(&strip_html(body), excerpt_chars);

    let raw_date = item.pub_date.as_deref().unwrap_or_default();
    let date = parse_loose_date(raw_date)
        .map(|dt| format_long_date(&dt))
        .unwrap_or_else(|| raw_date.trim().to_string());

    let enclosure_link = item.enclosure.as_ref().and_then(|e| e.link.clone());

    ContentItem {
        kind: ContentKind::ExternalPost,
        category: "Ken Banta on Leadership".into(),
        title: or_default(&[&item.title], "Leadership Insights"),
        description: excerpt,
        author: "Ken Banta".into(),
        duration_or_date: date,
        image_url: first_present(&[&item.thumbnail, &enclosure_link])
            .map(str::to_string)
            .unwrap_or_else(|| image(POST_IMAGE)),
        link: item.link.clone().unwrap_or_default(),
        is_external: true,
    }
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Placeholder insights shown when any live source fails.
pub fn fallback_insights() -> Vec<ContentItem> {
    vec![
        ContentItem {
            kind: ContentKind::Article,
            category: "Leadership Development".into(),
            title: "The Future of C-Suite Leadership in Uncertain Times".into(),
            description: "Exploring how today's senior executives can navigate complexity while driving organizational transformation and maintaining stakeholder trust.".into(),
            author: "Vanguard Faculty".into(),
            duration_or_date: "8 min read".into(),
            image_url: image(ARTICLE_IMAGE),
            link: "/articles".into(),
            is_external: false,
        },
        ContentItem {
            kind: ContentKind::Podcast,
            category: "Board Dynamics".into(),
            title: "Board Dynamics: Building Effective Governance".into(),
            description: "A candid discussion with three experienced board chairs about creating high-performing governance structures.".into(),
            author: "Member Contributor".into(),
            duration_or_date: "45 min listen".into(),
            image_url: image(PODCAST_IMAGE),
            link: "/podcasts".into(),
            is_external: false,
        },
        ContentItem {
            kind: ContentKind::Video,
            category: "Personal Awareness".into(),
            title: "Personal Awareness in Executive Decision Making".into(),
            description: "Understanding how self-awareness drives better strategic decisions and enhances leadership effectiveness.".into(),
            author: "Affiliate Contributor".into(),
            duration_or_date: "12 min watch".into(),
            image_url: image(VIDEO_IMAGE),
            link: "/videos".into(),
            is_external: false,
        },
    ]
}
