//! Content library listings for articles, podcasts, and videos: search,
//! filters, and pagination.

use serde::Serialize;

use std::collections::BTreeSet;

use vanguard_feeds::{ArticleRecord, PodcastRecord, VideoRecord};

/// Category that applies no filter.
pub const ALL_CATEGORIES: &str = "All";

/// Synthetic category matched by keyword rather than by `type_content`.
pub const TRANSFORMATION_CATEGORY: &str = "Organizational Transformation";

const TRANSFORMATION_KEYWORDS: [&str; 2] = ["transformation", "organizational"];

fn contains_ci(field: &Option<String>, needle_lower: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|v| v.to_lowercase().contains(needle_lower))
}

/// Lowercased search term, or `None` when blank.
fn search_term(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Filters applied to the article listing.
#[derive(Debug, Clone, Default)]
pub struct LibraryQuery {
    /// Case-insensitive substring over title, teaser, speaker, and type.
    pub search: Option<String>,
    /// `None` or [`ALL_CATEGORIES`] disables the category filter.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: usize,
}

impl LibraryQuery {
    pub fn matches(&self, article: &ArticleRecord) -> bool {
        self.matches_search(article) && self.matches_category(article)
    }

    fn matches_search(&self, article: &ArticleRecord) -> bool {
        let Some(term) = search_term(&self.search) else {
            return true;
        };
        [
            &article.blog_title,
            &article.description_teaser,
            &article.featured_speaker_linkedin,
            &article.type_content,
        ]
        .into_iter()
        .any(|field| contains_ci(field, &term))
    }

    fn matches_category(&self, article: &ArticleRecord) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(TRANSFORMATION_CATEGORY) => {
                [
                    &article.type_content,
                    &article.blog_title,
                    &article.description_teaser,
                ]
                .into_iter()
                .any(|field| TRANSFORMATION_KEYWORDS.iter().any(|k| contains_ci(field, k)))
            }
            Some(category) => article.type_content.as_deref() == Some(category),
        }
    }

    /// Filter `articles` and cut out the requested page.
    pub fn apply<'a>(&self, articles: &'a [ArticleRecord], per_page: usize) -> Page<&'a ArticleRecord> {
        let matching: Vec<_> = articles.iter().filter(|a| self.matches(a)).collect();
        paginate(matching, self.page, per_page)
    }
}

/// Category picker entries: "All", the transformation bucket, then each
/// distinct `type_content` in first-seen order.
pub fn categories(articles: &[ArticleRecord]) -> Vec<String> {
    let mut out = vec![
        ALL_CATEGORIES.to_string(),
        TRANSFORMATION_CATEGORY.to_string(),
    ];
    for kind in articles.iter().filter_map(|a| a.type_content.as_deref()) {
        if !kind.is_empty() && !out.iter().any(|c| c == kind) {
            out.push(kind.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Podcasts and videos
// ---------------------------------------------------------------------------

/// Filters applied to the podcast listing.
#[derive(Debug, Clone, Default)]
pub struct PodcastQuery {
    /// Case-insensitive substring over title and featured speaker.
    pub search: Option<String>,
    /// Case-insensitive substring of `featured_speaker`; `None` or
    /// [`ALL_CATEGORIES`] disables it.
    pub speaker: Option<String>,
    /// 1-based page number.
    pub page: usize,
}

impl PodcastQuery {
    pub fn matches(&self, podcast: &PodcastRecord) -> bool {
        if let Some(term) = search_term(&self.search) {
            if !contains_ci(&podcast.title, &term) && !contains_ci(&podcast.featured_speaker, &term)
            {
                return false;
            }
        }
        match search_term(&self.speaker) {
            Some(speaker) if speaker != ALL_CATEGORIES.to_lowercase() => {
                contains_ci(&podcast.featured_speaker, &speaker)
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, podcasts: &'a [PodcastRecord], per_page: usize) -> Page<&'a PodcastRecord> {
        let matching: Vec<_> = podcasts.iter().filter(|p| self.matches(p)).collect();
        paginate(matching, self.page, per_page)
    }
}

/// Speaker picker entries: distinct non-empty speakers, sorted.
pub fn speakers(podcasts: &[PodcastRecord]) -> Vec<String> {
    podcasts
        .iter()
        .filter_map(|p| p.featured_speaker.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Filters applied to the video listing.
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    /// Case-insensitive substring over name, description, and speakers.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: usize,
}

impl VideoQuery {
    pub fn matches(&self, video: &VideoRecord) -> bool {
        let Some(term) = search_term(&self.search) else {
            return true;
        };
        [
            &video.vimeo_name,
            &video.video_description,
            &video.featured_speakers,
        ]
        .into_iter()
        .any(|field| contains_ci(field, &term))
    }

    pub fn apply<'a>(&self, videos: &'a [VideoRecord], per_page: usize) -> Page<&'a VideoRecord> {
        let matching: Vec<_> = videos.iter().filter(|v| self.matches(v)).collect();
        paginate(matching, self.page, per_page)
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into range.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Page controls are only rendered when there is somewhere to go.
    pub fn has_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

/// Slice `items` into page `page` of `per_page`. An empty listing is a
/// single empty page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

/// An entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

/// Page numbers around `current`, with the first and last page pinned and
/// gaps shown as ellipses.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    let mut links = Vec::new();

    if current > 3 {
        links.push(PageLink::Number(1));
        if current > 4 {
            links.push(PageLink::Ellipsis);
        }
    }

    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total);
    links.extend((start..=end).map(PageLink::Number));

    if current + 2 < total {
        if current + 3 < total {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Number(total));
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Ellipsis, Number};

    fn article(title: &str, kind: &str) -> ArticleRecord {
        ArticleRecord {
            blog_title: Some(title.into()),
            type_content: Some(kind.into()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<ArticleRecord> {
        vec![
            article("Boards in Crisis", "Governance"),
            article("Leading an Organizational Reset", "Strategy"),
            article("The CFO Seat", "Finance"),
            ArticleRecord {
                blog_title: Some("Quiet Power".into()),
                featured_speaker_linkedin: Some("Jane Smith".into()),
                type_content: Some("Governance".into()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let articles = sample();
        let query = LibraryQuery {
            search: Some("jane".into()),
            ..Default::default()
        };
        let page = query.apply(&articles, 30);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].blog_title.as_deref(), Some("Quiet Power"));
    }

    #[test]
    fn category_filters() {
        let articles = sample();
        let by = |category: &str| {
            LibraryQuery {
                category: Some(category.into()),
                ..Default::default()
            }
            .apply(&articles, 30)
            .total_items
        };
        assert_eq!(by(ALL_CATEGORIES), 4);
        assert_eq!(by("Governance"), 2);
        assert_eq!(by(TRANSFORMATION_CATEGORY), 1);
        assert_eq!(by("governance"), 0);
    }

    #[test]
    fn categories_are_unique_in_first_seen_order() {
        assert_eq!(
            categories(&sample()),
            vec!["All", TRANSFORMATION_CATEGORY, "Governance", "Strategy", "Finance"]
        );
    }

    fn podcast(title: &str, speaker: Option<&str>) -> PodcastRecord {
        PodcastRecord {
            title: Some(title.into()),
            featured_speaker: speaker.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn podcast_search_and_speaker_filter() {
        let podcasts = vec![
            podcast("Board Dynamics", Some("Jane Smith")),
            podcast("The CHRO Agenda", Some("Omar Diaz")),
            podcast("Untitled Session", None),
        ];

        let by_search = PodcastQuery {
            search: Some("smith".into()),
            ..Default::default()
        };
        assert_eq!(by_search.apply(&podcasts, 30).total_items, 1);

        let by_speaker = PodcastQuery {
            speaker: Some("Omar Diaz".into()),
            ..Default::default()
        };
        let page = by_speaker.apply(&podcasts, 30);
        assert_eq!(page.items[0].title.as_deref(), Some("The CHRO Agenda"));

        let all = PodcastQuery {
            speaker: Some(ALL_CATEGORIES.into()),
            ..Default::default()
        };
        assert_eq!(all.apply(&podcasts, 30).total_items, 3);

        assert_eq!(speakers(&podcasts), vec!["Jane Smith", "Omar Diaz"]);
    }

    #[test]
    fn video_search_spans_name_description_and_speakers() {
        let videos = vec![
            VideoRecord {
                vimeo_name: Some("CEO Fireside".into()),
                ..Default::default()
            },
            VideoRecord {
                video_description: Some("A talk on succession planning".into()),
                featured_speakers: Some("Ann Lee, Bo Park".into()),
                ..Default::default()
            },
        ];
        let query = |term: &str| VideoQuery {
            search: Some(term.into()),
            page: 1,
        };
        assert_eq!(query("fireside").apply(&videos, 30).total_items, 1);
        assert_eq!(query("SUCCESSION").apply(&videos, 30).total_items, 1);
        assert_eq!(query("bo park").apply(&videos, 30).total_items, 1);
        assert_eq!(query("").apply(&videos, 30).total_items, 2);
    }

    #[test]
    fn video_listing_paginates_by_page_size() {
        let videos: Vec<VideoRecord> = (0..65).map(|_| VideoRecord::default()).collect();
        let page = VideoQuery {
            search: None,
            page: 3,
        }
        .apply(&videos, 30);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn paginate_clamps_page() {
        let page = paginate((1..=65).collect::<Vec<_>>(), 9, 30);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![61, 62, 63, 64, 65]);
        assert!(page.has_pagination());

        let empty = paginate(Vec::<u8>::new(), 0, 30);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_pagination());
    }

    #[test]
    fn window_near_start() {
        assert_eq!(
            page_window(1, 10),
            vec![Number(1), Number(2), Number(3), Ellipsis, Number(10)]
        );
    }

    #[test]
    fn window_in_middle() {
        assert_eq!(
            page_window(6, 10),
            vec![
                Number(1),
                Ellipsis,
                Number(4),
                Number(5),
                Number(6),
                Number(7),
                Number(8),
                Ellipsis,
                Number(10),
            ]
        );
    }

    #[test]
    fn window_adjacent_to_edges_has_no_ellipsis() {
        assert_eq!(
            page_window(4, 7),
            vec![
                Number(1),
                Number(2),
                Number(3),
                Number(4),
                Number(5),
                Number(6),
                Number(7),
            ]
        );
        assert_eq!(page_window(2, 3), vec![Number(1), Number(2), Number(3)]);
    }
}
