//! Domain logic for the Vanguard site.
//!
//! Ties the feed clients together into the featured-insights aggregation,
//! the contact form submit cycle, and the library and events listings.

pub mod aggregator;
pub mod contact;
pub mod events;
pub mod library;
pub mod normalize;

pub use aggregator::{Aggregator, FETCH_TIMEOUT};
pub use contact::{
    ContactFields, ContactForm, ContactSubmitter, Field, SubmitState, multipart_form,
};
pub use vanguard_feeds::EventRecord;

pub use events::{
    EventFilter, MonthGroup, audiences, display_title, group_by_month, locations,
    sort_by_start_date,
};
pub use library::{
    ALL_CATEGORIES, LibraryQuery, Page, PageLink, PodcastQuery, TRANSFORMATION_CATEGORY,
    VideoQuery, categories, page_window, paginate, speakers,
};
pub use normalize::{
    fallback_insights, normalize_article, normalize_external_post, normalize_podcast,
    normalize_video,
};
