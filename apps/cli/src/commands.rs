//! CLI command definitions, routing, and tracing setup.

use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use vanguard_core::{
    Aggregator, ContactForm, ContactSubmitter, EventFilter, EventRecord, FETCH_TIMEOUT, Field,
    LibraryQuery, Page, PageLink, PodcastQuery, SubmitState, VideoQuery, categories,
    display_title, group_by_month, page_window, sort_by_start_date, speakers,
};
use vanguard_feeds::{ContentApi, build_client};
use vanguard_shared::{AppConfig, ContentItem, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Vanguard: content and contact client for the leadership network site.
#[derive(Parser)]
#[command(
    name = "vanguard",
    version,
    about = "Fetch featured insights, browse the library and events, and submit the contact form.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Content API base URL (overrides the config file).
    #[arg(long, env = "VANGUARD_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Show the featured insights (latest article, podcast, video, blog post).
    Insights {
        /// Print JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Submit the contact form.
    Contact {
        /// Full name.
        #[arg(long)]
        name: String,

        /// Email address.
        #[arg(long)]
        email: String,

        /// Company or organization.
        #[arg(long, default_value = "")]
        company: String,

        /// Area of interest: advisory, networking, programs, book, membership, other.
        #[arg(long)]
        interest: Option<String>,

        /// Message body.
        #[arg(long)]
        message: String,
    },

    /// Browse the article library.
    Library {
        /// Search title, teaser, speaker, and type.
        #[arg(short, long)]
        search: Option<String>,

        /// Category filter ("All", "Organizational Transformation", or a type).
        #[arg(short, long)]
        category: Option<String>,

        /// Page number (1-based).
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// List available categories and exit.
        #[arg(long)]
        list_categories: bool,

        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Browse the podcast library.
    Podcasts {
        /// Search title and featured speaker.
        #[arg(short, long)]
        search: Option<String>,

        /// Featured speaker filter (substring).
        #[arg(long)]
        speaker: Option<String>,

        /// Page number (1-based).
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// List featured speakers and exit.
        #[arg(long)]
        list_speakers: bool,

        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Browse the video library.
    Videos {
        /// Search name, description, and speakers.
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based).
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// List upcoming events.
    Events {
        /// Search title and session leader.
        #[arg(short, long)]
        search: Option<String>,

        /// Audience network substring.
        #[arg(long)]
        audience: Option<String>,

        /// Exact location.
        #[arg(long)]
        location: Option<String>,

        /// Only events on this day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,

        /// Group by month.
        #[arg(long)]
        by_month: bool,

        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "vanguard=info",
        1 => "vanguard=debug",
        _ => "vanguard=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let backend_url = cli.backend_url;
    match cli.command {
        Command::Insights { json } => cmd_insights(resolved_config(backend_url)?, json).await,
        Command::Contact {
            name,
            email,
            company,
            interest,
            message,
        } => {
            let mut form = ContactForm::new();
            form.set_field(Field::FullName, &name)?;
            form.set_field(Field::Email, &email)?;
            form.set_field(Field::Company, &company)?;
            form.set_field(Field::InterestArea, interest.as_deref().unwrap_or_default())?;
            form.set_field(Field::Message, &message)?;
            cmd_contact(resolved_config(backend_url)?, form).await
        }
        Command::Library {
            search,
            category,
            page,
            list_categories,
            json,
        } => {
            let query = LibraryQuery {
                search,
                category,
                page,
            };
            cmd_library(resolved_config(backend_url)?, query, list_categories, json).await
        }
        Command::Podcasts {
            search,
            speaker,
            page,
            list_speakers,
            json,
        } => {
            let query = PodcastQuery {
                search,
                speaker,
                page,
            };
            cmd_podcasts(resolved_config(backend_url)?, query, list_speakers, json).await
        }
        Command::Videos { search, page, json } => {
            let query = VideoQuery { search, page };
            cmd_videos(resolved_config(backend_url)?, query, json).await
        }
        Command::Events {
            search,
            audience,
            location,
            date,
            by_month,
            json,
        } => {
            let date = date
                .map(|d| {
                    NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                        .map_err(|e| eyre!("invalid --date '{d}': {e}"))
                })
                .transpose()?;
            let filter = EventFilter {
                search,
                audience,
                location,
                date,
            };
            cmd_events(resolved_config(backend_url)?, filter, by_month, json).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(backend_url).await,
        },
    }
}

/// Config file, with the CLI/env backend override applied and validated.
fn resolved_config(backend_url: Option<String>) -> Result<AppConfig> {
    let config = load_config()?.with_backend_url(backend_url);
    config.validate()?;
    Ok(config)
}

/// Content API client for the listing commands.
fn content_api(config: &AppConfig) -> Result<ContentApi> {
    let client = build_client(Some(FETCH_TIMEOUT))?;
    Ok(ContentApi::new(client, &config.content.backend_url)?)
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_insights(config: AppConfig, json: bool) -> Result<()> {
    let aggregator = Aggregator::new(&config.content)?;

    let progress = spinner("Fetching featured insights")?;
    let items = aggregator.featured_insights().await;
    progress.finish_and_clear();

    info!(count = items.len(), "featured insights");

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!();
    for item in &items {
        print_card(item);
    }
    Ok(())
}

fn print_card(item: &ContentItem) {
    let marker = if item.is_external { " (external)" } else { "" };
    println!("  [{}] {}", item.kind, item.category);
    println!("  {}", item.title);
    println!("  {}", item.description);
    println!("  {} | {}", item.author, item.duration_or_date);
    println!("  {}{marker}", item.link);
    println!();
}

async fn cmd_contact(config: AppConfig, mut form: ContactForm) -> Result<()> {
    let submitter = ContactSubmitter::new(&config.contact)?;

    info!(url = %config.contact.webhook_url, "submitting contact form");

    let progress = spinner(SubmitState::Submitting.message().unwrap_or_default())?;
    let state = form.submit(&submitter).await;
    progress.finish_and_clear();

    let state = state?;
    let message = state.message().unwrap_or_default();
    match state {
        SubmitState::Success => {
            println!("{message}");
            Ok(())
        }
        _ => Err(eyre!("{message}")),
    }
}

async fn cmd_library(
    config: AppConfig,
    query: LibraryQuery,
    list_categories: bool,
    json: bool,
) -> Result<()> {
    let api = content_api(&config)?;

    let progress = spinner("Fetching articles")?;
    let articles = api.articles().await;
    progress.finish_and_clear();
    let articles = articles?;

    if list_categories {
        let cats = categories(&articles);
        if json {
            println!("{}", serde_json::to_string_pretty(&cats)?);
        } else {
            for c in cats {
                println!("  {c}");
            }
        }
        return Ok(());
    }

    let page = query.apply(&articles, config.library.page_size);
    info!(
        matching = page.total_items,
        page = page.page,
        total_pages = page.total_pages,
        "library page"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No articles found. Try adjusting your search or filter criteria.");
        return Ok(());
    }

    println!();
    for article in &page.items {
        let title = article.blog_title.as_deref().unwrap_or("(untitled)");
        let kind = article.type_content.as_deref().unwrap_or("");
        println!("  {title}");
        if !kind.is_empty() {
            println!("    {kind}");
        }
        if let Some(teaser) = article.description_teaser.as_deref() {
            println!("    {teaser}");
        }
        println!();
    }

    print_page_footer(&page, "articles");
    Ok(())
}

async fn cmd_podcasts(
    config: AppConfig,
    query: PodcastQuery,
    list_speakers: bool,
    json: bool,
) -> Result<()> {
    let api = content_api(&config)?;

    let progress = spinner("Fetching podcasts")?;
    let podcasts = api.podcasts().await;
    progress.finish_and_clear();
    let podcasts = podcasts?;

    if list_speakers {
        let names = speakers(&podcasts);
        if json {
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else {
            for name in names {
                println!("  {name}");
            }
        }
        return Ok(());
    }

    let page = query.apply(&podcasts, config.library.page_size);
    info!(
        matching = page.total_items,
        page = page.page,
        total_pages = page.total_pages,
        "podcast page"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No podcasts found. Try adjusting your search or speaker filter.");
        return Ok(());
    }

    println!();
    for podcast in &page.items {
        println!("  {}", podcast.title.as_deref().unwrap_or("(untitled)"));
        let speaker = podcast.featured_speaker.as_deref().unwrap_or_default();
        let duration = podcast.duration.as_deref().unwrap_or_default();
        match (speaker.is_empty(), duration.is_empty()) {
            (false, false) => println!("    {speaker} | {duration}"),
            (false, true) => println!("    {speaker}"),
            (true, false) => println!("    {duration}"),
            (true, true) => {}
        }
        println!();
    }

    print_page_footer(&page, "podcasts");
    Ok(())
}

async fn cmd_videos(config: AppConfig, query: VideoQuery, json: bool) -> Result<()> {
    let api = content_api(&config)?;

    let progress = spinner("Fetching videos")?;
    let videos = api.videos().await;
    progress.finish_and_clear();
    let videos = videos?;

    let page = query.apply(&videos, config.library.page_size);
    info!(
        matching = page.total_items,
        page = page.page,
        total_pages = page.total_pages,
        "video page"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No videos found. Try adjusting your search.");
        return Ok(());
    }

    println!();
    for video in &page.items {
        println!("  {}", video.vimeo_name.as_deref().unwrap_or("(untitled)"));
        if let Some(names) = video.featured_speakers.as_deref() {
            println!("    {names}");
        }
        if let Some(description) = video.video_description.as_deref() {
            println!("    {description}");
        }
        println!();
    }

    print_page_footer(&page, "videos");
    Ok(())
}

/// Page-number strip with the current page bracketed.
fn page_strip(current: usize, total_pages: usize) -> String {
    page_window(current, total_pages)
        .into_iter()
        .map(|link| match link {
            PageLink::Number(n) if n == current => format!("[{n}]"),
            PageLink::Number(n) => n.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_page_footer<T>(page: &Page<T>, noun: &str) {
    if page.has_pagination() {
        println!("  Page {}", page_strip(page.page, page.total_pages));
    }
    println!(
        "  Showing {} of {} {noun}",
        page.items.len(),
        page.total_items
    );
}

async fn cmd_events(
    config: AppConfig,
    filter: EventFilter,
    by_month: bool,
    json: bool,
) -> Result<()> {
    let api = content_api(&config)?;

    let progress = spinner("Fetching upcoming events")?;
    let events = api.events().await;
    progress.finish_and_clear();
    let mut events = events?;

    sort_by_start_date(&mut events);
    let matching = filter.apply(&events);
    info!(total = events.len(), matching = matching.len(), "events loaded");

    if by_month {
        let groups = group_by_month(matching.iter().copied());
        if json {
            println!("{}", serde_json::to_string_pretty(&groups)?);
            return Ok(());
        }
        for group in &groups {
            println!();
            println!("  {}", group.label);
            for event in &group.events {
                print_event(event);
            }
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&matching)?);
        return Ok(());
    }

    if matching.is_empty() {
        println!("No events match the current filters.");
        return Ok(());
    }

    println!();
    for event in &matching {
        print_event(event);
    }
    Ok(())
}

fn print_event(event: &EventRecord) {
    let when = event.start_date.as_deref().unwrap_or("date TBD");
    println!("  {when}  {}", display_title(event));
    if let Some(leader) = event.session_leader_name.as_deref() {
        println!("    Led by {leader}");
    }
    if let Some(location) = event.location.as_deref() {
        println!("    {location}");
    }
    if let Some(link) = event.signup_link() {
        println!("    {link}");
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(backend_url: Option<String>) -> Result<()> {
    let config: AppConfig = load_config()?.with_backend_url(backend_url);
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_podcast_filters() {
        let cli = Cli::try_parse_from([
            "vanguard", "podcasts", "--search", "board", "--speaker", "Jane", "-p", "2",
        ])
        .unwrap();
        match cli.command {
            Command::Podcasts {
                search,
                speaker,
                page,
                list_speakers,
                json,
            } => {
                assert_eq!(search.as_deref(), Some("board"));
                assert_eq!(speaker.as_deref(), Some("Jane"));
                assert_eq!(page, 2);
                assert!(!list_speakers && !json);
            }
            _ => panic!("expected podcasts"),
        }
    }

    #[test]
    fn parses_video_search_with_default_page() {
        let cli = Cli::try_parse_from(["vanguard", "videos", "-s", "fireside", "--json"]).unwrap();
        match cli.command {
            Command::Videos { search, page, json } => {
                assert_eq!(search.as_deref(), Some("fireside"));
                assert_eq!(page, 1);
                assert!(json);
            }
            _ => panic!("expected videos"),
        }
    }

    #[test]
    fn page_strip_brackets_current_page() {
        assert_eq!(page_strip(1, 3), "[1] 2 3");
        assert_eq!(page_strip(5, 10), "1 ... 3 4 [5] 6 7 ... 10");
    }

    #[test]
    fn content_api_uses_configured_backend() {
        let mut config = AppConfig::default();
        config.content.backend_url = "https://api.example.com".into();
        assert!(content_api(&config).is_ok());

        config.content.backend_url = "not a url".into();
        assert!(content_api(&config).is_err());
    }
}
