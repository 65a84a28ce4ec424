//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the catalog client.
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use std::fmt;

use crate::api::feed::FEATURED_COUNT;
use crate::api::{backdrop_url, fetch_home_feed, image_url, CatalogError, HomeFeed, TmdbClient};
use crate::cli::{
    DetailCmd, ExitCode, GenresCmd, HomeCmd, ImageUrlCmd, ListCmd, MediaTypeFilter, Output,
    PlansCmd, SearchCmd,
};
use crate::config::Config;
use crate::models::{CatalogItem, Genre, Plan};

/// Which single listing a `ListCmd` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Trending,
    PopularMovies,
    NewReleases,
    TopRated,
    PopularTvShows,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Trending => write!(f, "trending movies"),
            Listing::PopularMovies => write!(f, "popular movies"),
            Listing::NewReleases => write!(f, "new releases"),
            Listing::TopRated => write!(f, "top rated movies"),
            Listing::PopularTvShows => write!(f, "popular TV shows"),
        }
    }
}

/// Build the catalog client, reporting configuration problems as InvalidArgs
fn client(config: &Config, output: &Output) -> Result<TmdbClient, ExitCode> {
    config
        .tmdb_client()
        .map_err(|e| output.error(e.to_string(), ExitCode::InvalidArgs))
}

fn print_list<T: Serialize + fmt::Display>(items: &[T], output: &Output) -> ExitCode {
    match output.print_list(items) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn print_data<T: Serialize>(data: T, output: &Output) -> ExitCode {
    match output.print(data) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn network_error(err: CatalogError, output: &Output) -> ExitCode {
    output.error(err.to_string(), ExitCode::NetworkError)
}

// =============================================================================
// Listing Commands
// =============================================================================

/// First `limit` items of a movie or TV listing, tagged with their media type
fn catalog_items<T>(items: &[T], limit: usize) -> Vec<CatalogItem>
where
    T: Clone + Into<CatalogItem>,
{
    items.iter().take(limit).cloned().map(Into::<CatalogItem>::into).collect()
}

pub async fn list_cmd(listing: Listing, cmd: ListCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info(format!("Fetching {}...", listing));

    let items = match listing {
        Listing::Trending => client.trending().await.map(|m| catalog_items(&m, cmd.limit)),
        Listing::PopularMovies => client
            .popular_movies()
            .await
            .map(|m| catalog_items(&m, cmd.limit)),
        Listing::NewReleases => client
            .new_releases()
            .await
            .map(|m| catalog_items(&m, cmd.limit)),
        Listing::TopRated => client.top_rated().await.map(|m| catalog_items(&m, cmd.limit)),
        Listing::PopularTvShows => client
            .popular_tv_shows()
            .await
            .map(|t| catalog_items(&t, cmd.limit)),
    };

    match items {
        Ok(items) => print_list(&items, output),
        Err(e) => network_error(e, output),
    }
}

// =============================================================================
// Home Command
// =============================================================================

/// Serializable view of the home feed; failed slots are empty and listed in `failed`
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub featured: Vec<CatalogItem>,
    pub trending: Vec<CatalogItem>,
    pub popular_movies: Vec<CatalogItem>,
    pub new_releases: Vec<CatalogItem>,
    pub top_rated: Vec<CatalogItem>,
    pub popular_tv_shows: Vec<CatalogItem>,
    pub failed: Vec<&'static str>,
}

impl HomeView {
    /// Build the view, keeping at most `limit` items per listing
    pub fn new(feed: &HomeFeed, limit: usize) -> Self {
        Self {
            featured: catalog_items(feed.featured(), FEATURED_COUNT),
            trending: catalog_items(feed.trending_or_empty(), limit),
            popular_movies: catalog_items(feed.popular_movies_or_empty(), limit),
            new_releases: catalog_items(feed.new_releases_or_empty(), limit),
            top_rated: catalog_items(feed.top_rated_or_empty(), limit),
            popular_tv_shows: catalog_items(feed.popular_tv_shows_or_empty(), limit),
            failed: feed.failed_slots(),
        }
    }

    fn sections(&self) -> [(&'static str, &[CatalogItem]); 6] {
        [
            ("Featured", self.featured.as_slice()),
            ("Trending", self.trending.as_slice()),
            ("Popular Movies", self.popular_movies.as_slice()),
            ("New Releases", self.new_releases.as_slice()),
            ("Top Rated", self.top_rated.as_slice()),
            ("Popular TV Shows", self.popular_tv_shows.as_slice()),
        ]
    }
}

fn print_section(title: &str, items: &[CatalogItem]) {
    println!("== {} ==", title);
    for item in items {
        match item.year() {
            Some(year) => println!("  {:>8}  {} ({})", item.id(), item.title(), year),
            None => println!("  {:>8}  {}", item.id(), item.title()),
        }
    }
}

pub async fn home_cmd(cmd: HomeCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info("Loading home feed...");
    let feed = fetch_home_feed(&client).await;
    if feed.all_failed() {
        return output.error("Failed to load any home listing", ExitCode::NetworkError);
    }

    let view = HomeView::new(&feed, cmd.limit);
    if output.json {
        return print_data(&view, output);
    }

    for (title, items) in view.sections() {
        print_section(title, items);
    }
    if !view.failed.is_empty() {
        output.info(format!("Unavailable: {}", view.failed.join(", ")));
    }
    ExitCode::Success
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }

    let client = match client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info(format!("Searching for: {}", cmd.query.trim()));

    let results = match cmd.media_type {
        MediaTypeFilter::Movie => client
            .search_movies(&cmd.query)
            .await
            .map(|m| catalog_items(&m, cmd.limit)),
        MediaTypeFilter::Tv => client
            .search_tv_shows(&cmd.query)
            .await
            .map(|t| catalog_items(&t, cmd.limit)),
    };

    match results {
        Ok(items) => print_list(&items, output),
        Err(e) => network_error(e, output),
    }
}

// =============================================================================
// Detail Commands
// =============================================================================

fn print_detail_footer(genres: &[Genre], overview: &str, trailer_key: Option<&str>) {
    if !genres.is_empty() {
        let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
        println!("Genres: {}", names.join(", "));
    }
    if !overview.is_empty() {
        println!("\n{}", overview);
    }
    if let Some(key) = trailer_key {
        println!("\nTrailer: {}", crate::api::video_url(key));
    }
}

pub async fn movie_cmd(cmd: DetailCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    match client.movie_details(cmd.id).await {
        Ok(details) => {
            if output.json {
                return print_data(&details, output);
            }
            println!("{}", details);
            print_detail_footer(
                &details.genres,
                &details.movie.overview,
                details.trailer().map(|v| v.key.as_str()),
            );
            ExitCode::Success
        }
        Err(e) => network_error(e, output),
    }
}

pub async fn tv_cmd(cmd: DetailCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    match client.tv_details(cmd.id).await {
        Ok(details) => {
            if output.json {
                return print_data(&details, output);
            }
            println!("{}", details);
            print_detail_footer(
                &details.genres,
                &details.show.overview,
                details.trailer().map(|v| v.key.as_str()),
            );
            ExitCode::Success
        }
        Err(e) => network_error(e, output),
    }
}

// =============================================================================
// Genres Command
// =============================================================================

pub async fn genres_cmd(_cmd: GenresCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    match client.genres().await {
        Ok(genres) => print_list(&genres, output),
        Err(e) => network_error(e, output),
    }
}

// =============================================================================
// Image URL Command
// =============================================================================

pub fn image_url_cmd(cmd: ImageUrlCmd, output: &Output) -> ExitCode {
    let size = cmd.size.as_deref();
    let url = if cmd.backdrop {
        backdrop_url(Some(&cmd.path), size)
    } else {
        image_url(Some(&cmd.path), size)
    };

    if url.is_empty() {
        return output.error("Image path must not be empty", ExitCode::InvalidArgs);
    }

    if output.json {
        print_data(&url, output)
    } else {
        println!("{}", url);
        ExitCode::Success
    }
}

// =============================================================================
// Plans Command
// =============================================================================

/// Plan entry as shown on the subscription screen
#[derive(Debug, Serialize)]
pub struct PlanInfo {
    pub id: Plan,
    pub name: &'static str,
    pub monthly_price: f64,
    pub popular: bool,
    pub features: &'static [&'static str],
}

impl From<Plan> for PlanInfo {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan,
            name: plan.display_name(),
            monthly_price: plan.monthly_price(),
            popular: plan.is_popular(),
            features: plan.features(),
        }
    }
}

impl fmt::Display for PlanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let badge = if self.popular { " (most popular)" } else { "" };
        write!(f, "{} - R${:.2}/month{}", self.name, self.monthly_price, badge)?;
        for feature in self.features {
            write!(f, "\n  - {}", feature)?;
        }
        Ok(())
    }
}

pub fn plans_cmd(_cmd: PlansCmd, output: &Output) -> ExitCode {
    let plans: Vec<PlanInfo> = Plan::ALL.into_iter().map(PlanInfo::from).collect();
    print_list(&plans, output)
}
