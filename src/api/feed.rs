//! Home feed aggregation and genre lookup
//!
//! The home screen shows five independent listings. They are fetched
//! concurrently and each slot keeps its own result, so one failing endpoint
//! leaves the others intact.

use tracing::{debug, warn};

use super::tmdb::{Result, TmdbClient};
use crate::models::{Genre, Movie, TvShow};

/// Number of trending movies promoted to the featured carousel
pub const FEATURED_COUNT: usize = 5;

const HOME_SLOTS: usize = 5;

/// Results of the five home listings, one slot per endpoint
#[derive(Debug)]
pub struct HomeFeed {
    pub trending: Result<Vec<Movie>>,
    pub popular_movies: Result<Vec<Movie>>,
    pub new_releases: Result<Vec<Movie>>,
    pub top_rated: Result<Vec<Movie>>,
    pub popular_tv_shows: Result<Vec<TvShow>>,
}

fn or_empty<T>(slot: &Result<Vec<T>>) -> &[T] {
    match slot {
        Ok(items) => items,
        Err(_) => &[],
    }
}

impl HomeFeed {
    /// First trending movies, for the featured carousel
    pub fn featured(&self) -> &[Movie] {
        let trending = self.trending_or_empty();
        &trending[..trending.len().min(FEATURED_COUNT)]
    }

    pub fn trending_or_empty(&self) -> &[Movie] {
        or_empty(&self.trending)
    }

    pub fn popular_movies_or_empty(&self) -> &[Movie] {
        or_empty(&self.popular_movies)
    }

    pub fn new_releases_or_empty(&self) -> &[Movie] {
        or_empty(&self.new_releases)
    }

    pub fn top_rated_or_empty(&self) -> &[Movie] {
        or_empty(&self.top_rated)
    }

    pub fn popular_tv_shows_or_empty(&self) -> &[TvShow] {
        or_empty(&self.popular_tv_shows)
    }

    /// Names of the slots whose fetch failed
    pub fn failed_slots(&self) -> Vec<&'static str> {
        let slots = [
            ("trending", self.trending.is_err()),
            ("popular_movies", self.popular_movies.is_err()),
            ("new_releases", self.new_releases.is_err()),
            ("top_rated", self.top_rated.is_err()),
            ("popular_tv_shows", self.popular_tv_shows.is_err()),
        ];
        slots
            .into_iter()
            .filter(|(_, failed)| *failed)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed_slots().is_empty()
    }

    pub fn all_failed(&self) -> bool {
        self.failed_slots().len() == HOME_SLOTS
    }
}

/// Fetch all five home listings concurrently
pub async fn fetch_home_feed(client: &TmdbClient) -> HomeFeed {
    let (trending, popular_movies, new_releases, top_rated, popular_tv_shows) = tokio::join!(
        client.trending(),
        client.popular_movies(),
        client.new_releases(),
        client.top_rated(),
        client.popular_tv_shows(),
    );

    let feed = HomeFeed {
        trending,
        popular_movies,
        new_releases,
        top_rated,
        popular_tv_shows,
    };

    let failed = feed.failed_slots();
    if failed.is_empty() {
        debug!("home feed loaded");
    } else {
        warn!(?failed, "home feed partially loaded");
    }
    feed
}

/// Genre vocabulary fetched once per screen and served from memory afterwards
#[derive(Debug, Default)]
pub struct GenreCache {
    genres: Option<Vec<Genre>>,
}

impl GenreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached genres, fetching them on first use. Failures are not cached.
    pub async fn get_or_fetch(&mut self, client: &TmdbClient) -> Result<&[Genre]> {
        if self.genres.is_none() {
            let fetched = client.genres().await?;
            debug!(count = fetched.len(), "genres cached");
            self.genres = Some(fetched);
        }
        Ok(self.genres.as_deref().unwrap_or(&[]))
    }

    pub fn cached(&self) -> Option<&[Genre]> {
        self.genres.as_deref()
    }

    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.genres
            .as_deref()?
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    /// Names for `ids`, skipping unknown ids
    pub fn names_for(&self, ids: &[u32]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.name_of(*id)).collect()
    }

    pub fn clear(&mut self) {
        self.genres = None;
    }
}
