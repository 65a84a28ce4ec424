//! TMDB (The Movie Database) API client
//!
//! Listings, search, details and genres for movies and TV shows, plus the
//! image and video URL helpers used to render them.
//! API docs: https://developer.themoviedb.org/docs

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Genre, Movie, MovieDetails, TvDetails, TvShow, Video};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const VIDEO_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Default size token for posters
pub const POSTER_SIZE: &str = "w500";
/// Default size token for backdrops
pub const BACKDROP_SIZE: &str = "w1280";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog request failure.
///
/// Transport errors, non-success statuses and undecodable bodies all collapse
/// into `FetchFailed`; the cause is logged, not returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Failed to fetch {endpoint} from TMDB")]
    FetchFailed { endpoint: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_timeout(api_key, base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self::with_http_client(api_key, base_url, client)
    }

    /// Use a preconfigured HTTP client (proxies, custom timeouts, test transports)
    pub fn with_http_client(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `path`, with the API key and URL-encoded parameters
    pub fn request_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Single-attempt GET; every failure becomes `CatalogError::FetchFailed`
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.request_url(path, params);
        debug!(endpoint = path, "TMDB request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| fetch_failed(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(path, format_args!("HTTP {}", status.as_u16())));
        }

        let body = response.text().await.map_err(|e| fetch_failed(path, e))?;
        serde_json::from_str(&body)
            .map_err(|e| fetch_failed(path, format_args!("JSON parse error: {}", e)))
    }

    async fn movie_list(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Movie>> {
        let page: ResultsPage<MovieRaw> = self.get(path, params).await?;
        Ok(page.results.into_iter().map(MovieRaw::into_movie).collect())
    }

    async fn tv_list(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<TvShow>> {
        let page: ResultsPage<TvRaw> = self.get(path, params).await?;
        Ok(page.results.into_iter().map(TvRaw::into_show).collect())
    }

    /// Movies trending this week
    pub async fn trending(&self) -> Result<Vec<Movie>> {
        self.movie_list("/trending/movie/week", &[]).await
    }

    pub async fn popular_movies(&self) -> Result<Vec<Movie>> {
        self.movie_list("/movie/popular", &[]).await
    }

    /// Movies now playing in theaters
    pub async fn new_releases(&self) -> Result<Vec<Movie>> {
        self.movie_list("/movie/now_playing", &[]).await
    }

    pub async fn top_rated(&self) -> Result<Vec<Movie>> {
        self.movie_list("/movie/top_rated", &[]).await
    }

    pub async fn popular_tv_shows(&self) -> Result<Vec<TvShow>> {
        self.tv_list("/tv/popular", &[]).await
    }

    /// Get movie details by ID, with attached videos
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        let endpoint = format!("/movie/{}", id);
        let raw: MovieDetailsRaw = self
            .get(&endpoint, &[("append_to_response", "videos")])
            .await?;
        Ok(raw.into_details())
    }

    /// Get TV show details by ID, with attached videos
    pub async fn tv_details(&self, id: u64) -> Result<TvDetails> {
        let endpoint = format!("/tv/{}", id);
        let raw: TvDetailsRaw = self
            .get(&endpoint, &[("append_to_response", "videos")])
            .await?;
        Ok(raw.into_details())
    }

    /// Search movies by title. A blank query returns no results without a request.
    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.movie_list("/search/movie", &[("query", query)]).await
    }

    /// Search TV shows by name. A blank query returns no results without a request.
    pub async fn search_tv_shows(&self, query: &str) -> Result<Vec<TvShow>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.tv_list("/search/tv", &[("query", query)]).await
    }

    /// Full movie genre vocabulary, in TMDB order
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let list: GenreList = self.get("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }
}

fn fetch_failed(endpoint: &str, cause: impl fmt::Display) -> CatalogError {
    warn!(endpoint, error = %cause, "TMDB fetch failed");
    CatalogError::FetchFailed {
        endpoint: endpoint.to_string(),
    }
}

// =============================================================================
// URL Helpers
// =============================================================================

fn sized_image_url(path: Option<&str>, size: &str) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{}/{}{}", IMAGE_BASE_URL, size, path),
        _ => String::new(),
    }
}

/// Poster image URL; empty string when there is no path. Size defaults to `w500`.
pub fn image_url(path: Option<&str>, size: Option<&str>) -> String {
    sized_image_url(path, size.unwrap_or(POSTER_SIZE))
}

/// Backdrop image URL; empty string when there is no path. Size defaults to `w1280`.
pub fn backdrop_url(path: Option<&str>, size: Option<&str>) -> String {
    sized_image_url(path, size.unwrap_or(BACKDROP_SIZE))
}

/// Watch URL for a video key
pub fn video_url(key: &str) -> String {
    format!("{}{}", VIDEO_WATCH_URL, key)
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct MovieRaw {
    id: u64,
    title: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f32>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    #[serde(default)]
    adult: bool,
    original_language: Option<String>,
}

impl MovieRaw {
    fn into_movie(self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            // TMDB sends "" for unknown dates
            release_date: self.release_date.filter(|d| !d.is_empty()),
            vote_average: self.vote_average.unwrap_or(0.0),
            genre_ids: self.genre_ids,
            adult: self.adult,
            original_language: self.original_language.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TvRaw {
    id: u64,
    name: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f32>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    #[serde(default)]
    origin_country: Vec<String>,
}

impl TvRaw {
    fn into_show(self) -> TvShow {
        TvShow {
            id: self.id,
            name: self.name.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            first_air_date: self.first_air_date.filter(|d| !d.is_empty()),
            vote_average: self.vote_average.unwrap_or(0.0),
            genre_ids: self.genre_ids,
            origin_country: self.origin_country,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideoPage {
    #[serde(default)]
    results: Vec<VideoRaw>,
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    key: String,
    #[serde(default)]
    site: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
}

impl VideoRaw {
    fn into_video(self) -> Video {
        Video {
            key: self.key,
            site: self.site,
            kind: self.kind,
            name: self.name,
        }
    }
}

fn into_videos(page: Option<VideoPage>) -> Vec<Video> {
    page.map(|p| p.results.into_iter().map(VideoRaw::into_video).collect())
        .unwrap_or_default()
}

/// Detail endpoints carry `genres` objects instead of `genre_ids`
fn fill_genre_ids(genre_ids: &mut Vec<u32>, genres: &[Genre]) {
    if genre_ids.is_empty() {
        genre_ids.extend(genres.iter().map(|g| g.id));
    }
}

#[derive(Debug, Deserialize)]
struct MovieDetailsRaw {
    #[serde(flatten)]
    movie: MovieRaw,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    videos: Option<VideoPage>,
}

impl MovieDetailsRaw {
    fn into_details(self) -> MovieDetails {
        let mut movie = self.movie.into_movie();
        fill_genre_ids(&mut movie.genre_ids, &self.genres);

        MovieDetails {
            movie,
            // TMDB reports 0 when the runtime is unknown
            runtime: self.runtime.filter(|r| *r > 0),
            genres: self.genres,
            videos: into_videos(self.videos),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TvDetailsRaw {
    #[serde(flatten)]
    show: TvRaw,
    number_of_seasons: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    videos: Option<VideoPage>,
}

impl TvDetailsRaw {
    fn into_details(self) -> TvDetails {
        let mut show = self.show.into_show();
        fill_genre_ids(&mut show.genre_ids, &self.genres);

        TvDetails {
            show,
            number_of_seasons: self.number_of_seasons,
            genres: self.genres,
            videos: into_videos(self.videos),
        }
    }
}
