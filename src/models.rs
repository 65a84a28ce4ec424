//! Data structures and types for FlixGlow
//!
//! Shared models organized by domain:
//! - **Catalog**: TMDB movies, TV shows, genres and videos
//! - **Account**: the signed-in session and subscription plans

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum number of entries kept in a session's watch history
pub const WATCH_HISTORY_LIMIT: usize = 50;

// =============================================================================
// Catalog Models (TMDB)
// =============================================================================

/// Media type discriminator for catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

/// Movie record as returned by TMDB listing and search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub genre_ids: Vec<u32>,
    pub adult: bool,
    pub original_language: String,
}

impl Movie {
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} - ⭐ {:.1}", self.title, year_str, self.vote_average)
    }
}

/// TV show record as returned by TMDB listing and search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: f32,
    pub genre_ids: Vec<u32>,
    pub origin_country: Vec<String>,
}

impl TvShow {
    pub fn year(&self) -> Option<u16> {
        self.first_air_date.as_deref().and_then(extract_year)
    }
}

impl fmt::Display for TvShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} - ⭐ {:.1}", self.name, year_str, self.vote_average)
    }
}

/// A movie or a TV show, as shown side by side in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum CatalogItem {
    Movie(Movie),
    Tv(TvShow),
}

impl CatalogItem {
    pub fn id(&self) -> u64 {
        match self {
            CatalogItem::Movie(m) => m.id,
            CatalogItem::Tv(t) => t.id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            CatalogItem::Movie(_) => MediaType::Movie,
            CatalogItem::Tv(_) => MediaType::Tv,
        }
    }

    /// Display title (`title` for movies, `name` for shows)
    pub fn title(&self) -> &str {
        match self {
            CatalogItem::Movie(m) => &m.title,
            CatalogItem::Tv(t) => &t.name,
        }
    }

    pub fn overview(&self) -> &str {
        match self {
            CatalogItem::Movie(m) => &m.overview,
            CatalogItem::Tv(t) => &t.overview,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            CatalogItem::Movie(m) => m.poster_path.as_deref(),
            CatalogItem::Tv(t) => t.poster_path.as_deref(),
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            CatalogItem::Movie(m) => m.backdrop_path.as_deref(),
            CatalogItem::Tv(t) => t.backdrop_path.as_deref(),
        }
    }

    pub fn vote_average(&self) -> f32 {
        match self {
            CatalogItem::Movie(m) => m.vote_average,
            CatalogItem::Tv(t) => t.vote_average,
        }
    }

    pub fn genre_ids(&self) -> &[u32] {
        match self {
            CatalogItem::Movie(m) => &m.genre_ids,
            CatalogItem::Tv(t) => &t.genre_ids,
        }
    }

    /// Release year (movies) or first air year (shows)
    pub fn year(&self) -> Option<u16> {
        match self {
            CatalogItem::Movie(m) => m.year(),
            CatalogItem::Tv(t) => t.year(),
        }
    }
}

impl From<Movie> for CatalogItem {
    fn from(movie: Movie) -> Self {
        CatalogItem::Movie(movie)
    }
}

impl From<TvShow> for CatalogItem {
    fn from(show: TvShow) -> Self {
        CatalogItem::Tv(show)
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title(), year_str, self.media_type())
    }
}

/// Genre vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}  {}", self.id, self.name)
    }
}

/// Video attached to a movie or show (trailers, teasers, clips)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    /// TMDB `type` field ("Trailer", "Teaser", "Clip", ...)
    pub kind: String,
    pub name: String,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }
}

/// Pick the video to play as a trailer: first YouTube trailer, else first YouTube video
fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| v.is_youtube() && v.kind == "Trailer")
        .or_else(|| videos.iter().find(|v| v.is_youtube()))
}

/// Detailed movie information from TMDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub movie: Movie,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub videos: Vec<Video>,
}

impl MovieDetails {
    pub fn trailer(&self) -> Option<&Video> {
        pick_trailer(&self.videos)
    }
}

impl fmt::Display for MovieDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.runtime {
            Some(runtime) => write!(f, "{} - {}h {}m", self.movie, runtime / 60, runtime % 60),
            None => write!(f, "{}", self.movie),
        }
    }
}

/// Detailed TV show information from TMDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetails {
    pub show: TvShow,
    pub number_of_seasons: Option<u32>,
    pub genres: Vec<Genre>,
    pub videos: Vec<Video>,
}

impl TvDetails {
    pub fn trailer(&self) -> Option<&Video> {
        pick_trailer(&self.videos)
    }
}

impl fmt::Display for TvDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number_of_seasons {
            Some(seasons) => write!(f, "{} - {} seasons", self.show, seasons),
            None => write!(f, "{}", self.show),
        }
    }
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

// =============================================================================
// Account Models
// =============================================================================

/// Subscription tier. Informational only: nothing enforces entitlements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Basic,
    Standard,
    Premium,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Standard, Plan::Premium];

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Standard => "Standard",
            Plan::Premium => "Premium",
        }
    }

    /// Monthly price in BRL
    pub fn monthly_price(&self) -> f64 {
        match self {
            Plan::Basic => 19.99,
            Plan::Standard => 29.99,
            Plan::Premium => 39.99,
        }
    }

    /// Highlighted as the recommended plan
    pub fn is_popular(&self) -> bool {
        matches!(self, Plan::Standard)
    }

    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Plan::Basic => &[
                "HD streaming",
                "1 device at a time",
                "Limited selection",
                "Basic support",
            ],
            Plan::Standard => &[
                "Full HD streaming",
                "2 simultaneous devices",
                "Full library",
                "Priority support",
                "Offline downloads",
            ],
            Plan::Premium => &[
                "4K Ultra HD streaming",
                "4 simultaneous devices",
                "Exclusive early access",
                "24/7 VIP support",
                "Unlimited downloads",
                "Ad-free experience",
            ],
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The signed-in user. Lives only as long as the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub plan: Plan,
    /// Content ids, most recent first, no duplicates
    pub watch_history: Vec<String>,
}

impl Session {
    /// New session on the basic plan with an empty history
    pub fn new(id: Uuid, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            plan: Plan::Basic,
            watch_history: Vec::new(),
        }
    }

    /// Record a watched item. Returns false when it was already in the history.
    pub fn record_watch(&mut self, item_id: &str) -> bool {
        if self.watch_history.iter().any(|id| id == item_id) {
            return false;
        }
        self.watch_history.insert(0, item_id.to_string());
        self.watch_history.truncate(WATCH_HISTORY_LIMIT);
        true
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> [{}]", self.name, self.email, self.plan)
    }
}

/// Fields to merge into the current session. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub plan: Option<Plan>,
}

impl ProfileUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn plan(plan: Plan) -> Self {
        Self {
            plan: Some(plan),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.plan.is_none()
    }

    pub(crate) fn apply(self, session: &mut Session) {
        if let Some(email) = self.email {
            session.email = email;
        }
        if let Some(name) = self.name {
            session.name = name;
        }
        if let Some(plan) = self.plan {
            session.plan = plan;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
