//! Catalog access
//!
//! - TMDB: movie/TV listings, search, details, genres and image URLs
//! - Feed: concurrent home listings and the per-screen genre cache

pub mod feed;
pub mod tmdb;

pub use feed::{fetch_home_feed, GenreCache, HomeFeed};
pub use tmdb::{backdrop_url, image_url, video_url, CatalogError, TmdbClient};
