//! FlixGlow - streaming catalog core
//!
//! The two pieces a catalog browsing front end talks to: an in-memory
//! session store for sign-in and watch history, and a typed client for
//! The Movie Database.
//!
//! # Modules
//!
//! - `models` - Catalog records, sessions and subscription plans
//! - `session` - Session store (sign-in, profile, watch history, plans)
//! - `api` - TMDB client, home feed and genre cache
//! - `config` - Config file and API key lookup
//! - `cli` / `commands` - Command-line front end
//! - `logging` - Tracing subscriber setup for the binary

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use models::{
    CatalogItem, Genre, MediaType, Movie, MovieDetails, Plan, ProfileUpdate, Session, TvDetails,
    TvShow, Video,
};

pub use api::{CatalogError, GenreCache, HomeFeed, TmdbClient};
pub use config::Config;
pub use session::SessionStore;
