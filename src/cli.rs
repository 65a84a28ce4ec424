//! CLI - Command Line Interface for FlixGlow
//!
//! Browses the TMDB catalog from the terminal. Every listing is available as
//! human-readable lines or as JSON for scripting.
//!
//! # Examples
//!
//! ```bash
//! flixglow trending --limit 5
//! flixglow search "blade runner" -t tv --json
//! flixglow movie 414906
//! flixglow image-url /abc.jpg --size w342
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Display;
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments or configuration
    InvalidArgs = 2,
    /// Catalog fetch failed
    NetworkError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// FlixGlow - streaming catalog browser
#[derive(Parser, Debug)]
#[command(
    name = "flixglow",
    version,
    about = "Browse the FlixGlow streaming catalog",
    after_help = "EXAMPLES:\n\
                  flixglow home                       Home screen listings\n\
                  flixglow search \"dune\"              Search movies\n\
                  flixglow tv 1396 --json             TV show details as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Movies trending this week
    #[command(visible_alias = "tr")]
    Trending(ListCmd),

    /// Popular movies
    Popular(ListCmd),

    /// Movies now playing
    #[command(visible_alias = "new")]
    NewReleases(ListCmd),

    /// Top rated movies
    TopRated(ListCmd),

    /// Popular TV shows
    TvPopular(ListCmd),

    /// All home screen listings at once
    Home(HomeCmd),

    /// Search movies or TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Movie details
    Movie(DetailCmd),

    /// TV show details
    Tv(DetailCmd),

    /// Movie genre list
    Genres(GenresCmd),

    /// Build a poster or backdrop image URL
    ImageUrl(ImageUrlCmd),

    /// Subscription plans
    Plans(PlansCmd),
}

/// Options shared by the single-listing commands
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Fetch every home listing concurrently
#[derive(Args, Debug)]
pub struct HomeCmd {
    /// Maximum number of results per listing
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

/// Search by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// What to search
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeFilter,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Media type selector for search
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaTypeFilter {
    /// Movies
    #[default]
    Movie,
    /// TV shows
    Tv,
}

/// Details for one catalog item
#[derive(Args, Debug)]
pub struct DetailCmd {
    /// TMDB ID
    #[arg(required = true)]
    pub id: u64,
}

/// List movie genres
#[derive(Args, Debug)]
pub struct GenresCmd {}

/// Build an image URL from a TMDB image path
#[derive(Args, Debug)]
pub struct ImageUrlCmd {
    /// Image path as returned by TMDB (e.g. /abc.jpg)
    pub path: String,

    /// Size token (w342, w500, w1280, original...)
    #[arg(long, short = 's')]
    pub size: Option<String>,

    /// Use the backdrop default size instead of the poster one
    #[arg(long, short = 'b')]
    pub backdrop: bool,
}

/// List subscription plans
#[derive(Args, Debug)]
pub struct PlansCmd {}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a list: JSON when requested, otherwise one line per item
    pub fn print_list<T: Serialize + Display>(&self, items: &[T]) -> anyhow::Result<()> {
        if self.json {
            return self.print(items);
        }
        for item in items {
            println!("{}", item);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
