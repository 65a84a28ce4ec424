//! FlixGlow - streaming catalog browser
//!
//! # Usage
//!
//! ```bash
//! flixglow home
//! flixglow search "blade runner" -t tv
//! flixglow movie 414906 --json
//! ```

use clap::Parser;

use flixglow::cli::{Cli, Command, ExitCode, Output};
use flixglow::commands::{self, Listing};
use flixglow::config::Config;
use flixglow::logging;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    run_cli(cli).await.into()
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
        },
        None => Config::load(),
    };

    match cli.command {
        Command::Trending(cmd) => commands::list_cmd(Listing::Trending, cmd, &config, &output).await,

        Command::Popular(cmd) => {
            commands::list_cmd(Listing::PopularMovies, cmd, &config, &output).await
        }

        Command::NewReleases(cmd) => {
            commands::list_cmd(Listing::NewReleases, cmd, &config, &output).await
        }

        Command::TopRated(cmd) => commands::list_cmd(Listing::TopRated, cmd, &config, &output).await,

        Command::TvPopular(cmd) => {
            commands::list_cmd(Listing::PopularTvShows, cmd, &config, &output).await
        }

        Command::Home(cmd) => commands::home_cmd(cmd, &config, &output).await,

        Command::Search(cmd) => commands::search_cmd(cmd, &config, &output).await,

        Command::Movie(cmd) => commands::movie_cmd(cmd, &config, &output).await,

        Command::Tv(cmd) => commands::tv_cmd(cmd, &config, &output).await,

        Command::Genres(cmd) => commands::genres_cmd(cmd, &config, &output).await,

        Command::ImageUrl(cmd) => commands::image_url_cmd(cmd, &output),

        Command::Plans(cmd) => commands::plans_cmd(cmd, &output),
    }
}
