mod app;
mod browser;
#[cfg(test)]
mod test_support;

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use gamefinder_core::{
    config::{self, AppConfig},
    GameApi, GameDetailPage, GameSource, PageState, Route,
};
use tokio::sync::mpsc;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "game-finder")]
#[command(about = "Look up game details from the terminal", long_about = None)]
struct Cli {
    /// Page to open, e.g. `/452` or `452`. Opens the home page when omitted.
    route: Option<String>,

    /// Print the page once instead of starting the terminal UI
    #[arg(long)]
    plain: bool,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.plain)?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => {
            config::ensure_default_config()?;
            AppConfig::load()?
        }
    };
    let route = cli
        .route
        .as_deref()
        .map(Route::parse)
        .unwrap_or(Route::Home);
    let api = GameApi::new(&config)?;

    if cli.plain {
        return print_page(api, route).await;
    }

    let mut app = app::GameFinderApp::new(api);
    app.run(route).await?;
    Ok(ExitCode::SUCCESS)
}

/// Mount the page once, wait for its outcome and print the text view.
async fn print_page(api: GameApi, route: Route) -> Result<ExitCode> {
    let Some(id) = route.game_id() else {
        bail!("--plain needs a game route such as /452, got {route}");
    };

    let output = load_plain(api, id).await;
    for line in &output.lines {
        println!("{line}");
    }
    Ok(output.exit_code())
}

/// Text of a page once its single fetch has settled.
struct PlainOutput {
    lines: Vec<String>,
    loaded: bool,
}

impl PlainOutput {
    fn exit_code(&self) -> ExitCode {
        if self.loaded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

async fn load_plain<S: GameSource>(source: S, id: &str) -> PlainOutput {
    let (page_tx, mut page_rx) = mpsc::channel(1);
    let mut page = GameDetailPage::new(source, page_tx);
    page.mount(id);
    while let Some(event) = page_rx.recv().await {
        if page.apply(event) {
            break;
        }
    }

    PlainOutput {
        lines: page.view().lines(),
        loaded: matches!(page.state(), PageState::Loaded(_)),
    }
}

fn init_logging(plain: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("game-finder.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal UI owns stdout, so console logging is only enabled for plain output.
    let stderr_layer = plain.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticSource;
    use gamefinder_core::page::view::{FAILED_TEXT, NO_REQUIREMENTS_TEXT};

    #[tokio::test]
    async fn loaded_page_prints_details_and_succeeds() {
        let output = load_plain(StaticSource, "452").await;
        assert!(output.loaded);
        assert_eq!(
            format!("{:?}", output.exit_code()),
            format!("{:?}", ExitCode::SUCCESS)
        );
        assert_eq!(output.lines[0], "Sample Online");
        assert!(output.lines.contains(&NO_REQUIREMENTS_TEXT.to_string()));
    }

    #[tokio::test]
    async fn failed_page_prints_failure_and_exits_nonzero() {
        let output = load_plain(StaticSource, "999").await;
        assert!(!output.loaded);
        assert_eq!(
            format!("{:?}", output.exit_code()),
            format!("{:?}", ExitCode::FAILURE)
        );
        assert_eq!(
            output.lines,
            vec![FAILED_TEXT.to_string(), "[Return to home page] /".to_string()]
        );
    }
}
