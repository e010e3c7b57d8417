use std::{
    io::{IsTerminal, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{FileThemeProvider, HttpResultsSource, Route, ThemePreference, ThemeProvider};
use shared::domain::DriverId;
use tokio::io::BufReader;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod browse;
mod config;
mod pages;
mod render;

use config::{load_settings, Settings};
use render::Palette;

#[derive(Parser, Debug)]
#[command(name = "rally", version, about = "Rallycross events and standings in the terminal")]
struct Cli {
    /// Results API base URL, overriding config and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Settings file to read instead of ./rally.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Disable colors.
    #[arg(long, global = true)]
    plain: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Landing page with the first page of events.
    Home,
    /// Event list, optionally advanced by N "show more" steps.
    Events {
        #[arg(long, default_value_t = 0)]
        more: usize,
    },
    /// Page through events interactively.
    Browse,
    /// One event, looked up by its date (e.g. 2024-07-01).
    Event { date: String },
    /// Every event as a link to its page.
    Menu,
    Standings {
        #[arg(long)]
        driver: Option<i64>,
    },
    About,
    /// API info and health check.
    Status,
    /// Render a site path such as /events/2024-07-01.
    Open { path: String },
    /// Show or change the saved theme: light, dark or toggle.
    Theme { theme: Option<String> },
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_theme(provider: Option<&FileThemeProvider>) -> ThemePreference {
    let Some(provider) = provider else {
        return ThemePreference::default();
    };
    provider.load().unwrap_or_else(|error| {
        warn!(%error, "ignoring unreadable theme preference");
        ThemePreference::default()
    })
}

fn change_theme(
    provider: Option<&FileThemeProvider>,
    current: ThemePreference,
    requested: Option<&str>,
) -> Result<String> {
    let Some(requested) = requested else {
        return Ok(format!("theme: {current}"));
    };
    let provider = provider.context("no config directory available to save the theme")?;

    let next = if requested.eq_ignore_ascii_case("toggle") {
        current.toggled()
    } else {
        requested.parse::<ThemePreference>()?
    };
    provider.store(next)?;
    Ok(format!("theme: {next} (saved to {})", provider.path().display()))
}

fn build_source(settings: &Settings) -> Result<HttpResultsSource> {
    HttpResultsSource::with_timeout(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .with_context(|| format!("cannot use api base url '{}'", settings.api_base_url))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    init_tracing(&settings.log_filter);

    let theme_provider = settings.theme_file.clone().map(FileThemeProvider::new);
    let theme = load_theme(theme_provider.as_ref());
    let palette = Palette::for_theme(theme, !cli.plain && std::io::stdout().is_terminal());

    let source = build_source(&settings)?;
    let output = match cli.command.unwrap_or(Command::Home) {
        Command::Home => pages::route_page(&source, &palette, &Route::Home).await,
        Command::Events { more } => pages::events_page(&source, &palette, more).await,
        Command::Browse => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout().lock();
            browse::run(&source, &palette, stdin, &mut stdout).await?;
            return Ok(());
        }
        Command::Event { date } => {
            pages::route_page(&source, &palette, &Route::EventDetails { date }).await
        }
        Command::Menu => pages::menu_page(&source, &palette).await,
        Command::Standings { driver: None } => {
            pages::route_page(&source, &palette, &Route::Standings).await
        }
        Command::Standings {
            driver: Some(driver_id),
        } => pages::driver_standing_page(&source, &palette, DriverId(driver_id)).await,
        Command::About => pages::route_page(&source, &palette, &Route::About).await,
        Command::Status => pages::status_page(&source, &palette, source.base_url()).await,
        Command::Open { path } => {
            pages::route_page(&source, &palette, &Route::parse(&path)).await
        }
        Command::Theme { theme: requested } => format!(
            "{}\n",
            change_theme(theme_provider.as_ref(), theme, requested.as_deref())?
        ),
    };

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}
