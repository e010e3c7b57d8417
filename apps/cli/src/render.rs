//! Text rendering of screens as cards and lists.

use std::fmt::Write as _;

use chrono::{Datelike, Local, NaiveDate};
use client_core::{EventListView, EventsMenu, FetchState, Route, ThemePreference};
use owo_colors::{OwoColorize, Style};
use shared::{
    domain::{DriverId, DriverStanding, EventDetail, Standing},
    protocol::{ApiInfo, HealthStatus},
};

const APP_TITLE: &str = "Race Standings App";
const NAME_COLUMN_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    colored: bool,
    heading: Style,
    accent: Style,
    muted: Style,
    error: Style,
    good: Style,
}

impl Palette {
    pub fn for_theme(theme: ThemePreference, colored: bool) -> Self {
        match theme {
            ThemePreference::Light => Self {
                colored,
                heading: Style::new().black().bold(),
                accent: Style::new().blue(),
                muted: Style::new().bright_black(),
                error: Style::new().red(),
                good: Style::new().green(),
            },
            ThemePreference::Dark => Self {
                colored,
                heading: Style::new().bright_white().bold(),
                accent: Style::new().bright_blue(),
                muted: Style::new().white().dimmed(),
                error: Style::new().bright_red(),
                good: Style::new().bright_green(),
            },
        }
    }

    pub fn plain() -> Self {
        Self::for_theme(ThemePreference::Light, false)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(self.heading, text)
    }

    fn accent(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    fn muted(&self, text: &str) -> String {
        self.paint(self.muted, text)
    }

    fn error(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    fn good(&self, text: &str) -> String {
        self.paint(self.good, text)
    }
}

/// Long human form of an API date, falling back to the raw text.
pub fn display_date(raw: &str) -> String {
    match shared::domain::parse_event_date(raw) {
        Some(date) => long_date(date),
        None => raw.to_string(),
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn card(palette: &Palette, title: &str, description: Option<&str>, body: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.heading(title));
    if let Some(description) = description {
        let _ = writeln!(out, "{}", palette.muted(description));
    }
    let _ = writeln!(out, "{}", palette.muted(&"-".repeat(title.len().max(24))));
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn header(palette: &Palette, current: &Route) -> String {
    let links: Vec<String> = Route::navigation()
        .into_iter()
        .map(|link| {
            if &link.route == current {
                palette.accent(&format!("[{}]", link.label))
            } else {
                link.label.to_string()
            }
        })
        .collect();
    format!("{}  |  {}\n", palette.heading(APP_TITLE), links.join("  "))
}

pub fn footer(palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.muted("1500 FM 1466, Coupland, TX 78615"));
    let _ = writeln!(out, "{}", palette.muted("Josh@AustinRallyProject.com"));
    let _ = writeln!(
        out,
        "{}",
        palette.muted(&format!("(c) {} {APP_TITLE}", Local::now().year()))
    );
    out
}

pub fn layout(palette: &Palette, route: &Route, body: &str) -> String {
    format!(
        "{}\n{}\n{}",
        header(palette, route),
        body.trim_end_matches('\n'),
        footer(palette)
    )
}

pub fn event_list(palette: &Palette, view: &EventListView<'_>, show_hints: bool) -> String {
    let mut body = String::new();
    match view {
        EventListView::Loading => {
            let _ = writeln!(body, "{}", palette.muted("Loading events..."));
        }
        EventListView::Failed(message) => {
            let _ = writeln!(body, "{}", palette.error(&format!("Error: {message}")));
        }
        EventListView::Empty => {
            let _ = writeln!(body, "{}", palette.muted("No upcoming events"));
        }
        EventListView::Events {
            visible,
            count_label,
            show_controls,
            show_more_enabled,
            show_less_enabled,
        } => {
            for (index, event) in visible.iter().enumerate() {
                let _ = writeln!(
                    body,
                    "{:>3}. {:<width$} {}",
                    index + 1,
                    event.name,
                    palette.accent(&event.date),
                    width = NAME_COLUMN_WIDTH
                );
            }
            if let Some(label) = count_label {
                let _ = writeln!(body, "{}", palette.muted(label));
            }
            if *show_controls && show_hints {
                let mut controls = Vec::new();
                if *show_more_enabled {
                    controls.push("[m] Show More");
                }
                if *show_less_enabled {
                    controls.push("[l] Show Less");
                }
                if !controls.is_empty() {
                    let _ = writeln!(body, "{}", controls.join("  "));
                }
            }
        }
    }

    card(
        palette,
        "Rally Events",
        Some("View event details and live race updates."),
        &body,
    )
}

pub fn event_detail(palette: &Palette, state: &FetchState<EventDetail>) -> String {
    let body = match state {
        FetchState::Loading => palette.muted("Loading..."),
        FetchState::Failed(message) => palette.error(&format!("Error: {message}")),
        FetchState::Loaded(detail) => format!(
            "{}\n{}",
            palette.heading(&detail.name),
            palette.accent(&display_date(&detail.date))
        ),
    };
    card(palette, "Event Details", None, &body)
}

pub fn standings(palette: &Palette, state: &FetchState<Vec<Standing>>) -> String {
    let body = match state {
        FetchState::Loading => palette.muted("Loading..."),
        FetchState::Failed(message) => palette.error(&format!("Error: {message}")),
        FetchState::Loaded(rows) if rows.is_empty() => palette.muted("No standings yet"),
        FetchState::Loaded(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{}  {:<width$} {}",
                    palette.heading(&format!("{:>3}", row.position)),
                    row.driver,
                    palette.accent(&format!("{} pts", row.points)),
                    width = NAME_COLUMN_WIDTH
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    card(
        palette,
        "Current Championship Standings",
        Some("Latest driver rankings and points"),
        &body,
    )
}

pub fn driver_standing(
    palette: &Palette,
    driver_id: DriverId,
    state: &FetchState<DriverStanding>,
) -> String {
    let body = match state {
        FetchState::Loading => palette.muted("Loading..."),
        FetchState::Failed(message) => palette.error(&format!("Error: {message}")),
        FetchState::Loaded(standing) => format!(
            "Position {}  {}",
            palette.heading(&standing.position.to_string()),
            palette.accent(&format!("{} pts", standing.points))
        ),
    };
    card(palette, &format!("Driver {driver_id}"), None, &body)
}

pub fn events_menu(palette: &Palette, menu: &EventsMenu) -> String {
    let body = if menu.is_loading() {
        palette.muted("Loading...")
    } else if menu.entries().is_empty() {
        palette.muted("No events available")
    } else {
        menu.entries()
            .iter()
            .map(|entry| {
                format!(
                    "{:<width$} {}",
                    entry.label,
                    palette.accent(&entry.route.path()),
                    width = NAME_COLUMN_WIDTH
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    card(palette, "Events", None, &body)
}

pub fn home(palette: &Palette, events: &EventListView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.heading("Austin Rally Project Event Results"));
    let _ = writeln!(
        out,
        "{}\n",
        palette.muted("Track your laptimes and standings in real-time.")
    );
    out.push_str(&event_list(palette, events, false));
    out.push('\n');
    out.push_str(&card(
        palette,
        "Season Standings",
        Some("View current driver standings, points, and rankings."),
        &format!("View Standings -> {}", palette.accent(&Route::Standings.path())),
    ));
    out.push('\n');
    out.push_str(&card(
        palette,
        "About",
        Some("Learn more about Austin Rally Project."),
        &format!("Learn More -> {}", palette.accent(&Route::About.path())),
    ));
    out
}

pub fn about(palette: &Palette) -> String {
    let mut out = String::new();
    out.push_str(&card(
        palette,
        "Location",
        None,
        "Austin Rally Project is an off-road track dedicated to Rallycross.\n\
         The track is located just 40 minutes North East of Austin, Texas.\n\
         1500 FM 1466, Coupland, TX 78615\n\
         https://maps.app.goo.gl/bqBcJzuWWCKiYYAE7",
    ));
    out.push('\n');
    out.push_str(&card(palette, "Contact", None, "Josh@AustinRallyProject.com"));
    out.push('\n');
    out.push_str(&card(
        palette,
        "Links & Resources",
        None,
        &format!(
            "Primary website: {}\nEvent registration: {}",
            palette.accent("https://austinrallyproject.wixsite.com/home"),
            palette.accent("https://tinyurl.com/Rallycross-ARP")
        ),
    ));
    out
}

pub fn status(
    palette: &Palette,
    base_url: &str,
    info: &FetchState<ApiInfo>,
    health: &FetchState<HealthStatus>,
) -> String {
    let info_line = match info {
        FetchState::Loaded(info) => format!("{} v{}", info.message, info.version),
        FetchState::Failed(message) => palette.error(message),
        FetchState::Loading => palette.muted("Loading..."),
    };
    let health_line = match health {
        FetchState::Loaded(status) if status.is_healthy() => palette.good(&status.status),
        FetchState::Loaded(status) => palette.error(&status.status),
        FetchState::Failed(message) => palette.error(message),
        FetchState::Loading => palette.muted("Loading..."),
    };
    card(
        palette,
        "API Status",
        Some(base_url),
        &format!("API:    {info_line}\nHealth: {health_line}"),
    )
}

pub fn not_found(palette: &Palette, path: &str) -> String {
    card(
        palette,
        "Not Found",
        None,
        &palette.error(&format!("No page at {path}")),
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
