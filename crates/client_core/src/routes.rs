//! Client-side routes and the header navigation built from them.

use std::fmt;

use shared::domain::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Standings,
    About,
    /// Event pages are addressed by date, not by numeric id.
    EventDetails { date: String },
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let without_suffix = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = without_suffix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["standings"] => Route::Standings,
            ["about"] => Route::About,
            ["events", date] => Route::EventDetails {
                date: (*date).to_string(),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn for_event(event: &Event) -> Self {
        Route::EventDetails {
            date: event.date.clone(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Standings => "/standings".to_string(),
            Route::About => "/about".to_string(),
            Route::EventDetails { date } => format!("/events/{date}"),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Standings => "Standings",
            Route::About => "About",
            Route::EventDetails { .. } => "Event Details",
            Route::NotFound(_) => "Not Found",
        }
    }

    pub fn navigation() -> Vec<NavLink> {
        [Route::Home, Route::Standings, Route::About]
            .into_iter()
            .map(|route| NavLink {
                label: route.title(),
                route,
            })
            .collect()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
