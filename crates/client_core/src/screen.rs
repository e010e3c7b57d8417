//! Screen state: each screen fetches once on mount and gates every read on a
//! loading / failed / loaded tri-state.

use shared::domain::{Event, EventDetail, Standing};
use tracing::{error, warn};

use crate::{
    error::FetchError,
    pagination::{EventDisplayController, DEFAULT_PAGE_SIZE},
    routes::Route,
    ResultsSource,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Failed(String),
    Loaded(T),
}

impl<T> FetchState<T> {
    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => FetchState::Loaded(value),
            Err(err) => {
                warn!(error = %err, "fetch failed");
                FetchState::Failed(err.user_message())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// What the event list card should draw right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventListView<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Events {
        visible: &'a [Event],
        count_label: Option<String>,
        show_controls: bool,
        show_more_enabled: bool,
        show_less_enabled: bool,
    },
}

#[derive(Debug)]
pub struct EventListScreen {
    state: FetchState<()>,
    controller: EventDisplayController,
}

impl Default for EventListScreen {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl EventListScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: FetchState::Loading,
            controller: EventDisplayController::new(page_size),
        }
    }

    pub async fn mount(&mut self, source: &dyn ResultsSource) {
        self.state = FetchState::Loading;
        match source.fetch_events().await {
            Ok(events) => {
                self.controller.set_events(events);
                self.state = FetchState::Loaded(());
            }
            Err(err) => {
                warn!(error = %err, "event list failed to load");
                self.controller.set_events(Vec::new());
                self.state = FetchState::Failed(err.user_message());
            }
        }
    }

    pub fn state(&self) -> &FetchState<()> {
        &self.state
    }

    pub fn controller(&self) -> &EventDisplayController {
        &self.controller
    }

    pub fn view(&self) -> EventListView<'_> {
        match &self.state {
            FetchState::Loading => EventListView::Loading,
            FetchState::Failed(message) => EventListView::Failed(message),
            FetchState::Loaded(()) if self.controller.is_empty() => EventListView::Empty,
            FetchState::Loaded(()) => EventListView::Events {
                visible: self.controller.visible_events(),
                count_label: self.controller.count_label(),
                show_controls: self.controller.shows_pagination_controls(),
                show_more_enabled: self.controller.has_more(),
                show_less_enabled: self.controller.can_show_less(),
            },
        }
    }

    /// Returns whether the transition was applied; ignored unless loaded.
    pub fn show_more(&mut self) -> bool {
        if self.state.loaded().is_none() {
            return false;
        }
        self.controller.show_more();
        true
    }

    pub fn show_less(&mut self) -> bool {
        if self.state.loaded().is_none() {
            return false;
        }
        self.controller.show_less();
        true
    }

    /// Route for the `index`-th visible event (zero based).
    pub fn route_for_visible(&self, index: usize) -> Option<Route> {
        self.state.loaded()?;
        self.controller.visible_events().get(index).map(Route::for_event)
    }
}

#[derive(Debug, Clone)]
pub struct EventDetailScreen {
    date: String,
    state: FetchState<EventDetail>,
}

impl EventDetailScreen {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            state: FetchState::Loading,
        }
    }

    pub async fn mount(&mut self, source: &dyn ResultsSource) {
        self.state = FetchState::Loading;
        self.state = FetchState::from_result(source.fetch_event(&self.date).await);
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn state(&self) -> &FetchState<EventDetail> {
        &self.state
    }
}

#[derive(Debug, Clone, Default)]
pub struct StandingsScreen {
    state: FetchState<Vec<Standing>>,
}

impl StandingsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, source: &dyn ResultsSource) {
        self.state = FetchState::Loading;
        self.state = FetchState::from_result(source.fetch_standings().await);
    }

    pub fn state(&self) -> &FetchState<Vec<Standing>> {
        &self.state
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub route: Route,
}

/// Compact list of every event linking to its detail page.
///
/// A failed load is logged and shown as an empty menu rather than an error.
#[derive(Debug, Clone, Default)]
pub struct EventsMenu {
    entries: Option<Vec<MenuEntry>>,
}

impl EventsMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, source: &dyn ResultsSource) {
        self.entries = None;
        let events = match source.fetch_events().await {
            Ok(events) => events,
            Err(err) => {
                error!(error = %err, "error fetching events for menu");
                Vec::new()
            }
        };
        self.entries = Some(
            events
                .iter()
                .map(|event| MenuEntry {
                    label: event.name.clone(),
                    route: Route::for_event(event),
                })
                .collect(),
        );
    }

    pub fn is_loading(&self) -> bool {
        self.entries.is_none()
    }

    pub fn entries(&self) -> &[MenuEntry] {
        self.entries.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
