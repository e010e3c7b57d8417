//! Incremental reveal of an already-fetched event list.
//!
//! The controller only tracks how many leading events are visible. It never
//! clamps that count to the list length; reads clamp instead, so repeated
//! "show more" past the end is harmless and the count stays a plain multiple
//! of the page size.

use shared::domain::Event;
use tokio::sync::broadcast;

pub const DEFAULT_PAGE_SIZE: usize = 2;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    EventsReplaced,
    ShowMore,
    ShowLess,
}

/// Every derived read of the controller, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub visible_count: usize,
    pub shown: usize,
    pub total: usize,
    pub has_more: bool,
    pub can_show_less: bool,
    pub shows_controls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEvent {
    pub transition: Transition,
    pub snapshot: DisplaySnapshot,
}

#[derive(Debug)]
pub struct EventDisplayController {
    events: Vec<Event>,
    page_size: usize,
    visible_count: usize,
    changes: broadcast::Sender<DisplayEvent>,
}

impl Default for EventDisplayController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl EventDisplayController {
    /// A zero page size would make "show more" a no-op, so it is raised to one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            events: Vec::new(),
            page_size,
            visible_count: page_size,
            changes,
        }
    }

    pub fn with_events(page_size: usize, events: Vec<Event>) -> Self {
        let mut controller = Self::new(page_size);
        controller.events = events;
        controller
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DisplayEvent> {
        self.changes.subscribe()
    }

    /// Wholesale replacement after a (re-)fetch; starts over on the first page.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.visible_count = self.page_size;
        self.notify(Transition::EventsReplaced);
    }

    pub fn show_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.page_size);
        self.notify(Transition::ShowMore);
    }

    pub fn show_less(&mut self) {
        self.visible_count = self.page_size;
        self.notify(Transition::ShowLess);
    }

    pub fn visible_events(&self) -> &[Event] {
        let end = self.visible_count.min(self.events.len());
        &self.events[..end]
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.events.len()
    }

    pub fn can_show_less(&self) -> bool {
        self.visible_count > self.page_size
    }

    /// Lists that fit on one page get no pagination controls at all.
    pub fn shows_pagination_controls(&self) -> bool {
        self.events.len() > self.page_size
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count_label(&self) -> Option<String> {
        let total = self.events.len();
        (total > 0).then(|| format!("{} of {total}", self.visible_events().len()))
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            visible_count: self.visible_count,
            shown: self.visible_events().len(),
            total: self.events.len(),
            has_more: self.has_more(),
            can_show_less: self.can_show_less(),
            shows_controls: self.shows_pagination_controls(),
        }
    }

    fn notify(&self, transition: Transition) {
        let _ = self.changes.send(DisplayEvent {
            transition,
            snapshot: self.snapshot(),
        });
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
