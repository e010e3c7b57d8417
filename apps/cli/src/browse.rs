//! Interactive event list: reads one command per line and re-renders the
//! list whenever the display controller reports a change.

use std::io::Write;

use anyhow::Result;
use client_core::{DisplayEvent, EventDetailScreen, EventListScreen, ResultsSource, Route};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::broadcast::{self, error::TryRecvError},
};
use tracing::debug;

use crate::render::{self, Palette};

const HELP: &str = "commands: m = show more, l = show less, o N = open event N, r = reload, h = help, q = quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    More,
    Less,
    Open(usize),
    Reload,
    Help,
    Quit,
    Unknown(String),
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?.to_ascii_lowercase();
        let command = match head.as_str() {
            "m" | "more" => BrowseCommand::More,
            "l" | "less" => BrowseCommand::Less,
            "r" | "reload" => BrowseCommand::Reload,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            "o" | "open" => match parts.next().map(str::parse::<usize>) {
                Some(Ok(n)) if n > 0 => BrowseCommand::Open(n),
                _ => BrowseCommand::Unknown(line.trim().to_string()),
            },
            _ => BrowseCommand::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}

/// Drains pending change notifications; true if anything changed.
fn drain_changes(changes: &mut broadcast::Receiver<DisplayEvent>) -> bool {
    let mut changed = false;
    loop {
        match changes.try_recv() {
            Ok(event) => {
                debug!(
                    transition = ?event.transition,
                    shown = event.snapshot.shown,
                    total = event.snapshot.total,
                    "event list changed"
                );
                changed = true;
            }
            Err(TryRecvError::Lagged(_)) => changed = true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return changed,
        }
    }
}

pub async fn run<R, W>(
    source: &dyn ResultsSource,
    palette: &Palette,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut screen = EventListScreen::default();
    let mut changes = screen.controller().subscribe();

    screen.mount(source).await;
    drain_changes(&mut changes);
    write!(out, "{}", render::event_list(palette, &screen.view(), true))?;
    writeln!(out, "{HELP}")?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = BrowseCommand::parse(&line) else {
            continue;
        };

        let mut force_render = false;
        match command {
            BrowseCommand::More => {
                if !screen.show_more() {
                    writeln!(out, "Events are not loaded.")?;
                }
            }
            BrowseCommand::Less => {
                if !screen.show_less() {
                    writeln!(out, "Events are not loaded.")?;
                }
            }
            BrowseCommand::Open(n) => match screen.route_for_visible(n - 1) {
                Some(Route::EventDetails { date }) => {
                    let mut detail = EventDetailScreen::new(date);
                    detail.mount(source).await;
                    write!(out, "{}", render::event_detail(palette, detail.state()))?;
                }
                _ => writeln!(out, "No visible event #{n}.")?,
            },
            BrowseCommand::Reload => {
                screen.mount(source).await;
                force_render = true;
            }
            BrowseCommand::Help => writeln!(out, "{HELP}")?,
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(raw) => writeln!(out, "Unknown command '{raw}'. {HELP}")?,
        }

        if drain_changes(&mut changes) || force_render {
            write!(out, "{}", render::event_list(palette, &screen.view(), true))?;
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
