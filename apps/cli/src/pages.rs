//! Mounts the screen behind each page and renders it inside the site layout.

use client_core::{
    EventDetailScreen, EventListScreen, EventsMenu, FetchState, ResultsSource, Route,
    StandingsScreen,
};
use shared::domain::DriverId;

use crate::render::{self, Palette};

pub async fn route_page(source: &dyn ResultsSource, palette: &Palette, route: &Route) -> String {
    let body = match route {
        Route::Home => {
            let mut screen = EventListScreen::default();
            screen.mount(source).await;
            render::home(palette, &screen.view())
        }
        Route::Standings => {
            let mut screen = StandingsScreen::new();
            screen.mount(source).await;
            render::standings(palette, screen.state())
        }
        Route::About => render::about(palette),
        Route::EventDetails { date } => {
            let mut screen = EventDetailScreen::new(date.clone());
            screen.mount(source).await;
            render::event_detail(palette, screen.state())
        }
        Route::NotFound(path) => render::not_found(palette, path),
    };
    render::layout(palette, route, &body)
}

/// The event list card, advanced by `more` "show more" activations.
pub async fn events_page(source: &dyn ResultsSource, palette: &Palette, more: usize) -> String {
    let mut screen = EventListScreen::default();
    screen.mount(source).await;
    for _ in 0..more {
        if !screen.controller().has_more() {
            break;
        }
        screen.show_more();
    }
    render::layout(
        palette,
        &Route::Home,
        &render::event_list(palette, &screen.view(), false),
    )
}

pub async fn driver_standing_page(
    source: &dyn ResultsSource,
    palette: &Palette,
    driver_id: DriverId,
) -> String {
    let state = FetchState::from_result(source.fetch_driver_standing(driver_id).await);
    let body = render::driver_standing(palette, driver_id, &state);
    render::layout(palette, &Route::Standings, &body)
}

pub async fn menu_page(source: &dyn ResultsSource, palette: &Palette) -> String {
    let mut menu = EventsMenu::new();
    menu.mount(source).await;
    render::events_menu(palette, &menu)
}

pub async fn status_page(source: &dyn ResultsSource, palette: &Palette, base_url: &str) -> String {
    let info = FetchState::from_result(source.api_info().await);
    let health = FetchState::from_result(source.health().await);
    render::status(palette, base_url, &info, &health)
}
