use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{DriverId, DriverStanding, Event, EventDetail, Standing},
    protocol::{
        paths, ApiInfo, DriverStandingResponse, EventDetailResponse, EventsResponse, HealthStatus,
        StandingsResponse,
    },
};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;
pub mod pagination;
pub mod routes;
pub mod screen;
pub mod theme;

pub use error::{FetchError, Resource};
pub use pagination::{
    DisplayEvent, DisplaySnapshot, EventDisplayController, Transition, DEFAULT_PAGE_SIZE,
};
pub use routes::{NavLink, Route};
pub use screen::{
    EventDetailScreen, EventListScreen, EventListView, EventsMenu, FetchState, MenuEntry,
    StandingsScreen,
};
pub use theme::{FileThemeProvider, ThemeError, ThemePreference, ThemeProvider};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote results API as seen by the screens.
///
/// Every call is a single fire-and-forget GET; nothing is retried or cached.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<Event>, FetchError>;
    async fn fetch_event(&self, date: &str) -> Result<EventDetail, FetchError>;
    async fn fetch_standings(&self) -> Result<Vec<Standing>, FetchError>;
    async fn fetch_driver_standing(&self, driver_id: DriverId)
        -> Result<DriverStanding, FetchError>;
    async fn api_info(&self) -> Result<ApiInfo, FetchError>;
    async fn health(&self) -> Result<HealthStatus, FetchError>;
}

pub struct HttpResultsSource {
    http: Client,
    base_url: String,
}

impl HttpResultsSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse(&raw).map_err(|source| FetchError::InvalidBaseUrl { url: raw, source })
    }

    /// The date is pushed as a single percent-encoded segment, so `/`, `?`
    /// and `#` inside it stay part of the key.
    fn event_endpoint(&self, date: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&paths::events())?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidEventKey(date.to_string()))?
            .pop_if_empty()
            .push(date);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        url: Url,
    ) -> Result<T, FetchError> {
        debug!(%url, %resource, "requesting");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %resource, status = status.as_u16(), "non-success response");
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { resource, source })?;
        serde_json::from_slice(&body).map_err(|source| {
            warn!(%url, %resource, %source, "malformed response body");
            FetchError::Decode { resource, source }
        })
    }
}

#[async_trait]
impl ResultsSource for HttpResultsSource {
    async fn fetch_events(&self) -> Result<Vec<Event>, FetchError> {
        let body: EventsResponse = self
            .get_json(Resource::Events, self.endpoint(&paths::events())?)
            .await?;
        info!(count = body.events.len(), "fetched events");
        Ok(body.events)
    }

    async fn fetch_event(&self, date: &str) -> Result<EventDetail, FetchError> {
        let date = date.trim();
        if date.is_empty() {
            return Err(FetchError::EmptyEventKey);
        }
        // Dot segments would be dropped from the path and hit the list endpoint.
        if matches!(date, "." | "..") {
            return Err(FetchError::InvalidEventKey(date.to_string()));
        }
        let url = self.event_endpoint(date)?;
        let body: EventDetailResponse = self.get_json(Resource::EventDetails, url).await?;
        Ok(body.event)
    }

    async fn fetch_standings(&self) -> Result<Vec<Standing>, FetchError> {
        let body: StandingsResponse = self
            .get_json(Resource::Standings, self.endpoint(&paths::standings())?)
            .await?;
        info!(count = body.standings.len(), "fetched standings");
        Ok(body.standings)
    }

    async fn fetch_driver_standing(
        &self,
        driver_id: DriverId,
    ) -> Result<DriverStanding, FetchError> {
        let body: DriverStandingResponse = self
            .get_json(
                Resource::DriverStanding,
                self.endpoint(&paths::driver_standing(driver_id))?,
            )
            .await?;
        Ok(DriverStanding {
            driver_id: body.driver_id,
            position: body.position,
            points: body.points,
        })
    }

    async fn api_info(&self) -> Result<ApiInfo, FetchError> {
        let url = self.endpoint(paths::ROOT)?;
        self.get_json(Resource::ApiInfo, url).await
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        let url = self.endpoint(paths::HEALTH)?;
        self.get_json(Resource::Health, url).await
    }
}

/// Validates the configured base URL and strips trailing slashes so API paths
/// can be appended verbatim, keeping any path prefix the base carries.
pub fn normalize_base_url(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.is_empty() {
        DEFAULT_API_BASE_URL
    } else {
        trimmed
    };

    let parsed = Url::parse(candidate).map_err(|source| FetchError::InvalidBaseUrl {
        url: candidate.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme {
            url: candidate.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
