use std::fmt;

use thiserror::Error;

/// Endpoint family a fetch was aimed at; used to phrase user-facing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Events,
    EventDetails,
    Standings,
    DriverStanding,
    ApiInfo,
    Health,
}

impl Resource {
    pub fn label(self) -> &'static str {
        match self {
            Resource::Events => "events",
            Resource::EventDetails => "event details",
            Resource::Standings => "standings",
            Resource::DriverStanding => "driver standing",
            Resource::ApiInfo => "api info",
            Resource::Health => "health status",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported api base url scheme '{scheme}' in '{url}'; expected http or https")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("event date must not be empty")]
    EmptyEventKey,
    #[error("invalid event date '{0}'")]
    InvalidEventKey(String),
    #[error("Failed to fetch {resource}: {source}")]
    Transport {
        resource: Resource,
        source: reqwest::Error,
    },
    #[error("Failed to fetch {resource}")]
    Status { resource: Resource, status: u16 },
    #[error("Failed to fetch {resource}: malformed response body: {source}")]
    Decode {
        resource: Resource,
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn resource(&self) -> Option<Resource> {
        match self {
            FetchError::Transport { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::Decode { resource, .. } => Some(*resource),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The single undifferentiated message screens show for a failed load.
    pub fn user_message(&self) -> String {
        match self.resource() {
            Some(resource) => format!("Failed to fetch {resource}"),
            None => self.to_string(),
        }
    }
}
