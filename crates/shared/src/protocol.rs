use serde::{Deserialize, Serialize};

use crate::domain::{DriverId, Event, EventDetail, Standing};

pub const API_V1_PREFIX: &str = "/api/v1";

/// Relative API paths, joined onto the configured base URL by the client.
pub mod paths {
    use super::API_V1_PREFIX;
    use crate::domain::DriverId;

    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/health";

    pub fn events() -> String {
        format!("{API_V1_PREFIX}/events/")
    }

    pub fn standings() -> String {
        format!("{API_V1_PREFIX}/standings/")
    }

    pub fn driver_standing(driver_id: DriverId) -> String {
        format!("{API_V1_PREFIX}/standings/{}", driver_id.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetailResponse {
    pub event: EventDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub standings: Vec<Standing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverStandingResponse {
    pub driver_id: DriverId,
    pub position: u32,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_envelope_preserves_source_order() {
        let body = r#"{
            "events": [
                {"id": 2, "name": "Grand Prix 2", "date": "2024-07-15"},
                {"id": 1, "name": "Grand Prix 1", "date": "2024-07-01"}
            ]
        }"#;
        let parsed: EventsResponse = serde_json::from_str(body).expect("decode");
        let names: Vec<_> = parsed.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Grand Prix 2", "Grand Prix 1"]);
    }

    #[test]
    fn detail_envelope_unwraps_event_key() {
        let body = r#"{"event": {"name": "Grand Prix 1", "date": "2024-07-01"}}"#;
        let parsed: EventDetailResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(parsed.event.date, "2024-07-01");
    }

    #[test]
    fn collection_paths_keep_trailing_slash() {
        assert_eq!(paths::events(), "/api/v1/events/");
        assert_eq!(paths::standings(), "/api/v1/standings/");
        assert_eq!(paths::driver_standing(DriverId(7)), "/api/v1/standings/7");
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let status = HealthStatus {
            status: "Healthy".into(),
        };
        assert!(status.is_healthy());
    }
}
