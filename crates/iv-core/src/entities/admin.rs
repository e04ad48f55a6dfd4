use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;
use crate::ids::de_id;

/// Free-form admin settings document. The schema belongs to the backend.
pub type AdminSettings = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub uptime_seconds: Option<u64>,
    #[serde(default)]
    pub services: Vec<ServiceCheck>,
}

impl SystemHealth {
    /// True when the overall status and every service report healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        is_ok_status(&self.status) && self.services.iter().all(|s| is_ok_status(&s.status))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub latency_ms: Option<f64>,
}

fn is_ok_status(status: &str) -> bool {
    matches!(status.to_ascii_lowercase().as_str(), "ok" | "healthy" | "up")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_requires_every_service_up() {
        let json = r#"{
            "status": "ok",
            "version": "2.4.1",
            "uptimeSeconds": 86400,
            "services": [
                {"name": "database", "status": "healthy", "latencyMs": 3.2},
                {"name": "storage", "status": "degraded"}
            ]
        }"#;
        let mut health: SystemHealth = serde_json::from_str(json).unwrap();
        assert!(!health.is_healthy());
        health.services[1].status = "UP".into();
        assert!(health.is_healthy());
    }
}
