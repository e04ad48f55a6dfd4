use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::de_id;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    /// Price in the smallest currency unit.
    #[serde(default)]
    pub price_cents: u64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub interview_limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(deserialize_with = "de_id")]
    pub plan_id: String,
    pub status: String,
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
}
