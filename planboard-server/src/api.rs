//! API request and response types

use planboard_core::{DataPartnerFilter, PartnerFilter, PlanFilter};
use serde::{Deserialize, Serialize};

/// Plain acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raw query string pairs, in the order they were sent
pub type QueryPairs = Vec<(String, String)>;

/// Query parameters for `GET /v1/admin/partner/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerQuery {
    pub name: Option<String>,
    pub tier: Option<String>,
}

impl PartnerQuery {
    /// Build from query pairs; a repeated key keeps its last value
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name = Some(value),
                "tier" => query.tier = Some(value),
                _ => {}
            }
        }
        query
    }
}

impl From<PartnerQuery> for PartnerFilter {
    fn from(query: PartnerQuery) -> Self {
        PartnerFilter {
            name: query.name,
            tier: query.tier,
        }
    }
}

/// Query parameters for `GET /v1/admin/data-partner/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataPartnerQuery {
    pub name: Option<String>,
}

impl DataPartnerQuery {
    /// Build from query pairs; a repeated key keeps its last value
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            if key == "name" {
                query.name = Some(value);
            }
        }
        query
    }
}

impl From<DataPartnerQuery> for DataPartnerFilter {
    fn from(query: DataPartnerQuery) -> Self {
        DataPartnerFilter { name: query.name }
    }
}

/// Query parameters for `GET /v1/admin/plan/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanQuery {
    pub name: Option<String>,
    pub external_id: Option<String>,
}

impl PlanQuery {
    /// Build from query pairs; a repeated key keeps its last value
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name = Some(value),
                "external_id" => query.external_id = Some(value),
                _ => {}
            }
        }
        query
    }
}

impl From<PlanQuery> for PlanFilter {
    fn from(query: PlanQuery) -> Self {
        PlanFilter {
            name: query.name,
            external_id: query.external_id,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
}
