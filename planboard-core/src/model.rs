//! Partner, data-partner and plan records
//!
//! Records are flat: a plan names its partner and data partner by id only,
//! and nothing checks that those ids resolve.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Organization associated with plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    /// Partner identifier
    pub id: String,
    /// Last day the partner's license is valid
    pub license_validity: NaiveDate,
    /// Display name
    pub name: String,
    /// Commercial tier (e.g., "Tier A")
    pub tier: String,
    /// Identifier in the partner's own systems
    pub external_id: String,
}

impl Partner {
    /// Create a new partner record
    pub fn new(
        id: impl Into<String>,
        license_validity: NaiveDate,
        name: impl Into<String>,
        tier: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        Partner {
            id: id.into(),
            license_validity,
            name: name.into(),
            tier: tier.into(),
            external_id: external_id.into(),
        }
    }

    /// Strip down to the fields embedded in advisor-facing views
    pub fn summary(&self) -> PartnerSummary {
        PartnerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            external_id: self.external_id.clone(),
        }
    }
}

/// Result of creating a partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPartner {
    /// Assigned partner identifier
    pub id: String,
    /// Last day the partner's license is valid
    pub license_validity: NaiveDate,
    /// External identifier echoed from the request
    pub external_id: String,
}

/// Partner as embedded in an [`AdvisorPlan`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerSummary {
    /// Partner identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// External identifier
    pub external_id: String,
}

/// Organization supplying data for plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPartner {
    /// Data partner identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// External identifier
    pub external_id: String,
}

impl DataPartner {
    /// Create a new data partner record
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        DataPartner {
            id: id.into(),
            name: name.into(),
            external_id: external_id.into(),
        }
    }
}

/// Plan linking a partner and a data partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// External identifier
    pub external_id: String,
    /// Owning partner
    pub partner_id: String,
    /// Data partner feeding the plan
    pub data_partner_id: String,
}

/// Plan as presented to advisors, with partner records inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorPlan {
    /// Plan identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Owning partner
    pub partner: PartnerSummary,
    /// Data partner feeding the plan
    pub data_partner: DataPartner,
    /// Advisors assigned to the plan
    pub advisors: Vec<String>,
    /// External identifier, if one was assigned
    pub external_id: Option<String>,
}

/// Payload for creating a partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPartner {
    /// Display name
    pub name: String,
    /// External identifier
    pub external_id: String,
}

/// Payload for creating a data partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDataPartner {
    /// Display name
    pub name: String,
    /// External identifier
    pub external_id: String,
}

/// Payload for creating a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlan {
    /// Display name
    pub name: String,
    /// External identifier
    pub external_id: String,
    /// Owning partner
    pub partner_id: String,
    /// Data partner feeding the plan
    pub data_partner_id: String,
}

/// Filter for partner listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerFilter {
    /// Match on display name
    pub name: Option<String>,
    /// Match on tier
    pub tier: Option<String>,
}

/// Filter for data partner listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPartnerFilter {
    /// Match on display name
    pub name: Option<String>,
}

/// Filter for plan listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFilter {
    /// Match on display name
    pub name: Option<String>,
    /// Match on external identifier
    pub external_id: Option<String>,
}
