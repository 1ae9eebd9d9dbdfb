//! Registry of partners, data partners and plans
//!
//! [`PlanRegistry`] is the seam between the HTTP handlers and whatever holds
//! the records. [`PlaceholderRegistry`] answers every call with synthesized
//! records and keeps nothing.

use crate::error::Result;
use crate::model::{
    AdvisorPlan, CreatedPartner, DataPartner, DataPartnerFilter, NewDataPartner, NewPartner,
    NewPlan, Partner, PartnerFilter, PartnerSummary, Plan, PlanFilter,
};
use crate::upload::{AdvisorPlanSubmission, Upload, UploadReceipt};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Operations behind the admin and advisor endpoints
pub trait PlanRegistry: Send + Sync {
    /// Accept a bulk data upload
    fn accept_upload(&self, upload: Upload) -> Result<UploadReceipt>;

    /// Register a partner
    fn create_partner(&self, request: NewPartner) -> Result<CreatedPartner>;

    /// List partners matching a filter
    fn list_partners(&self, filter: &PartnerFilter) -> Result<Vec<Partner>>;

    /// Register a data partner
    fn create_data_partner(&self, request: NewDataPartner) -> Result<DataPartner>;

    /// List data partners matching a filter
    fn list_data_partners(&self, filter: &DataPartnerFilter) -> Result<Vec<DataPartner>>;

    /// Register a plan
    fn create_plan(&self, request: NewPlan) -> Result<Plan>;

    /// List plans matching a filter
    fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<Plan>>;

    /// Accept a plan submitted by an advisor
    fn submit_advisor_plan(&self, submission: AdvisorPlanSubmission) -> Result<()>;

    /// Look up the advisor view of a plan
    fn advisor_plan(&self, plan_id: &str) -> Result<AdvisorPlan>;
}

/// Registry that synthesizes fixed records and stores nothing
///
/// Filters are accepted and ignored, referenced ids are never resolved, and
/// every list call returns the same two records.
#[derive(Debug, Clone)]
pub struct PlaceholderRegistry {
    license_validity: NaiveDate,
}

impl PlaceholderRegistry {
    /// Id assigned to every created partner
    pub const GENERATED_PARTNER_ID: &'static str = "generated_partner_id";
    /// Id assigned to every created data partner
    pub const GENERATED_DATA_PARTNER_ID: &'static str = "generated_data_partner_id";
    /// Id assigned to every created plan
    pub const GENERATED_PLAN_ID: &'static str = "generated_plan_id";

    /// Create a registry whose partners are valid until 2024-01-01
    pub fn new() -> Self {
        PlaceholderRegistry {
            license_validity: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }

    /// Override the license validity date stamped on partners
    pub fn with_license_validity(mut self, license_validity: NaiveDate) -> Self {
        self.license_validity = license_validity;
        self
    }

    /// License validity date stamped on partners
    pub fn license_validity(&self) -> NaiveDate {
        self.license_validity
    }
}

impl Default for PlaceholderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanRegistry for PlaceholderRegistry {
    fn accept_upload(&self, upload: Upload) -> Result<UploadReceipt> {
        info!(
            kind = %upload.kind,
            file_name = upload.file.file_name.as_deref().unwrap_or("<unnamed>"),
            size_bytes = upload.file.len(),
            "Upload accepted"
        );

        Ok(UploadReceipt {
            kind: upload.kind,
            file_name: upload.file.file_name,
            size_bytes: upload.file.data.len(),
        })
    }

    fn create_partner(&self, request: NewPartner) -> Result<CreatedPartner> {
        debug!("Creating partner: {:?}", request);

        Ok(CreatedPartner {
            id: Self::GENERATED_PARTNER_ID.to_string(),
            license_validity: self.license_validity,
            external_id: request.external_id,
        })
    }

    fn list_partners(&self, filter: &PartnerFilter) -> Result<Vec<Partner>> {
        debug!("Listing partners: {:?}", filter);

        Ok(vec![
            Partner::new(
                "partner_id_1",
                self.license_validity,
                "Partner 1",
                "Tier A",
                "ext_id_1",
            ),
            Partner::new(
                "partner_id_2",
                self.license_validity,
                "Partner 2",
                "Tier B",
                "ext_id_2",
            ),
        ])
    }

    fn create_data_partner(&self, request: NewDataPartner) -> Result<DataPartner> {
        debug!("Creating data partner: {:?}", request);

        Ok(DataPartner {
            id: Self::GENERATED_DATA_PARTNER_ID.to_string(),
            name: request.name,
            external_id: request.external_id,
        })
    }

    fn list_data_partners(&self, filter: &DataPartnerFilter) -> Result<Vec<DataPartner>> {
        debug!("Listing data partners: {:?}", filter);

        Ok(vec![
            DataPartner::new("data_partner_id_1", "Data Partner 1", "ext_id_1"),
            DataPartner::new("data_partner_id_2", "Data Partner 2", "ext_id_2"),
        ])
    }

    fn create_plan(&self, request: NewPlan) -> Result<Plan> {
        debug!("Creating plan: {:?}", request);

        Ok(Plan {
            id: Self::GENERATED_PLAN_ID.to_string(),
            name: request.name,
            external_id: request.external_id,
            partner_id: request.partner_id,
            data_partner_id: request.data_partner_id,
        })
    }

    fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<Plan>> {
        debug!("Listing plans: {:?}", filter);

        Ok((1..=2)
            .map(|n| Plan {
                id: format!("plan_id_{}", n),
                name: format!("Plan {}", n),
                external_id: format!("ext_id_{}", n),
                partner_id: format!("partner_id_{}", n),
                data_partner_id: format!("data_partner_id_{}", n),
            })
            .collect())
    }

    fn submit_advisor_plan(&self, submission: AdvisorPlanSubmission) -> Result<()> {
        info!(
            plan_name = %submission.plan_name,
            details_len = submission.plan_details.len(),
            file_name = submission.plan_file.file_name.as_deref().unwrap_or("<unnamed>"),
            size_bytes = submission.plan_file.len(),
            "Advisor plan submitted"
        );
        Ok(())
    }

    fn advisor_plan(&self, plan_id: &str) -> Result<AdvisorPlan> {
        debug!("Advisor plan lookup: {:?}", plan_id);

        Ok(AdvisorPlan {
            id: plan_id.to_string(),
            name: "Sample Plan".to_string(),
            partner: PartnerSummary {
                id: "partner_id".to_string(),
                name: "Partner Name".to_string(),
                external_id: "ext_id".to_string(),
            },
            data_partner: DataPartner::new("data_partner_id", "Data Partner", "data_ext_id"),
            advisors: vec!["advisor_id_1".to_string(), "advisor_id_2".to_string()],
            external_id: Some("ext_id".to_string()),
        })
    }
}
