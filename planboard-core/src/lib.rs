//! Planboard Core - partner, data-partner and plan records
//!
//! This crate holds the domain records exchanged by the Planboard admin API,
//! the upload types used for bulk data ingestion, and the [`PlanRegistry`]
//! seam that request handlers talk to.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod registry;
pub mod upload;

pub use error::{PlanboardError, Result};
pub use model::{
    AdvisorPlan, CreatedPartner, DataPartner, DataPartnerFilter, NewDataPartner, NewPartner,
    NewPlan, Partner, PartnerFilter, PartnerSummary, Plan, PlanFilter,
};
pub use registry::{PlaceholderRegistry, PlanRegistry};
pub use upload::{AdvisorPlanSubmission, Upload, UploadKind, UploadReceipt, UploadedFile};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
