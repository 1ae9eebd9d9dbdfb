//! Upload types for bulk data ingestion

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bulk data being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadKind {
    /// Plan data export
    PlanData,
    /// Advisor roster export
    AdvisorData,
}

impl UploadKind {
    /// Message returned to the client once the upload is accepted
    pub fn success_message(&self) -> &'static str {
        match self {
            UploadKind::PlanData => "Plan data uploaded successfully",
            UploadKind::AdvisorData => "Advisor data uploaded successfully",
        }
    }

    /// Stable label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::PlanData => "plan-data",
            UploadKind::AdvisorData => "advisor-data",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File received from a client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name
    pub file_name: Option<String>,
    /// Client-supplied content type
    pub content_type: Option<String>,
    /// Raw file contents (may be empty)
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Create a file from raw bytes
    pub fn new(file_name: Option<String>, data: Vec<u8>) -> Self {
        UploadedFile {
            file_name,
            content_type: None,
            data,
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for zero-byte files
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Bulk upload handed to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// What the file contains
    pub kind: UploadKind,
    /// The file itself
    pub file: UploadedFile,
}

impl Upload {
    /// Create a new upload
    pub fn new(kind: UploadKind, file: UploadedFile) -> Self {
        Upload { kind, file }
    }
}

/// Acknowledgement for an accepted upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// What the file contained
    pub kind: UploadKind,
    /// Client-supplied file name
    pub file_name: Option<String>,
    /// Number of bytes received
    pub size_bytes: usize,
}

impl UploadReceipt {
    /// Message returned to the client
    pub fn message(&self) -> &'static str {
        self.kind.success_message()
    }
}

/// Plan submitted by an advisor together with its source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorPlanSubmission {
    /// Name of the new plan
    pub plan_name: String,
    /// Free-form description
    pub plan_details: String,
    /// Plan document
    pub plan_file: UploadedFile,
}

impl AdvisorPlanSubmission {
    /// Message returned to the client once the plan is accepted
    pub const SUCCESS_MESSAGE: &'static str = "New plan created successfully";
}
