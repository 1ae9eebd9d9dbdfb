//! Multipart form collection
//!
//! Upload endpoints read the whole form up front and then pull the fields
//! they need by name. Unknown fields are kept but never looked at.

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use planboard_core::UploadedFile;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while reading a multipart form
#[derive(Error, Debug)]
pub enum FormError {
    /// Request was not a multipart form
    #[error("Invalid multipart request: {0}")]
    Rejected(#[from] MultipartRejection),

    /// Form body could not be read
    #[error("Multipart parse error: {0}")]
    Read(#[from] MultipartError),

    /// A required field was absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A text field was not valid UTF-8
    #[error("Field '{0}' is not valid UTF-8")]
    InvalidText(String),
}

#[derive(Debug)]
struct FormField {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Fully buffered multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, FormField>,
}

impl MultipartForm {
    /// Drain every field from the request
    ///
    /// When a field name repeats, the last occurrence wins.
    pub async fn read(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut fields = HashMap::new();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?.to_vec();

            fields.insert(
                name,
                FormField {
                    file_name,
                    content_type,
                    data,
                },
            );
        }

        Ok(Self { fields })
    }

    /// Remove a field and return it as a file
    ///
    /// Zero-byte parts are valid files.
    pub fn take_file(&mut self, name: &str) -> Result<UploadedFile, FormError> {
        let field = self
            .fields
            .remove(name)
            .ok_or_else(|| FormError::MissingField(name.to_string()))?;

        Ok(UploadedFile {
            file_name: field.file_name,
            content_type: field.content_type,
            data: field.data,
        })
    }

    /// Remove a field and return it as text
    pub fn take_text(&mut self, name: &str) -> Result<String, FormError> {
        let field = self
            .fields
            .remove(name)
            .ok_or_else(|| FormError::MissingField(name.to_string()))?;

        String::from_utf8(field.data).map_err(|_| FormError::InvalidText(name.to_string()))
    }
}
