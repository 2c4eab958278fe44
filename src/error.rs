//! Error types for backend calls and the upload flow.
//!
//! Nothing here is fatal to the dashboard. Backend errors are logged and
//! turned into a fallback message or a status line; upload validation errors
//! carry the exact text shown to the user.

use thiserror::Error;

/// Failure talking to the question-answering backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The body did not match the expected JSON shape.
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("cannot build URL for {0}")]
    InvalidUrl(String),
}

/// Why an upload did not produce a paper record.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please select a PDF file to upload.")]
    NoFileSelected,

    #[error("Only PDF files are supported.")]
    NotPdf { content_type: String },

    #[error("Upload failed: {0}")]
    Backend(#[from] BackendError),
}

impl UploadError {
    /// Validation errors are raised before any network call is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, UploadError::NoFileSelected | UploadError::NotPdf { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_messages_match_alerts() {
        assert_eq!(
            UploadError::NoFileSelected.to_string(),
            "Please select a PDF file to upload."
        );
        let not_pdf = UploadError::NotPdf {
            content_type: "text/plain".to_string(),
        };
        assert_eq!(not_pdf.to_string(), "Only PDF files are supported.");
        assert!(not_pdf.is_validation());
    }

    #[test]
    fn test_backend_status_is_reported_in_upload_message() {
        let err = UploadError::from(BackendError::Status {
            endpoint: "upload".to_string(),
            status: 500,
        });
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Upload failed: upload returned HTTP 500");
    }
}
