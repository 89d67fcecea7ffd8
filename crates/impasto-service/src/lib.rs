//! impasto-service: image-record persistence client (REST).
//!
//! The editor keeps its image library in an external HTTP service. This
//! crate holds the wire model ([`ImageRecord`]), the blocking
//! [`ImageService`] trait the engine submits through, and the
//! [`HttpImageService`] REST implementation. The service is an external
//! collaborator: its failures surface as [`ServiceError`] and never touch
//! the pixel-processing caches.

pub mod http;
pub mod record;

pub use http::{DEFAULT_BASE_URL, HttpImageService};
pub use record::ImageRecord;

/// Blocking CRUD surface of the persistence service.
///
/// Methods block for the duration of the request; the engine runs them on
/// its worker pool. Implementations must be shareable across workers
/// (`Send + Sync`), and the composition root passes one in explicitly;
/// there is no global client.
pub trait ImageService: Send + Sync {
    /// Fetch every stored record.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the service is unreachable, answers
    /// with a non-success status, or returns a malformed body.
    fn list(&self) -> Result<Vec<ImageRecord>, ServiceError>;

    /// Fetch the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Status`] (404) for unknown ids, or any
    /// transport/decode failure.
    fn get(&self, id: i64) -> Result<ImageRecord, ServiceError>;

    /// Store a new record and return it with its service-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the service rejects or cannot store
    /// the record.
    fn create(&self, record: &ImageRecord) -> Result<ImageRecord, ServiceError>;

    /// Replace the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the service rejects the update.
    fn update(&self, id: i64, record: &ImageRecord) -> Result<(), ServiceError>;

    /// Delete the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the service cannot delete it.
    fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

/// Failures at the persistence-service boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// URL that produced it.
        url: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}
