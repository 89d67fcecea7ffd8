//! Blocking HTTP implementation of [`ImageService`].
//!
//! Routes follow the service's layout: `GET {base}/images` lists,
//! `POST {base}/images` creates, and `GET`/`PUT`/`DELETE`
//! `{base}/images/{id}` operate on one record. Bodies are JSON decoded
//! explicitly so malformed payloads surface as
//! [`ServiceError::Decode`](crate::ServiceError::Decode) rather than
//! transport noise.

use log::{debug, warn};
use reqwest::blocking::{Client, Response};

use crate::{ImageRecord, ImageService, ServiceError};

/// Base URL the desktop editor's bundled service listens on.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// REST client for the image persistence service.
///
/// All methods block; the engine runs them on its worker pool. Cloning is
/// cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpImageService {
    client: Client,
    base_url: String,
}

impl HttpImageService {
    /// Create a client against `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn images_url(&self) -> String {
        format!("{}/images", self.base_url)
    }

    fn image_url(&self, id: i64) -> String {
        format!("{}/images/{id}", self.base_url)
    }

    fn check_status(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            warn!("service returned {status} for {}", response.url());
            Err(ServiceError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

impl ImageService for HttpImageService {
    fn list(&self) -> Result<Vec<ImageRecord>, ServiceError> {
        let url = self.images_url();
        debug!("GET {url}");
        let response = Self::check_status(self.client.get(url).send()?)?;
        Ok(serde_json::from_str(&response.text()?)?)
    }

    fn get(&self, id: i64) -> Result<ImageRecord, ServiceError> {
        let url = self.image_url(id);
        debug!("GET {url}");
        let response = Self::check_status(self.client.get(url).send()?)?;
        Ok(serde_json::from_str(&response.text()?)?)
    }

    fn create(&self, record: &ImageRecord) -> Result<ImageRecord, ServiceError> {
        let url = self.images_url();
        debug!("POST {url} ({})", record.name);
        let response = Self::check_status(self.client.post(url).json(record).send()?)?;
        Ok(serde_json::from_str(&response.text()?)?)
    }

    fn update(&self, id: i64, record: &ImageRecord) -> Result<(), ServiceError> {
        let url = self.image_url(id);
        debug!("PUT {url}");
        Self::check_status(self.client.put(url).json(record).send()?)?;
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let url = self.image_url(id);
        debug!("DELETE {url}");
        Self::check_status(self.client.delete(url).send()?)?;
        Ok(())
    }
}
