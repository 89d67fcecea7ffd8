//! Asynchronous access to the remote image library.
//!
//! [`LibraryClient`] runs every service call on the gateway's worker pool,
//! so callers never block on network I/O. The service itself is behind a
//! trait object; production code hands in an
//! [`HttpImageService`](impasto_service::HttpImageService), tests hand in a
//! stub.

use std::fmt;
use std::sync::Arc;

use log::debug;

use impasto_service::{ImageRecord, ImageService};

use crate::gateway::{TaskGateway, Ticket};

/// Dispatches image library requests onto the worker pool.
///
/// Cloning is cheap; clones share the gateway and the service.
#[derive(Clone)]
pub struct LibraryClient {
    gateway: TaskGateway,
    service: Arc<dyn ImageService>,
}

impl LibraryClient {
    /// Creates a client that calls `service` through `gateway`.
    #[must_use]
    pub fn new(gateway: TaskGateway, service: Arc<dyn ImageService>) -> Self {
        Self { gateway, service }
    }

    /// Fetches every stored image record.
    pub fn fetch_images(&self) -> Ticket<Vec<ImageRecord>> {
        debug!("fetching image list");
        let service = Arc::clone(&self.service);
        self.gateway.submit(move || Ok(service.list()?))
    }

    /// Fetches the record stored under `id`.
    pub fn fetch_image(&self, id: i64) -> Ticket<ImageRecord> {
        debug!("fetching image {id}");
        let service = Arc::clone(&self.service);
        self.gateway.submit(move || Ok(service.get(id)?))
    }

    /// Stores a new record and resolves to the stored copy, including the
    /// identifier the service assigned.
    pub fn add_image(&self, record: ImageRecord) -> Ticket<ImageRecord> {
        debug!("adding image {:?}", record.name);
        let service = Arc::clone(&self.service);
        self.gateway.submit(move || Ok(service.create(&record)?))
    }

    /// Replaces the record stored under `id`.
    pub fn update_image(&self, id: i64, record: ImageRecord) -> Ticket<()> {
        debug!("updating image {id}");
        let service = Arc::clone(&self.service);
        self.gateway.submit(move || Ok(service.update(id, &record)?))
    }

    /// Deletes the record stored under `id`.
    pub fn delete_image(&self, id: i64) -> Ticket<()> {
        debug!("deleting image {id}");
        let service = Arc::clone(&self.service);
        self.gateway.submit(move || Ok(service.delete(id)?))
    }
}

impl fmt::Debug for LibraryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryClient")
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}
