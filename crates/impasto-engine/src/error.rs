//! Error types shared by the engine's tickets and clients.

use impasto_service::ServiceError;
use thiserror::Error;

/// Failure modes surfaced when waiting on a [`Ticket`](crate::gateway::Ticket).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The computation backing the ticket was dropped before it produced a
    /// value. Waiters observe this when a worker panics or a cache slot is
    /// released without being fulfilled.
    #[error("computation was abandoned before completion")]
    Abandoned,

    /// The remote image service rejected or failed a request.
    #[error(transparent)]
    Service(#[from] ServiceError),
}
