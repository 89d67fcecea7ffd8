//! impasto-engine: cached asynchronous execution core.
//!
//! This crate turns the pure pixel operations from `impasto-filters` into
//! non-blocking, deduplicated requests. Expensive work runs on a worker
//! pool behind a [`TaskGateway`]; results come back through [`Ticket`]s and
//! are cached so identical requests resolve immediately. Access to the
//! remote image library goes through the same gateway via
//! [`LibraryClient`].
//!
//! The embedding application owns the runtime and passes in a handle;
//! nothing here spins up global executors.

pub mod cache;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod gateway;
pub mod library;

pub use cache::{CacheSlot, Claim, ComputeCache, ResultReceiver};
pub use engine::{FilterKey, HistogramKey, ProcessingEngine};
pub use error::EngineError;
pub use fingerprint::Fingerprint;
pub use gateway::{TaskGateway, Ticket};
pub use library::LibraryClient;
