//! Cached filter and histogram execution.
//!
//! The [`ProcessingEngine`] fronts two [`ComputeCache`]s with the same
//! discipline: look the key up first, join a computation already in flight
//! if there is one, and otherwise dispatch the work to the gateway's worker
//! pool. Repeated requests for the same pixels never recompute.
//!
//! Filter results are keyed by content [`Fingerprint`], so the cache
//! survives re-decoding the same file. Histograms are keyed by the caller's
//! image identifier instead; when an identifier is reused for new pixels,
//! [`ProcessingEngine::invalidate_histograms`] clears the stale entries.

use std::sync::Arc;

use log::debug;

use impasto_filters::{Channel, FilterKind, Histogram, RgbaImage, channel_histogram};

use crate::cache::{Claim, ComputeCache};
use crate::fingerprint::Fingerprint;
use crate::gateway::{TaskGateway, Ticket};

/// Cache key for a filter result: which pixels, which filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub fingerprint: Fingerprint,
    pub kind: FilterKind,
}

/// Cache key for a histogram: which image slot, which channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistogramKey {
    pub image_id: i64,
    pub channel: Channel,
}

/// Facade over the filter and histogram caches and the worker pool.
#[derive(Debug)]
pub struct ProcessingEngine {
    gateway: TaskGateway,
    filters: ComputeCache<FilterKey, RgbaImage>,
    histograms: ComputeCache<HistogramKey, Histogram>,
}

impl ProcessingEngine {
    /// Creates an engine with empty caches dispatching through `gateway`.
    #[must_use]
    pub fn new(gateway: TaskGateway) -> Self {
        Self {
            gateway,
            filters: ComputeCache::new(),
            histograms: ComputeCache::new(),
        }
    }

    /// Applies `kind` to `image`, reusing a cached or in-flight result for
    /// the same pixel content when one exists.
    ///
    /// The fingerprint is computed synchronously on the calling thread; the
    /// filter itself runs on the worker pool.
    pub fn apply_filter(&self, image: &Arc<RgbaImage>, kind: FilterKind) -> Ticket<Arc<RgbaImage>> {
        let key = FilterKey {
            fingerprint: Fingerprint::of(image),
            kind,
        };
        match self.filters.claim(&key) {
            Claim::Ready(filtered) => {
                debug!("filter cache hit: {kind} {}", key.fingerprint);
                Ticket::ready(filtered)
            }
            Claim::Wait(receiver) => {
                debug!("joining in-flight filter: {kind} {}", key.fingerprint);
                Ticket::waiting(receiver)
            }
            Claim::Compute(receiver, slot) => {
                debug!("filter cache miss: {kind} {}", key.fingerprint);
                let image = Arc::clone(image);
                self.gateway.run(move || {
                    slot.fulfill(impasto_filters::apply(&image, kind));
                });
                Ticket::waiting(receiver)
            }
        }
    }

    /// Computes the `channel` histogram of the image stored under
    /// `image_id`, reusing a cached or in-flight result when one exists.
    ///
    /// The caller is responsible for keeping `image_id` honest: if new
    /// pixels are stored under an old identifier, call
    /// [`invalidate_histograms`](Self::invalidate_histograms) first.
    pub fn compute_histogram(
        &self,
        image: &Arc<RgbaImage>,
        channel: Channel,
        image_id: i64,
    ) -> Ticket<Arc<Histogram>> {
        let key = HistogramKey { image_id, channel };
        match self.histograms.claim(&key) {
            Claim::Ready(histogram) => {
                debug!("histogram cache hit: image {image_id} {channel}");
                Ticket::ready(histogram)
            }
            Claim::Wait(receiver) => {
                debug!("joining in-flight histogram: image {image_id} {channel}");
                Ticket::waiting(receiver)
            }
            Claim::Compute(receiver, slot) => {
                debug!("histogram cache miss: image {image_id} {channel}");
                let image = Arc::clone(image);
                self.gateway.run(move || {
                    slot.fulfill(channel_histogram(&image, channel));
                });
                Ticket::waiting(receiver)
            }
        }
    }

    /// Drops every cached histogram for `image_id`.
    ///
    /// Call this when the pixels stored under an identifier change, before
    /// requesting fresh histograms. Computations already in flight are not
    /// interrupted; their results land under the old key and should be
    /// invalidated again once they settle if the identifier was reused
    /// mid-computation.
    pub fn invalidate_histograms(&self, image_id: i64) {
        let removed = self
            .histograms
            .invalidate_where(|key| key.image_id == image_id);
        debug!("invalidated {removed} cached histograms for image {image_id}");
    }

    /// Number of cached filter results.
    #[must_use]
    pub fn cached_filters(&self) -> usize {
        self.filters.len()
    }

    /// Number of cached histograms.
    #[must_use]
    pub fn cached_histograms(&self) -> usize {
        self.histograms.len()
    }
}
