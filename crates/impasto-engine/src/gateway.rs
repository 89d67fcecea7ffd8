//! Worker-pool dispatch and one-shot completion delivery.
//!
//! Pixel work is CPU-bound and must never run on the async runtime's core
//! threads, so every job goes through [`tokio::task::spawn_blocking`] via an
//! explicitly provided runtime [`Handle`]. Results travel back over a
//! [`oneshot`] channel wrapped in a [`Ticket`], which callers can await from
//! async code or block on from a plain thread.

use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::error::EngineError;

/// A claim on the result of a submitted computation.
///
/// Dropping a ticket detaches from the computation without cancelling it;
/// the work runs to completion and its result is simply discarded.
#[derive(Debug)]
#[must_use = "a ticket reports nothing unless waited on"]
pub struct Ticket<T>(Inner<T>);

#[derive(Debug)]
enum Inner<T> {
    Ready(Result<T, EngineError>),
    Waiting(oneshot::Receiver<Result<T, EngineError>>),
}

impl<T> Ticket<T> {
    /// A ticket that resolves immediately, used for cache hits.
    pub(crate) const fn ready(value: T) -> Self {
        Self(Inner::Ready(Ok(value)))
    }

    /// A ticket backed by a pending computation.
    pub(crate) const fn waiting(receiver: oneshot::Receiver<Result<T, EngineError>>) -> Self {
        Self(Inner::Waiting(receiver))
    }

    /// Whether the result is already available without waiting.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.0, Inner::Ready(_))
    }

    /// Waits for the computation to finish.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Abandoned`] if the computation was dropped
    /// before sending a result, or the computation's own error otherwise.
    pub async fn wait(self) -> Result<T, EngineError> {
        match self.0 {
            Inner::Ready(result) => result,
            Inner::Waiting(receiver) => receiver.await.map_err(|_| EngineError::Abandoned)?,
        }
    }

    /// Blocks the current thread until the computation finishes.
    ///
    /// Intended for callers that live outside the runtime, such as a main
    /// thread driving a batch of jobs.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Abandoned`] if the computation was dropped
    /// before sending a result, or the computation's own error otherwise.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async runtime; use [`Self::wait`]
    /// there instead.
    pub fn blocking_wait(self) -> Result<T, EngineError> {
        match self.0 {
            Inner::Ready(result) => result,
            Inner::Waiting(receiver) => {
                receiver.blocking_recv().map_err(|_| EngineError::Abandoned)?
            }
        }
    }
}

/// Dispatches closures onto a runtime's blocking worker pool.
///
/// The gateway holds a [`Handle`] rather than owning a runtime, so the
/// embedding application decides where workers live and when they shut
/// down. Cloning is cheap and every clone dispatches to the same pool.
#[derive(Debug, Clone)]
pub struct TaskGateway {
    handle: Handle,
}

impl TaskGateway {
    /// Creates a gateway that dispatches onto the runtime behind `handle`.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Runs `job` on the worker pool, discarding its completion.
    ///
    /// For computations whose results are delivered through another channel,
    /// such as a cache slot.
    pub fn run<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        drop(self.handle.spawn_blocking(job));
    }

    /// Runs `job` on the worker pool and returns a ticket for its result.
    pub fn submit<T, F>(&self, job: F) -> Ticket<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, EngineError> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        self.run(move || {
            // The receiver may already be gone; delivery is best-effort.
            let _ = sender.send(job());
        });
        Ticket::waiting(receiver)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap()
    }

    #[test]
    fn submit_delivers_result() {
        let runtime = runtime();
        let gateway = TaskGateway::new(runtime.handle().clone());

        let ticket = gateway.submit(|| Ok(6 * 7));

        assert_eq!(ticket.blocking_wait().unwrap(), 42);
    }

    #[test]
    fn submitted_jobs_run_off_the_caller_thread() {
        let runtime = runtime();
        let gateway = TaskGateway::new(runtime.handle().clone());
        let caller = std::thread::current().id();

        let ticket = gateway.submit(move || Ok(std::thread::current().id() != caller));

        assert!(ticket.blocking_wait().unwrap());
    }

    #[test]
    fn ready_ticket_resolves_without_a_runtime() {
        let ticket = Ticket::ready("hit");

        assert!(ticket.is_ready());
        assert_eq!(ticket.blocking_wait().unwrap(), "hit");
    }

    #[test]
    fn dropped_sender_reports_abandoned() {
        let (sender, receiver) = oneshot::channel::<Result<u8, EngineError>>();
        drop(sender);
        let ticket = Ticket::waiting(receiver);

        assert!(matches!(ticket.blocking_wait(), Err(EngineError::Abandoned)));
    }

    #[test]
    fn wait_resolves_from_async_context() {
        let runtime = runtime();
        let gateway = TaskGateway::new(runtime.handle().clone());

        let result = runtime.block_on(async {
            let ticket = gateway.submit(|| Ok(String::from("done")));
            ticket.wait().await
        });

        assert_eq!(result.unwrap(), "done");
    }

    #[test]
    fn dropping_a_ticket_does_not_cancel_the_job() {
        let runtime = runtime();
        let gateway = TaskGateway::new(runtime.handle().clone());
        let (done_sender, done_receiver) = std::sync::mpsc::channel();

        let ticket = gateway.submit(move || {
            done_sender.send(()).unwrap();
            Ok(())
        });
        drop(ticket);

        done_receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
    }
}
