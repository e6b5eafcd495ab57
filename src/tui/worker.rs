//! Background fetch worker for non-blocking backend calls.
//!
//! Each request runs on its own short-lived thread and reports back over a
//! channel, so the TUI main loop keeps drawing while the backend responds.
//! Dropping the handle abandons the request; the thread finishes on its own
//! and its send fails silently.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::application::Ticket;
use crate::ports::ApiError;

/// Handle to a running fetch.
pub struct FetchHandle<T> {
    ticket: Ticket,
    rx: Receiver<Result<T, ApiError>>,
    _handle: JoinHandle<()>,
}

impl<T> FetchHandle<T> {
    /// The request this handle belongs to.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Try to receive the result (non-blocking).
    ///
    /// A worker that exits without reporting (panic) is surfaced as a
    /// transport error so the page does not stay in `Loading` forever.
    #[must_use]
    pub fn try_recv(&self) -> Option<Result<T, ApiError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ApiError::Transport(
                "fetch worker exited without a result".to_string(),
            ))),
        }
    }
}

/// Spawns backend calls off the UI thread.
pub struct FetchWorker;

impl FetchWorker {
    /// Run `job` in the background on behalf of `ticket`.
    pub fn spawn<T, F>(ticket: Ticket, job: F) -> FetchHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            // Receiver may be gone if the page was unmounted.
            let _ = tx.send(job());
        });

        FetchHandle {
            ticket,
            rx,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Resource;
    use std::time::{Duration, Instant};

    fn wait<T>(handle: &FetchHandle<T>) -> Result<T, ApiError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = handle.try_recv() {
                return result;
            }
            assert!(Instant::now() < deadline, "worker timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_worker_delivers_result() {
        let mut res: Resource<u32> = Resource::new("test");
        let handle = FetchWorker::spawn(res.begin(), || Ok(42));
        assert_eq!(wait(&handle), Ok(42));
    }

    #[test]
    fn test_worker_panic_becomes_error() {
        let mut res: Resource<u32> = Resource::new("test");
        let handle = FetchWorker::spawn(res.begin(), || -> Result<u32, ApiError> {
            panic!("boom")
        });
        assert!(matches!(wait(&handle), Err(ApiError::Transport(_))));
    }
}
