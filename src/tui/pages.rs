//! Page controllers: fetch-on-mount for the data-backed pages.
//!
//! A controller pairs a `Resource` with the backend call that fills it and
//! the worker currently running that call. Mounting always refetches;
//! unmounting drops the worker and invalidates its ticket, so a response
//! that arrives after navigation never reaches the page.

use std::sync::Arc;

use crate::application::Resource;
use crate::ports::ApiError;

use super::worker::{FetchHandle, FetchWorker};

/// Backend call that produces a page's payload.
pub type Fetcher<T> = Arc<dyn Fn() -> Result<T, ApiError> + Send + Sync>;

/// Lifecycle owner for one data-backed page.
pub struct PageController<T> {
    resource: Resource<T>,
    fetcher: Fetcher<T>,
    pending: Option<FetchHandle<T>>,
}

impl<T: Send + 'static> PageController<T> {
    #[must_use]
    pub fn new(name: &'static str, fetcher: Fetcher<T>) -> Self {
        Self {
            resource: Resource::new(name),
            fetcher,
            pending: None,
        }
    }

    /// Enter `Loading` and start the fetch in the background.
    pub fn mount(&mut self) {
        let ticket = self.resource.begin();
        let fetcher = Arc::clone(&self.fetcher);
        self.pending = Some(FetchWorker::spawn(ticket, move || fetcher()));
    }

    /// Drain the worker without blocking.
    ///
    /// Returns `true` when a result was applied to the page.
    pub fn poll(&mut self) -> bool {
        let Some(handle) = &self.pending else {
            return false;
        };
        let Some(result) = handle.try_recv() else {
            return false;
        };

        let ticket = handle.ticket();
        self.pending = None;
        self.resource.complete(ticket, result)
    }

    /// Abandon any in-flight fetch and return to `Idle`.
    pub fn unmount(&mut self) {
        self.pending = None;
        self.resource.reset();
    }

    #[must_use]
    pub fn resource(&self) -> &Resource<T> {
        &self.resource
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ResourceState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};

    fn poll_until_done<T: Send + 'static>(page: &mut PageController<T>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while page.is_fetching() {
            page.poll();
            assert!(Instant::now() < deadline, "fetch did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_mount_loads_payload() {
        let mut page: PageController<u32> = PageController::new("test", Arc::new(|| Ok(11)));
        assert_eq!(page.resource().state(), &ResourceState::Idle);

        page.mount();
        assert!(page.resource().is_loading());

        poll_until_done(&mut page);
        assert_eq!(page.resource().data(), Some(&11));
    }

    #[test]
    fn test_failure_reaches_error_state() {
        let mut page: PageController<u32> =
            PageController::new("test", Arc::new(|| Err(ApiError::Status(500))));
        page.mount();
        poll_until_done(&mut page);

        assert!(page.resource().is_failed());
        assert!(page.resource().data().is_none());
    }

    #[test]
    fn test_every_mount_refetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut page: PageController<usize> = PageController::new(
            "test",
            Arc::new(move || Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)),
        );

        page.mount();
        poll_until_done(&mut page);
        page.unmount();
        page.mount();
        poll_until_done(&mut page);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(page.resource().data(), Some(&2));
    }

    #[test]
    fn test_late_result_after_unmount_is_dropped() {
        // The fetch blocks until the test releases it.
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Arc::new(Mutex::new(release_rx));
        let mut page: PageController<u32> = PageController::new(
            "test",
            Arc::new(move || {
                let rx = release_rx
                    .lock()
                    .map_err(|_| ApiError::Transport("lock".into()))?;
                let _ = rx.recv();
                Ok(99)
            }),
        );

        page.mount();
        page.unmount();
        release_tx.send(()).expect("Should release worker");

        assert!(!page.poll());
        assert_eq!(page.resource().state(), &ResourceState::Idle);
        assert!(!page.is_fetching());
    }
}
