//! Async resource: the fetch lifecycle shared by every page.
//!
//! A `Resource` moves `Idle → Loading → Success | Failed`. Each `begin()`
//! hands out a `Ticket`; `complete()` only accepts the ticket of the most
//! recent `begin()`, so a result arriving after `reset()` (page unmounted) or
//! after a newer request is dropped instead of overwriting fresher state.

use chrono::{DateTime, Utc};

use crate::ports::ApiError;

/// Lifecycle state of one fetched payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    /// Not mounted or never requested
    Idle,
    /// Request in flight
    Loading,
    /// Payload received and validated
    Success(T),
    /// Request failed; the error is for logs only
    Failed(ApiError),
}

/// Proof of which request a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// One fetched payload plus its request bookkeeping.
#[derive(Debug)]
pub struct Resource<T> {
    name: &'static str,
    state: ResourceState<T>,
    generation: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Resource<T> {
    /// `name` is only used to label log lines.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: ResourceState::Idle,
            generation: 0,
            fetched_at: None,
        }
    }

    /// Start a request. Any earlier outstanding ticket becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = ResourceState::Loading;
        tracing::info!(resource = self.name, "Fetching");
        Ticket(self.generation)
    }

    /// Record the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` when the ticket is stale and the result was discarded.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, ApiError>) -> bool {
        if ticket.0 != self.generation || !self.is_loading() {
            tracing::debug!(resource = self.name, "Discarding stale result");
            return false;
        }

        match result {
            Ok(data) => {
                tracing::info!(resource = self.name, "Loaded");
                self.state = ResourceState::Success(data);
                self.fetched_at = Some(Utc::now());
            }
            Err(e) => {
                tracing::error!(resource = self.name, error = %e, "Failed to load");
                self.state = ResourceState::Failed(e);
                self.fetched_at = None;
            }
        }
        true
    }

    /// Return to `Idle` and invalidate any outstanding ticket.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ResourceState::Idle;
        self.fetched_at = None;
    }

    #[must_use]
    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            ResourceState::Success(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResourceState::Loading)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.state, ResourceState::Failed(_))
    }

    /// When the current payload arrived.
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_success() {
        let mut res: Resource<u32> = Resource::new("test");
        assert_eq!(res.state(), &ResourceState::Idle);

        let ticket = res.begin();
        assert!(res.is_loading());

        assert!(res.complete(ticket, Ok(7)));
        assert_eq!(res.data(), Some(&7));
        assert!(res.fetched_at().is_some());
    }

    #[test]
    fn test_lifecycle_failure() {
        let mut res: Resource<u32> = Resource::new("test");
        let ticket = res.begin();
        assert!(res.complete(ticket, Err(ApiError::Status(500))));
        assert!(res.is_failed());
        assert!(res.data().is_none());
    }

    #[test]
    fn test_result_after_reset_is_discarded() {
        let mut res: Resource<u32> = Resource::new("test");
        let ticket = res.begin();
        res.reset();

        assert!(!res.complete(ticket, Ok(1)));
        assert_eq!(res.state(), &ResourceState::Idle);
    }

    #[test]
    fn test_only_latest_ticket_is_accepted() {
        let mut res: Resource<u32> = Resource::new("test");
        let first = res.begin();
        let second = res.begin();

        assert!(!res.complete(first, Ok(1)));
        assert!(res.is_loading());
        assert!(res.complete(second, Ok(2)));
        assert_eq!(res.data(), Some(&2));
    }

    #[test]
    fn test_refetch_drops_previous_payload() {
        let mut res: Resource<u32> = Resource::new("test");
        let t1 = res.begin();
        res.complete(t1, Ok(1));

        let t2 = res.begin();
        assert!(res.data().is_none());
        res.complete(t2, Err(ApiError::Transport("refused".into())));
        assert!(res.data().is_none());
        assert!(res.is_failed());
    }

    #[test]
    fn test_ticket_cannot_complete_twice() {
        let mut res: Resource<u32> = Resource::new("test");
        let ticket = res.begin();
        assert!(res.complete(ticket, Ok(1)));
        assert!(!res.complete(ticket, Ok(2)));
        assert_eq!(res.data(), Some(&1));
    }
}
