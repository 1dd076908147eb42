//! Refresh coordination state
//!
//! One `RefreshState` per session client. It is only touched inside short
//! critical sections that never await, so "is a refresh running?" and "start
//! one" happen atomically.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::errors::ClientError;
use crate::http::{ApiRequest, ApiResponse};

pub(crate) type Reply = oneshot::Sender<Result<ApiResponse, ClientError>>;

/// A request that hit 401 while a refresh was already running
pub(crate) struct PendingRequest {
    pub request: ApiRequest,
    pub reply: Reply,
}

#[derive(Default)]
pub(crate) struct RefreshState {
    pub refreshing: bool,
    pub queue: VecDeque<PendingRequest>,
}

/// Exclusive right to run the in-flight refresh.
///
/// Dropping an unreleased lease (the driving future was cancelled) returns
/// the state to idle and drops every queued reply sender. Woken callers go
/// through admission again: they retry with a rotated token or one of them
/// starts a new refresh.
pub(crate) struct RefreshLease<'a> {
    state: &'a Mutex<RefreshState>,
    released: bool,
}

impl<'a> RefreshLease<'a> {
    /// Mark the state as refreshing. Caller must hold the lock and have seen
    /// `refreshing == false`.
    pub fn acquire(state: &'a Mutex<RefreshState>, guard: &mut RefreshState) -> Self {
        debug_assert!(!guard.refreshing);
        guard.refreshing = true;
        Self { state, released: false }
    }

    /// End the refresh and take ownership of everything queued behind it.
    pub fn release(mut self) -> VecDeque<PendingRequest> {
        self.released = true;
        let mut state = self.state.lock();
        state.refreshing = false;
        std::mem::take(&mut state.queue)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let abandoned = {
            let mut state = self.state.lock();
            state.refreshing = false;
            std::mem::take(&mut state.queue)
        };
        if !abandoned.is_empty() {
            tracing::warn!(queued = abandoned.len(), "token refresh abandoned");
        }
    }
}
