//! At-most-one-concurrent-execution primitive.
//!
//! Callers that arrive while an operation is in flight join the shared
//! future and receive the same result. The slot clears when the flight
//! settles (success or failure), so a later call starts a fresh one.

use std::sync::Mutex;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

type Flight<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

/// Guarded optional handle to a single in-flight operation.
///
/// Reusable for any operation requiring at-most-one-concurrent-execution
/// semantics; results must be cloneable since every joined caller gets one.
pub struct SingleFlight<T, E> {
    inflight: Mutex<Option<Flight<T, E>>>,
}

impl<T, E> Default for SingleFlight<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> SingleFlight<T, E> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            inflight: Mutex::new(None),
        }
    }

    /// Whether an operation is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.inflight.lock().unwrap().is_some()
    }
}

impl<T, E> SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Joins the in-flight operation if one exists, otherwise starts `op`.
    ///
    /// The factory is only invoked when this caller starts the flight. The
    /// mutex is held just to install or read the handle, never across an
    /// await.
    pub async fn run<F>(&self, op: F) -> Result<T, E>
    where
        F: FnOnce() -> BoxFuture<'static, Result<T, E>>,
    {
        let (flight, started_here) = {
            let mut slot = self.inflight.lock().unwrap();
            match slot.as_ref() {
                Some(existing) => (existing.clone(), false),
                None => {
                    let flight = op().shared();
                    *slot = Some(flight.clone());
                    (flight, true)
                }
            }
        };

        let result = flight.clone().await;

        if started_here {
            let mut slot = self.inflight.lock().unwrap();
            if slot
                .as_ref()
                .is_some_and(|current| Shared::ptr_eq(current, &flight))
            {
                *slot = None;
            }
        }

        result
    }
}

impl<T, E> std::fmt::Debug for SingleFlight<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.inflight.lock().unwrap().is_some())
            .finish()
    }
}
