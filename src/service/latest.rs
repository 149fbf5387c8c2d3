//! Latest-request-wins coordination
//!
//! A [`LatestRequest`] tracks the most recent request for a changing
//! parameter (e.g. the address typed into a lookup). Starting a request
//! aborts the previous one, and a finished request only applies its result
//! if nothing newer has started since.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use futures::future::{AbortHandle, Abortable};

use crate::client::{Baker, IndexerApi, YieldApi};
use crate::error::Result;
use crate::service::BakingService;

/// Result of a request run through [`LatestRequest::run`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The request was still the latest when it finished
    Current(T),
    /// A newer request started first; the result was dropped
    Superseded,
}

impl<T> Outcome<T> {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Outcome::Superseded)
    }
}

#[derive(Debug, Default)]
struct LatestState {
    generation: u64,
    abort: Option<AbortHandle>,
}

#[derive(Debug, Default)]
pub struct LatestRequest {
    state: Mutex<LatestState>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently started request
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Run `request` as the newest request, aborting whichever one was in
    /// flight. If it completes while still the newest, `apply` runs with the
    /// result under the coordination lock so no newer request can interleave.
    ///
    /// An aborted request is dropped at its next poll, so nothing after its
    /// current await point runs.
    pub async fn run<T, Fut, A>(&self, request: Fut, apply: A) -> Outcome<T>
    where
        Fut: Future<Output = T>,
        A: FnOnce(&T),
    {
        let (handle, registration) = AbortHandle::new_pair();
        let generation = {
            let mut state = self.lock();
            if let Some(previous) = state.abort.replace(handle) {
                previous.abort();
            }
            state.generation += 1;
            state.generation
        };

        let result = Abortable::new(request, registration).await;

        let mut state = self.lock();
        match result {
            Ok(value) if state.generation == generation => {
                state.abort = None;
                apply(&value);
                Outcome::Current(value)
            }
            Ok(_) => Outcome::Superseded,
            Err(_aborted) => {
                log::debug!("Request generation {} aborted", generation);
                Outcome::Superseded
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, LatestState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// The baker currently shown by a lookup view.
///
/// Each [`select`](Self::select) supersedes the previous one, so a slow
/// lookup for an address the user has already moved away from never
/// replaces the newer baker.
#[derive(Debug, Default)]
pub struct BakerSelection {
    latest: LatestRequest,
    displayed: Mutex<Option<Baker>>,
}

impl BakerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `address` and display it if no newer lookup started
    /// meanwhile. Errors of a superseded lookup are discarded as well.
    pub async fn select<I, Y>(
        &self,
        service: &BakingService<I, Y>,
        address: &str,
    ) -> Outcome<Result<Baker>>
    where
        I: IndexerApi + 'static,
        Y: YieldApi + 'static,
    {
        let displayed = &self.displayed;
        self.latest
            .run(service.baker_details(address), move |result| {
                if let Ok(baker) = result {
                    let mut slot = match displayed.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    *slot = Some(baker.clone());
                }
            })
            .await
    }

    /// The baker currently displayed, if any
    pub fn displayed(&self) -> Option<Baker> {
        match self.displayed.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
