use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use super::transport::Transport;
use super::{Completion, FetchController, FetchPolicy, RequestState};

/// Reactive view of a [`FetchController`] owned by the current component.
///
/// A handle created during server rendering carries no controller: effects
/// never run there, and the controller's `Rc` state must not outlive the
/// thread that rendered the page.
pub struct FetchHandle<P: FetchPolicy> {
    state: ReadSignal<RequestState<P::Output>>,
    controller: Option<StoredValue<FetchController<P>, LocalStorage>>,
}

impl<P: FetchPolicy> Clone for FetchHandle<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FetchPolicy> Copy for FetchHandle<P> {}

impl<P> FetchHandle<P>
where
    P: FetchPolicy,
    P::Output: Send + Sync,
{
    /// A handle that stays `Idle` and ignores triggers.
    pub fn inert() -> Self {
        let (state, _) = signal(RequestState::Idle);
        Self {
            state,
            controller: None,
        }
    }

    pub fn trigger(&self, input: P::Input) {
        if let Some(completion) = self.start(input) {
            spawn_local(completion);
        }
    }

    /// Like [`trigger`](Self::trigger) but hands the completion back to the
    /// caller instead of spawning it.
    pub(crate) fn start(&self, input: P::Input) -> Option<Completion> {
        self.controller?
            .try_with_value(|controller| controller.trigger(input))
            .flatten()
    }

    pub fn state(&self) -> ReadSignal<RequestState<P::Output>> {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(RequestState::is_loading)
    }

    pub fn data(&self) -> Option<P::Output> {
        self.state.with(|s| s.data().cloned())
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.with(RequestState::error_message)
    }

    pub fn loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(RequestState::is_loading))
    }

    pub fn error_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(RequestState::error_message))
    }
}

/// Creates a controller for `policy` wired to the configured backend. The
/// controller is released when the calling component is torn down.
#[cfg(not(feature = "ssr"))]
pub fn use_fetch<P>(policy: P) -> FetchHandle<P>
where
    P: FetchPolicy,
    P::Output: Send + Sync,
{
    use super::transport::BrowserTransport;
    use crate::config::ApiConfig;

    let config = use_context::<ApiConfig>().unwrap_or_default();
    use_fetch_with(policy, Rc::new(BrowserTransport::new(config)))
}

/// Server rendering only ever shows the `Idle` state.
#[cfg(feature = "ssr")]
pub fn use_fetch<P>(_policy: P) -> FetchHandle<P>
where
    P: FetchPolicy,
    P::Output: Send + Sync,
{
    FetchHandle::inert()
}

/// [`use_fetch`] over an explicit transport.
pub fn use_fetch_with<P>(policy: P, transport: Rc<dyn Transport>) -> FetchHandle<P>
where
    P: FetchPolicy,
    P::Output: Send + Sync,
{
    let controller = FetchController::new(policy, transport);

    let (state, set_state) = signal(RequestState::Idle);
    controller.observe(move |next: &RequestState<P::Output>| {
        let _ = set_state.try_set(next.clone());
    });

    let controller = StoredValue::new_local(controller);
    on_cleanup(move || {
        controller.try_with_value(FetchController::release);
    });

    FetchHandle {
        state,
        controller: Some(controller),
    }
}
