//! Request lifecycle shared by every page.
//!
//! A [`FetchController`] owns one [`RequestState`] and moves it through
//! `Idle -> Loading -> Success | Failure`. Each page plugs in a
//! [`FetchPolicy`] that knows how to validate its input, build the outbound
//! request and recognise a well-formed response. The controller itself is
//! plain Rust so it can be driven from tests without a reactive runtime;
//! [`hook::use_fetch`] binds it to a Leptos signal.

pub mod hook;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;

use futures::future::LocalBoxFuture;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

pub use hook::{use_fetch, FetchHandle};
pub use transport::{ApiRequest, ApiResponse, Transport};

pub const MALFORMED_RESPONSE: &str = "Received an unexpected response format from the server.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Bad or missing input, caught before any network call.
    #[error("{0}")]
    Validation(String),
    /// Network failure, timeout or non-2xx status.
    #[error("{0}")]
    Transport(String),
    /// The body did not match the expected shape.
    #[error("{0}")]
    Format(String),
}

#[derive(Deserialize)]
struct ErrorDetail {
    detail: Option<String>,
}

impl FetchError {
    pub fn malformed() -> Self {
        FetchError::Format(MALFORMED_RESPONSE.to_string())
    }

    /// Builds the message for a non-2xx response. A server-supplied `detail`
    /// wins over the bare status line.
    pub fn rejected(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorDetail>(body)
            .ok()
            .and_then(|e| e.detail)
            .filter(|d| !d.trim().is_empty());

        match detail {
            Some(detail) => FetchError::Transport(format!("Error: {detail} (Status: {status})")),
            None => FetchError::Transport(format!("HTTP error! status: {status}")),
        }
    }

    /// Network-level failure; falls back to the page's generic message when
    /// the transport gave no text.
    pub fn unreachable(text: &str, fallback: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            FetchError::Transport(fallback.to_string())
        } else {
            FetchError::Transport(text.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(FetchError),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            RequestState::Failure(e) => Some(e),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Loading => "loading",
            RequestState::Success(_) => "success",
            RequestState::Failure(_) => "failure",
        }
    }
}

/// Page-specific strategy plugged into a [`FetchController`].
pub trait FetchPolicy: 'static {
    type Input: 'static;
    type Output: DeserializeOwned + Clone + 'static;

    /// Short name used in log lines.
    fn label(&self) -> &'static str;

    /// Returns the user-facing message when `input` is unusable.
    fn validate(&self, input: &Self::Input) -> Result<(), String>;

    fn build_request(&self, input: &Self::Input) -> ApiRequest;

    /// Extra checks on a body that already deserialised.
    fn check_shape(&self, _output: &Self::Output) -> bool {
        true
    }

    fn fallback_message(&self) -> &'static str {
        "An unexpected error occurred."
    }
}

/// Future that settles one request. Dropping it abandons the request.
pub type Completion = LocalBoxFuture<'static, ()>;

type Observer<T> = Rc<dyn Fn(&RequestState<T>)>;

struct Slot<T> {
    state: RequestState<T>,
    sequence: u64,
    released: bool,
    observer: Option<Observer<T>>,
}

impl<T: Clone> Slot<T> {
    fn commit(cell: &RefCell<Self>, next: RequestState<T>) {
        let observer = {
            let mut slot = cell.borrow_mut();
            slot.state = next.clone();
            slot.observer.clone()
        };
        if let Some(observer) = observer {
            observer(&next);
        }
    }
}

pub struct FetchController<P: FetchPolicy> {
    policy: Rc<P>,
    transport: Rc<dyn Transport>,
    slot: Rc<RefCell<Slot<P::Output>>>,
}

impl<P: FetchPolicy> FetchController<P> {
    pub fn new(policy: P, transport: Rc<dyn Transport>) -> Self {
        Self {
            policy: Rc::new(policy),
            transport,
            slot: Rc::new(RefCell::new(Slot {
                state: RequestState::Idle,
                sequence: 0,
                released: false,
                observer: None,
            })),
        }
    }

    /// Registers the single observer notified after every transition.
    pub fn observe(&self, observer: impl Fn(&RequestState<P::Output>) + 'static) {
        self.slot.borrow_mut().observer = Some(Rc::new(observer));
    }

    pub fn state(&self) -> RequestState<P::Output> {
        self.slot.borrow().state.clone()
    }

    pub fn sequence(&self) -> u64 {
        self.slot.borrow().sequence
    }

    pub fn is_released(&self) -> bool {
        self.slot.borrow().released
    }

    /// Starts a new attempt. The state is `Loading` (or `Failure` for bad
    /// input) by the time this returns; the returned future must be polled
    /// to completion for the response to be applied.
    pub fn trigger(&self, input: P::Input) -> Option<Completion> {
        let label = self.policy.label();
        let sequence = {
            let mut slot = self.slot.borrow_mut();
            if slot.released {
                debug!("[{label}] trigger ignored, controller released");
                return None;
            }
            slot.sequence += 1;
            slot.sequence
        };

        if let Err(message) = self.policy.validate(&input) {
            debug!("[{label}] #{sequence} rejected before sending: {message}");
            Slot::commit(&self.slot, RequestState::Failure(FetchError::Validation(message)));
            return None;
        }

        Slot::commit(&self.slot, RequestState::Loading);

        let request = self.policy.build_request(&input);
        debug!("[{label}] #{sequence} {} {}", request.method, request.path);
        let pending = self.transport.send(request);

        let policy = Rc::clone(&self.policy);
        let slot = Rc::clone(&self.slot);
        let completion: Completion = Box::pin(async move {
            let outcome = match pending.await {
                Ok(response) => interpret(policy.as_ref(), response),
                Err(text) => Err(FetchError::unreachable(&text, policy.fallback_message())),
            };
            settle(&slot, policy.label(), sequence, outcome);
        });
        Some(completion)
    }

    /// Detaches the owning view. Pending completions become no-ops and later
    /// triggers are ignored.
    pub fn release(&self) {
        let mut slot = self.slot.borrow_mut();
        if !slot.released {
            debug!("[{}] released at #{}", self.policy.label(), slot.sequence);
        }
        slot.released = true;
        slot.observer = None;
    }
}

fn interpret<P: FetchPolicy>(policy: &P, response: ApiResponse) -> Result<P::Output, FetchError> {
    if !response.is_success() {
        return Err(FetchError::rejected(response.status, &response.body));
    }

    let output: P::Output = serde_json::from_str(&response.body).map_err(|e| {
        warn!("[{}] response did not match the expected shape: {e}", policy.label());
        FetchError::malformed()
    })?;

    if policy.check_shape(&output) {
        Ok(output)
    } else {
        warn!("[{}] response failed the shape check", policy.label());
        Err(FetchError::malformed())
    }
}

fn settle<T: Clone>(
    slot: &RefCell<Slot<T>>,
    label: &str,
    sequence: u64,
    outcome: Result<T, FetchError>,
) {
    {
        let current = slot.borrow();
        if current.released {
            debug!("[{label}] #{sequence} settled after release, dropped");
            return;
        }
        if current.sequence != sequence {
            warn!(
                "[{label}] #{sequence} superseded by #{}, dropped",
                current.sequence
            );
            return;
        }
    }

    let next = match outcome {
        Ok(data) => RequestState::Success(data),
        Err(e) => {
            error!("[{label}] #{sequence} failed: {e}");
            RequestState::Failure(e)
        }
    };
    debug!("[{label}] #{sequence} -> {}", next.name());
    Slot::commit(slot, next);
}

#[cfg(test)]
mod tests {
    use super::testing::{json, MockTransport};
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Echo {
        text: String,
    }

    struct EchoPolicy;

    impl FetchPolicy for EchoPolicy {
        type Input = String;
        type Output = Echo;

        fn label(&self) -> &'static str {
            "echo"
        }

        fn validate(&self, input: &String) -> Result<(), String> {
            if input.trim().is_empty() {
                Err("Say something.".to_string())
            } else {
                Ok(())
            }
        }

        fn build_request(&self, input: &String) -> ApiRequest {
            ApiRequest::post("/echo", &serde_json::json!({ "text": input }))
        }

        fn check_shape(&self, output: &Echo) -> bool {
            !output.text.is_empty()
        }

        fn fallback_message(&self) -> &'static str {
            "Echo failed."
        }
    }

    fn controller() -> (FetchController<EchoPolicy>, Rc<MockTransport>) {
        let mock = Rc::new(MockTransport::default());
        let controller = FetchController::new(EchoPolicy, mock.clone());
        (controller, mock)
    }

    fn recorded(controller: &FetchController<EchoPolicy>) -> Rc<RefCell<Vec<RequestState<Echo>>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.observe(move |state| sink.borrow_mut().push(state.clone()));
        seen
    }

    fn echo(text: &str) -> Echo {
        Echo { text: text.to_string() }
    }

    #[test]
    fn starts_idle() {
        let (controller, mock) = controller();
        assert!(controller.state().is_idle());
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn valid_trigger_is_loading_before_anything_resolves() {
        let (controller, mock) = controller();
        let completion = controller.trigger("hi".to_string());

        assert!(completion.is_some());
        assert!(controller.state().is_loading());
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.request(0).path, "/echo");
    }

    #[test]
    fn invalid_trigger_fails_without_network() {
        let (controller, mock) = controller();
        let completion = controller.trigger("   ".to_string());

        assert!(completion.is_none());
        assert_eq!(
            controller.state(),
            RequestState::Failure(FetchError::Validation("Say something.".to_string()))
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn success_stores_data() {
        let (controller, mock) = controller();
        let seen = recorded(&controller);
        let completion = controller.trigger("hi".to_string()).unwrap();

        mock.respond(0, json(200, r#"{"text":"hello"}"#));
        block_on(completion);

        assert_eq!(controller.state(), RequestState::Success(echo("hello")));
        assert_eq!(
            *seen.borrow(),
            vec![RequestState::Loading, RequestState::Success(echo("hello"))]
        );
    }

    #[test]
    fn missing_field_is_a_format_error() {
        let (controller, mock) = controller();
        let completion = controller.trigger("hi".to_string()).unwrap();

        mock.respond(0, json(200, r#"{"other":"x"}"#));
        block_on(completion);

        assert_eq!(controller.state(), RequestState::Failure(FetchError::malformed()));
    }

    #[test]
    fn failed_shape_check_never_yields_partial_success() {
        let (controller, mock) = controller();
        let completion = controller.trigger("hi".to_string()).unwrap();

        mock.respond(0, json(200, r#"{"text":""}"#));
        block_on(completion);

        assert_eq!(
            controller.state().error_message().as_deref(),
            Some(MALFORMED_RESPONSE)
        );
    }

    #[test]
    fn non_json_body_is_a_format_error() {
        let (controller, mock) = controller();
        let completion = controller.trigger("hi".to_string()).unwrap();

        mock.respond(0, json(200, "<html>oops</html>"));
        block_on(completion);

        assert!(matches!(controller.state(), RequestState::Failure(FetchError::Format(_))));
    }

    #[test]
    fn server_detail_takes_priority() {
        let (controller, mock) = controller();
        let completion = controller.trigger("hi".to_string()).unwrap();

        mock.respond(0, json(500, r#"{"detail":"db down"}"#));
        block_on(completion);

        assert_eq!(
            controller.state().error_message().as_deref(),
            Some("Error: db down (Status: 500)")
        );
    }

    #[test]
    fn bare_status_without_detail() {
        let (controller, mock) = controller();
        let completion = controller.trigger("hi".to_string()).unwrap();

        mock.respond(0, json(404, "Not Found"));
        block_on(completion);

        assert_eq!(
            controller.state().error_message().as_deref(),
            Some("HTTP error! status: 404")
        );
    }

    #[test]
    fn network_error_text_then_fallback() {
        let (controller, mock) = controller();

        let first = controller.trigger("a".to_string()).unwrap();
        mock.respond(0, Err("Failed to fetch".to_string()));
        block_on(first);
        assert_eq!(
            controller.state().error_message().as_deref(),
            Some("Failed to fetch")
        );

        let second = controller.trigger("b".to_string()).unwrap();
        mock.respond(1, Err(String::new()));
        block_on(second);
        assert_eq!(controller.state().error_message().as_deref(), Some("Echo failed."));
    }

    #[test]
    fn later_trigger_wins_when_earlier_resolves_last() {
        let (controller, mock) = controller();
        let first = controller.trigger("first".to_string()).unwrap();
        let second = controller.trigger("second".to_string()).unwrap();

        mock.respond(1, json(200, r#"{"text":"second"}"#));
        block_on(second);
        mock.respond(0, json(200, r#"{"text":"first"}"#));
        block_on(first);

        assert_eq!(controller.state(), RequestState::Success(echo("second")));
    }

    #[test]
    fn later_trigger_wins_when_earlier_resolves_first() {
        let (controller, mock) = controller();
        let seen = recorded(&controller);
        let first = controller.trigger("first".to_string()).unwrap();
        let second = controller.trigger("second".to_string()).unwrap();

        mock.respond(0, json(500, r#"{"detail":"stale"}"#));
        block_on(first);
        assert!(controller.state().is_loading());

        mock.respond(1, json(200, r#"{"text":"second"}"#));
        block_on(second);

        assert_eq!(controller.state(), RequestState::Success(echo("second")));
        assert_eq!(
            *seen.borrow(),
            vec![
                RequestState::Loading,
                RequestState::Loading,
                RequestState::Success(echo("second")),
            ]
        );
    }

    #[test]
    fn validation_failure_supersedes_in_flight_request() {
        let (controller, mock) = controller();
        let first = controller.trigger("first".to_string()).unwrap();
        assert!(controller.trigger(String::new()).is_none());

        mock.respond(0, json(200, r#"{"text":"first"}"#));
        block_on(first);

        assert!(matches!(controller.state(), RequestState::Failure(FetchError::Validation(_))));
    }

    #[test]
    fn retrigger_after_failure_goes_back_to_loading() {
        let (controller, mock) = controller();
        let first = controller.trigger("a".to_string()).unwrap();
        mock.respond(0, json(503, "{}"));
        block_on(first);
        assert!(controller.state().error().is_some());

        let _second = controller.trigger("b".to_string()).unwrap();
        assert!(controller.state().is_loading());
        assert_eq!(controller.sequence(), 2);
    }

    #[test]
    fn release_suppresses_pending_completion() {
        let (controller, mock) = controller();
        let seen = recorded(&controller);
        let completion = controller.trigger("hi".to_string()).unwrap();

        controller.release();
        mock.respond(0, json(200, r#"{"text":"late"}"#));
        block_on(completion);

        assert!(controller.state().is_loading());
        assert_eq!(*seen.borrow(), vec![RequestState::Loading]);
    }

    #[test]
    fn release_ignores_later_triggers() {
        let (controller, mock) = controller();
        controller.release();

        assert!(controller.trigger("hi".to_string()).is_none());
        assert!(controller.is_released());
        assert!(controller.state().is_idle());
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn dropped_transport_reports_cancellation() {
        let (controller, mock) = controller();
        let completion = controller.trigger("hi".to_string()).unwrap();

        mock.abandon(0);
        block_on(completion);

        assert_eq!(
            controller.state().error_message().as_deref(),
            Some("request abandoned")
        );
    }
}
