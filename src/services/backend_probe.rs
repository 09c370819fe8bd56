use std::rc::Rc;

use crate::api::FileListPolicy;
use crate::config::ApiConfig;
use crate::fetch::transport::{ReqwestTransport, Transport};
use crate::fetch::{FetchController, RequestState};

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Reachable { files: usize },
    Unreachable(String),
}

/// Lists the backend's files once so a misconfigured `BACKEND_URL` shows
/// up in the server log rather than as an error in every browser.
pub async fn probe(config: &ApiConfig) -> ProbeOutcome {
    let transport: Rc<dyn Transport> = Rc::new(ReqwestTransport::new(config.clone()));
    let outcome = probe_with(transport).await;
    match &outcome {
        ProbeOutcome::Reachable { files } => {
            log::info!("backend at {} is reachable ({files} files)", config.base_url);
        }
        ProbeOutcome::Unreachable(reason) => {
            log::warn!("backend at {} is not reachable: {reason}", config.base_url);
        }
    }
    outcome
}

pub async fn probe_with(transport: Rc<dyn Transport>) -> ProbeOutcome {
    let controller = FetchController::new(FileListPolicy, transport);
    if let Some(completion) = controller.trigger(()) {
        completion.await;
    }
    match controller.state() {
        RequestState::Success(files) => ProbeOutcome::Reachable { files: files.len() },
        RequestState::Failure(err) => ProbeOutcome::Unreachable(err.to_string()),
        other => ProbeOutcome::Unreachable(format!("probe ended in state {}", other.name())),
    }
}
