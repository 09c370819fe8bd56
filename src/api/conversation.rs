use serde::{Deserialize, Serialize};

use super::require_text;
use crate::fetch::{ApiRequest, FetchPolicy};

#[derive(Debug, Clone, Serialize)]
pub struct ConversationRequest {
    pub start_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedConversation {
    pub conversation: String,
}

/// `POST /api/generate_conversation`
pub struct ConversationPolicy;

impl FetchPolicy for ConversationPolicy {
    type Input = String;
    type Output = GeneratedConversation;

    fn label(&self) -> &'static str {
        "generate_conversation"
    }

    fn validate(&self, start_prompt: &String) -> Result<(), String> {
        require_text(start_prompt, "Please enter a starting prompt.")
    }

    fn build_request(&self, start_prompt: &String) -> ApiRequest {
        ApiRequest::post(
            "/api/generate_conversation",
            &ConversationRequest {
                start_prompt: start_prompt.clone(),
            },
        )
    }

    // an empty conversation is treated the same as a missing one
    fn check_shape(&self, output: &GeneratedConversation) -> bool {
        !output.conversation.is_empty()
    }

    fn fallback_message(&self) -> &'static str {
        "An unknown error occurred."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::{json, MockTransport};
    use crate::fetch::{FetchController, FetchError, RequestState, MALFORMED_RESPONSE};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn controller() -> (FetchController<ConversationPolicy>, Rc<MockTransport>) {
        let mock = Rc::new(MockTransport::default());
        (FetchController::new(ConversationPolicy, mock.clone()), mock)
    }

    #[test]
    fn generates_conversation() {
        let (controller, mock) = controller();
        let completion = controller
            .trigger("Tell me about state".to_string())
            .unwrap();
        assert!(controller.state().is_loading());
        assert_eq!(
            mock.request(0).body,
            Some(serde_json::json!({ "start_prompt": "Tell me about state" }))
        );

        mock.respond(0, json(200, r#"{"conversation":"Hello"}"#));
        block_on(completion);

        assert_eq!(
            controller.state(),
            RequestState::Success(GeneratedConversation {
                conversation: "Hello".to_string()
            })
        );
    }

    #[test]
    fn empty_prompt_never_hits_the_network() {
        let (controller, mock) = controller();
        assert!(controller.trigger(String::new()).is_none());

        assert_eq!(
            controller.state(),
            RequestState::Failure(FetchError::Validation(
                "Please enter a starting prompt.".to_string()
            ))
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn server_error_uses_detail_and_status() {
        let (controller, mock) = controller();
        let completion = controller.trigger("prompt".to_string()).unwrap();

        mock.respond(0, json(500, r#"{"detail":"db down"}"#));
        block_on(completion);

        assert_eq!(
            controller.state().error_message().as_deref(),
            Some("Error: db down (Status: 500)")
        );
    }

    #[test]
    fn empty_conversation_is_malformed() {
        let (controller, mock) = controller();
        let completion = controller.trigger("prompt".to_string()).unwrap();

        mock.respond(0, json(200, r#"{"conversation":""}"#));
        block_on(completion);

        assert_eq!(
            controller.state().error_message().as_deref(),
            Some(MALFORMED_RESPONSE)
        );
    }
}
