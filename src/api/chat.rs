use serde::{Deserialize, Serialize};

use super::require_text;
use crate::fetch::{ApiRequest, FetchPolicy};

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// `POST /ask/gemini`
pub struct ChatPolicy;

impl FetchPolicy for ChatPolicy {
    type Input = String;
    type Output = ChatReply;

    fn label(&self) -> &'static str {
        "chat"
    }

    fn validate(&self, prompt: &String) -> Result<(), String> {
        require_text(prompt, "Please enter a question.")
    }

    fn build_request(&self, prompt: &String) -> ApiRequest {
        ApiRequest::post(
            "/ask/gemini",
            &ChatRequest {
                prompt: prompt.clone(),
            },
        )
    }

    fn fallback_message(&self) -> &'static str {
        "Error sending the request."
    }
}
