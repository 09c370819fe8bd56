use serde::{Deserialize, Serialize};

use super::require_text;
use crate::fetch::{ApiRequest, FetchPolicy};

pub const SEARCH_RESULT_COUNT: u32 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub num_results: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnhancedSearch {
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub enhanced_summary: Option<String>,
}

impl EnhancedSearch {
    /// The summary, if the backend produced a non-blank one.
    pub fn summary(&self) -> Option<&str> {
        self.enhanced_summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// `POST /api/search_and_enhance`
pub struct SearchPolicy {
    pub num_results: u32,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            num_results: SEARCH_RESULT_COUNT,
        }
    }
}

impl FetchPolicy for SearchPolicy {
    type Input = String;
    type Output = EnhancedSearch;

    fn label(&self) -> &'static str {
        "search"
    }

    fn validate(&self, query: &String) -> Result<(), String> {
        require_text(query, "Please enter a search query.")
    }

    fn build_request(&self, query: &String) -> ApiRequest {
        ApiRequest::post(
            "/api/search_and_enhance",
            &SearchRequest {
                query: query.trim().to_string(),
                num_results: self.num_results,
            },
        )
    }

    fn fallback_message(&self) -> &'static str {
        "Error during search."
    }
}
