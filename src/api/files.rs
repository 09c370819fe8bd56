use serde::{Deserialize, Serialize};

use crate::fetch::{ApiRequest, FetchPolicy};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileInfo {
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedRequest {
    pub filenames: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedReport {
    pub message: String,
}

/// `GET /api/files`
pub struct FileListPolicy;

impl FetchPolicy for FileListPolicy {
    type Input = ();
    type Output = Vec<FileInfo>;

    fn label(&self) -> &'static str {
        "files"
    }

    fn validate(&self, _: &()) -> Result<(), String> {
        Ok(())
    }

    fn build_request(&self, _: &()) -> ApiRequest {
        ApiRequest::get("/api/files")
    }

    fn fallback_message(&self) -> &'static str {
        "Error fetching file list."
    }
}

/// `POST /api/seed_data`
pub struct SeedPolicy;

impl FetchPolicy for SeedPolicy {
    type Input = Vec<String>;
    type Output = SeedReport;

    fn label(&self) -> &'static str {
        "seed_data"
    }

    fn validate(&self, filenames: &Vec<String>) -> Result<(), String> {
        if filenames.is_empty() || filenames.iter().any(|f| f.trim().is_empty()) {
            Err("Please select a file to seed data.".to_string())
        } else {
            Ok(())
        }
    }

    fn build_request(&self, filenames: &Vec<String>) -> ApiRequest {
        ApiRequest::post(
            "/api/seed_data",
            &SeedRequest {
                filenames: filenames.clone(),
            },
        )
    }

    fn fallback_message(&self) -> &'static str {
        "Error seeding data."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::{json, MockTransport};
    use crate::fetch::{FetchController, RequestState};
    use futures::executor::block_on;
    use http::Method;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn listing_is_a_plain_get() {
        let request = FileListPolicy.build_request(&());
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/api/files");
    }

    #[test]
    fn lists_files() {
        let mock = Rc::new(MockTransport::default());
        let controller = FetchController::new(FileListPolicy, mock.clone());
        let completion = controller.trigger(()).unwrap();

        mock.respond(0, json(200, r#"[{"filename":"storms.txt"},{"filename":"caves.txt"}]"#));
        block_on(completion);

        assert_eq!(
            controller.state(),
            RequestState::Success(vec![
                FileInfo {
                    filename: "storms.txt".to_string()
                },
                FileInfo {
                    filename: "caves.txt".to_string()
                },
            ])
        );
    }

    #[test]
    fn object_instead_of_list_is_malformed() {
        let mock = Rc::new(MockTransport::default());
        let controller = FetchController::new(FileListPolicy, mock.clone());
        let completion = controller.trigger(()).unwrap();

        mock.respond(0, json(200, r#"{"files":[]}"#));
        block_on(completion);

        assert!(controller.state().error().is_some());
    }

    #[test]
    fn seeding_needs_a_selection() {
        assert_eq!(
            SeedPolicy.validate(&vec![]),
            Err("Please select a file to seed data.".to_string())
        );
        assert!(SeedPolicy.validate(&vec![String::new()]).is_err());
        assert!(SeedPolicy.validate(&vec!["storms.txt".to_string()]).is_ok());
    }

    #[test]
    fn seeding_posts_filenames() {
        let request = SeedPolicy.build_request(&vec!["storms.txt".to_string()]);
        assert_eq!(request.path, "/api/seed_data");
        assert_eq!(
            request.body,
            Some(serde_json::json!({ "filenames": ["storms.txt"] }))
        );
    }

    #[test]
    fn seed_failure_without_text_uses_fallback() {
        let mock = Rc::new(MockTransport::default());
        let controller = FetchController::new(SeedPolicy, mock.clone());
        let completion = controller.trigger(vec!["storms.txt".to_string()]).unwrap();

        mock.respond(0, Err(String::new()));
        block_on(completion);

        assert_eq!(
            controller.state().error_message().as_deref(),
            Some("Error seeding data.")
        );
    }
}
