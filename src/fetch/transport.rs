use futures::future::LocalBoxFuture;
use http::Method;
use serde::Serialize;

use crate::config::ApiConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the backend base URL, e.g. `/api/files`.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            // serialising our own request structs cannot fail
            body: serde_json::to_value(body).ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange with the backend. `Err` carries the transport-level
/// error text (network failure, timeout); any status code is an `Ok`.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<ApiResponse, String>>;
}

/// `window.fetch` with an abort timer.
#[cfg(not(feature = "ssr"))]
pub struct BrowserTransport {
    config: ApiConfig,
}

#[cfg(not(feature = "ssr"))]
impl BrowserTransport {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[cfg(not(feature = "ssr"))]
impl Transport for BrowserTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<ApiResponse, String>> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;

        let url = self.config.endpoint(&request.path);
        let timeout = self.config.request_timeout();

        Box::pin(async move {
            let headers = web_sys::Headers::new().map_err(js_error_text)?;
            headers
                .set("Accept", "application/json")
                .map_err(js_error_text)?;

            let init = web_sys::RequestInit::new();
            init.set_method(request.method.as_str());
            if let Some(body) = &request.body {
                headers
                    .set("Content-Type", "application/json")
                    .map_err(js_error_text)?;
                init.set_body(&JsValue::from_str(&body.to_string()));
            }
            init.set_headers(&headers);

            let abort = web_sys::AbortController::new().map_err(js_error_text)?;
            init.set_signal(Some(&abort.signal()));
            let timer = leptos::prelude::set_timeout_with_handle(move || abort.abort(), timeout).ok();

            let window = web_sys::window().ok_or_else(|| "no browser window available".to_string())?;
            let fetch_request =
                web_sys::Request::new_with_str_and_init(&url, &init).map_err(js_error_text)?;

            let outcome = JsFuture::from(window.fetch_with_request(&fetch_request)).await;
            if let Some(timer) = timer {
                timer.clear();
            }

            let response: web_sys::Response = match outcome {
                Ok(value) => value.dyn_into().map_err(js_error_text)?,
                Err(e) if is_abort(&e) => {
                    return Err(format!("Request timed out after {}s", timeout.as_secs()));
                }
                Err(e) => return Err(js_error_text(e)),
            };

            let text = JsFuture::from(response.text().map_err(js_error_text)?)
                .await
                .map_err(js_error_text)?;

            Ok(ApiResponse {
                status: response.status(),
                body: text.as_string().unwrap_or_default(),
            })
        })
    }
}

#[cfg(not(feature = "ssr"))]
fn is_abort(value: &wasm_bindgen::JsValue) -> bool {
    use wasm_bindgen::JsCast;
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.name()) == "AbortError")
        .unwrap_or(false)
}

#[cfg(not(feature = "ssr"))]
fn js_error_text(value: wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;
    if let Some(e) = value.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Server-side transport, used by the start-up probe.
#[cfg(feature = "ssr")]
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

#[cfg(feature = "ssr")]
impl ReqwestTransport {
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|e| {
                log::warn!("falling back to default http client: {e}");
                reqwest::Client::new()
            });
        Self { client, config }
    }
}

#[cfg(feature = "ssr")]
impl Transport for ReqwestTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<ApiResponse, String>> {
        let url = self.config.endpoint(&request.path);
        let timeout = self.config.request_timeout();
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header("Accept", "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Box::pin(async move {
            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    format!("Request timed out after {}s", timeout.as_secs())
                } else {
                    e.to_string()
                }
            })?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| e.to_string())?;
            Ok(ApiResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_carries_json_body() {
        #[derive(Serialize)]
        struct Body {
            prompt: String,
        }
        let request = ApiRequest::post(
            "/ask/gemini",
            &Body {
                prompt: "hi".to_string(),
            },
        );
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(serde_json::json!({ "prompt": "hi" })));
    }

    #[test]
    fn get_has_no_body() {
        let request = ApiRequest::get("/api/files");
        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());
    }

    #[test]
    fn success_range() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let redirect = ApiResponse {
            status: 302,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
