//! REST adapter for a live job platform.
//!
//! Endpoints (relative to `PLATFORM_BASE_URL`):
//! - `GET  /jobs/search?title=...`  → `[JobPosting]` or `{"results": [JobPosting]}`
//! - `POST /jobs/{id}/apply`        → any 2xx is an accepted submission
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::job::{CandidateData, JobId, JobPosting};
use crate::platform::{ApplicationSubmitter, JobBoard, PlatformError, SubmissionOutcome};

/// Longest platform error body echoed into an application log.
const MAX_DIAGNOSTIC_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Bare(Vec<JobPosting>),
    Wrapped {
        #[serde(alias = "search_results", alias = "jobs")]
        results: Vec<JobPosting>,
    },
}

impl SearchResponse {
    fn into_postings(self) -> Vec<JobPosting> {
        match self {
            SearchResponse::Bare(p) => p,
            SearchResponse::Wrapped { results } => results,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyRequest<'a> {
    job_id: JobId,
    candidate_data: &'a CandidateData,
}

#[derive(Clone)]
pub struct HttpPlatform {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpPlatform {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl JobBoard for HttpPlatform {
    async fn search(&self, title: &str) -> Result<Vec<JobPosting>, PlatformError> {
        let url = format!("{}/jobs/search", self.base_url);
        let response = self
            .authorize(self.client.get(&url).query(&[("title", title)]))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;
        let postings = parsed.into_postings();

        debug!("Platform search '{title}' returned {} postings", postings.len());
        Ok(postings)
    }
}

#[async_trait]
impl ApplicationSubmitter for HttpPlatform {
    async fn submit_application(
        &self,
        job_id: JobId,
        candidate: &CandidateData,
    ) -> SubmissionOutcome {
        let url = format!("{}/jobs/{job_id}/apply", self.base_url);
        let body = ApplyRequest {
            job_id,
            candidate_data: candidate,
        };

        let response = match self.authorize(self.client.post(&url).json(&body)).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%job_id, "Submission request failed: {e}");
                return SubmissionOutcome::rejected(format!("Could not reach job platform: {e}"));
            }
        };

        let status = response.status();
        if status.is_success() {
            return SubmissionOutcome::accepted();
        }

        let text = response.text().await.unwrap_or_default();
        warn!(%job_id, "Platform refused submission with {status}");
        SubmissionOutcome::rejected(refusal_diagnostic(status.as_u16(), &text))
    }
}

fn refusal_diagnostic(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("Platform refused the application (HTTP {status}).");
    }
    let snippet: String = body.chars().take(MAX_DIAGNOSTIC_CHARS).collect();
    format!("Platform refused the application (HTTP {status}): {snippet}")
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    use super::*;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }

    /// A base URL nothing is listening on.
    async fn dead_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn platform(base_url: &str) -> HttpPlatform {
        HttpPlatform {
            client: Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            base_url: base_url.to_string(),
            api_key: Some("secret".into()),
        }
    }

    fn fake_platform() -> Router {
        Router::new()
            .route(
                "/jobs/search",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    match q.get("title").map(String::as_str) {
                        Some("broken") => (StatusCode::OK, "<html>not json</html>").into_response(),
                        Some("down") => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
                        Some(title) => {
                            let mut posting: Value = serde_json::from_str(POSTING).unwrap();
                            posting["title"] = json!(title);
                            Json(json!({ "results": [posting] })).into_response()
                        }
                        None => StatusCode::BAD_REQUEST.into_response(),
                    }
                }),
            )
            .route(
                "/jobs/:id/apply",
                post(|Path(id): Path<u64>, Json(body): Json<Value>| async move {
                    if body["candidateData"]["name"] != "Sam" || body["jobId"] != id {
                        return (StatusCode::BAD_REQUEST, "bad payload").into_response();
                    }
                    if id % 5 == 0 {
                        (StatusCode::UNPROCESSABLE_ENTITY, "position closed").into_response()
                    } else {
                        StatusCode::CREATED.into_response()
                    }
                }),
            )
    }

    fn sam() -> CandidateData {
        match json!({ "name": "Sam" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    const POSTING: &str = r#"{
        "id": 7, "title": "Rust Engineer", "company": "Acme", "location": "Remote",
        "salary": "$150K", "description": "Systems work", "posted": "1 day ago",
        "remote": true, "link": "https://jobs.example.com/7"
    }"#;

    #[test]
    fn test_search_response_bare_array() {
        let body = format!("[{POSTING}]");
        let parsed: SearchResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.into_postings().len(), 1);
    }

    #[test]
    fn test_search_response_wrapped() {
        for key in ["results", "search_results", "jobs"] {
            let body = format!(r#"{{"{key}": [{POSTING}, {POSTING}]}}"#);
            let parsed: SearchResponse = serde_json::from_str(&body).unwrap();
            assert_eq!(parsed.into_postings().len(), 2, "key {key}");
        }
    }

    #[test]
    fn test_search_response_rejects_unrelated_json() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"status": "ok"}"#).is_err());
    }

    #[test]
    fn test_refusal_diagnostic_truncates_body() {
        let long = "x".repeat(1000);
        let diag = refusal_diagnostic(422, &long);
        assert!(diag.contains("HTTP 422"));
        assert!(diag.len() < 300);
    }

    #[test]
    fn test_refusal_diagnostic_without_body() {
        assert_eq!(
            refusal_diagnostic(503, "  "),
            "Platform refused the application (HTTP 503)."
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let platform =
            HttpPlatform::new("https://jobs.example.com/", None, Duration::from_secs(5)).unwrap();
        assert_eq!(platform.base_url, "https://jobs.example.com");
    }

    #[tokio::test]
    async fn test_search_against_live_server() {
        let base = serve(fake_platform()).await;
        let postings = platform(&base).search("Rust Engineer").await.unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Rust Engineer");
        assert_eq!(postings[0].id, JobId(7));
    }

    #[tokio::test]
    async fn test_search_unparseable_body_is_invalid_response() {
        let base = serve(fake_platform()).await;
        let err = platform(&base).search("broken").await.unwrap_err();
        assert!(matches!(err, PlatformError::InvalidResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_search_error_status_is_reported() {
        let base = serve(fake_platform()).await;
        match platform(&base).search("down").await {
            Err(PlatformError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_transport_error_is_unreachable() {
        let err = platform(&dead_url().await).search("Engineer").await.unwrap_err();
        assert!(matches!(err, PlatformError::Unreachable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_submit_accepted_and_refused() {
        let base = serve(fake_platform()).await;
        let platform = platform(&base);

        let accepted = platform.submit_application(JobId(3), &sam()).await;
        assert_eq!(accepted, SubmissionOutcome::accepted());

        let refused = platform.submit_application(JobId(10), &sam()).await;
        assert!(!refused.success);
        let diagnostic = refused.diagnostic.unwrap();
        assert!(diagnostic.contains("HTTP 422"));
        assert!(diagnostic.contains("position closed"));
    }

    #[tokio::test]
    async fn test_submit_transport_error_is_rejected_outcome() {
        let outcome = platform(&dead_url().await)
            .submit_application(JobId(3), &sam())
            .await;
        assert!(!outcome.success);
        assert!(outcome
            .diagnostic
            .unwrap()
            .starts_with("Could not reach job platform"));
    }
}
