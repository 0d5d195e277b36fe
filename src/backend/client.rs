use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::BackendError;
use super::types::{
    AckResponse, JobActionRequest, RefineRequest, StartJobResponse, StartScaffoldRequest,
    StartUplinkRequest,
};

/// One named backend call per engine operation. The engine only mutates
/// local state after the corresponding call succeeds.
pub trait JobBackend {
    async fn start_scaffold_job(
        &self,
        req: &StartScaffoldRequest,
    ) -> Result<StartJobResponse, BackendError>;

    async fn start_uplink_job(
        &self,
        req: &StartUplinkRequest,
    ) -> Result<StartJobResponse, BackendError>;

    async fn approve_plan(&self, job_id: &str) -> Result<(), BackendError>;

    async fn refine_plan(&self, job_id: &str, feedback: &str) -> Result<(), BackendError>;

    async fn merge_pull_request(&self, job_id: &str) -> Result<(), BackendError>;
}

/// HTTP client for the agent backend.
pub struct BackendClient {
    api_token: String,
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client pointing at the given base URL.
    pub fn new(api_token: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client");
        Self {
            api_token,
            client,
            base_url,
        }
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, BackendError> {
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000)
                .unwrap_or(1000);
            return Err(BackendError::RateLimited {
                retry_after_ms: retry_after,
            });
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(BackendError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<R>().await?;
        Ok(parsed)
    }
}

impl JobBackend for BackendClient {
    async fn start_scaffold_job(
        &self,
        req: &StartScaffoldRequest,
    ) -> Result<StartJobResponse, BackendError> {
        self.post("/v1/jobs/scaffold", req).await
    }

    async fn start_uplink_job(
        &self,
        req: &StartUplinkRequest,
    ) -> Result<StartJobResponse, BackendError> {
        self.post("/v1/jobs/uplink", req).await
    }

    async fn approve_plan(&self, job_id: &str) -> Result<(), BackendError> {
        let _: AckResponse = self
            .post(
                "/v1/jobs/approve",
                &JobActionRequest {
                    job_id: job_id.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    async fn refine_plan(&self, job_id: &str, feedback: &str) -> Result<(), BackendError> {
        let _: AckResponse = self
            .post(
                "/v1/jobs/refine",
                &RefineRequest {
                    job_id: job_id.to_string(),
                    feedback: feedback.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    async fn merge_pull_request(&self, job_id: &str) -> Result<(), BackendError> {
        let _: AckResponse = self
            .post(
                "/v1/jobs/merge",
                &JobActionRequest {
                    job_id: job_id.to_string(),
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::AgentMode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scaffold_request() -> StartScaffoldRequest {
        StartScaffoldRequest {
            name: "my-app".into(),
            recipe_id: "rust-tauri".into(),
            context: "# Role: Rust Expert".into(),
            mode: AgentMode::Auto,
        }
    }

    #[tokio::test]
    async fn start_scaffold_job_posts_and_parses_job_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/jobs/scaffold"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "job-42"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new("tok-123".into(), server.uri());
        let resp = client.start_scaffold_job(&scaffold_request()).await.unwrap();
        assert_eq!(resp.job_id, "job-42");
    }

    #[tokio::test]
    async fn approve_plan_sends_job_id_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/jobs/approve"))
            .and(body_json(json!({"jobId": "job-7"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new("tok".into(), server.uri());
        client.approve_plan("job-7").await.unwrap();
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/jobs/merge"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = BackendClient::new("tok".into(), server.uri());
        let err = client.merge_pull_request("job-7").await.unwrap_err();
        match err {
            BackendError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rate_limit_maps_retry_after_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/jobs/uplink"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3"))
            .mount(&server)
            .await;

        let client = BackendClient::new("tok".into(), server.uri());
        let err = client
            .start_uplink_job(&StartUplinkRequest {
                repo_name: "octo/repo".into(),
                context: String::new(),
                mode: AgentMode::Interactive,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::RateLimited {
                retry_after_ms: 3000
            }
        ));
    }
}
