//! Client side of the submission relay.

use async_trait::async_trait;
use confession_protocol::SUBMIT_PATH;
use confession_protocol::Submission;
use reqwest::header::ACCEPT;
use thiserror::Error;
use url::Url;

use crate::session::SubmitOutcome;

#[derive(Debug, Error)]
pub enum RelayClientError {
    #[error("invalid relay url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("relay answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Something that accepts a submission and answers with a plaintext
/// acknowledgment.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn submit(&self, submission: &Submission) -> Result<String, RelayClientError>;
}

/// Sends the submission once and folds any failure into
/// [`SubmitOutcome::Failed`].
pub async fn deliver(relay: &dyn Relay, submission: &Submission) -> SubmitOutcome {
    match relay.submit(submission).await {
        Ok(body) => SubmitOutcome::Delivered(body),
        Err(err) => SubmitOutcome::Failed(err.to_string()),
    }
}

/// Relay reached over HTTP.
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpRelay {
    /// `base` is the relay origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base: &str) -> Result<Self, RelayClientError> {
        let endpoint = Url::parse(base)?.join(SUBMIT_PATH)?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn submit(&self, submission: &Submission) -> Result<String, RelayClientError> {
        tracing::debug!(endpoint = %self.endpoint, choice = %submission.choice, "sending submission");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "text/plain")
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(RelayClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confession_protocol::Choice;
    use pretty_assertions::assert_eq;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;
    use wiremock::matchers::body_json;
    use wiremock::matchers::header;
    use wiremock::matchers::method;
    use wiremock::matchers::path;

    #[test]
    fn endpoint_joins_submit_path() {
        let relay = HttpRelay::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(
            relay.endpoint().as_str(),
            "http://127.0.0.1:3000/submit-response"
        );
        assert!(HttpRelay::new("not a url").is_err());
    }

    #[tokio::test]
    async fn posts_json_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit-response"))
            .and(header("accept", "text/plain"))
            .and(body_json(serde_json::json!({"choice": "yes", "feedback": "Em đồng ý!"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("cảm ơn"))
            .expect(1)
            .mount(&server)
            .await;

        let relay = HttpRelay::new(&server.uri()).unwrap();
        let submission = Submission::new(Choice::Yes, "Em đồng ý!");
        assert_eq!(relay.submit(&submission).await.unwrap(), "cảm ơn");
    }

    #[tokio::test]
    async fn non_success_status_is_a_failed_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let relay = HttpRelay::new(&server.uri()).unwrap();
        let outcome = deliver(&relay, &Submission::new(Choice::No, "")).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(reason) if reason.contains("500")));
    }
}
