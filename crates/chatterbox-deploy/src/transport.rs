use reqwest::header::CONTENT_TYPE;

/// Status line and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over the HTTPS client for testability.
///
/// Production code uses [`ReqwestTransport`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait DeployTransport: Send + Sync {
    /// POST a JSON body with bearer authentication.
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: String,
    ) -> Result<HttpReply, TransportError>;
}

/// HTTPS transport backed by reqwest. No timeout is applied.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl DeployTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: String,
    ) -> Result<HttpReply, TransportError> {
        tracing::debug!(url, bytes = body.len(), "POST");

        let response = self
            .client
            .post(url)
            .bearer_auth(bearer)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_owned(),
                source: Box::new(e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TransportError::Body {
            url: url.to_owned(),
            source: Box::new(e),
        })?;

        Ok(HttpReply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
