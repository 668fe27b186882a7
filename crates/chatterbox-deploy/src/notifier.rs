use std::fmt;

use chatterbox_core::{DeployConfig, Environment, ImageRef};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::transport::{DeployTransport, ReqwestTransport};

pub const APP_ID_VAR: &str = "APP_ID";
pub const API_KEY_VAR: &str = "SEVALLA_API_KEY";

/// Body of `POST /v2/applications/deployments`.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    pub app_id: String,
    pub branch: String,
    pub docker_image: String,
    pub is_restart: bool,
}

/// Sevalla application id and API key.
///
/// The key is wrapped in [`SecretString`] and redacted from `Debug` output.
#[derive(Clone)]
pub struct DeployCredentials {
    pub app_id: String,
    pub api_key: SecretString,
}

impl fmt::Debug for DeployCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployCredentials")
            .field("app_id", &self.app_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl DeployCredentials {
    /// Resolve `APP_ID` and `SEVALLA_API_KEY`.
    ///
    /// Fails before any request exists if either is unset.
    pub fn from_env(env: &Environment) -> Result<Self, NotifyError> {
        Ok(Self {
            app_id: required_env(env, APP_ID_VAR)?,
            api_key: SecretString::from(required_env(env, API_KEY_VAR)?),
        })
    }
}

fn required_env(env: &Environment, key: &str) -> Result<String, NotifyError> {
    env.get(key)
        .ok_or_else(|| NotifyError::MissingEnvVar(key.to_owned()))
}

/// Result of a deployment trigger. Only transport failures count as failures;
/// any HTTP status is `Delivered`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentOutcome {
    Delivered {
        status: u16,
        /// Canonical reason phrase, empty when the status has none.
        reason: String,
        body: String,
    },
    Failed { reason: String },
}

impl DeploymentOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Triggers a Sevalla redeploy of a pushed image.
pub struct DeploymentNotifier<T: DeployTransport = ReqwestTransport> {
    transport: T,
    endpoint: String,
    branch: String,
    restart: bool,
}

impl DeploymentNotifier<ReqwestTransport> {
    pub fn new(config: &DeployConfig) -> Self {
        Self::with_transport(ReqwestTransport::new(), config)
    }
}

impl<T: DeployTransport> DeploymentNotifier<T> {
    pub fn with_transport(transport: T, config: &DeployConfig) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
            branch: config.branch.clone(),
            restart: config.restart,
        }
    }

    pub fn request_for(
        &self,
        credentials: &DeployCredentials,
        image: &ImageRef,
    ) -> DeploymentRequest {
        DeploymentRequest {
            app_id: credentials.app_id.clone(),
            branch: self.branch.clone(),
            docker_image: image.to_string(),
            is_restart: self.restart,
        }
    }

    /// Send the deployment request. Never returns an error: failures are
    /// reported as [`DeploymentOutcome::Failed`] and the caller decides
    /// whether they matter.
    pub async fn notify(
        &self,
        credentials: &DeployCredentials,
        image: &ImageRef,
    ) -> DeploymentOutcome {
        let request = self.request_for(credentials, image);
        let body = match serde_json::to_string(&request) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode deployment request");
                return DeploymentOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        tracing::info!(
            endpoint = %self.endpoint,
            app_id = %request.app_id,
            image = %request.docker_image,
            "updating sevalla deployment",
        );

        match self
            .transport
            .post_json(&self.endpoint, credentials.api_key.expose_secret(), body)
            .await
        {
            Ok(reply) => {
                if reply.is_success() {
                    tracing::info!(status = reply.status, "deployment accepted");
                } else {
                    tracing::warn!(
                        status = reply.status,
                        reason = %reply.reason,
                        "deployment endpoint returned an error status",
                    );
                }
                DeploymentOutcome::Delivered {
                    status: reply.status,
                    reason: reply.reason,
                    body: reply.body,
                }
            }
            Err(e) => {
                let reason = error_chain(&e);
                tracing::warn!(error = %reason, "deployment request failed");
                DeploymentOutcome::Failed { reason }
            }
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}
