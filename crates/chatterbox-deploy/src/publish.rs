use chatterbox_core::{BuiltImage, ChatterboxConfig, EnvFileError, Environment, ImageRef};
use chatterbox_docker::{
    BuildError, BuildRequest, DockerClient, DockerExecutor, FailurePolicy, PreflightError,
    PushError,
};
use std::path::Path;

use crate::notifier::{DeployCredentials, DeploymentNotifier, DeploymentOutcome, NotifyError};
use crate::transport::DeployTransport;

#[derive(Debug, Clone, Copy)]
pub struct PublishOptions {
    pub policy: FailurePolicy,
    /// Unix seconds for the versioned tag.
    pub timestamp: u64,
}

/// Result of a publish pipeline run that got as far as the notifier.
#[derive(Debug)]
pub struct PublishReport {
    pub steps: Vec<String>,
    pub image: ImageRef,
    pub deployment: DeploymentOutcome,
}

/// Daemon check followed by an image build. Returns both references.
pub async fn build<E: DockerExecutor>(
    docker: &DockerClient<E>,
    config: &ChatterboxConfig,
    project_dir: &Path,
    options: &PublishOptions,
) -> Result<BuiltImage, PublishError> {
    docker.check_daemon().await?;
    build_only(docker, config, project_dir, options).await
}

/// Run the full publish pipeline: daemon → credentials → build → push → notify.
///
/// The Environment receives the pairs from the deploy env file.
pub async fn publish<E: DockerExecutor, T: DeployTransport>(
    docker: &DockerClient<E>,
    notifier: &DeploymentNotifier<T>,
    config: &ChatterboxConfig,
    project_dir: &Path,
    env: &mut Environment,
    options: &PublishOptions,
) -> Result<PublishReport, PublishError> {
    let mut steps = Vec::new();

    docker.check_daemon().await?;
    steps.push("Docker daemon is running".to_string());

    let env_path = project_dir.join(&config.deploy.env_file);
    let count = env.load_file(&env_path)?;
    steps.push(format!(
        "Loaded {count} variable(s) from {}",
        config.deploy.env_file
    ));

    let credentials = DeployCredentials::from_env(env)?;
    steps.push(format!("Deploying app {}", credentials.app_id));

    let built = build_only(docker, config, project_dir, options).await?;
    steps.push(format!("Built {} (also {})", built.versioned, built.latest));

    docker.push(&built.versioned, options.policy).await?;
    steps.push(format!("Pushed {}", built.versioned));

    let deployment = notifier.notify(&credentials, &built.versioned).await;
    match &deployment {
        DeploymentOutcome::Delivered { status, .. } => {
            steps.push(format!("Deployment request delivered (HTTP {status})"));
        }
        DeploymentOutcome::Failed { reason } => {
            steps.push(format!("Deployment request failed: {reason}"));
        }
    }

    Ok(PublishReport {
        steps,
        image: built.versioned,
        deployment,
    })
}

async fn build_only<E: DockerExecutor>(
    docker: &DockerClient<E>,
    config: &ChatterboxConfig,
    project_dir: &Path,
    options: &PublishOptions,
) -> Result<BuiltImage, PublishError> {
    let context = project_dir.join(&config.image.context);
    let request = BuildRequest {
        repository: &config.image.repository,
        latest_tag: &config.image.latest_tag,
        context: &context,
        timestamp: options.timestamp,
    };

    Ok(docker.build_image(&request, options.policy).await?)
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error("failed to load deploy credentials")]
    EnvFile(#[from] EnvFileError),

    #[error(transparent)]
    Credentials(#[from] NotifyError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Push(#[from] PushError),
}
