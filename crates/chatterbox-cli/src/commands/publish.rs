use chatterbox_core::{ChatterboxConfig, Environment, unix_timestamp};
use chatterbox_deploy::{DeploymentNotifier, PublishOptions};
use chatterbox_docker::DockerClient;
use std::path::Path;

/// Execute the full publish pipeline.
pub async fn publish(project_dir: &Path, fail_fast: bool, strict: bool) -> anyhow::Result<()> {
    let config = ChatterboxConfig::load(project_dir)?;
    let docker = DockerClient::new();
    let notifier = DeploymentNotifier::new(&config.deploy);
    let mut env = Environment::inherited();
    let options = PublishOptions {
        policy: super::failure_policy(fail_fast),
        timestamp: unix_timestamp(),
    };

    println!("Publishing {}...", config.image.repository);
    let report = chatterbox_deploy::publish(
        &docker,
        &notifier,
        &config,
        project_dir,
        &mut env,
        &options,
    )
    .await?;

    println!();
    for step in &report.steps {
        println!("  {step}");
    }
    println!();

    super::report_deployment(&report.deployment, strict)
}
