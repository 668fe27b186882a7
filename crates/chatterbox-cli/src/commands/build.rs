use chatterbox_core::{ChatterboxConfig, unix_timestamp};
use chatterbox_deploy::PublishOptions;
use chatterbox_docker::DockerClient;
use std::path::Path;

pub async fn build(project_dir: &Path, fail_fast: bool) -> anyhow::Result<()> {
    let config = ChatterboxConfig::load(project_dir)?;
    let docker = DockerClient::new();
    let options = PublishOptions {
        policy: super::failure_policy(fail_fast),
        timestamp: unix_timestamp(),
    };

    println!("Building image {}...", config.image.repository);
    let built = chatterbox_deploy::build(&docker, &config, project_dir, &options).await?;

    println!();
    println!("Built: {}", built.versioned);
    println!("Tagged: {}", built.latest);

    Ok(())
}
