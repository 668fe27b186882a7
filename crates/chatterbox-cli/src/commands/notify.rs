use chatterbox_core::{ChatterboxConfig, Environment, ImageRef};
use chatterbox_deploy::{DeployCredentials, DeploymentNotifier};
use std::path::Path;

pub async fn notify(project_dir: &Path, image: &str, strict: bool) -> anyhow::Result<()> {
    let image: ImageRef = image.parse()?;
    let config = ChatterboxConfig::load(project_dir)?;

    let mut env = Environment::inherited();
    env.load_file(&project_dir.join(&config.deploy.env_file))?;
    let credentials = DeployCredentials::from_env(&env)?;

    println!("Updating sevalla deployment for {image}...");
    let notifier = DeploymentNotifier::new(&config.deploy);
    let outcome = notifier.notify(&credentials, &image).await;

    super::report_deployment(&outcome, strict)
}
