use chatterbox_core::{ChatterboxConfig, Environment};
use chatterbox_dev::{DevServer, Launcher};
use std::path::Path;
use std::process::ExitCode;

pub async fn run_server(project_dir: &Path) -> anyhow::Result<ExitCode> {
    launch(project_dir, DevServer::Api).await
}

pub async fn run_email_service(project_dir: &Path) -> anyhow::Result<ExitCode> {
    launch(project_dir, DevServer::Email).await
}

/// Run a dev server in the foreground and hand back its exit code.
async fn launch(project_dir: &Path, server: DevServer) -> anyhow::Result<ExitCode> {
    let config = ChatterboxConfig::load(project_dir)?;
    let launcher = Launcher::new();
    let mut env = Environment::inherited();

    println!("Starting {server}...");
    let code = launcher
        .launch(server, &config.dev, project_dir, &mut env)
        .await?;

    Ok(match code {
        Some(0) => ExitCode::SUCCESS,
        Some(code) => ExitCode::from(code.clamp(1, 255) as u8),
        None => {
            println!("{server} was terminated by a signal");
            ExitCode::FAILURE
        }
    })
}
