mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "chatterbox",
    about = "Build, publish, and run the Chatter Box services"
)]
#[command(version)]
struct Cli {
    /// Project root containing api/, chatterbox-email-service/ and sevalla.env
    #[arg(long, short = 'C', global = true, default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the API image, tagged with a timestamp and as latest
    Build {
        /// Stop when docker build or tag fails
        #[arg(long)]
        fail_fast: bool,
    },
    /// Build and push the API image, then redeploy it on Sevalla
    Publish {
        /// Stop when docker build, tag, or push fails
        #[arg(long)]
        fail_fast: bool,
        /// Exit non-zero when the deployment request fails
        #[arg(long)]
        strict: bool,
    },
    /// Redeploy an already pushed image on Sevalla
    Notify {
        /// Image reference (repository[:tag])
        image: String,
        /// Exit non-zero when the deployment request fails
        #[arg(long)]
        strict: bool,
    },
    /// Run the Spring Boot API server (mvn spring-boot:run)
    RunServer,
    /// Run the Quarkus email service in dev mode
    RunEmailService,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_dir = cli.project_dir.as_path();
    tracing::debug!(project_dir = %project_dir.display(), "resolved project directory");

    match cli.command {
        Commands::Build { fail_fast } => commands::build(project_dir, fail_fast).await?,
        Commands::Publish { fail_fast, strict } => {
            commands::publish(project_dir, fail_fast, strict).await?
        }
        Commands::Notify { image, strict } => commands::notify(project_dir, &image, strict).await?,
        Commands::RunServer => return commands::run_server(project_dir).await,
        Commands::RunEmailService => return commands::run_email_service(project_dir).await,
    }

    Ok(ExitCode::SUCCESS)
}
