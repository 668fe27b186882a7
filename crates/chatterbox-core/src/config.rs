use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name looked up at the project root.
pub const CONFIG_FILE: &str = "chatterbox.toml";

/// chatterbox.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatterboxConfig {
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
    #[serde(default)]
    pub dev: DevConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Registry repository the API image is published to
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Docker build context, relative to the project root
    #[serde(default = "default_context")]
    pub context: String,
    /// Floating tag applied alongside the timestamp tag
    #[serde(default = "default_latest_tag")]
    pub latest_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Credentials file holding APP_ID and SEVALLA_API_KEY
    #[serde(default = "default_deploy_env_file")]
    pub env_file: String,
    /// Sevalla deployments endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Branch reported with each deployment
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Restart the application after the image is swapped
    #[serde(default = "default_restart")]
    pub restart: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevConfig {
    #[serde(default)]
    pub server: ServerDevConfig,
    #[serde(default)]
    pub email: EmailDevConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDevConfig {
    /// Spring Boot service directory
    #[serde(default = "default_server_dir")]
    pub dir: String,
    /// Maven goal that starts the server
    #[serde(default = "default_server_goal")]
    pub goal: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailDevConfig {
    /// Quarkus email service directory
    #[serde(default = "default_email_dir")]
    pub dir: String,
    /// HTTP port passed to `quarkus dev`
    #[serde(default = "default_email_port")]
    pub port: u16,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            context: default_context(),
            latest_tag: default_latest_tag(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            env_file: default_deploy_env_file(),
            endpoint: default_endpoint(),
            branch: default_branch(),
            restart: default_restart(),
        }
    }
}

impl Default for ServerDevConfig {
    fn default() -> Self {
        Self {
            dir: default_server_dir(),
            goal: default_server_goal(),
        }
    }
}

impl Default for EmailDevConfig {
    fn default() -> Self {
        Self {
            dir: default_email_dir(),
            port: default_email_port(),
        }
    }
}

impl ChatterboxConfig {
    /// Load from chatterbox.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            let config = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path.clone(),
                source: e,
            })?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_repository() -> String {
    "ahernandezam/chatter-box-api".to_owned()
}

fn default_context() -> String {
    "api".to_owned()
}

fn default_latest_tag() -> String {
    "latest".to_owned()
}

fn default_deploy_env_file() -> String {
    "sevalla.env".to_owned()
}

fn default_endpoint() -> String {
    "https://api.sevalla.com/v2/applications/deployments".to_owned()
}

fn default_branch() -> String {
    "main".to_owned()
}

fn default_restart() -> bool {
    true
}

fn default_server_dir() -> String {
    "api".to_owned()
}

fn default_server_goal() -> String {
    "spring-boot:run".to_owned()
}

fn default_email_dir() -> String {
    "chatterbox-email-service".to_owned()
}

fn default_email_port() -> u16 {
    8086
}
