#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("docker CLI not found; install Docker Desktop or the docker engine")]
    NotFound { source: std::io::Error },

    #[error("docker working directory {} does not exist", path.display())]
    WorkingDir { path: std::path::PathBuf },

    #[error("docker command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("docker output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}
