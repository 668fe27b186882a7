pub mod client;
pub mod docker;
pub mod executor;

pub use client::{
    BuildError, BuildRequest, DockerClient, FailurePolicy, PreflightError, PushError,
};
pub use docker::DockerError;
pub use executor::{DockerExecutor, RealExecutor};
