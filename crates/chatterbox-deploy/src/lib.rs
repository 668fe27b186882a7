//! Image publishing and Sevalla deployment for Chatter Box.
//!
//! # Publish pipeline
//!
//! ```text
//! chatterbox publish
//!   1. Daemon check  ── docker info
//!   2. Credentials   ── sevalla.env → APP_ID, SEVALLA_API_KEY
//!   3. Build         ── docker build -t <repo>:v<ts> .   (in api/)
//!   4. Tag           ── docker tag <repo>:v<ts> <repo>:latest
//!   5. Push          ── docker push <repo>:v<ts>
//!   6. Notify        ── POST https://api.sevalla.com/v2/applications/deployments
//! ```
//!
//! Failures in steps 3 to 5 are logged and the pipeline carries on, unless
//! [`FailurePolicy::Abort`](chatterbox_docker::FailurePolicy) is chosen.
//! Step 6 never fails the pipeline; its result is reported as a
//! [`DeploymentOutcome`].

pub mod notifier;
pub mod publish;
pub mod transport;

pub use notifier::{
    DeployCredentials, DeploymentNotifier, DeploymentOutcome, DeploymentRequest, NotifyError,
};
pub use publish::{PublishError, PublishOptions, PublishReport, build, publish};
pub use transport::{DeployTransport, HttpReply, ReqwestTransport, TransportError};
