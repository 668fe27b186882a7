mod build;
mod notify;
mod publish;
mod serve;

use chatterbox_deploy::DeploymentOutcome;
use chatterbox_docker::FailurePolicy;

pub use build::build;
pub use notify::notify;
pub use publish::publish;
pub use serve::{run_email_service, run_server};

pub(crate) fn failure_policy(fail_fast: bool) -> FailurePolicy {
    if fail_fast {
        FailurePolicy::Abort
    } else {
        FailurePolicy::default()
    }
}

/// Print the deployment result. Fails only in strict mode.
pub(crate) fn report_deployment(outcome: &DeploymentOutcome, strict: bool) -> anyhow::Result<()> {
    match outcome {
        DeploymentOutcome::Delivered {
            status,
            reason,
            body,
        } => {
            println!("{}", status_line(*status, reason));
            if !body.is_empty() {
                println!("Response Body:");
                println!("{body}");
            }
            println!("Deployment updated");
        }
        DeploymentOutcome::Failed { reason } => {
            println!("An error occurred: {reason}");
            println!("Deployment failed!");
            if strict {
                anyhow::bail!("deployment request failed (--strict)");
            }
        }
    }
    Ok(())
}

fn status_line(status: u16, reason: &str) -> String {
    if reason.is_empty() {
        format!("Status: {status}")
    } else {
        format!("Status: {status} {reason}")
    }
}
