//! Launchers for the Chatter Box development servers.
//!
//! Each launcher loads the service's `.env`, resolves the command, and runs
//! it in the foreground with the loaded variables applied to the child:
//!
//! | Server | Directory | Command |
//! |--------|-----------|---------|
//! | [`DevServer::Api`] | `api/` | `$MAVEN_HOME/bin/mvn spring-boot:run` |
//! | [`DevServer::Email`] | `chatterbox-email-service/` | `quarkus dev -Dquarkus.http.port=8086` |

pub mod launcher;
pub mod runner;

pub use launcher::{
    DevServer, LaunchError, Launcher, maven_executable, prepare, quarkus_executable,
};
pub use runner::{LaunchCommand, ProcessRunner, RealRunner, RunError};
