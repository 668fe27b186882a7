use chatterbox_core::{DevConfig, Environment};
use chatterbox_dev::launcher::{
    DevServer, LaunchError, Launcher, maven_executable, prepare, quarkus_executable,
};
use chatterbox_dev::runner::{LaunchCommand, ProcessRunner, RunError};
use mockall::mock;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mock! {
    Runner {}

    impl ProcessRunner for Runner {
        async fn run(&self, command: &LaunchCommand) -> Result<Option<i32>, RunError>;
    }
}

fn write_env(dir: &Path, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(".env"), content).unwrap();
}

fn expected_mvn(home: &str) -> PathBuf {
    let binary = if cfg!(windows) { "mvn.cmd" } else { "mvn" };
    Path::new(home).join("bin").join(binary)
}

fn expected_quarkus() -> PathBuf {
    PathBuf::from(if cfg!(windows) { "quarkus.cmd" } else { "quarkus" })
}

// ── Command resolution ──

#[test]
fn api_server_runs_spring_boot_through_maven_home() {
    let tmp = TempDir::new().unwrap();
    write_env(
        &tmp.path().join("api"),
        "MAVEN_HOME=/opt/maven\nSPRING_PROFILES_ACTIVE=dev\n",
    );

    let mut env = Environment::isolated();
    let command = prepare(DevServer::Api, &DevConfig::default(), tmp.path(), &mut env).unwrap();

    assert_eq!(command.program, expected_mvn("/opt/maven"));
    assert_eq!(command.args, vec!["spring-boot:run"]);
    assert_eq!(command.cwd, tmp.path().join("api"));
    assert!(
        command
            .envs
            .contains(&("SPRING_PROFILES_ACTIVE".to_owned(), "dev".to_owned()))
    );
}

#[test]
fn api_server_fails_fast_without_maven_home() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp.path().join("api"), "DB_URL=jdbc:postgresql://localhost/chat\n");

    let mut env = Environment::isolated();
    let err = prepare(DevServer::Api, &DevConfig::default(), tmp.path(), &mut env).unwrap_err();

    assert!(matches!(err, LaunchError::MissingEnvVar(ref k) if k == "MAVEN_HOME"));
    assert_eq!(env.get("DB_URL").as_deref(), Some("jdbc:postgresql://localhost/chat"));
}

#[test]
fn blank_maven_home_counts_as_unset() {
    let mut env = Environment::isolated();
    env.set("MAVEN_HOME", "  ");

    assert!(matches!(
        maven_executable(&env),
        Err(LaunchError::MissingEnvVar(_))
    ));
}

#[test]
fn email_service_runs_quarkus_dev_on_port() {
    let tmp = TempDir::new().unwrap();
    write_env(
        &tmp.path().join("chatterbox-email-service"),
        "# mail\nSMTP_HOST=localhost\n",
    );

    let mut env = Environment::isolated();
    let command = prepare(DevServer::Email, &DevConfig::default(), tmp.path(), &mut env).unwrap();

    assert_eq!(command.program, expected_quarkus());
    assert_eq!(command.args, vec!["dev", "-Dquarkus.http.port=8086"]);
    assert_eq!(command.cwd, tmp.path().join("chatterbox-email-service"));
    assert_eq!(
        command.envs,
        vec![("SMTP_HOST".to_owned(), "localhost".to_owned())]
    );
}

#[test]
fn missing_service_env_file_is_fatal() {
    let tmp = TempDir::new().unwrap();

    let mut env = Environment::isolated();
    let err = prepare(DevServer::Email, &DevConfig::default(), tmp.path(), &mut env).unwrap_err();

    assert!(matches!(err, LaunchError::EnvFile(_)));
}

// ── Launch ──

#[tokio::test]
async fn launch_returns_child_exit_code() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp.path().join("chatterbox-email-service"), "SMTP_PORT=1025\n");

    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .withf(|command| command.program == expected_quarkus())
        .times(1)
        .returning(|_| Ok(Some(130)));

    let launcher = Launcher::with_runner(runner);
    let mut env = Environment::isolated();
    let code = launcher
        .launch(DevServer::Email, &DevConfig::default(), tmp.path(), &mut env)
        .await
        .unwrap();

    assert_eq!(code, Some(130));
}

#[tokio::test]
async fn launch_does_not_spawn_when_preparation_fails() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp.path().join("api"), "");

    let mut runner = MockRunner::new();
    runner.expect_run().times(0);

    let launcher = Launcher::with_runner(runner);
    let mut env = Environment::isolated();
    let result = launcher
        .launch(DevServer::Api, &DevConfig::default(), tmp.path(), &mut env)
        .await;

    assert!(matches!(result, Err(LaunchError::MissingEnvVar(_))));
}

#[test]
fn quarkus_uses_cmd_shim_on_windows() {
    let program = quarkus_executable();
    if cfg!(windows) {
        assert_eq!(program, Path::new("quarkus.cmd"));
    } else {
        assert_eq!(program, Path::new("quarkus"));
    }
}
