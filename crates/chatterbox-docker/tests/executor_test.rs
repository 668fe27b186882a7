use chatterbox_docker::docker::DockerError;
use chatterbox_docker::executor::{DockerExecutor, RealExecutor};
use tempfile::TempDir;

#[tokio::test]
async fn streaming_in_missing_directory_is_not_reported_as_missing_docker() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("api");

    let result = RealExecutor
        .exec_streaming(&["version".to_owned()], &missing)
        .await;

    match result {
        Err(DockerError::WorkingDir { path }) => assert_eq!(path, missing),
        other => panic!("expected WorkingDir, got {other:?}"),
    }
}

#[test]
fn working_dir_error_names_the_directory() {
    let err = DockerError::WorkingDir {
        path: "/tmp/project/api".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("/tmp/project/api"));
    assert!(!msg.contains("docker CLI not found"));
}
