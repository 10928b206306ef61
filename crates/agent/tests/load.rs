use agent::{LinearPolicy, Policy, PolicyError};
use sim::{Action, Observation};
use std::fs;
use std::path::PathBuf;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("agent-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_weights_from_disk() {
    let path = scratch_file(
        "policy.json",
        r#"{"in_dim": 4, "out_dim": 2,
            "weights": [0, 0, 0, -1, 0, 0, 0, 1],
            "bias": [0.1, 0]}"#,
    );
    let mut policy = LinearPolicy::load(&path).unwrap();
    // Only angular velocity matters; the bias breaks ties towards Decrease.
    assert_eq!(policy.predict(&Observation::default(), true), Action::Decrease);
    assert_eq!(
        policy.predict(&Observation::new(0.0, 0.0, 0.0, 1.0), true),
        Action::Increase
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = LinearPolicy::load("definitely/not/here.json").unwrap_err();
    assert!(matches!(err, PolicyError::Io { .. }));
    assert!(err.to_string().contains("here.json"));
}

#[test]
fn garbage_is_a_parse_error() {
    let path = scratch_file("garbage.json", "{ not json");
    assert!(matches!(
        LinearPolicy::load(&path),
        Err(PolicyError::Parse(_))
    ));
}
