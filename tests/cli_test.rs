use std::process::Command;

fn certdays_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_certdays"))
}

#[test]
fn test_missing_site_fails() {
    let output = certdays_bin().output().expect("failed to run certdays");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "nothing should go to stdout");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You have to provide site URL to check."));
}

#[test]
fn test_empty_site_fails() {
    let output = certdays_bin()
        .args(["--site", ""])
        .output()
        .expect("failed to run certdays");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You have to provide site URL to check."));
}

#[test]
fn test_help_flag() {
    let output = certdays_bin()
        .arg("--help")
        .output()
        .expect("failed to run certdays");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--site"));
}

#[test]
fn test_version_flag() {
    let output = certdays_bin()
        .arg("--version")
        .output()
        .expect("failed to run certdays");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("certdays"));
}

#[test]
fn test_unresolvable_site_fails_with_transport_error() {
    let output = certdays_bin()
        .args(["--site", "nonexistent.invalid"])
        .output()
        .expect("failed to run certdays");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "nothing should go to stdout");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("TLS connection"),
        "stderr should name the transport failure, got {}",
        stderr
    );
}
