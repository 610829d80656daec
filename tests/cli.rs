use std::process::{Command, Output};

fn uinputctl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_uinputctl"))
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("UINPUTCTL_SCALE_X")
        .env_remove("UINPUTCTL_SCALE_Y")
        .output()
        .expect("failed to run uinputctl")
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn device_touch_succeeds_on_char_device() {
    let out = uinputctl(&["device-touch", "/dev/null", "2048", "1394"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(text(&out.stdout).contains("touch sent to /dev/null"));
}

#[test]
fn screen_touch_prints_transformation() {
    let out = uinputctl(&["screen-touch", "/dev/null", "40", "40"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = text(&out.stdout);
    assert!(stdout.contains("Screen coordinates (40, 40) -> Device coordinates (2400, 1320)"));
    assert!(stdout.contains("screen touch sent to /dev/null"));
}

#[test]
fn scale_can_be_configured() {
    let out = Command::new(env!("CARGO_BIN_EXE_uinputctl"))
        .args(["--scale-y", "2", "screen-touch", "/dev/null", "3", "4"])
        .env("UINPUTCTL_SCALE_X", "10")
        .output()
        .expect("failed to run uinputctl");
    assert_eq!(out.status.code(), Some(0));
    assert!(text(&out.stdout).contains("Device coordinates (30, 8)"));
}

#[test]
fn device_key_succeeds_on_char_device() {
    let out = uinputctl(&["device-key", "/dev/null", "30", "down"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(text(&out.stdout).contains("key 30 down sent to /dev/null"));
}

#[test]
fn missing_arguments_exit_2() {
    let out = uinputctl(&["device-touch", "/dev/input/event5"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(text(&out.stderr).contains("usage: uinputctl"));
    assert!(out.stdout.is_empty());
}

#[test]
fn no_command_exit_2() {
    let out = uinputctl(&[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(text(&out.stderr).contains("usage: uinputctl"));
}

#[test]
fn unknown_command_exit_2() {
    let out = uinputctl(&["device-swipe", "/dev/null", "1", "2"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(text(&out.stderr).contains("unknown command: device-swipe"));
}

#[test]
fn non_integer_coordinate_exit_2() {
    let out = uinputctl(&["device-touch", "/dev/null", "left", "1"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(text(&out.stderr).contains("invalid x coordinate"));
}

#[test]
fn missing_device_exit_1() {
    let out = uinputctl(&["device-touch", "/nonexistent/input/event5", "1", "1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(text(&out.stderr).contains("open device"));
    assert!(out.stdout.is_empty());
}

#[test]
fn fatal_error_printed_with_logging_off() {
    let out = Command::new(env!("CARGO_BIN_EXE_uinputctl"))
        .args(["device-touch", "/nonexistent/input/event5", "1", "1"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run uinputctl");
    assert_eq!(out.status.code(), Some(1));
    assert!(text(&out.stderr).contains("open device"));
}

#[test]
fn device_key_tap_accepted() {
    let out = uinputctl(&["device-key", "/dev/null", "28", "tap"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(text(&out.stdout).contains("key 28 tap sent to /dev/null"));
}

#[test]
fn regular_file_is_rejected() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap();
    let out = uinputctl(&["device-touch", path, "1", "1"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(std::fs::metadata(tmp.path()).unwrap().len(), 0);
}

#[test]
fn help_exit_0() {
    let out = uinputctl(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(text(&out.stdout).contains("screen-touch"));
}
