use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn classboard_cmd() -> Command {
    Command::cargo_bin("classboard").expect("binary exists")
}

fn isolated_cmd(temp: &TempDir) -> Command {
    let mut cmd = classboard_cmd();
    cmd.env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path());
    cmd
}

const LESSON: &str = r#"
[[step]]
op = "stroke"
points = [[10, 10], [60, 40]]

[[step]]
op = "key"
binding = "Ctrl+Z"

[[step]]
op = "key"
binding = "Ctrl+Y"
"#;

#[test]
fn classboard_help_prints_usage() {
    classboard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Raster whiteboard with snapshot undo/redo",
        ));
}

#[test]
fn no_script_shows_usage() {
    let temp = TempDir::new().unwrap();
    isolated_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("--script lesson.toml"));
}

#[test]
fn replay_writes_png_to_output() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("lesson.toml");
    let output = temp.path().join("board.png");
    std::fs::write(&script, LESSON).unwrap();

    isolated_cmd(&temp)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--width", "100", "--height", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("history 2/2"))
        .stdout(predicate::str::contains("redo: no"));

    let mut file = std::fs::File::open(&output).unwrap();
    let image = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((image.width(), image.height()), (100, 50));
}

#[test]
fn explicit_config_sets_history_and_size() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    let script = temp.path().join("lesson.toml");
    let output = temp.path().join("board.png");
    std::fs::write(
        &config,
        "[canvas]\nwidth = 64\nheight = 32\n\n[history]\nmax_snapshots = 2\n",
    )
    .unwrap();
    std::fs::write(&script, LESSON).unwrap();

    isolated_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let mut file = std::fs::File::open(&output).unwrap();
    let image = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((image.width(), image.height()), (64, 32));
}

#[test]
fn malformed_script_fails_with_path() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("broken.toml");
    std::fs::write(&script, "[[step]]\nop = \"teleport\"\n").unwrap();

    isolated_cmd(&temp)
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("lesson.toml");
    std::fs::write(&script, LESSON).unwrap();

    isolated_cmd(&temp)
        .arg("--config")
        .arg(temp.path().join("nope.toml"))
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn invalid_filename_template_falls_back_instead_of_crashing() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    let script = temp.path().join("lesson.toml");
    let exports = temp.path().join("exports");
    std::fs::write(
        &config,
        format!(
            "[export]\nsave_directory = \"{}\"\nfilename_template = \"board_%Q\"\n",
            exports.display()
        ),
    )
    .unwrap();
    std::fs::write(&script, LESSON).unwrap();

    isolated_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("whiteboard_"));

    let saved: Vec<_> = std::fs::read_dir(&exports).unwrap().collect();
    assert_eq!(saved.len(), 1);
}
