//! Integration tests for the molboot CLI
//!
//! These tests exercise the binary end-to-end against scratch home and
//! cache directories. Palette downloads are served by a local HTTP server,
//! and the sync tests point git at an unreachable remote, so nothing here
//! touches the network.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A colorbrewer.js body in the shape the gist serves.
const FIXTURE_GIST: &str = "// ColorBrewer palette definitions\n\
var colorbrewer = {Blues: {3: ['#deebf7', '#9ecae1', '#3182bd']},\n\
Greens: {2: ['#e5f5e0', '#a1d99b']}};\n";

/// Helper to run molboot with home, cache, and config pinned to a scratch
/// directory
fn run_molboot(args: &[&str], home: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_molboot"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CACHE_HOME", home.join(".cache"))
        .env("MOLBOOT_CONFIG", home.join("config.toml"))
        .output()
        .expect("Failed to execute molboot")
}

/// Helper to get stdout as string
fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to get stderr as string
fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Serve `body` for every request on an ephemeral local port.
fn serve(body: &'static str) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
    let port = server
        .server_addr()
        .to_ip()
        .expect("test server ip")
        .port();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let _ = request.respond(tiny_http::Response::from_string(body));
        }
    });
    format!("http://127.0.0.1:{}/colorbrewer.js", port)
}

/// Config pointing sync at an unreachable remote and palettes at `url`.
fn write_config(home: &Path, palette_url: &str) {
    let config = format!(
        "[repo]\n\
         url = \"file:///nonexistent/remote.git\"\n\
         dir = \"{}\"\n\
         \n\
         [palette]\n\
         url = \"{}\"\n",
        home.join("scripts").display(),
        palette_url
    );
    fs::write(home.join("config.toml"), config).expect("write config");
}

// =============================================================================
// Basic Command Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_molboot"))
        .arg("--help")
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("molboot"));
    assert!(out.contains("Startup bootstrap"));
}

#[test]
fn test_version_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_molboot"))
        .arg("--version")
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());
    assert!(stdout(&output).contains("molboot"));
}

// =============================================================================
// Shell Completion Tests
// =============================================================================

#[test]
fn test_completion_zsh() {
    let output = Command::new(env!("CARGO_BIN_EXE_molboot"))
        .args(["completion", "zsh"])
        .output()
        .expect("Failed to execute");

    assert!(
        output.status.success(),
        "completion zsh failed: {}",
        stderr(&output)
    );
    assert!(
        stdout(&output).contains("#compdef molboot"),
        "zsh completion should contain #compdef"
    );
}

#[test]
fn test_completion_bash() {
    let output = Command::new(env!("CARGO_BIN_EXE_molboot"))
        .args(["completion", "bash"])
        .output()
        .expect("Failed to execute");

    assert!(
        output.status.success(),
        "completion bash failed: {}",
        stderr(&output)
    );
    assert!(
        stdout(&output).contains("_molboot"),
        "bash completion should contain _molboot function"
    );
}

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn test_status_reports_fresh_environment() {
    let home = TempDir::new().unwrap();
    let output = run_molboot(&["status"], home.path());

    assert!(output.status.success(), "status failed: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("clone: missing"));
    assert!(out.contains("last checked: never"));
    assert!(out.contains("check due: yes"));
}

// =============================================================================
// Repository Sync Tests
// =============================================================================

#[test]
fn test_sync_tolerates_unreachable_remote() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "http://127.0.0.1:1/unused.js");

    let output = run_molboot(&["sync", "--force"], home.path());

    // A failed clone is reported but never fatal: the session must still
    // come up offline.
    assert!(output.status.success(), "sync failed: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Cloning script repository"));
    assert!(out.contains("Script repository loaded"));

    // The attempt still counts as a check.
    let marker = home
        .path()
        .join(".cache")
        .join("molboot")
        .join("script-repo-last-check");
    assert!(marker.is_file(), "marker should be written after a check");
}

#[test]
fn test_sync_skips_when_marker_fresh() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "http://127.0.0.1:1/unused.js");
    fs::create_dir_all(home.path().join("scripts")).unwrap();

    let first = run_molboot(&["sync", "--force"], home.path());
    assert!(first.status.success());

    let second = run_molboot(&["sync"], home.path());
    assert!(second.status.success());
    assert!(stdout(&second).contains("skipping update check"));
}

// =============================================================================
// Palette Tests
// =============================================================================

#[test]
fn test_palettes_registers_from_local_server() {
    let home = TempDir::new().unwrap();
    let url = serve(FIXTURE_GIST);

    let output = run_molboot(&["palettes", "--url", &url], home.path());

    assert!(
        output.status.success(),
        "palettes failed: {}",
        stderr(&output)
    );
    let out = stdout(&output);
    assert!(out.contains("Loaded 5 colors from 2 palette families"));
    assert!(out.contains("5 palette colors registered"));
}

#[test]
fn test_palettes_malformed_body_fails() {
    let home = TempDir::new().unwrap();
    let url = serve("console.log('no palettes here');\n");

    let output = run_molboot(&["palettes", "--url", &url], home.path());

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("No colorbrewer object literal"),
        "unexpected stderr: {}",
        stderr(&output)
    );
}

// =============================================================================
// Full Startup Tests
// =============================================================================

#[test]
fn test_startup_runs_sync_then_palettes() {
    let home = TempDir::new().unwrap();
    let url = serve(FIXTURE_GIST);
    write_config(home.path(), &url);

    let output = run_molboot(&["startup"], home.path());

    assert!(
        output.status.success(),
        "startup failed: {}",
        stderr(&output)
    );
    let out = stdout(&output);
    let sync_at = out
        .find("Script repository loaded")
        .expect("sync output missing");
    let palette_at = out.find("palette colors registered").expect("palette output missing");
    assert!(sync_at < palette_at, "sync must run before palette load");
}
