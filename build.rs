//! Build script for authz-engine
//!
//! Feeds `BuildInfo` through `BUILD_TIME`, `GIT_HASH` and `RUST_VERSION`.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let build_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string());

    // docs.rs has neither a checkout nor a stable rustc on PATH
    let docs_rs = std::env::var_os("DOCS_RS").is_some();
    let (git_hash, rust_version) = if docs_rs {
        ("docs-rs-build".to_string(), "stable".to_string())
    } else {
        (
            first_line("git", &["rev-parse", "--short", "HEAD"]),
            first_line("rustc", &["--version"]),
        )
    };

    for (key, value) in [
        ("BUILD_TIME", build_time),
        ("GIT_HASH", git_hash),
        ("RUST_VERSION", rust_version),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }

    for path in [".git/HEAD", ".git/refs/heads/", "Cargo.toml"] {
        println!("cargo:rerun-if-changed={}", path);
    }
}

/// First line of a command's stdout, or `unknown` when it cannot run
fn first_line(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .and_then(|stdout| stdout.lines().next().map(|line| line.trim().to_string()))
        .filter(|line| !line.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
