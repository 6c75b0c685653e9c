//! Embeds the source revision shown by `wzreplay --version`.

use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    // GITHUB_SHA takes precedence over the local checkout.
    let revision = env::var("GITHUB_SHA")
        .ok()
        .filter(|sha| !sha.trim().is_empty())
        .or_else(|| git(&["rev-parse", "HEAD"]));
    let commit = revision
        .map(|sha| sha.trim().chars().take(7).collect::<String>())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let date = git(&["show", "-s", "--format=%cs", "HEAD"]).unwrap_or_else(|| UNKNOWN.to_string());

    for (key, value) in [
        ("WZREPLAY_BUILD_COMMIT", commit),
        ("WZREPLAY_BUILD_DATE", date),
    ] {
        println!("cargo:rustc-env={key}={value}");
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
