// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    // Re-run build script if git HEAD changes
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=DEPTH_FOCUS_VERSION");

    // Packagers can pin the version string without a git checkout
    let version = match std::env::var("DEPTH_FOCUS_VERSION") {
        Ok(v) => v,
        Err(_) => git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version from `git describe`, reshaped to "<tag>-<hash>" or
/// "<tag>-dirty-<hash>" when HEAD is past the tag.
fn git_version() -> Option<String> {
    let described = run_git(&["describe", "--tags", "--always", "--match", "v*"])?;
    let described = described.strip_prefix('v').unwrap_or(&described).to_string();
    let hash = run_git(&["rev-parse", "--short", "HEAD"])?;

    if !described.contains('-') {
        return Some(if described == hash {
            format!("{}-{}", env!("CARGO_PKG_VERSION"), hash)
        } else {
            format!("{}-{}", described, hash)
        });
    }

    // "<tag>-<commits>-g<hash>"
    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    if parts.len() >= 3 {
        let short = parts[0].strip_prefix('g').unwrap_or(parts[0]);
        Some(format!("{}-dirty-{}", parts[2], short))
    } else {
        Some(described)
    }
}

fn run_git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}
