use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=TASKPAD_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/packed-refs");
    println!("cargo:rustc-env=TASKPAD_BUILD_VERSION={}", build_version());
}

fn build_version() -> String {
    std::env::var("TASKPAD_VERSION")
        .ok()
        .map(|raw| strip_v_prefix(&raw))
        .filter(|version| !version.is_empty())
        .or_else(git_describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    let version = strip_v_prefix(raw.trim());
    (!version.is_empty()).then_some(version)
}

fn strip_v_prefix(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_prefix('v') {
        Some(rest) if rest.starts_with(|ch: char| ch.is_ascii_digit()) => rest.to_string(),
        _ => trimmed.to_string(),
    }
}
