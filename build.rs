use std::process::Command;

/// Exposes the short commit hash as `BOXTOOL_GIT_HASH` for `--version`.
fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|stdout| stdout.trim().to_owned())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rustc-env=BOXTOOL_GIT_HASH={hash}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
