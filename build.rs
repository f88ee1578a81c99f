/// Build script for sanicost
/// Captures build metadata so a report can be traced to the exact model code

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=Cargo.lock");

    if let Ok(version) = std::env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=SANICOST_VERSION={version}");
    }

    // Short hash; "unknown" outside a git checkout
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |h| h.trim().to_string());
    println!("cargo:rustc-env=GIT_HASH={hash}");
}
