//! Build script: embeds the git hash and checks GPU toolkits.
//!
//! GPU features compile whisper.cpp against a native toolkit. A missing
//! toolkit is reported here instead of deep inside whisper-rs-sys.

use std::process::Command;

fn main() {
    // Embed git short hash for version string
    if let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        && output.status.success()
    {
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=GIT_HASH={}", hash);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    if cfg!(feature = "cuda") {
        require_tool("CUDA", "nvcc", &["--version"], "install the CUDA toolkit (nvcc)");
    }
    if cfg!(feature = "vulkan") {
        require_tool(
            "Vulkan",
            "glslc",
            &["--version"],
            "install the Vulkan SDK (glslc shader compiler)",
        );
    }
    if cfg!(feature = "hipblas") {
        require_tool("ROCm", "hipconfig", &["--version"], "install ROCm (hipconfig)");
    }
    if cfg!(feature = "openblas") {
        require_tool(
            "OpenBLAS",
            "pkg-config",
            &["--exists", "openblas"],
            "install the OpenBLAS development package",
        );
    }
}

fn require_tool(toolkit: &str, program: &str, args: &[&str], hint: &str) {
    match Command::new(program).args(args).output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout);
            if let Some(line) = version.lines().find(|l| !l.trim().is_empty()) {
                println!("cargo::warning={} toolkit: {}", toolkit, line.trim());
            }
        }
        _ => {
            println!(
                "cargo::error={} feature enabled but `{}` was not found: {}",
                toolkit, program, hint
            );
            std::process::exit(1);
        }
    }
}
