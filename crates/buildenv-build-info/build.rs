use std::{
    env, fs,
    path::{Path, PathBuf},
};

use vergen_gix::{Emitter, GixBuilder};

include!("../build_common.rs");

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    process_readme_for_rustdoc(&manifest_dir);

    // Packagers building from a tarball pass the SHA in directly.
    println!("cargo:rerun-if-env-changed=BUILDENV_BUILD_SHA_SHORT");
    if let Some(sha) = env::var("BUILDENV_BUILD_SHA_SHORT")
        .ok()
        .and_then(|raw| short_sha(&raw))
    {
        emit_fallbacks(Some(&sha));
        return;
    }

    // Git metadata is best effort; a missing repo must not fail the build.
    let Some(repo_root) = git_root(Path::new(&manifest_dir)) else {
        emit_fallbacks(None);
        return;
    };

    let git = match GixBuilder::default()
        .repo_path(Some(repo_root))
        .sha(true)
        .dirty(false)
        .build()
    {
        Ok(git) => git,
        Err(err) => {
            println!("cargo:warning=buildenv-build-info: vergen-gix config failed: {err}");
            emit_fallbacks(None);
            return;
        }
    };

    if let Err(err) = Emitter::default()
        .add_instructions(&git)
        .and_then(|emitter| emitter.emit())
    {
        println!("cargo:warning=buildenv-build-info: vergen-gix emit failed: {err}");
        emit_fallbacks(None);
    }
}

/// `env!()` in the crate requires both variables to exist.
fn emit_fallbacks(sha: Option<&str>) {
    println!("cargo:rustc-env=VERGEN_GIT_SHA={}", sha.unwrap_or("unknown"));
    println!("cargo:rustc-env=VERGEN_GIT_DIRTY=false");
}

fn short_sha(raw: &str) -> Option<String> {
    let sha: String = raw.trim().chars().take(7).collect();
    (sha.len() == 7 && sha.chars().all(|c| c.is_ascii_hexdigit())).then_some(sha)
}

fn git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
