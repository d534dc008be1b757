// Shared build script helpers that turn a crate README into crate-level rustdoc.
// Pull this into a build.rs with: include!("../build_common.rs");
//
// The including file must import:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Render `README.md` into `$OUT_DIR/README_GENERATED.md` for `#![doc = include_str!(..)]`.
///
/// Rewrites applied:
/// 1. `](src/` links lose the `src/` prefix so rustdoc resolves them as modules
/// 2. `.rs)` suffixes are dropped so links point at modules rather than files
/// 3. `../../README.md` links become the workspace repository URL
///
/// A crate without a README still gets a one-line generated doc so the
/// `include_str!` in `lib.rs` always resolves.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");

    let readme_path = Path::new(crate_dir).join("README.md");
    let content = fs::read_to_string(&readme_path).unwrap_or_else(|_| {
        let name = env::var("CARGO_PKG_NAME").unwrap_or_default();
        format!("# {name}\n")
    });

    let mut rustdoc_content = content.replace("](src/", "](").replace(".rs)", ")");

    if let Some(url) = get_workspace_repo_url(crate_dir) {
        rustdoc_content = rustdoc_content.replace("](../../README.md", &format!("]({url}"));
    }

    if let Err(e) = fs::write(&dest_path, rustdoc_content) {
        println!("cargo:warning=failed to write {}: {e}", dest_path.display());
    }
}

/// Read `repository = "..."` from the workspace Cargo.toml.
fn get_workspace_repo_url(crate_dir: &str) -> Option<String> {
    let workspace_toml = Path::new(crate_dir)
        .parent()? // crates/
        .parent()? // workspace root
        .join("Cargo.toml");

    let content = fs::read_to_string(workspace_toml).ok()?;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("repository")
            && line.contains('=')
            && let Some(start) = line.find('"')
            && let Some(end) = line.rfind('"')
            && start < end
        {
            return Some(line[start + 1..end].to_string());
        }
    }
    None
}
