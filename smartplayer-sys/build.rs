//! Build script for smartplayer-sys
//!
//! Locates the NFSmartPlayer native library (via pkg-config or environment
//! variables) and emits the link directives for it. When the `stub` feature
//! is enabled every symbol is provided in-crate and nothing is linked.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=NF_SMART_PLAYER_LIB_DIR");

    // The stub engine defines every bound symbol inside this crate.
    if env::var_os("CARGO_FEATURE_STUB").is_some() {
        return;
    }

    // Try pkg-config first (works after `make install`)
    if pkg_config::probe_library("NFSmartPlayer").is_ok() {
        link_cxx_runtime();
        return;
    }

    // Fall back to environment variables or relative paths
    if let Ok(lib_dir) = env::var("NF_SMART_PLAYER_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", lib_dir);
    } else {
        // Default: assume building from smartplayer-sys/ with the engine
        // checked out as a sibling of the workspace.
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
        let lib_path = PathBuf::from(&manifest_dir).join("../../NFSmartPlayer/build/output/lib");
        if lib_path.exists() {
            let lib_path = lib_path.canonicalize().unwrap_or(lib_path);
            println!("cargo:rustc-link-search=native={}", lib_path.display());
        }
    }

    println!("cargo:rustc-link-lib=NFSmartPlayer");
    link_cxx_runtime();
}

// The engine is C++ behind a C facade.
fn link_cxx_runtime() {
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("apple") {
        println!("cargo:rustc-link-lib=c++");
    } else if !target.contains("windows") {
        println!("cargo:rustc-link-lib=stdc++");
    }
}
