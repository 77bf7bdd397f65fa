//! Build script for flex-sys
//!
//! Emits link directives for libflex_delegate when the `link` feature is on.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=TFLITE_FLEX_LIB_DIR");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // An explicit directory wins over the bundled third_party layout.
    let search_dir = match env::var_os("TFLITE_FLEX_LIB_DIR") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => bundled_lib_dir(&target_os, &target_arch),
    };

    if let Some(dir) = search_dir {
        println!("cargo:rustc-link-search=native={}", dir.display());
    }

    println!("cargo:rustc-link-lib=dylib=flex_delegate");

    match target_os.as_str() {
        "android" => {
            println!("cargo:rustc-link-lib=dylib=log");
            println!("cargo:rustc-link-lib=dylib=m");
        }
        "linux" => println!("cargo:rustc-link-lib=dylib=dl"),
        _ => {}
    }
}

fn bundled_lib_dir(target_os: &str, target_arch: &str) -> Option<PathBuf> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").ok()?);
    let libs = manifest_dir.join("../../third_party/tensorflow/libs");

    let sub = match (target_os, target_arch) {
        ("android", "aarch64") => "android/arm64-v8a",
        ("android", "arm") => "android/armeabi-v7a",
        ("linux", "x86_64") => "linux_x86",
        _ => return None,
    };
    Some(libs.join(sub))
}
