use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap()).join("include");
    let config = cbindgen::Config::from_file("cbindgen.toml")
        .unwrap_or_default();

    std::fs::create_dir_all(&out_dir)
        .unwrap_or_else(|e| panic!("Unable to create {}: {}", out_dir.display(), e));

    let header = out_dir.join("flex_runtime.h");
    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_config(config)
        .generate()
        .expect("Unable to generate C bindings")
        .write_to_file(&header);

    // Lets tests and downstream build scripts find the generated header.
    println!("cargo:rustc-env=FLEX_RUNTIME_HEADER={}", header.display());
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");
}
