/// Build script for monkey.
///
/// Exposes compile-time metadata as environment variables for use in the binary.
fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(version) = std::env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=MONKEY_VERSION={version}");
    }
}
