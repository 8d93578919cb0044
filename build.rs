//! The build flags emitted by this script are not public API.

fn main() {
    println!("cargo:rustc-check-cfg=cfg(dawg_dot_no_alloc)");

    // Probe for the latest Rust version.
    let rustc = match autocfg::AutoCfg::new() {
        Ok(rustc) => rustc,
        Err(e) => {
            println!(
                "cargo:warning={}: unable to determine version: {}",
                env!("CARGO_PKG_NAME"),
                e
            );
            return;
        }
    };

    // Note that this is `no_*`, not `has_*`. If the build script does not
    // run, as with non-cargo build systems, no flag is set and the crate
    // assumes the latest stable rustc.

    // alloc stabilized in Rust 1.36 (nightly-2019-04-15)
    if !rustc.probe_rustc_version(1, 36) {
        println!("cargo:rustc-cfg=dawg_dot_no_alloc");
    }
}
