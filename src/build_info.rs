//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner used by the CLI.
pub fn version_line() -> String {
    format!("loyalty {} ({} {})", PKG_VERSION, BUILD_COMMIT, BUILD_DATE)
}
