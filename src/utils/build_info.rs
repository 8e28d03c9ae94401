//! Compile-time build information stamped by `build.rs`.

pub const BUILD_COMMIT: &str = env!("FLAPPER_BUILD_COMMIT");
pub const BUILD_DATE: &str = env!("FLAPPER_BUILD_DATE");

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!(
        "flapper {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
