//! Tracing/logging setup shared by the browser module and native tools.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(DEFAULT_FILTER);
}

/// Like [`init`], with an explicit filter directive (e.g. `"portfolio_web=debug"`).
pub fn init_with(filter: &str) {
    tracing::init(filter);
}

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Tracing configuration (filters, layers).
pub mod tracing;
