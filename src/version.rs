// Build-time identity from Cargo.toml, reported by GET /version

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "status-page";
