//! Mock service configuration, populated from environment variables.

use std::net::SocketAddr;

/// Runtime configuration for `dcat-mock`.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `CATALOG_MOCK_BIND` | `127.0.0.1:3030` | TCP socket address to listen on |
/// | `CATALOG_MOCK_SEED` | `true` | Load the demo entities, lineage, and type definitions |
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub bind_addr: SocketAddr,
    pub seed: bool,
}

impl MockConfig {
    pub const DEFAULT_BIND: &'static str = "127.0.0.1:3030";

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, String> {
        let raw_bind =
            std::env::var("CATALOG_MOCK_BIND").unwrap_or_else(|_| Self::DEFAULT_BIND.into());
        let bind_addr = raw_bind.parse().map_err(|e| {
            format!("CATALOG_MOCK_BIND must be a socket address (e.g. {}): {e}", Self::DEFAULT_BIND)
        })?;

        let seed = match std::env::var("CATALOG_MOCK_SEED") {
            Ok(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"),
            Err(_) => true,
        };

        Ok(Self { bind_addr, seed })
    }
}
