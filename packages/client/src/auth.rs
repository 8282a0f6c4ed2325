//! Bearer credentials.

use datacatalog::Error;

/// Supplies the bearer token attached to each request.
///
/// Called once per request, so implementations that cache and refresh
/// tokens should do so internally.
pub trait TokenCredential: Send + Sync + 'static {
    fn token(&self) -> Result<String, Error>;
}

/// A fixed token, e.g. from `CATALOG_TOKEN`.
#[derive(Clone)]
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl TokenCredential for StaticTokenCredential {
    fn token(&self) -> Result<String, Error> {
        if self.token.is_empty() {
            return Err(Error::Credential("token is empty".into()));
        }
        Ok(self.token.clone())
    }
}

impl std::fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenCredential")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_token() {
        assert_eq!(StaticTokenCredential::new("abc").token().unwrap(), "abc");
        assert!(matches!(
            StaticTokenCredential::new("").token(),
            Err(Error::Credential(_))
        ));
    }

    #[test]
    fn debug_hides_token() {
        let s = format!("{:?}", StaticTokenCredential::new("hunter2"));
        assert!(!s.contains("hunter2"));
    }
}
