//! Standard error response body.

pub use datacatalog::ErrorResponse;

/// Error codes the catalog returns in `errorCode`.
///
/// | `errorCode` | HTTP status |
/// |-------------|-------------|
/// | `ATLAS-400-00-001` | 400 |
/// | `ATLAS-400-00-01A` | 400 |
/// | `ATLAS-404-00-001` | 404 |
/// | `ATLAS-404-00-002` | 404 |
/// | `ATLAS-404-00-005` | 404 |
/// | `ATLAS-404-00-00C` | 404 |
/// | `ATLAS-409-00-004` | 409 |
/// | `ATLAS-500-00-001` | 500 |
pub mod codes {
    pub const BAD_REQUEST: &str = "ATLAS-400-00-001";
    pub const MISSING_MANDATORY_PARAMETER: &str = "ATLAS-400-00-01A";
    pub const TYPE_NAME_NOT_FOUND: &str = "ATLAS-404-00-001";
    pub const TYPE_GUID_NOT_FOUND: &str = "ATLAS-404-00-002";
    pub const INSTANCE_GUID_NOT_FOUND: &str = "ATLAS-404-00-005";
    pub const RELATIONSHIP_GUID_NOT_FOUND: &str = "ATLAS-404-00-00C";
    pub const RELATIONSHIP_ALREADY_EXISTS: &str = "ATLAS-409-00-004";
    pub const INTERNAL_ERROR: &str = "ATLAS-500-00-001";
}
