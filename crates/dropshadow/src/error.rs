//! Error types for the drop shadow engine.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ShadowError>;

/// Errors surfaced by the engine.
///
/// Geometry never fails: degenerate vectors and missing graphics are
/// tolerated as no-ops. Only helpers with real preconditions and
/// configuration parsing report errors.
#[derive(Debug, Error)]
pub enum ShadowError {
    /// An argument violated a documented precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A light source type name that the engine does not know.
    #[error("unknown light source type '{0}'")]
    UnknownLightType(String),

    /// A JSON config or manifest failed to parse.
    #[error("config parse failed: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ShadowError::UnknownLightType("spot".into());
        assert_eq!(err.to_string(), "unknown light source type 'spot'");

        let err = ShadowError::InvalidArgument("outer radius 1 < inner radius 2".into());
        assert!(err.to_string().starts_with("invalid argument:"));
    }

    #[test]
    fn json_errors_convert() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("nope");
        let err: ShadowError = parse.unwrap_err().into();
        assert!(matches!(err, ShadowError::Config(_)));
    }
}
