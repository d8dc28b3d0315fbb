use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised at the library's fallible boundary: loading and validating
/// scenario files. Stepping the engine never fails; numerical blow-up shows
/// up as non-finite state instead.
#[derive(Debug, Error)]
pub enum SimError {
    /// A body entry in a scenario file is malformed.
    #[error("invalid body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },

    /// A configuration value cannot be brought into range by clamping.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Scenario file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid YAML for the expected schema.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = SimError::InvalidBody {
            index: 2,
            reason: "mass must be finite and > 0".to_string(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("body 2"));
        assert!(msg.contains("mass"));
    }
}
