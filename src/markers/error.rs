use std::fmt;

/// 1-based position in the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that abort a conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid input: {message}")]
    Input {
        message: String,
        location: Option<Location>,
    },

    #[error("invalid icon anchor table: {0}")]
    IconAnchors(String),

    #[error("marker '{marker}' has inconsistent coordinates: {reason}")]
    Geometry { marker: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// Where in the input the error was detected, if the parser reported it
    pub fn location(&self) -> Option<Location> {
        match self {
            ConvertError::Input { location, .. } => *location,
            _ => None,
        }
    }

    /// True for problems caused by the caller's input or options
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ConvertError::Internal(_))
    }
}

impl From<serde_yaml::Error> for ConvertError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location().map(|loc| Location {
            line: loc.line(),
            column: loc.column(),
        });
        ConvertError::Input {
            message: err.to_string(),
            location,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_error_carries_location() {
        let err: ConvertError = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2\nb: 3")
            .unwrap_err()
            .into();
        assert!(err.is_input_error());
        let loc = err.location().expect("parser reports a location");
        assert!(loc.line >= 1);
    }

    #[test]
    fn test_internal_error_has_no_location() {
        let err = ConvertError::Internal("boom".to_string());
        assert!(!err.is_input_error());
        assert_eq!(err.location(), None);
        assert_eq!(err.to_string(), "internal error: boom");
    }

    #[test]
    fn test_location_display() {
        let loc = Location { line: 3, column: 7 };
        assert_eq!(loc.to_string(), "3:7");
    }
}
