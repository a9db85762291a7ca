use crate::http::VersionError;

/// Request line parsing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Request line is not exactly three fields separated by single space.
    InvalidRequestLine,
    /// Method is not one of the accepted methods.
    InvalidMethod,
    /// Version field is not in the form of `<name>/<version>`.
    InvalidVersionFormat,
    /// Version is not `1.1`.
    UnsupportedVersion,
    /// Request line exceeds the configured limit.
    TooLong,
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidRequestLine => f.write_str("invalid request line"),
            Self::InvalidMethod => f.write_str("invalid http method"),
            Self::InvalidVersionFormat => f.write_str("invalid http version format"),
            Self::UnsupportedVersion => f.write_str("unsupported http version"),
            Self::TooLong => f.write_str("request line too long"),
        }
    }
}

impl From<VersionError> for ParseError {
    fn from(value: VersionError) -> Self {
        match value {
            VersionError::InvalidFormat => Self::InvalidVersionFormat,
            VersionError::Unsupported => Self::UnsupportedVersion,
        }
    }
}
