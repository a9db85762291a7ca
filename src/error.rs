use std::io;

use crate::h1::parser::ParseError;

/// Request parsing error.
#[derive(Debug)]
pub enum Error {
    /// Source ended after some bytes, but before a complete request line.
    Incomplete,
    /// Source ended before producing any byte.
    Closed,
    /// Request line is malformed.
    Parse(ParseError),
    /// Source failed to produce the next chunk.
    Io(io::Error),
}

impl Error {
    /// Returns the [`ParseError`] if the request line is malformed.
    #[inline]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if the source ended before a complete request line.
    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }

    /// Returns `true` if the source ended without producing any byte.
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Incomplete => f.write_str("unexpected end of input: incomplete request"),
            Self::Closed => f.write_str("connection closed before request"),
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl From<ParseError> for Error {
    #[inline]
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<Error> for io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::Io(err) => err,
            Error::Incomplete | Error::Closed => {
                io::Error::new(io::ErrorKind::UnexpectedEof, value)
            }
            Error::Parse(_) => io::Error::new(io::ErrorKind::InvalidData, value),
        }
    }
}
