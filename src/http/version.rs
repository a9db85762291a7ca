/// HTTP Version.
///
/// Only `HTTP/1.1` is accepted in a request line, so this type has a single value.
///
/// [httpwg](https://httpwg.org/specs/rfc9112.html#http.version)
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Version(Inner);

#[derive(PartialEq, PartialOrd, Copy, Clone, Eq, Ord, Hash)]
enum Inner {
    Http11,
}

impl Version {
    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version(Inner::Http11);

    /// Parse the version field of a request line, e.g: `HTTP/1.1`.
    ///
    /// The field must contain exactly one `/`. The part after it, with surrounding whitespace
    /// trimmed, must be exactly `1.1`. The protocol name before `/` is not checked.
    pub fn from_bytes(src: &[u8]) -> Result<Version, VersionError> {
        let mut parts = src.split(|&b| b == b'/');

        let (Some(_name), Some(version), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(VersionError::InvalidFormat);
        };

        match version.trim_ascii() {
            b"1.1" => Ok(Version::HTTP_11),
            _ => Err(VersionError::Unsupported),
        }
    }

    /// Returns the version number, e.g: `1.1`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            Inner::Http11 => "1.1",
        }
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Version {
        Version::HTTP_11
    }
}

impl PartialEq<str> for Version {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Version {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use self::Inner::*;

        f.write_str(match self.0 {
            Http11 => "HTTP/1.1",
        })
    }
}

impl std::fmt::Debug for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

// ===== Error =====

/// Error returned by [`Version::from_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionError {
    /// Version field is not in the form of `<name>/<version>`.
    InvalidFormat,
    /// Version number is not `1.1`.
    Unsupported,
}

impl std::error::Error for VersionError {}

impl std::fmt::Display for VersionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidFormat => f.write_str("invalid http version format"),
            Self::Unsupported => f.write_str("unsupported http version"),
        }
    }
}
