//! HTTP Request
use bytes::Bytes;
use std::collections::HashMap;

use crate::h1::parser::{ParseError, parse_reqline_chunk_from};
use crate::http::{Method, Version};

/// Header fields, keyed by field name.
///
/// Header fields are not parsed yet, so the map is always empty.
pub type Headers = HashMap<String, String>;

/// HTTP Request Line, e.g: `GET /index.html HTTP/1.1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    request_target: Bytes,
    http_version: Version,
}

impl RequestLine {
    /// Create new [`RequestLine`].
    pub fn new(method: Method, request_target: Bytes, http_version: Version) -> Self {
        Self {
            method,
            request_target,
            http_version,
        }
    }

    /// Returns the request [`Method`].
    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the request target as is, path and query are not validated.
    #[inline]
    pub fn request_target(&self) -> &[u8] {
        &self.request_target
    }

    /// Returns the request target as `str`, or `None` if it is not valid UTF-8.
    #[inline]
    pub fn request_target_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.request_target).ok()
    }

    /// Returns the HTTP [`Version`].
    #[inline]
    pub fn http_version(&self) -> Version {
        self.http_version
    }
}

impl std::fmt::Display for RequestLine {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.method,
            String::from_utf8_lossy(&self.request_target),
            self.http_version
        )
    }
}

/// Parsing progress of a [`Request`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseState {
    /// Nothing parsed yet, waiting for request line.
    #[default]
    Initialized,
    /// Parsing complete, no more bytes will be consumed.
    Done,
}

/// HTTP Request.
#[derive(Debug, Default)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
    body: Bytes,
    state: ParseState,
}

/// Constructor
impl Request {
    /// Create empty [`Request`] in [`ParseState::Initialized`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Request {
    /// Returns shared reference to [`RequestLine`].
    #[inline]
    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    /// Returns shared reference to [`Headers`].
    #[inline]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns mutable reference to [`Headers`].
    #[inline]
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Returns the message body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the current [`ParseState`].
    #[inline]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Returns `true` if parsing is complete.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Destruct into [`RequestLine`], [`Headers`], and body.
    pub fn into_parts(self) -> (RequestLine, Headers, Bytes) {
        (self.request_line, self.headers, self.body)
    }
}

/// Parsing
impl Request {
    /// Feed all currently buffered bytes to the parser of the current state.
    ///
    /// Returns the number of bytes consumed. Zero means more bytes is required, in which case the
    /// request is not mutated.
    #[inline]
    pub fn parse(&mut self, bytes: &[u8]) -> Result<usize, ParseError> {
        self.parse_from(bytes, 0)
    }

    /// Same as [`Request::parse`], with a hint that the first `scanned` bytes contains no line
    /// terminator.
    pub(crate) fn parse_from(&mut self, bytes: &[u8], scanned: usize) -> Result<usize, ParseError> {
        match self.state {
            ParseState::Initialized => {
                let Some((reqline, consumed)) =
                    parse_reqline_chunk_from(bytes, scanned).into_result()?
                else {
                    return Ok(0);
                };

                self.request_line = reqline;
                self.state = ParseState::Done;
                Ok(consumed)
            }
            ParseState::Done => Ok(0),
        }
    }
}
