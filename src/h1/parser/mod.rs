//! HTTP/1.1 Request Line Parser.
//!
//! [`parse_reqline_chunk`] works on chunked bytes, given any length of bytes, the parser will find
//! the first crlf and parse the line before it. If crlf is not found, then the parser returns
//! [`ParseResult::Pending`], where more bytes is required to complete parsing.
//!
//! The parser never mutates its input. On success, it returns the number of bytes consumed,
//! including the crlf, and the caller is responsible to advance its buffer.
//!
//! [`ParseResult::Pending`]: crate::common::ParseResult::Pending
mod error;
mod matches;

pub use error::ParseError;

use bytes::Bytes;

use crate::common::ParseResult;
use crate::http::{Method, Version};
use crate::request::RequestLine;


const CRLF_SIZE: usize = b"\r\n".len();

// ===== Request Line =====

/// Parse request line.
///
/// Returns the parsed [`RequestLine`] and the number of bytes consumed.
///
/// This function performs a chunked parsing, see [module level documentation] for more details.
///
/// [module level documentation]: crate::h1::parser
#[inline]
pub fn parse_reqline_chunk(bytes: &[u8]) -> ParseResult<(RequestLine, usize), ParseError> {
    parse_reqline_chunk_from(bytes, 0)
}

/// Parse request line, with a hint that the first `scanned` bytes contains no crlf.
///
/// Hint that is too large may skip a crlf, the caller must only pass the length of bytes
/// previously returned [`ParseResult::Pending`], minus one for a possible trailing `\r`.
pub fn parse_reqline_chunk_from(
    bytes: &[u8],
    scanned: usize,
) -> ParseResult<(RequestLine, usize), ParseError> {
    let Some(at) = matches::find_crlf(bytes, scanned) else {
        return ParseResult::Pending;
    };

    match parse_reqline(&bytes[..at]) {
        Ok(reqline) => ParseResult::Ok((reqline, at + CRLF_SIZE)),
        Err(err) => ParseResult::Err(err),
    }
}

/// Parse a complete request line, without the crlf.
fn parse_reqline(line: &[u8]) -> Result<RequestLine, ParseError> {
    let mut fields = line.split(|&b| b == b' ');

    let (Some(method), Some(target), Some(version), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::InvalidRequestLine);
    };

    let Some(method) = Method::from_bytes(method) else {
        return Err(ParseError::InvalidMethod);
    };

    let version = Version::from_bytes(version)?;

    Ok(RequestLine::new(method, Bytes::copy_from_slice(target), version))
}
