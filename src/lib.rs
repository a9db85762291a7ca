//! Incremental HTTP/1.1 request line parser.
//!
//! The parser reads from a byte source in small chunks and reconstructs a [`Request`] no matter
//! how the source fragments the bytes. Only the request line is parsed, header fields and
//! message body are left for later parsing states.
//!
//! ```
//! use reqline::{Config, Method};
//!
//! let config = Config::new().chunk_size(3);
//! let request = reqline::request_from_reader_with(&b"POST /coffee HTTP/1.1\r\n"[..], &config)?;
//!
//! assert!(request.is_done());
//! assert_eq!(request.request_line().method(), Method::POST);
//! assert_eq!(request.request_line().request_target(), b"/coffee");
//! # Ok::<_, reqline::Error>(())
//! ```
#![warn(missing_debug_implementations)]

mod log;
mod common;
mod config;
mod error;

pub mod http;
pub mod h1;
pub mod request;

pub use common::ParseResult;
pub use config::{Config, DEFAULT_CHUNK_SIZE};
pub use error::Error;
pub use h1::driver::{
    Driver, request_from_async_reader, request_from_async_reader_with, request_from_reader,
    request_from_reader_with, request_from_stream, request_from_stream_with,
};
pub use h1::io::{ByteSource, Chunk};
pub use h1::parser::ParseError;
pub use http::{Method, Version};
pub use request::{Headers, ParseState, Request, RequestLine};
