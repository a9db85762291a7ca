//! Request driver.
//!
//! [`Driver`] owns the read buffer and the [`Request`] under construction. Every time bytes are
//! appended to the buffer, [`Driver::advance`] feeds the whole buffer to the parser and drops the
//! consumed bytes. The read loop itself is provided for blocking [`ByteSource`], async
//! [`AsyncRead`], and [`Stream`] of chunks.
use bytes::Bytes;
use futures_core::Stream;
use std::{
    future::poll_fn,
    io,
    pin::Pin,
    task::{Poll, ready},
};
use tokio::io::AsyncRead;

use super::io::{ByteSource, ReadBuffer};
use crate::common::ParseResult;
use crate::config::Config;
use crate::error::Error;
use crate::h1::parser::ParseError;
use crate::log::{debug, trace};
use crate::request::Request;

const CRLF_SIZE: usize = b"\r\n".len();

/// Sans-io request parsing state machine.
///
/// A driver produces at most one [`Request`], it is finished once the request is returned.
#[derive(Debug)]
pub struct Driver {
    buffer: ReadBuffer,
    /// `None` once the request is returned.
    request: Option<Request>,
    config: Config,
}

impl Driver {
    /// Create new [`Driver`] with an empty [`Request`].
    pub fn new(config: &Config) -> Self {
        Self {
            buffer: ReadBuffer::new(),
            request: Some(Request::new()),
            config: *config,
        }
    }

    /// Returns `true` if the request has been returned.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.request.is_none()
    }

    /// Returns the [`Config`].
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns mutable reference to the read buffer.
    ///
    /// Bytes appended to the buffer are parsed on the next [`Driver::advance`].
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut ReadBuffer {
        &mut self.buffer
    }

    /// Parse buffered bytes.
    ///
    /// `eof` is whether the source signals end-of-input, which must be set with the read that
    /// appended the last bytes, if any.
    ///
    /// Returns [`ParseResult::Pending`] if more bytes is required. Once [`ParseResult::Ok`] is
    /// returned, bytes left in the buffer are not part of the request line, and the driver is
    /// finished: further calls return [`ParseResult::Pending`] without parsing anything.
    pub fn advance(&mut self, eof: bool) -> ParseResult<Request, Error> {
        let Some(request) = self.request.as_mut() else {
            return ParseResult::Pending;
        };

        let bytes = self.buffer.as_slice();

        // a crlf past this window means the line is longer than the limit
        let (window, limited) = match self.config.get_max_line_len() {
            Some(max) => {
                let window = max.saturating_add(CRLF_SIZE);
                (&bytes[..bytes.len().min(window)], bytes.len() >= window)
            }
            None => (bytes, false),
        };

        let consumed = match request.parse_from(window, self.buffer.scanned()) {
            Ok(ok) => ok,
            Err(err) => {
                debug!("request line rejected: {err}");
                return ParseResult::Err(err.into());
            }
        };

        if request.is_done() {
            self.buffer.consume(consumed);
            trace!("request line complete, {} bytes left unparsed", self.buffer.len());
            return match self.request.take() {
                Some(request) => ParseResult::Ok(request),
                None => ParseResult::Pending,
            };
        }

        if limited {
            debug!("request line exceeds {} bytes", window.len() - CRLF_SIZE);
            return ParseResult::Err(ParseError::TooLong.into());
        }

        self.buffer.mark_scanned();

        if eof {
            return if self.buffer.is_empty() {
                trace!("source closed before request");
                ParseResult::Err(Error::Closed)
            } else {
                debug!("source closed with {} bytes of incomplete request", self.buffer.len());
                ParseResult::Err(Error::Incomplete)
            };
        }

        ParseResult::Pending
    }

    /// Read from blocking `source` until the request line is parsed.
    pub fn read_request<S>(mut self, source: &mut S) -> Result<Request, Error>
    where
        S: ByteSource + ?Sized,
    {
        loop {
            let chunk = match self.buffer.read_from(source, self.config.get_chunk_size()) {
                Ok(ok) => ok,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };

            trace!("read {} bytes, eof: {}", chunk.len, chunk.eof);

            match self.advance(chunk.eof) {
                ParseResult::Pending => {}
                ParseResult::Ok(request) => return Ok(request),
                ParseResult::Err(err) => return Err(err),
            }
        }
    }

    /// Poll read from async `io` until the request line is parsed.
    ///
    /// # Panics
    ///
    /// Panics if the driver is already finished.
    pub fn poll_request<IO>(
        &mut self,
        io: &mut IO,
        cx: &mut std::task::Context,
    ) -> Poll<Result<Request, Error>>
    where
        IO: AsyncRead + Unpin + ?Sized,
    {
        assert!(!self.is_finished(), "`Driver` polled after completion");

        loop {
            let chunk = ready!(self.buffer.poll_read_from(io, self.config.get_chunk_size(), cx))?;

            trace!("read {} bytes, eof: {}", chunk.len, chunk.eof);

            match self.advance(chunk.eof) {
                ParseResult::Pending => {}
                ParseResult::Ok(request) => return Poll::Ready(Ok(request)),
                ParseResult::Err(err) => return Poll::Ready(Err(err)),
            }
        }
    }

    /// Poll `stream` of chunks until the request line is parsed.
    ///
    /// Each chunk is appended as a whole, the configured chunk size does not apply.
    ///
    /// # Panics
    ///
    /// Panics if the driver is already finished.
    pub fn poll_request_stream<S, B>(
        &mut self,
        stream: &mut S,
        cx: &mut std::task::Context,
    ) -> Poll<Result<Request, Error>>
    where
        S: Stream<Item = io::Result<B>> + Unpin + ?Sized,
        B: AsRef<[u8]>,
    {
        assert!(!self.is_finished(), "`Driver` polled after completion");

        loop {
            let eof = match ready!(Pin::new(&mut *stream).poll_next(cx)) {
                Some(Ok(chunk)) => {
                    let chunk = chunk.as_ref();
                    trace!("read {} bytes", chunk.len());
                    self.buffer.extend_from_slice(chunk);
                    false
                }
                Some(Err(err)) => return Poll::Ready(Err(err.into())),
                None => true,
            };

            match self.advance(eof) {
                ParseResult::Pending => {}
                ParseResult::Ok(request) => return Poll::Ready(Ok(request)),
                ParseResult::Err(err) => return Poll::Ready(Err(err)),
            }
        }
    }
}

// ===== Entry Points =====

/// Parse a [`Request`] from blocking `source` with default [`Config`].
///
/// ```
/// let request = reqline::request_from_reader(&b"GET /index.html HTTP/1.1\r\n"[..])?;
///
/// assert_eq!(request.request_line().method(), reqline::Method::GET);
/// assert_eq!(request.request_line().request_target(), b"/index.html");
/// assert_eq!(request.request_line().http_version(), "1.1");
/// # Ok::<_, reqline::Error>(())
/// ```
#[inline]
pub fn request_from_reader<S: ByteSource>(source: S) -> Result<Request, Error> {
    request_from_reader_with(source, &Config::new())
}

/// Parse a [`Request`] from blocking `source`.
pub fn request_from_reader_with<S: ByteSource>(mut source: S, config: &Config) -> Result<Request, Error> {
    Driver::new(config).read_request(&mut source)
}

/// Parse a [`Request`] from async `io` with default [`Config`].
#[inline]
pub async fn request_from_async_reader<IO>(io: IO) -> Result<Request, Error>
where
    IO: AsyncRead + Unpin,
{
    request_from_async_reader_with(io, &Config::new()).await
}

/// Parse a [`Request`] from async `io`.
pub async fn request_from_async_reader_with<IO>(mut io: IO, config: &Config) -> Result<Request, Error>
where
    IO: AsyncRead + Unpin,
{
    let mut driver = Driver::new(config);
    poll_fn(|cx| driver.poll_request(&mut io, cx)).await
}

/// Parse a [`Request`] from `stream` of chunks with default [`Config`].
#[inline]
pub async fn request_from_stream<S>(stream: S) -> Result<Request, Error>
where
    S: Stream<Item = io::Result<Bytes>> + Unpin,
{
    request_from_stream_with(stream, &Config::new()).await
}

/// Parse a [`Request`] from `stream` of chunks.
pub async fn request_from_stream_with<S, B>(mut stream: S, config: &Config) -> Result<Request, Error>
where
    S: Stream<Item = io::Result<B>> + Unpin,
    B: AsRef<[u8]>,
{
    let mut driver = Driver::new(config);
    poll_fn(|cx| driver.poll_request_stream(&mut stream, cx)).await
}
