use bytes::Bytes;
use futures_core::Stream;
use std::{
    io::{self, Read},
    pin::Pin,
    task::{Context, Poll},
};
use tokio::io::AsyncWriteExt;

use crate::common::ParseResult;
use crate::config::Config;
use crate::error::Error;
use crate::h1::driver::{
    Driver, request_from_async_reader, request_from_async_reader_with, request_from_reader,
    request_from_reader_with, request_from_stream,
};
use crate::h1::io::{ByteSource, Chunk};
use crate::h1::parser::ParseError;
use crate::http::{Method, Version};
use crate::request::{ParseState, Request, RequestLine};

/// Source that delivers fixed chunks regardless of the requested size.
struct ChunkReader {
    data: Vec<u8>,
    pos: usize,
    per_read: usize,
    /// Set `eof` together with the last non-empty chunk.
    eager_eof: bool,
}

impl ChunkReader {
    fn new(data: impl Into<Vec<u8>>, per_read: usize) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            per_read,
            eager_eof: false,
        }
    }

    fn eager_eof(mut self) -> Self {
        self.eager_eof = true;
        self
    }
}

impl ByteSource for ChunkReader {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        if self.pos >= self.data.len() {
            return Ok(Chunk::eof());
        }

        let end = self.data.len().min(self.pos + self.per_read);
        let len = buf.len().min(end - self.pos);
        buf[..len].copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;

        Ok(Chunk {
            len,
            eof: self.eager_eof && self.pos >= self.data.len(),
        })
    }
}

/// Source that fails after delivering its data.
struct FailingReader(&'static [u8]);

impl io::Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0.is_empty() {
            return Err(io::ErrorKind::ConnectionReset.into());
        }
        self.0.read(buf)
    }
}

/// Source that is interrupted on every other read.
struct InterruptedReader {
    data: &'static [u8],
    interrupt: bool,
}

impl io::Read for InterruptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.data.read(buf)
    }
}

struct ChunkStream(Vec<io::Result<Bytes>>);

impl Stream for ChunkStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.0.is_empty() {
            Poll::Ready(None)
        } else {
            Poll::Ready(Some(self.0.remove(0)))
        }
    }
}

fn assert_reqline(request: &Request, method: Method, target: &str) {
    assert_eq!(request.state(), ParseState::Done);
    assert_eq!(request.request_line().method(), method);
    assert_eq!(request.request_line().request_target_str(), Some(target));
    assert_eq!(request.request_line().http_version(), Version::HTTP_11);
    assert_eq!(request.request_line().http_version(), "1.1");
    assert!(request.headers().is_empty());
    assert!(request.body().is_empty());
}

macro_rules! assert_err {
    ($result:expr, Parse($kind:ident)) => {
        match $result {
            Err(Error::Parse(ParseError::$kind)) => {}
            Err(err) => panic!("expected `{}`, found error: {err:?}", stringify!($kind)),
            Ok(ok) => panic!("expected `{}`, found `Ok` with: {ok:?}", stringify!($kind)),
        }
    };
    ($result:expr, $kind:ident) => {
        match $result {
            Err(Error::$kind) => {}
            Err(err) => panic!("expected `{}`, found error: {err:?}", stringify!($kind)),
            Ok(ok) => panic!("expected `{}`, found `Ok` with: {ok:?}", stringify!($kind)),
        }
    };
}

#[test]
fn test_single_chunk() {
    let request = request_from_reader(ChunkReader::new("GET /index.html HTTP/1.1\r\n", 1024)).unwrap();
    assert_reqline(&request, Method::GET, "/index.html");
}

#[test]
fn test_one_byte_at_a_time() {
    let request = request_from_reader(ChunkReader::new("GET /index.html HTTP/1.1\r\n", 1)).unwrap();
    assert_reqline(&request, Method::GET, "/index.html");
}

#[test]
fn test_chunk_invariance() {
    const INPUT: &str = "GET /coffee?size=large&milk=oat HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";

    let expected = request_from_reader(INPUT.as_bytes()).unwrap();

    for per_read in 1..=INPUT.len() + 1 {
        for eager_eof in [false, true] {
            let mut source = ChunkReader::new(INPUT, per_read);
            if eager_eof {
                source = source.eager_eof();
            }
            let request = request_from_reader(source).unwrap();
            assert_eq!(request.request_line(), expected.request_line(), "{per_read} bytes per read");
        }

        let config = Config::new().chunk_size(per_read);
        let request = request_from_reader_with(INPUT.as_bytes(), &config).unwrap();
        assert_eq!(request.request_line(), expected.request_line(), "chunk size {per_read}");
    }
}

#[test]
fn test_all_methods() {
    for method in Method::ALL {
        let input = format!("{method} /resource HTTP/1.1\r\n");
        for per_read in [1, 3, 8, 64] {
            let request = request_from_reader(ChunkReader::new(input.clone(), per_read)).unwrap();
            assert_reqline(&request, method, "/resource");
        }
    }
}

#[test]
fn test_trailing_bytes_are_discarded() {
    let input = "POST /submit HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi";
    let request = request_from_reader(ChunkReader::new(input, 5)).unwrap();
    assert_reqline(&request, Method::POST, "/submit");
}

#[test]
fn test_missing_crlf() {
    assert_err!(request_from_reader(ChunkReader::new("GET /index.html HTTP/1.1", 3)), Incomplete);
    assert_err!(request_from_reader(ChunkReader::new("GET /index.html HTTP/1.1\r", 8)), Incomplete);
    assert_err!(request_from_reader(ChunkReader::new("GET /index.html HTTP/1.1\n", 8)), Incomplete);
    assert_err!(
        request_from_reader(ChunkReader::new("GET /index.html HTTP/1.1", 3).eager_eof()),
        Incomplete
    );
}

#[test]
fn test_empty_source() {
    assert_err!(request_from_reader(ChunkReader::new("", 8)), Closed);
    assert_err!(request_from_reader(&b""[..]), Closed);
}

#[test]
fn test_malformed() {
    for per_read in [1, 8, 1024] {
        assert_err!(request_from_reader(ChunkReader::new("GETT /x HTTP/1.1\r\n", per_read)), Parse(InvalidMethod));
        assert_err!(request_from_reader(ChunkReader::new("GET /x HTTP/2.0\r\n", per_read)), Parse(UnsupportedVersion));
        assert_err!(request_from_reader(ChunkReader::new("GET /x\r\n", per_read)), Parse(InvalidRequestLine));
        assert_err!(request_from_reader(ChunkReader::new("GET /x HTTP1.1\r\n", per_read)), Parse(InvalidVersionFormat));
        // grammar error wins over end-of-input
        assert_err!(
            request_from_reader(ChunkReader::new("GET /x\r\n", per_read).eager_eof()),
            Parse(InvalidRequestLine)
        );
    }
}

#[test]
fn test_io_error() {
    match request_from_reader(FailingReader(b"GET /index")) {
        Err(Error::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected io error, found: {other:?}"),
    }

    // complete request line before the failure
    let request = request_from_reader(FailingReader(b"GET / HTTP/1.1\r\n")).unwrap();
    assert_reqline(&request, Method::GET, "/");
}

#[test]
fn test_interrupted_is_retried() {
    let source = InterruptedReader {
        data: b"DELETE /items/1 HTTP/1.1\r\n",
        interrupt: false,
    };
    let request = request_from_reader(source).unwrap();
    assert_reqline(&request, Method::DELETE, "/items/1");
}

#[test]
fn test_max_line_len() {
    const INPUT: &str = "GET /index.html HTTP/1.1\r\n";
    const LINE_LEN: usize = INPUT.len() - 2;

    for per_read in [1, 2, 8, 1024] {
        let config = Config::new().max_line_len(LINE_LEN);
        let request = request_from_reader_with(ChunkReader::new(INPUT, per_read), &config).unwrap();
        assert_reqline(&request, Method::GET, "/index.html");

        let config = Config::new().max_line_len(LINE_LEN - 1);
        assert_err!(request_from_reader_with(ChunkReader::new(INPUT, per_read), &config), Parse(TooLong));

        // limit is checked regardless of the line content
        let config = Config::new().max_line_len(4);
        assert_err!(request_from_reader_with(ChunkReader::new("GETT /x HTTP/1.1\r\n", per_read), &config), Parse(TooLong));
    }

    // without terminator, fails as soon as the limit is exceeded
    let config = Config::new().max_line_len(16);
    let source = Read::chain(&b"GET /"[..], io::repeat(b'a'));
    assert_err!(request_from_reader_with(source, &config), Parse(TooLong));
}

#[test]
fn test_target_is_opaque() {
    for per_read in [1, 8, 1024] {
        let source = ChunkReader::new(&b"GET /caf\xe9?q=\xff HTTP/1.1\r\n"[..], per_read);
        let request = request_from_reader(source).unwrap();
        let line = request.request_line();

        assert_eq!(line.method(), Method::GET);
        assert_eq!(line.request_target(), b"/caf\xe9?q=\xff");
        assert_eq!(line.request_target_str(), None);
        assert_eq!(line.http_version(), Version::HTTP_11);
    }
}

#[test]
fn test_huge_chunk_size() {
    const INPUT: &[u8] = b"GET /index.html HTTP/1.1\r\n";

    for chunk_size in [usize::MAX, usize::MAX / 2, 1 << 40] {
        let config = Config::new().chunk_size(chunk_size);
        let request = request_from_reader_with(INPUT, &config).unwrap();
        assert_reqline(&request, Method::GET, "/index.html");

        let request = request_from_reader_with(ChunkReader::new(INPUT, 3), &config).unwrap();
        assert_reqline(&request, Method::GET, "/index.html");
    }
}

#[test]
fn test_driver_finished() {
    let mut driver = Driver::new(&Config::new());
    driver
        .buffer_mut()
        .extend_from_slice(b"GET /a HTTP/1.1\r\nGET /b HTTP/1.1\r\n");

    match driver.advance(false) {
        ParseResult::Ok(request) => assert_reqline(&request, Method::GET, "/a"),
        other => panic!("expected `Ok`, found: {other:?}"),
    }
    assert!(driver.is_finished());

    // leftover bytes are never parsed as another request
    assert!(driver.advance(false).is_pending());
    assert!(driver.advance(true).is_pending());
}

#[tokio::test]
#[should_panic = "polled after completion"]
async fn test_driver_polled_after_completion() {
    let mut driver = Driver::new(&Config::new());
    driver.buffer_mut().extend_from_slice(b"GET / HTTP/1.1\r\n");
    assert!(matches!(driver.advance(false), ParseResult::Ok(_)));

    let mut io: &[u8] = b"GET / HTTP/1.1\r\n";
    let _ = std::future::poll_fn(|cx| driver.poll_request(&mut io, cx)).await;
}

#[test]
fn test_request_parse_idempotent() {
    const INPUT: &[u8] = b"PUT /a HTTP/1.1\r\nHost: a\r\n";
    const LINE_END: usize = b"PUT /a HTTP/1.1\r\n".len();

    let mut request = Request::new();

    for len in 0..LINE_END {
        assert_eq!(request.parse(&INPUT[..len]), Ok(0));
        assert_eq!(request.state(), ParseState::Initialized);
        assert_eq!(request.request_line(), &RequestLine::default());
    }

    assert_eq!(request.parse(INPUT), Ok(LINE_END));
    assert_eq!(request.state(), ParseState::Done);
    assert_eq!(request.request_line().method(), Method::PUT);

    // done is terminal
    assert_eq!(request.parse(b"GET /b HTTP/1.1\r\n"), Ok(0));
    assert_eq!(request.request_line().request_target(), b"/a");
}

#[tokio::test]
async fn test_async_reader() {
    let request = request_from_async_reader(&b"OPTIONS * HTTP/1.1\r\n"[..]).await.unwrap();
    assert_reqline(&request, Method::OPTIONS, "*");

    assert_err!(request_from_async_reader(&b"GET / HTTP/1.1"[..]).await, Incomplete);
    assert_err!(request_from_async_reader(&b""[..]).await, Closed);
    assert_err!(request_from_async_reader(&b"GET / HTTP/1.0\r\n"[..]).await, Parse(UnsupportedVersion));
}

#[tokio::test]
async fn test_async_reader_fragmented_writes() {
    const INPUT: &[u8] = b"PATCH /users/42 HTTP/1.1\r\nContent-Type: application/json\r\n";

    let (mut client, server) = tokio::io::duplex(64);

    let writer = async move {
        for chunk in INPUT.chunks(3) {
            client.write_all(chunk).await.unwrap();
            tokio::task::yield_now().await;
        }
        client
    };

    let config = Config::new().chunk_size(5);
    let (result, _client) = tokio::join!(request_from_async_reader_with(server, &config), writer);
    assert_reqline(&result.unwrap(), Method::PATCH, "/users/42");
}

#[tokio::test]
async fn test_async_reader_peer_closed() {
    let (mut client, server) = tokio::io::duplex(64);
    client.write_all(b"TRACE /x HT").await.unwrap();
    drop(client);

    assert_err!(request_from_async_reader(server).await, Incomplete);
}

#[tokio::test]
async fn test_stream() {
    let stream = ChunkStream(vec![
        Ok(Bytes::from_static(b"GET /in")),
        Ok(Bytes::new()),
        Ok(Bytes::from_static(b"dex.html HTTP/1.1\r")),
        Ok(Bytes::from_static(b"\nHost: localhost\r\n")),
    ]);
    let request = request_from_stream(stream).await.unwrap();
    assert_reqline(&request, Method::GET, "/index.html");

    let stream = ChunkStream(vec![Ok(Bytes::from_static(b"GET /index.html"))]);
    assert_err!(request_from_stream(stream).await, Incomplete);

    let stream = ChunkStream(vec![]);
    assert_err!(request_from_stream(stream).await, Closed);

    let stream = ChunkStream(vec![
        Ok(Bytes::from_static(b"GET /")),
        Err(io::ErrorKind::BrokenPipe.into()),
    ]);
    match request_from_stream(stream).await {
        Err(Error::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected io error, found: {other:?}"),
    }
}

#[test]
fn test_error_display() {
    assert_eq!(Error::Incomplete.to_string(), "unexpected end of input: incomplete request");
    assert_eq!(
        Error::from(ParseError::InvalidMethod).to_string(),
        "parse error: invalid http method"
    );
    assert_eq!(ParseError::InvalidRequestLine.to_string(), "invalid request line");
    assert_eq!(ParseError::UnsupportedVersion.to_string(), "unsupported http version");

    let err = io::Error::from(Error::Parse(ParseError::InvalidMethod));
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    let err = io::Error::from(Error::Incomplete);
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}
