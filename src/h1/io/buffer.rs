use bytes::{Buf, BytesMut};
use std::{
    io,
    pin::Pin,
    task::{Poll, ready},
};
use tokio::io::{AsyncRead, ReadBuf};

use super::{ByteSource, Chunk};

/// Upper bound of bytes reserved for a single read.
const MAX_READ_SIZE: usize = 8 * 1024;

/// Accumulator of bytes read but not yet consumed.
///
/// Bytes are only appended at the tail and only consumed from the head.
pub struct ReadBuffer {
    buf: BytesMut,
    /// Leading bytes known to contain no line terminator.
    scanned: usize,
}

impl ReadBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            scanned: 0,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the offset where the next scan for a line terminator should start.
    #[inline]
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Mark the whole buffer as scanned without finding a line terminator.
    ///
    /// The last byte is excluded, it may be the first half of a crlf.
    #[inline]
    pub fn mark_scanned(&mut self) {
        self.scanned = self.buf.len().saturating_sub(1);
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Drop `cnt` bytes from the head.
    pub fn consume(&mut self, cnt: usize) {
        self.buf.advance(cnt);
        self.scanned = 0;
    }

    /// Read at most `max` bytes from `source` into the tail.
    ///
    /// `max` is capped to 8KiB per read.
    pub fn read_from<S>(&mut self, source: &mut S, max: usize) -> io::Result<Chunk>
    where
        S: ByteSource + ?Sized,
    {
        let max = max.min(MAX_READ_SIZE);
        let len = self.buf.len();
        self.buf.resize(len + max, 0);

        let result = source.read_chunk(&mut self.buf[len..]);
        let read = match &result {
            // a misbehaving source can not grow the buffer past what it was given
            Ok(chunk) => chunk.len.min(max),
            Err(_) => 0,
        };

        self.buf.truncate(len + read);
        result.map(|chunk| Chunk { len: read, ..chunk })
    }

    /// Poll read at most `max` bytes from `io` into the tail.
    ///
    /// `max` is capped to 8KiB per read.
    pub fn poll_read_from<IO>(
        &mut self,
        io: &mut IO,
        max: usize,
        cx: &mut std::task::Context,
    ) -> Poll<io::Result<Chunk>>
    where
        IO: AsyncRead + Unpin + ?Sized,
    {
        let max = max.min(MAX_READ_SIZE);
        let len = self.buf.len();
        self.buf.resize(len + max, 0);

        let mut read_buf = ReadBuf::new(&mut self.buf[len..]);
        let result = Pin::new(io).poll_read(cx, &mut read_buf);
        let read = read_buf.filled().len();

        self.buf.truncate(len + read);

        ready!(result)?;

        match read {
            0 if max != 0 => Poll::Ready(Ok(Chunk::eof())),
            read => Poll::Ready(Ok(Chunk::data(read))),
        }
    }
}

impl Default for ReadBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReadBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ReadBuffer")
            .field("len", &self.buf.len())
            .field("scanned", &self.scanned)
            .finish()
    }
}
