//! Byte source and read buffering.
mod buffer;

pub use buffer::ReadBuffer;

use std::io;

/// Result of a single [`ByteSource::read_chunk`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chunk {
    /// Number of bytes written to the buffer.
    pub len: usize,
    /// Source signals end-of-input, no more bytes will be produced.
    ///
    /// Can be set together with a non-zero `len` for the final chunk.
    pub eof: bool,
}

impl Chunk {
    /// Chunk of `len` bytes, more may follow.
    #[inline]
    pub const fn data(len: usize) -> Self {
        Self { len, eof: false }
    }

    /// Final chunk of `len` bytes.
    #[inline]
    pub const fn last(len: usize) -> Self {
        Self { len, eof: true }
    }

    /// Empty chunk signaling end-of-input.
    #[inline]
    pub const fn eof() -> Self {
        Self { len: 0, eof: true }
    }
}

/// Blocking source of bytes, delivered in arbitrary chunks.
///
/// Any [`io::Read`] is a byte source, where a read of zero bytes into a non-empty buffer is
/// end-of-input.
pub trait ByteSource {
    /// Read the next chunk into `buf`.
    ///
    /// Returning a chunk with zero length and without `eof` is allowed, the caller will read
    /// again.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk>;
}

impl<R: io::Read> ByteSource for R {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        match self.read(buf)? {
            0 if !buf.is_empty() => Ok(Chunk::eof()),
            read => Ok(Chunk::data(read)),
        }
    }
}
