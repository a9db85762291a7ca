//! Parser configuration.

/// Default number of bytes requested from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 8;

/// Request parser configuration.
///
/// ```
/// let config = reqline::Config::new()
///     .chunk_size(1024)
///     .max_line_len(8 * 1024);
///
/// assert_eq!(config.get_chunk_size(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    chunk_size: usize,
    max_line_len: Option<usize>,
}

impl Config {
    /// Create default [`Config`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_line_len: None,
        }
    }

    /// Set the maximum number of bytes requested from the source per read.
    ///
    /// The chunk size does not change the parse result, only how many reads it takes. Zero is
    /// treated as one, and a single read never reserves more than 8KiB.
    #[inline]
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = if chunk_size == 0 { 1 } else { chunk_size };
        self
    }

    /// Set the maximum number of bytes buffered while waiting for the request line terminator.
    #[inline]
    pub const fn max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = Some(max_line_len);
        self
    }

    /// Returns the chunk size.
    #[inline]
    pub const fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the request line length limit, `None` is unbounded.
    #[inline]
    pub const fn get_max_line_len(&self) -> Option<usize> {
        self.max_line_len
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
