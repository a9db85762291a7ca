//! Common types shared by parsers.

/// Result of a chunked parse.
#[derive(Debug)]
pub enum ParseResult<T, E> {
    /// Bytes is not sufficient for parsing, more read is required.
    Pending,
    /// Parse success.
    Ok(T),
    /// Parse failed.
    Err(E),
}

impl<T, E> ParseResult<T, E> {
    /// Returns `true` if the parse result is [`Pending`].
    ///
    /// [`Pending`]: ParseResult::Pending
    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if the parse result is [`Err`].
    ///
    /// [`Err`]: ParseResult::Err
    #[inline]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(..))
    }

    /// Convert to `Result<Option<T>, E>`, where `None` means more bytes is required.
    #[inline]
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            ParseResult::Pending => Ok(None),
            ParseResult::Ok(ok) => Ok(Some(ok)),
            ParseResult::Err(err) => Err(err),
        }
    }
}
