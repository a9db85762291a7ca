/// Find the offset of the first crlf (`\r\n`) in `bytes`, starting the search at `from`.
///
/// A `\r` that is the last byte of `bytes` is not a match, more bytes is required to decide.
pub(crate) fn find_crlf(bytes: &[u8], from: usize) -> Option<usize> {
    let mut offset = from;

    loop {
        let state = bytes.get(offset..)?;
        let cr = offset + position_cr(state)?;

        if let Some(b'\n') = bytes.get(cr + 1) {
            return Some(cr);
        }

        offset = cr + 1;
    }
}

/// Find the first carriage return (`\r`) in `bytes`, a word at a time.
fn position_cr(bytes: &[u8]) -> Option<usize> {
    const BLOCK: usize = size_of::<usize>();
    const MSB: usize = usize::from_ne_bytes([0b1000_0000; BLOCK]);
    const LSB: usize = usize::from_ne_bytes([0b0000_0001; BLOCK]);
    const CR: usize = usize::from_ne_bytes([b'\r'; BLOCK]);

    let mut state = bytes;
    let mut offset = 0;

    while let Some((chunk, rest)) = state.split_first_chunk::<BLOCK>() {
        // little endian so that the first byte is the least significant
        let block = usize::from_le_bytes(*chunk) ^ CR;

        // '\r' became zero byte, a borrow can only mark bytes after a real match
        let result = block.wrapping_sub(LSB) & !block & MSB;
        if result != 0 {
            return Some(offset + (result.trailing_zeros() / 8) as usize);
        }

        state = rest;
        offset += BLOCK;
    }

    state
        .iter()
        .position(|&b| b == b'\r')
        .map(|nth| offset + nth)
}
