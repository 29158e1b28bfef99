//! Incremental UTF-8 decoding for byte fragments.
//!
//! Transport reads split the body at arbitrary byte offsets, so a multi-byte
//! code point can straddle two fragments. The accumulator holds back the
//! incomplete tail until the next fragment completes it.

/// Longest possible UTF-8 encoded code point.
const MAX_UTF8_LEN: usize = 4;

#[derive(Debug, Default)]
pub(crate) struct Utf8Accumulator {
    /// Bytes of an incomplete trailing sequence from the previous fragment
    tail: Vec<u8>,
}

impl Utf8Accumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` into `out`, keeping any incomplete trailing sequence.
    ///
    /// Invalid sequences (not merely truncated ones) are replaced with
    /// U+FFFD so one bad byte cannot stall the stream.
    pub(crate) fn decode_into(&mut self, bytes: &[u8], out: &mut String) {
        let owned;
        let mut input: &[u8] = if self.tail.is_empty() {
            bytes
        } else {
            let mut joined = std::mem::take(&mut self.tail);
            joined.extend_from_slice(bytes);
            owned = joined;
            &owned
        };

        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    // `valid_up_to` guarantees this prefix decodes
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());

                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[bad..];
                        }
                        None => {
                            debug_assert!(rest.len() < MAX_UTF8_LEN);
                            self.tail.extend_from_slice(rest);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Flush a held-back tail at end of stream, lossily.
    pub(crate) fn flush_into(&mut self, out: &mut String) {
        if !self.tail.is_empty() {
            out.push_str(&String::from_utf8_lossy(&self.tail));
            self.tail.clear();
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.tail.len()
    }

    pub(crate) fn clear(&mut self) {
        self.tail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let mut acc = Utf8Accumulator::new();
        let mut out = String::new();
        acc.decode_into(b"data: hi\n", &mut out);
        assert_eq!(out, "data: hi\n");
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_split_code_point_is_reassembled() {
        // "ॐ" is three bytes: E0 A5 90
        let bytes = "ॐ".as_bytes();
        let mut acc = Utf8Accumulator::new();
        let mut out = String::new();

        acc.decode_into(&bytes[..1], &mut out);
        assert_eq!(out, "");
        assert_eq!(acc.pending(), 1);

        acc.decode_into(&bytes[1..2], &mut out);
        assert_eq!(out, "");
        assert_eq!(acc.pending(), 2);

        acc.decode_into(&bytes[2..], &mut out);
        assert_eq!(out, "ॐ");
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_invalid_byte_is_replaced() {
        let mut acc = Utf8Accumulator::new();
        let mut out = String::new();
        acc.decode_into(b"a\xFFb", &mut out);
        assert_eq!(out, "a\u{FFFD}b");
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_flush_truncated_tail() {
        let mut acc = Utf8Accumulator::new();
        let mut out = String::new();
        acc.decode_into(&"é".as_bytes()[..1], &mut out);
        acc.flush_into(&mut out);
        assert_eq!(out, "\u{FFFD}");
        assert_eq!(acc.pending(), 0);
    }
}
