//! The symbol abstraction shared by every buffer, reader and writer.
//!
//! A *symbol* is one unit of the wire encoding: a byte for UTF-8, a code
//! unit for UTF-16. [`TextUnit`] is sealed and implemented exactly for `u8`
//! and `u16`; the rest of the crate is generic over it, so one engine serves
//! both encodings without per-call dispatch.

use core::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// One unit of the wire encoding.
///
/// All structural JSON tokens are ASCII, so the codec mostly moves between
/// units and the ASCII range; non-ASCII content only appears inside string
/// payloads, where it is validated as a run.
pub trait TextUnit:
    sealed::Sealed + Copy + Eq + fmt::Debug + Send + Sync + 'static
{
    /// Lift an ASCII byte (`< 0x80`) into a unit.
    fn of_ascii(byte: u8) -> Self;

    /// The unit as an ASCII byte, if it is in the ASCII range.
    fn as_ascii(self) -> Option<u8>;

    /// Best-effort `char` for diagnostics; never fails.
    fn display_char(self) -> char;

    /// Append one scalar value in this encoding.
    fn extend_char(buf: &mut Vec<Self>, ch: char);

    /// Append a string in this encoding.
    fn extend_str(buf: &mut Vec<Self>, s: &str);

    /// Decode a run of units (no escapes, already scanned to exclude the
    /// string delimiters) into `out`. Returns `false` when the run is not
    /// well-formed in this encoding.
    fn append_run(out: &mut String, run: &[Self]) -> bool;
}

impl TextUnit for u8 {
    #[inline(always)]
    fn of_ascii(byte: u8) -> Self {
        byte
    }

    #[inline(always)]
    fn as_ascii(self) -> Option<u8> {
        (self < 0x80).then_some(self)
    }

    #[inline]
    fn display_char(self) -> char {
        if self < 0x80 {
            self as char
        } else {
            char::REPLACEMENT_CHARACTER
        }
    }

    #[inline]
    fn extend_char(buf: &mut Vec<Self>, ch: char) {
        let mut tmp = [0u8; 4];
        buf.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
    }

    #[inline]
    fn extend_str(buf: &mut Vec<Self>, s: &str) {
        buf.extend_from_slice(s.as_bytes());
    }

    fn append_run(out: &mut String, run: &[Self]) -> bool {
        match core::str::from_utf8(run) {
            Ok(s) => {
                out.push_str(s);
                true
            }
            Err(_) => false,
        }
    }
}

impl TextUnit for u16 {
    #[inline(always)]
    fn of_ascii(byte: u8) -> Self {
        u16::from(byte)
    }

    #[inline(always)]
    fn as_ascii(self) -> Option<u8> {
        (self < 0x80).then(|| self as u8)
    }

    #[inline]
    fn display_char(self) -> char {
        char::from_u32(u32::from(self)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    #[inline]
    fn extend_char(buf: &mut Vec<Self>, ch: char) {
        let mut tmp = [0u16; 2];
        buf.extend_from_slice(ch.encode_utf16(&mut tmp));
    }

    #[inline]
    fn extend_str(buf: &mut Vec<Self>, s: &str) {
        buf.extend(s.encode_utf16());
    }

    fn append_run(out: &mut String, run: &[Self]) -> bool {
        for decoded in char::decode_utf16(run.iter().copied()) {
            match decoded {
                Ok(ch) => out.push(ch),
                Err(_) => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::TextUnit;

    #[test]
    fn ascii_bridging() {
        assert_eq!(<u8 as TextUnit>::of_ascii(b'['), b'[');
        assert_eq!(<u16 as TextUnit>::of_ascii(b'['), u16::from(b'['));
        assert_eq!(0x5Bu8.as_ascii(), Some(b'['));
        assert_eq!(0x5Bu16.as_ascii(), Some(b'['));
        assert_eq!(0x80u8.as_ascii(), None);
        assert_eq!(0x2603u16.as_ascii(), None);
    }

    #[test]
    fn char_extension_roundtrips() {
        let mut bytes = Vec::new();
        u8::extend_char(&mut bytes, '😀');
        assert_eq!(bytes, "😀".as_bytes());

        let mut units = Vec::new();
        u16::extend_char(&mut units, '😀');
        assert_eq!(units, "😀".encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn run_decoding_rejects_ill_formed_input() {
        let mut out = String::new();
        assert!(!u8::append_run(&mut out, &[0xFF, 0xFE]));
        // Lone high surrogate.
        assert!(!u16::append_run(&mut out, &[0xD83D]));
    }
}
