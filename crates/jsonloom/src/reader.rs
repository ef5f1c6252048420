//! The symbol-level JSON tokenizer.
//!
//! [`JsonReader`] holds an immutable view of input symbols and a cursor that
//! only ever advances. Formatters drive it through the structural operations
//! (`read_begin_array`, the combined end-or-separator poll) and the scalar
//! operations (literals, numbers, strings). The engine only runs over fully
//! available views; chunked input is assembled by the session façade before
//! a reader ever sees it.
//!
//! Structural depth is bounded so hostile input such as `[[[[…` fails with
//! [`ErrorKind::NestingExceeded`] instead of exhausting the stack.

use crate::error::{ErrorKind, JsonError};
use crate::text::TextUnit;

/// Read cursor over a contiguous symbol view.
#[derive(Debug)]
pub struct JsonReader<'a, S: TextUnit> {
    input: &'a [S],
    pos: usize,
    depth: u32,
    max_depth: u32,
}

/// Default structural-depth bound for readers constructed with
/// [`JsonReader::new`].
pub const DEFAULT_MAX_DEPTH: u32 = 1024;

impl<'a, S: TextUnit> JsonReader<'a, S> {
    #[must_use]
    pub fn new(input: &'a [S]) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    #[must_use]
    pub fn with_max_depth(input: &'a [S], max_depth: u32) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Current cursor position, in symbols consumed.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    fn peek(&self) -> Option<S> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn peek_ascii(&self) -> Option<u8> {
        self.peek().and_then(TextUnit::as_ascii)
    }

    #[inline]
    fn eat_ascii(&mut self, byte: u8) -> bool {
        if self.peek_ascii() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek_ascii(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn end_err(&self) -> JsonError {
        JsonError::new(ErrorKind::UnexpectedEnd, self.input.len())
    }

    fn token_err(&self, ch: char) -> JsonError {
        JsonError::new(ErrorKind::UnexpectedToken(ch), self.pos)
    }

    fn expect_token(&mut self, byte: u8) -> Result<(), JsonError> {
        match self.peek() {
            None => Err(self.end_err()),
            Some(u) if u.as_ascii() == Some(byte) => {
                self.pos += 1;
                Ok(())
            }
            Some(u) => Err(self.token_err(u.display_char())),
        }
    }

    fn descend(&mut self) -> Result<(), JsonError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(JsonError::new(
                ErrorKind::NestingExceeded(self.max_depth),
                self.pos,
            ));
        }
        Ok(())
    }

    // ---- structural tokens -----------------------------------------------

    pub fn read_begin_array(&mut self) -> Result<(), JsonError> {
        self.skip_ws();
        self.expect_token(b'[')?;
        self.descend()
    }

    pub fn read_begin_object(&mut self) -> Result<(), JsonError> {
        self.skip_ws();
        self.expect_token(b'{')?;
        self.descend()
    }

    /// Combined "closing token or value separator" poll.
    ///
    /// `count` is pre-incremented: on a `true` return it reflects the number
    /// of elements already consumed *plus the one about to be read*. The
    /// first call (count 0) expects a value with no leading separator and
    /// does not consume anything; later calls consume either the separator
    /// (continue) or the closing token (stop).
    pub fn read_end_array_or_value_separator(
        &mut self,
        count: &mut usize,
    ) -> Result<bool, JsonError> {
        self.end_or_separator(b']', count)
    }

    pub fn read_end_object_or_value_separator(
        &mut self,
        count: &mut usize,
    ) -> Result<bool, JsonError> {
        self.end_or_separator(b'}', count)
    }

    fn end_or_separator(&mut self, close: u8, count: &mut usize) -> Result<bool, JsonError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.end_err()),
            Some(u) => match u.as_ascii() {
                Some(b) if b == close => {
                    self.pos += 1;
                    self.depth = self.depth.saturating_sub(1);
                    Ok(false)
                }
                Some(b',') if *count > 0 => {
                    self.pos += 1;
                    *count += 1;
                    Ok(true)
                }
                // First poll: a value (or a misplaced separator, which the
                // value parse will reject at its own offset) comes next.
                _ if *count == 0 => {
                    *count = 1;
                    Ok(true)
                }
                _ => Err(self.token_err(u.display_char())),
            },
        }
    }

    /// Read a member name and its `:` separator.
    pub fn read_property_name(&mut self) -> Result<String, JsonError> {
        let name = self.read_string()?;
        self.skip_ws();
        self.expect_token(b':')?;
        Ok(name)
    }

    // ---- literals --------------------------------------------------------

    /// Peek for the `null` literal; consume it when present.
    pub fn read_is_null(&mut self) -> Result<bool, JsonError> {
        self.skip_ws();
        if self.peek_ascii() == Some(b'n') {
            self.expect_literal("null")?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, JsonError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.end_err()),
            Some(u) => match u.as_ascii() {
                Some(b't') => {
                    self.expect_literal("true")?;
                    Ok(true)
                }
                Some(b'f') => {
                    self.expect_literal("false")?;
                    Ok(false)
                }
                _ => Err(self.token_err(u.display_char())),
            },
        }
    }

    fn expect_literal(&mut self, literal: &'static str) -> Result<(), JsonError> {
        for expected in literal.bytes() {
            match self.peek() {
                None => return Err(self.end_err()),
                Some(u) if u.as_ascii() == Some(expected) => self.pos += 1,
                Some(_) => {
                    return Err(JsonError::new(ErrorKind::InvalidLiteral, self.pos));
                }
            }
        }
        Ok(())
    }

    // ---- strings ---------------------------------------------------------

    pub fn read_string(&mut self) -> Result<String, JsonError> {
        self.skip_ws();
        self.expect_token(b'"')?;
        let mut out = String::new();
        loop {
            let run_start = self.pos;
            let mut stop: Option<u8> = None;
            while self.pos < self.input.len() {
                match self.input[self.pos].as_ascii() {
                    Some(b @ (b'"' | b'\\')) => {
                        stop = Some(b);
                        break;
                    }
                    Some(b) if b < 0x20 => {
                        stop = Some(b);
                        break;
                    }
                    _ => self.pos += 1,
                }
            }
            if self.pos > run_start
                && !S::append_run(&mut out, &self.input[run_start..self.pos])
            {
                return Err(JsonError::new(ErrorKind::InvalidText, run_start));
            }
            match stop {
                None => return Err(self.end_err()),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.read_escape(&mut out)?;
                }
                Some(control) => return Err(self.token_err(control as char)),
            }
        }
    }

    fn read_escape(&mut self, out: &mut String) -> Result<(), JsonError> {
        let escape_at = self.pos - 1;
        let Some(u) = self.peek() else {
            return Err(self.end_err());
        };
        self.pos += 1;
        match u.as_ascii() {
            Some(b'"') => out.push('"'),
            Some(b'\\') => out.push('\\'),
            Some(b'/') => out.push('/'),
            Some(b'b') => out.push('\u{8}'),
            Some(b'f') => out.push('\u{c}'),
            Some(b'n') => out.push('\n'),
            Some(b'r') => out.push('\r'),
            Some(b't') => out.push('\t'),
            Some(b'u') => {
                let hi = self.read_hex4()?;
                let code = if (0xD800..=0xDBFF).contains(&hi) {
                    // High half of a surrogate pair: the low half must
                    // follow as another `\u` escape.
                    if !(self.eat_ascii(b'\\') && self.eat_ascii(b'u')) {
                        return Err(JsonError::new(ErrorKind::InvalidEscape, escape_at));
                    }
                    let lo = self.read_hex4()?;
                    if !(0xDC00..=0xDFFF).contains(&lo) {
                        return Err(JsonError::new(ErrorKind::InvalidEscape, escape_at));
                    }
                    0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
                } else {
                    hi
                };
                match char::from_u32(code) {
                    Some(ch) => out.push(ch),
                    None => {
                        return Err(JsonError::new(ErrorKind::InvalidEscape, escape_at));
                    }
                }
            }
            _ => return Err(JsonError::new(ErrorKind::InvalidEscape, escape_at)),
        }
        Ok(())
    }

    /// Accumulate exactly four hex digits into a code point value.
    fn read_hex4(&mut self) -> Result<u32, JsonError> {
        let mut acc = 0u32;
        for _ in 0..4 {
            let Some(u) = self.peek() else {
                return Err(self.end_err());
            };
            let digit = match u.as_ascii() {
                Some(b @ b'0'..=b'9') => u32::from(b - b'0'),
                Some(b @ b'a'..=b'f') => u32::from(b - b'a') + 10,
                Some(b @ b'A'..=b'F') => u32::from(b - b'A') + 10,
                _ => return Err(JsonError::new(ErrorKind::InvalidEscape, self.pos)),
            };
            self.pos += 1;
            acc = (acc << 4) | digit;
        }
        Ok(acc)
    }

    // ---- numbers ---------------------------------------------------------

    #[inline]
    fn peek_digit(&self) -> Option<u8> {
        match self.peek_ascii() {
            Some(b @ b'0'..=b'9') => Some(b),
            _ => None,
        }
    }

    fn expect_digit(&mut self) -> Result<u8, JsonError> {
        match self.peek() {
            None => Err(self.end_err()),
            Some(u) => match u.as_ascii() {
                Some(b @ b'0'..=b'9') => {
                    self.pos += 1;
                    Ok(b)
                }
                _ => Err(self.token_err(u.display_char())),
            },
        }
    }

    /// Sign and decimal magnitude of an integer token. Rejects leading
    /// zeros per RFC 8259.
    fn read_int_parts(&mut self, ty: &'static str) -> Result<(bool, u64), JsonError> {
        self.skip_ws();
        let negative = self.eat_ascii(b'-');
        let start = self.pos;
        let first = self.expect_digit()?;
        let mut magnitude = u64::from(first - b'0');
        if first == b'0' {
            if let Some(d) = self.peek_digit() {
                return Err(self.token_err(d as char));
            }
        } else {
            while let Some(d) = self.peek_digit() {
                self.pos += 1;
                magnitude = magnitude
                    .checked_mul(10)
                    .and_then(|m| m.checked_add(u64::from(d - b'0')))
                    .ok_or(JsonError::new(ErrorKind::OutOfRange(ty), start))?;
            }
        }
        Ok((negative, magnitude))
    }

    fn read_signed(&mut self, ty: &'static str, max: i64) -> Result<i64, JsonError> {
        let (negative, magnitude) = self.read_int_parts(ty)?;
        let limit = if negative { max as u64 + 1 } else { max as u64 };
        if magnitude > limit {
            return Err(JsonError::new(ErrorKind::OutOfRange(ty), self.pos));
        }
        let value = magnitude as i64;
        Ok(if negative { value.wrapping_neg() } else { value })
    }

    fn read_unsigned(&mut self, ty: &'static str, max: u64) -> Result<u64, JsonError> {
        let (negative, magnitude) = self.read_int_parts(ty)?;
        if negative || magnitude > max {
            return Err(JsonError::new(ErrorKind::OutOfRange(ty), self.pos));
        }
        Ok(magnitude)
    }

    pub fn read_i8(&mut self) -> Result<i8, JsonError> {
        self.read_signed("i8", i64::from(i8::MAX)).map(|v| v as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, JsonError> {
        self.read_signed("i16", i64::from(i16::MAX)).map(|v| v as i16)
    }

    pub fn read_i32(&mut self) -> Result<i32, JsonError> {
        self.read_signed("i32", i64::from(i32::MAX)).map(|v| v as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64, JsonError> {
        self.read_signed("i64", i64::MAX)
    }

    pub fn read_u8(&mut self) -> Result<u8, JsonError> {
        self.read_unsigned("u8", u64::from(u8::MAX)).map(|v| v as u8)
    }

    pub fn read_u16(&mut self) -> Result<u16, JsonError> {
        self.read_unsigned("u16", u64::from(u16::MAX)).map(|v| v as u16)
    }

    pub fn read_u32(&mut self) -> Result<u32, JsonError> {
        self.read_unsigned("u32", u64::from(u32::MAX)).map(|v| v as u32)
    }

    pub fn read_u64(&mut self) -> Result<u64, JsonError> {
        self.read_unsigned("u64", u64::MAX)
    }

    /// Lex one number token per the RFC 8259 grammar into an owned ASCII
    /// buffer, to be parsed by the caller.
    fn number_lexeme(&mut self) -> Result<String, JsonError> {
        self.skip_ws();
        let mut lex = String::with_capacity(16);
        if self.eat_ascii(b'-') {
            lex.push('-');
        }
        let first = self.expect_digit()?;
        lex.push(first as char);
        if first == b'0' {
            if let Some(d) = self.peek_digit() {
                return Err(self.token_err(d as char));
            }
        } else {
            while let Some(d) = self.peek_digit() {
                self.pos += 1;
                lex.push(d as char);
            }
        }
        if self.eat_ascii(b'.') {
            lex.push('.');
            lex.push(self.expect_digit()? as char);
            while let Some(d) = self.peek_digit() {
                self.pos += 1;
                lex.push(d as char);
            }
        }
        if matches!(self.peek_ascii(), Some(b'e' | b'E')) {
            self.pos += 1;
            lex.push('e');
            if !self.eat_ascii(b'+') && self.eat_ascii(b'-') {
                lex.push('-');
            }
            lex.push(self.expect_digit()? as char);
            while let Some(d) = self.peek_digit() {
                self.pos += 1;
                lex.push(d as char);
            }
        }
        Ok(lex)
    }

    pub fn read_f64(&mut self) -> Result<f64, JsonError> {
        self.skip_ws();
        if self.peek_ascii() == Some(b'"') {
            return self.read_non_finite();
        }
        let start = self.pos;
        let lexeme = self.number_lexeme()?;
        lexeme
            .parse::<f64>()
            .map_err(|_| JsonError::new(ErrorKind::InvalidLiteral, start))
    }

    pub fn read_f32(&mut self) -> Result<f32, JsonError> {
        self.skip_ws();
        if self.peek_ascii() == Some(b'"') {
            return self.read_non_finite().map(|v| v as f32);
        }
        let start = self.pos;
        let lexeme = self.number_lexeme()?;
        lexeme
            .parse::<f32>()
            .map_err(|_| JsonError::new(ErrorKind::InvalidLiteral, start))
    }

    /// The quoted spellings of the float values JSON itself cannot express.
    fn read_non_finite(&mut self) -> Result<f64, JsonError> {
        let start = self.pos;
        match self.read_string()?.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            _ => Err(JsonError::new(ErrorKind::InvalidLiteral, start)),
        }
    }

    // ---- generic skipping ------------------------------------------------

    /// Consume one complete JSON value of any shape without materializing
    /// it. Used for unknown aggregate members.
    pub fn skip_value(&mut self) -> Result<(), JsonError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.end_err()),
            Some(u) => match u.as_ascii() {
                Some(b'"') => self.read_string().map(drop),
                Some(b'[') => {
                    self.read_begin_array()?;
                    let mut members = 0usize;
                    while self.read_end_array_or_value_separator(&mut members)? {
                        self.skip_value()?;
                    }
                    Ok(())
                }
                Some(b'{') => {
                    self.read_begin_object()?;
                    let mut members = 0usize;
                    while self.read_end_object_or_value_separator(&mut members)? {
                        self.read_property_name()?;
                        self.skip_value()?;
                    }
                    Ok(())
                }
                Some(b't' | b'f') => self.read_bool().map(drop),
                Some(b'n') => self.read_is_null().map(drop),
                Some(b'-' | b'0'..=b'9') => self.number_lexeme().map(drop),
                _ => Err(self.token_err(u.display_char())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonReader;
    use crate::error::ErrorKind;

    fn reader(s: &str) -> JsonReader<'_, u8> {
        JsonReader::new(s.as_bytes())
    }

    #[test]
    fn end_or_separator_contract() {
        let mut r = reader("[1,2]");
        r.read_begin_array().unwrap();
        let mut count = 0;
        assert!(r.read_end_array_or_value_separator(&mut count).unwrap());
        assert_eq!(count, 1);
        assert_eq!(r.read_i64().unwrap(), 1);
        assert!(r.read_end_array_or_value_separator(&mut count).unwrap());
        assert_eq!(count, 2);
        assert_eq!(r.read_i64().unwrap(), 2);
        assert!(!r.read_end_array_or_value_separator(&mut count).unwrap());
        assert_eq!(count, 2);
    }

    #[test]
    fn string_with_surrogate_pair_escape() {
        let mut r = reader("\"\\ud83d\\ude00\"");
        assert_eq!(r.read_string().unwrap(), "😀");
        let mut r = reader(r#""😀""#);
        assert_eq!(r.read_string().unwrap(), "😀");
    }

    #[test]
    fn lone_surrogate_escape_is_rejected() {
        let mut r = reader(r#""\ud83d""#);
        assert_eq!(r.read_string().unwrap_err().kind, ErrorKind::InvalidEscape);
    }

    #[test]
    fn leading_zero_is_rejected() {
        let mut r = reader("01");
        assert!(matches!(
            r.read_i64().unwrap_err().kind,
            ErrorKind::UnexpectedToken('1')
        ));
    }

    #[test]
    fn integer_overflow_reports_the_type() {
        let mut r = reader("128");
        assert_eq!(r.read_i8().unwrap_err().kind, ErrorKind::OutOfRange("i8"));
        let mut r = reader("-9223372036854775808");
        assert_eq!(r.read_i64().unwrap(), i64::MIN);
    }

    #[test]
    fn utf16_view_reads_like_utf8() {
        let units: Vec<u16> = "[true, false]".encode_utf16().collect();
        let mut r = JsonReader::new(&units[..]);
        r.read_begin_array().unwrap();
        let mut count = 0;
        assert!(r.read_end_array_or_value_separator(&mut count).unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.read_end_array_or_value_separator(&mut count).unwrap());
        assert!(!r.read_bool().unwrap());
        assert!(!r.read_end_array_or_value_separator(&mut count).unwrap());
    }

    #[test]
    fn depth_guard_trips_before_the_stack_does() {
        let bomb = "[".repeat(100_000);
        let mut r = reader(&bomb);
        let err = r.skip_value().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NestingExceeded(_)));
    }
}
