//! Text encodings: compact multi-byte, Latin-1/ASCII, and UTF-16.
//!
//! The compact multi-byte form ("compact" below) spends one byte on code
//! points U+0001–U+007F, two bytes (`110xxxxx 10xxxxxx`) on U+0000 and
//! U+0080–U+07FF, and three bytes (`1110xxxx 10xxxxxx 10xxxxxx`) on
//! U+0800–U+FFFF. Text is processed per UTF-16 code unit, so characters
//! above U+FFFF become two 3-byte surrogate sequences. The framed form
//! carries a 2-byte big-endian prefix holding the encoded byte length, not
//! the character count.

use thiserror::Error;

use crate::byteorder::{decode_u16_be, encode_u16_be, encode_u16_le};

/// Error type for text encoding/decoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("malformed byte sequence")]
    Malformed,
    #[error("input ends inside a multi-byte sequence")]
    Truncated,
    #[error("encoded body exceeds the 16-bit length prefix")]
    TooLong,
    #[error("unpaired surrogate code unit")]
    UnpairedSurrogate,
    #[error("character not representable in the target encoding")]
    Unencodable,
}

/// The closed set of supported character encodings.
///
/// Anything outside this set is rejected at the API boundary; there is no
/// name-string dispatch at encode/decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Strict 7-bit ASCII.
    Ascii,
    /// ISO-8859-1; code points above U+00FF encode as `?`.
    Latin1,
    /// UTF-16, big-endian code units.
    Utf16Be,
    /// UTF-16, little-endian code units.
    Utf16Le,
    /// The length-prefixed compact multi-byte encoding.
    Compact,
}

impl Encoding {
    /// Maps a charset name to an encoding, accepting the common aliases.
    ///
    /// Returns `None` for unknown names; callers surface that as an
    /// unsupported-encoding condition.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf_codec::Encoding;
    ///
    /// assert_eq!(Encoding::from_name("ISO-8859-1"), Some(Encoding::Latin1));
    /// assert_eq!(Encoding::from_name("UTF-16"), Some(Encoding::Utf16Be));
    /// assert_eq!(Encoding::from_name("KOI8-R"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Encoding> {
        match name.to_ascii_lowercase().as_str() {
            "us-ascii" | "ascii" => Some(Encoding::Ascii),
            "iso-8859-1" | "latin-1" | "latin1" => Some(Encoding::Latin1),
            "utf-16" | "utf-16be" | "utf16be" => Some(Encoding::Utf16Be),
            "utf-16le" | "utf16le" => Some(Encoding::Utf16Le),
            "compact" | "cmb" => Some(Encoding::Compact),
            _ => None,
        }
    }

    /// Width in bytes of the zero terminator for terminated fields.
    pub fn terminator_len(self) -> usize {
        match self {
            Encoding::Utf16Be | Encoding::Utf16Le => 2,
            _ => 1,
        }
    }
}

/// Encodes `text` in the given encoding, without framing or terminator.
pub fn encode(text: &str, encoding: Encoding) -> Result<Vec<u8>, TextError> {
    match encoding {
        Encoding::Ascii => encode_ascii(text),
        Encoding::Latin1 => Ok(encode_latin1(text)),
        Encoding::Utf16Be => Ok(encode_utf16be(text)),
        Encoding::Utf16Le => Ok(encode_utf16le(text)),
        Encoding::Compact => Ok(encode_compact_body(text)),
    }
}

/// Encodes `text` in the compact multi-byte form, without the length prefix.
pub fn encode_compact_body(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007f => out.push(unit as u8),
            0x0000 | 0x0080..=0x07ff => {
                out.push(0xc0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
            _ => {
                out.push(0xe0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
        }
    }
    out
}

/// Encodes `text` as `[u16 big-endian byte length][compact body]`.
///
/// Fails with [`TextError::TooLong`] when the body does not fit the 16-bit
/// prefix.
pub fn encode_compact(text: &str) -> Result<Vec<u8>, TextError> {
    let body = encode_compact_body(text);
    if body.len() > u16::MAX as usize {
        return Err(TextError::TooLong);
    }
    let mut out = Vec::with_capacity(2 + body.len());
    out.extend_from_slice(&encode_u16_be(body.len() as u16));
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decodes a compact multi-byte body covering the whole of `bytes`.
pub fn decode_compact_body(bytes: &[u8]) -> Result<String, TextError> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b & 0x80 == 0 {
            units.push(b as u16);
            i += 1;
        } else if b & 0xe0 == 0xc0 {
            if i + 2 > bytes.len() {
                return Err(TextError::Truncated);
            }
            let b2 = bytes[i + 1];
            if b2 & 0xc0 != 0x80 {
                return Err(TextError::Malformed);
            }
            units.push(((b as u16 & 0x1f) << 6) | (b2 as u16 & 0x3f));
            i += 2;
        } else if b & 0xf0 == 0xe0 {
            if i + 3 > bytes.len() {
                return Err(TextError::Truncated);
            }
            let b2 = bytes[i + 1];
            let b3 = bytes[i + 2];
            if b2 & 0xc0 != 0x80 || b3 & 0xc0 != 0x80 {
                return Err(TextError::Malformed);
            }
            units.push(((b as u16 & 0x0f) << 12) | ((b2 as u16 & 0x3f) << 6) | (b3 as u16 & 0x3f));
            i += 3;
        } else {
            return Err(TextError::Malformed);
        }
    }
    String::from_utf16(&units).map_err(|_| TextError::UnpairedSurrogate)
}

/// Decodes a length-prefixed compact string starting at the front of `buf`.
///
/// Returns the text and the total number of bytes consumed (prefix
/// included). The prefix counts encoded bytes; exactly that many are
/// decoded.
pub fn decode_compact(buf: &[u8]) -> Result<(String, usize), TextError> {
    if buf.len() < 2 {
        return Err(TextError::Truncated);
    }
    let len = decode_u16_be(buf, 0) as usize;
    if buf.len() < 2 + len {
        return Err(TextError::Truncated);
    }
    let text = decode_compact_body(&buf[2..2 + len])?;
    Ok((text, 2 + len))
}

/// Encodes `text` as Latin-1, one byte per character.
///
/// Code points above U+00FF are replaced with `?`.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 0xff { c as u32 as u8 } else { b'?' })
        .collect()
}

/// Decodes Latin-1 bytes; every byte value maps to a character.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encodes `text` as strict 7-bit ASCII.
pub fn encode_ascii(text: &str) -> Result<Vec<u8>, TextError> {
    if !text.is_ascii() {
        return Err(TextError::Unencodable);
    }
    Ok(text.as_bytes().to_vec())
}

/// Decodes strict 7-bit ASCII bytes.
pub fn decode_ascii(bytes: &[u8]) -> Result<String, TextError> {
    if !bytes.is_ascii() {
        return Err(TextError::Malformed);
    }
    Ok(decode_latin1(bytes))
}

/// Encodes `text` as big-endian UTF-16 code units.
pub fn encode_utf16be(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&encode_u16_be(unit));
    }
    out
}

/// Encodes `text` as little-endian UTF-16 code units.
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&encode_u16_le(unit));
    }
    out
}

/// Decodes big-endian UTF-16 bytes.
pub fn decode_utf16be(bytes: &[u8]) -> Result<String, TextError> {
    decode_utf16_units(bytes, u16::from_be_bytes)
}

/// Decodes little-endian UTF-16 bytes.
pub fn decode_utf16le(bytes: &[u8]) -> Result<String, TextError> {
    decode_utf16_units(bytes, u16::from_le_bytes)
}

fn decode_utf16_units(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, TextError> {
    if bytes.len() % 2 != 0 {
        return Err(TextError::Truncated);
    }
    let units: Vec<u16> = bytes.chunks_exact(2).map(|c| unit([c[0], c[1]])).collect();
    String::from_utf16(&units).map_err(|_| TextError::UnpairedSurrogate)
}

/// Encodes `text` into a fixed-width field of exactly `field_len` bytes.
///
/// Output shorter than the field is padded with zero bytes; longer output
/// is truncated (UTF-16 truncation never splits a code unit). The
/// length-prefixed compact encoding has no fixed-field form.
pub fn encode_fixed(text: &str, field_len: usize, encoding: Encoding) -> Result<Vec<u8>, TextError> {
    let mut body = match encoding {
        Encoding::Compact => return Err(TextError::Unencodable),
        other => encode(text, other)?,
    };
    if body.len() > field_len {
        let mut cut = field_len;
        if encoding.terminator_len() == 2 {
            cut &= !1;
        }
        body.truncate(cut);
    }
    body.resize(field_len, 0);
    Ok(body)
}

/// Decodes a fixed-width field, stopping at the zero terminator or at the
/// end of `field`, whichever comes first.
///
/// Single-byte encodings terminate on one zero byte; UTF-16 terminates on
/// an aligned zero code unit.
pub fn decode_terminated(field: &[u8], encoding: Encoding) -> Result<String, TextError> {
    match encoding {
        Encoding::Ascii => {
            let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
            decode_ascii(&field[..end])
        }
        Encoding::Latin1 => {
            let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
            Ok(decode_latin1(&field[..end]))
        }
        Encoding::Utf16Be | Encoding::Utf16Le => {
            let units = field.len() / 2;
            let mut end = field.len() - field.len() % 2;
            for i in 0..units {
                if field[2 * i] == 0 && field[2 * i + 1] == 0 {
                    end = 2 * i;
                    break;
                }
            }
            if encoding == Encoding::Utf16Be {
                decode_utf16be(&field[..end])
            } else {
                decode_utf16le(&field[..end])
            }
        }
        Encoding::Compact => Err(TextError::Unencodable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_single_byte_range() {
        assert_eq!(encode_compact_body("hello"), b"hello".to_vec());
    }

    #[test]
    fn compact_nul_is_two_bytes() {
        assert_eq!(encode_compact_body("\u{0}"), vec![0xc0, 0x80]);
        assert_eq!(decode_compact_body(&[0xc0, 0x80]).unwrap(), "\u{0}");
    }

    #[test]
    fn compact_two_and_three_byte_ranges() {
        // U+00E9 (é) and U+20AC (€)
        assert_eq!(encode_compact_body("é"), vec![0xc3, 0xa9]);
        assert_eq!(encode_compact_body("€"), vec![0xe2, 0x82, 0xac]);
    }

    #[test]
    fn compact_supplementary_uses_surrogate_sequences() {
        // U+1F600 encodes as the surrogate pair D83D DE00, 3 bytes each.
        let bytes = encode_compact_body("😀");
        assert_eq!(bytes, vec![0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80]);
        assert_eq!(decode_compact_body(&bytes).unwrap(), "😀");
    }

    #[test]
    fn compact_prefix_is_byte_length_not_char_count() {
        let framed = encode_compact("€€").unwrap();
        assert_eq!(&framed[..2], &[0x00, 0x06]);
        assert_eq!(framed.len(), 8);
    }

    #[test]
    fn compact_framed_roundtrip() {
        for text in ["", "hello", "héllo\u{0}wörld", "≈ 3€", "a😀b"] {
            let framed = encode_compact(text).unwrap();
            let (back, consumed) = decode_compact(&framed).unwrap();
            assert_eq!(back, text);
            assert_eq!(consumed, framed.len());
        }
    }

    #[test]
    fn compact_rejects_malformed_and_truncated() {
        // 0xF0 starts a 4-byte UTF-8 sequence, which is not a valid pattern.
        assert_eq!(
            decode_compact_body(&[0xf0, 0x9f, 0x98, 0x80]),
            Err(TextError::Malformed)
        );
        // Continuation byte without a lead byte.
        assert_eq!(decode_compact_body(&[0x80]), Err(TextError::Malformed));
        // Lead byte with the body cut off.
        assert_eq!(decode_compact_body(&[0xe2, 0x82]), Err(TextError::Truncated));
        // Bad continuation inside a 2-byte sequence.
        assert_eq!(decode_compact_body(&[0xc3, 0x19]), Err(TextError::Malformed));
    }

    #[test]
    fn compact_rejects_lone_surrogate() {
        // ED A0 BD is the high surrogate D83D with no low surrogate after it.
        assert_eq!(
            decode_compact_body(&[0xed, 0xa0, 0xbd]),
            Err(TextError::UnpairedSurrogate)
        );
    }

    #[test]
    fn compact_prefix_shorter_than_declared() {
        assert_eq!(
            decode_compact(&[0x00, 0x05, b'h', b'i']),
            Err(TextError::Truncated)
        );
    }

    #[test]
    fn latin1_high_bytes() {
        assert_eq!(encode_latin1("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(decode_latin1(&[b'c', b'a', b'f', 0xe9]), "café");
        // Unrepresentable code points degrade to '?'.
        assert_eq!(encode_latin1("€"), vec![b'?']);
    }

    #[test]
    fn ascii_is_strict() {
        assert_eq!(encode_ascii("plain").unwrap(), b"plain".to_vec());
        assert_eq!(encode_ascii("café"), Err(TextError::Unencodable));
        assert_eq!(decode_ascii(&[0x80]), Err(TextError::Malformed));
    }

    #[test]
    fn utf16_both_orders() {
        assert_eq!(encode_utf16be("A€"), vec![0x00, 0x41, 0x20, 0xac]);
        assert_eq!(encode_utf16le("A€"), vec![0x41, 0x00, 0xac, 0x20]);
        assert_eq!(decode_utf16be(&[0x00, 0x41, 0x20, 0xac]).unwrap(), "A€");
        assert_eq!(decode_utf16le(&[0x41, 0x00, 0xac, 0x20]).unwrap(), "A€");
    }

    #[test]
    fn utf16_odd_length_is_truncated() {
        assert_eq!(decode_utf16be(&[0x00, 0x41, 0x20]), Err(TextError::Truncated));
    }

    #[test]
    fn fixed_latin1_pads_with_zeros() {
        let field = encode_fixed("AB", 5, Encoding::Latin1).unwrap();
        assert_eq!(field, vec![0x41, 0x42, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn fixed_truncates_long_text() {
        let field = encode_fixed("ABCDEFG", 3, Encoding::Latin1).unwrap();
        assert_eq!(field, vec![0x41, 0x42, 0x43]);
    }

    #[test]
    fn fixed_utf16_never_splits_a_unit() {
        let field = encode_fixed("ABC", 5, Encoding::Utf16Be).unwrap();
        // Two whole code units fit; the fifth byte is padding.
        assert_eq!(field, vec![0x00, 0x41, 0x00, 0x42, 0x00]);
    }

    #[test]
    fn terminated_stops_at_zero_or_field_end() {
        assert_eq!(
            decode_terminated(&[0x41, 0x42, 0x00, 0x7a, 0x7a], Encoding::Latin1).unwrap(),
            "AB"
        );
        assert_eq!(
            decode_terminated(&[0x41, 0x42, 0x43], Encoding::Latin1).unwrap(),
            "ABC"
        );
        assert_eq!(
            decode_terminated(&[0x00, 0x41, 0x00, 0x00, 0x00, 0x42], Encoding::Utf16Be).unwrap(),
            "A"
        );
    }

    #[test]
    fn from_name_accepts_aliases_case_insensitively() {
        assert_eq!(Encoding::from_name("utf-16be"), Some(Encoding::Utf16Be));
        assert_eq!(Encoding::from_name("US-ASCII"), Some(Encoding::Ascii));
        assert_eq!(Encoding::from_name("CMB"), Some(Encoding::Compact));
        assert_eq!(Encoding::from_name("Shift_JIS"), None);
    }
}
