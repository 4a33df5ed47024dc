//! Encoding primitives for the wirebuf stream layer.
//!
//! This crate holds the pure, stateless building blocks the buffer and
//! transport crates are assembled from:
//!
//! - byte order — big- and little-endian conversion for 16/32/64-bit
//!   integers and IEEE-754 floats (`encode_i32_be`, `decode_f64_le`, …)
//! - text — the compact multi-byte string encoding, Latin-1/ASCII, UTF-16,
//!   and fixed-width/zero-terminated field forms ([`Encoding`])
//! - [`crc16`] — the 16-bit register-recurrence checksum
//!
//! # Example
//!
//! ```
//! use wirebuf_codec::{decode_i32_be, encode_i32_be};
//!
//! let bytes = encode_i32_be(0x01020304);
//! assert_eq!(bytes, [0x01, 0x02, 0x03, 0x04]);
//! assert_eq!(decode_i32_be(&bytes, 0), 0x01020304);
//! ```

mod byteorder;
mod crc16;
mod text;

pub use byteorder::{
    decode_f32_be, decode_f32_le, decode_f64_be, decode_f64_le, decode_i16_be, decode_i16_le,
    decode_i32_be, decode_i32_le, decode_i64_be, decode_i64_le, decode_u16_be, decode_u16_le,
    encode_f32_be, encode_f32_le, encode_f64_be, encode_f64_le, encode_i16_be, encode_i16_le,
    encode_i32_be, encode_i32_le, encode_i64_be, encode_i64_le, encode_u16_be, encode_u16_le,
};
pub use crc16::{crc16, crc16_seeded};
pub use text::{
    decode_ascii, decode_compact, decode_compact_body, decode_latin1, decode_terminated,
    decode_utf16be, decode_utf16le, encode, encode_ascii, encode_compact, encode_compact_body,
    encode_fixed, encode_latin1, encode_utf16be, encode_utf16le, Encoding, TextError,
};
