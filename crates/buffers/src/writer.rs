//! Sequential writer over a fixed or growing byte buffer.

use crate::Status;
use wirebuf_codec::{
    encode_compact, encode_f32_be, encode_f64_be, encode_fixed, encode_i16_be, encode_i32_be,
    encode_i64_be, encode_latin1, encode_u16_be, encode_utf16be, Encoding,
};

/// Initial capacity of growable buffers created without a hint.
pub const DEFAULT_CAPACITY: usize = 256;

/// A sequential binary writer.
///
/// Constructed either over a caller-supplied array that never grows
/// ([`ByteWriter::fixed`]) or with a capacity hint, in which case the
/// buffer reallocates as needed. Multi-byte primitives are big-endian.
///
/// A write that does not fit a fixed buffer records
/// [`Status::OutOfMemory`] and writes nothing; there are no partial
/// writes. The [`status`](ByteWriter::status) accessor reflects the most
/// recent operation.
pub struct ByteWriter {
    data: Vec<u8>,
    x: usize,
    growable: bool,
    status: Status,
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWriter {
    /// Creates a growable writer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a growable writer with an explicit initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            x: 0,
            growable: true,
            status: Status::Success,
        }
    }

    /// Creates a writer over a caller-supplied array of fixed capacity.
    pub fn fixed(data: Vec<u8>) -> Self {
        Self {
            data,
            x: 0,
            growable: false,
            status: Status::Success,
        }
    }

    /// Outcome of the most recent operation.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The written prefix of the buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.x]
    }

    /// Moves the cursor back to the start, keeping the allocation.
    pub fn reset(&mut self) {
        self.x = 0;
        self.status = Status::Success;
    }

    /// Returns the written bytes and resets the cursor.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.data[..self.x].to_vec();
        self.x = 0;
        out
    }

    /// Ensures room for `amount` more bytes, reallocating growable buffers.
    ///
    /// Fixed writers fail with [`Status::OutOfMemory`] without mutating
    /// anything.
    pub fn grow(&mut self, amount: usize) -> Status {
        if self.ensure(amount) {
            self.status = Status::Success;
        }
        self.status
    }

    fn ensure(&mut self, extra: usize) -> bool {
        if self.x + extra <= self.data.len() {
            return true;
        }
        if !self.growable {
            self.status = Status::OutOfMemory;
            return false;
        }
        let needed = self.x + extra;
        let grown = (self.data.len() * 2).max(needed).max(DEFAULT_CAPACITY);
        self.data.resize(grown, 0);
        true
    }

    fn put(&mut self, bytes: &[u8]) {
        if !self.ensure(bytes.len()) {
            return;
        }
        self.data[self.x..self.x + bytes.len()].copy_from_slice(bytes);
        self.x += bytes.len();
        self.status = Status::Success;
    }

    /// Writes a boolean as one byte (1 or 0).
    pub fn bool(&mut self, value: bool) {
        self.u8(value as u8);
    }

    /// Writes an unsigned 8-bit integer.
    pub fn u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    /// Writes a signed 8-bit integer.
    pub fn i8(&mut self, value: i8) {
        self.put(&[value as u8]);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    pub fn u16(&mut self, value: u16) {
        self.put(&encode_u16_be(value));
    }

    /// Writes a signed 16-bit integer (big-endian).
    pub fn i16(&mut self, value: i16) {
        self.put(&encode_i16_be(value));
    }

    /// Writes a signed 32-bit integer (big-endian).
    pub fn i32(&mut self, value: i32) {
        self.put(&encode_i32_be(value));
    }

    /// Writes a signed 64-bit integer (big-endian).
    pub fn i64(&mut self, value: i64) {
        self.put(&encode_i64_be(value));
    }

    /// Writes a 32-bit float (big-endian bit pattern).
    pub fn f32(&mut self, value: f32) {
        self.put(&encode_f32_be(value));
    }

    /// Writes a 64-bit float (big-endian bit pattern).
    pub fn f64(&mut self, value: f64) {
        self.put(&encode_f64_be(value));
    }

    /// Appends raw bytes.
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    /// Appends `text` as zero-terminated Latin-1.
    pub fn write_latin1(&mut self, text: &str) {
        let mut body = encode_latin1(text);
        body.push(0);
        self.put(&body);
    }

    /// Appends `text` as zero-terminated big-endian UTF-16.
    pub fn write_utf16(&mut self, text: &str) {
        let mut body = encode_utf16be(text);
        body.extend_from_slice(&[0, 0]);
        self.put(&body);
    }

    /// Appends `text` in the length-prefixed compact encoding.
    pub fn write_utf(&mut self, text: &str) {
        match encode_compact(text) {
            Ok(framed) => self.put(&framed),
            Err(_) => self.status = Status::InvalidArgument,
        }
    }

    /// Appends a fixed Latin-1 field of exactly `len` bytes.
    pub fn write_latin1_fixed(&mut self, text: &str, len: usize) {
        self.write_fixed(text, len, Encoding::Latin1);
    }

    /// Appends a fixed big-endian UTF-16 field of exactly `len` bytes.
    pub fn write_utf16_fixed(&mut self, text: &str, len: usize) {
        self.write_fixed(text, len, Encoding::Utf16Be);
    }

    fn write_fixed(&mut self, text: &str, len: usize, encoding: Encoding) {
        match encode_fixed(text, len, encoding) {
            Ok(field) => self.put(&field),
            Err(_) => self.status = Status::UnsupportedEncoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_primitives_big_endian() {
        let mut writer = ByteWriter::new();
        writer.u8(0x01);
        writer.i16(0x0203);
        writer.i32(0x04050607);
        assert_eq!(
            writer.as_slice(),
            &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]
        );
        assert!(writer.status().is_ok());
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut writer = ByteWriter::with_capacity(2);
        writer.i64(0x0102030405060708);
        assert!(writer.status().is_ok());
        assert!(writer.capacity() >= 8);
        assert_eq!(writer.position(), 8);
    }

    #[test]
    fn fixed_writer_rejects_overflow_without_partial_write() {
        let mut writer = ByteWriter::fixed(vec![0; 3]);
        writer.u16(0x0102);
        assert!(writer.status().is_ok());
        writer.i32(0x0a0b0c0d);
        assert_eq!(writer.status(), Status::OutOfMemory);
        assert_eq!(writer.position(), 2);
        assert_eq!(writer.as_slice(), &[0x01, 0x02]);
    }

    #[test]
    fn grow_on_fixed_writer_fails() {
        let mut writer = ByteWriter::fixed(vec![0; 2]);
        assert_eq!(writer.grow(10), Status::OutOfMemory);
        assert_eq!(writer.capacity(), 2);
    }

    #[test]
    fn zero_terminated_strings() {
        let mut writer = ByteWriter::new();
        writer.write_latin1("AB");
        writer.write_utf16("C");
        assert_eq!(
            writer.as_slice(),
            &[0x41, 0x42, 0x00, 0x00, 0x43, 0x00, 0x00]
        );
    }

    #[test]
    fn fixed_field_scenario() {
        let mut writer = ByteWriter::new();
        writer.write_latin1_fixed("AB", 5);
        assert_eq!(writer.as_slice(), &[0x41, 0x42, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn utf_frame_carries_byte_length() {
        let mut writer = ByteWriter::new();
        writer.write_utf("€");
        assert_eq!(writer.as_slice(), &[0x00, 0x03, 0xe2, 0x82, 0xac]);
    }

    #[test]
    fn flush_returns_written_and_resets() {
        let mut writer = ByteWriter::new();
        writer.u8(7);
        let out = writer.flush();
        assert_eq!(out, vec![7]);
        assert_eq!(writer.position(), 0);
        writer.u8(8);
        assert_eq!(writer.as_slice(), &[8]);
    }
}
