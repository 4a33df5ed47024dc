//! Typed writes against a blocking byte sink.

use std::io::Write;

use tracing::debug;
use wirebuf_buffers::Status;
use wirebuf_codec::{
    encode_compact, encode_f32_be, encode_f64_be, encode_i16_be, encode_i32_be, encode_i64_be,
    encode_latin1, encode_u16_be, encode_utf16be,
};

/// Applies the typed write vocabulary directly to a blocking transport.
///
/// The adapter holds no buffer; every write goes straight to the
/// transport. Failures are recorded as [`Status::IoFailure`] and each
/// successful write resets the status to [`Status::Success`].
pub struct TransportWriter<W> {
    inner: W,
    status: Status,
}

impl<W: Write> TransportWriter<W> {
    /// Wraps a blocking byte sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            status: Status::Success,
        }
    }

    /// Outcome of the most recent operation.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Borrow the underlying transport.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying transport.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the adapter and return the transport.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn put(&mut self, bytes: &[u8]) -> bool {
        match self.inner.write_all(bytes) {
            Ok(()) => {
                self.status = Status::Success;
                true
            }
            Err(err) => {
                self.status = Status::IoFailure;
                debug!(error = %err, len = bytes.len(), "transport write failed");
                false
            }
        }
    }

    /// Writes a boolean as one byte (1 or 0).
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    /// Writes an unsigned 8-bit integer.
    pub fn write_u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    /// Writes a signed 8-bit integer.
    pub fn write_i8(&mut self, value: i8) {
        self.put(&[value as u8]);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    pub fn write_u16(&mut self, value: u16) {
        self.put(&encode_u16_be(value));
    }

    /// Writes a signed 16-bit integer (big-endian).
    pub fn write_i16(&mut self, value: i16) {
        self.put(&encode_i16_be(value));
    }

    /// Writes a signed 32-bit integer (big-endian).
    pub fn write_i32(&mut self, value: i32) {
        self.put(&encode_i32_be(value));
    }

    /// Writes a signed 64-bit integer (big-endian).
    pub fn write_i64(&mut self, value: i64) {
        self.put(&encode_i64_be(value));
    }

    /// Writes a 32-bit float (big-endian bit pattern).
    pub fn write_f32(&mut self, value: f32) {
        self.put(&encode_f32_be(value));
    }

    /// Writes a 64-bit float (big-endian bit pattern).
    pub fn write_f64(&mut self, value: f64) {
        self.put(&encode_f64_be(value));
    }

    /// Writes raw bytes.
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    /// Writes `text` as zero-terminated Latin-1.
    pub fn write_latin1(&mut self, text: &str) {
        let mut body = encode_latin1(text);
        body.push(0);
        self.put(&body);
    }

    /// Writes `text` as zero-terminated big-endian UTF-16.
    pub fn write_utf16(&mut self, text: &str) {
        let mut body = encode_utf16be(text);
        body.extend_from_slice(&[0, 0]);
        self.put(&body);
    }

    /// Writes `text` in the length-prefixed compact encoding.
    pub fn write_utf(&mut self, text: &str) {
        match encode_compact(text) {
            Ok(framed) => {
                self.put(&framed);
            }
            Err(_) => self.status = Status::InvalidArgument,
        }
    }

    /// Flushes the underlying transport.
    pub fn flush(&mut self) {
        match self.inner.flush() {
            Ok(()) => self.status = Status::Success,
            Err(err) => {
                self.status = Status::IoFailure;
                debug!(error = %err, "transport flush failed");
            }
        }
    }
}
