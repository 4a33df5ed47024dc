//! Typed reads against a blocking byte source.

use std::io::{ErrorKind, Read};

use tracing::debug;
use wirebuf_buffers::Status;
use wirebuf_codec::{
    decode_compact_body, decode_f32_be, decode_f64_be, decode_i16_be, decode_i32_be, decode_i64_be,
    decode_latin1, decode_u16_be,
};

use crate::AvailableHint;

/// Limits applied by a [`TransportReader`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Longest line `read_line` will scan for before giving up with
    /// [`Status::InvalidArgument`]. Bounds memory against a peer that
    /// never sends a terminator.
    pub max_line_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: 64 * 1024,
        }
    }
}

/// Applies the typed read vocabulary directly to a blocking transport.
///
/// The adapter holds no buffer; every primitive read goes straight to the
/// transport (a single pushed-back byte exists only for `\r\n` line
/// scanning). Reads return the type's zero value on failure and record
/// the outcome in [`status`](TransportReader::status): clean end of
/// stream is [`Status::EndOfData`], anything else the transport reports
/// is [`Status::IoFailure`]. Interrupted system calls are retried.
pub struct TransportReader<R> {
    inner: R,
    pushback: Option<u8>,
    status: Status,
    config: TransportConfig,
}

impl<R: Read> TransportReader<R> {
    /// Wraps a blocking byte source with default limits.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, TransportConfig::default())
    }

    /// Wraps a blocking byte source with explicit limits.
    pub fn with_config(inner: R, config: TransportConfig) -> Self {
        Self {
            inner,
            pushback: None,
            status: Status::Success,
            config,
        }
    }

    /// Outcome of the most recent operation.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Borrow the underlying transport.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying transport.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the adapter and return the transport.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self, buf: &mut [u8]) -> bool {
        let mut filled = 0;
        if let Some(byte) = self.pushback.take() {
            if buf.is_empty() {
                self.pushback = Some(byte);
            } else {
                buf[0] = byte;
                filled = 1;
            }
        }
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.status = Status::EndOfData;
                    debug!(needed = buf.len(), got = filled, "transport closed mid-read");
                    return false;
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.status = Status::IoFailure;
                    debug!(error = %err, "transport read failed");
                    return false;
                }
            }
        }
        self.status = Status::Success;
        true
    }

    /// Reads one byte as a boolean (non-zero is `true`).
    pub fn read_bool(&mut self) -> bool {
        self.read_u8() != 0
    }

    /// Reads an unsigned 8-bit integer.
    pub fn read_u8(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        if self.fill(&mut buf) {
            buf[0]
        } else {
            0
        }
    }

    /// Reads a signed 8-bit integer.
    pub fn read_i8(&mut self) -> i8 {
        self.read_u8() as i8
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    pub fn read_u16(&mut self) -> u16 {
        let mut buf = [0u8; 2];
        if self.fill(&mut buf) {
            decode_u16_be(&buf, 0)
        } else {
            0
        }
    }

    /// Reads a signed 16-bit integer (big-endian).
    pub fn read_i16(&mut self) -> i16 {
        let mut buf = [0u8; 2];
        if self.fill(&mut buf) {
            decode_i16_be(&buf, 0)
        } else {
            0
        }
    }

    /// Reads a signed 32-bit integer (big-endian).
    pub fn read_i32(&mut self) -> i32 {
        let mut buf = [0u8; 4];
        if self.fill(&mut buf) {
            decode_i32_be(&buf, 0)
        } else {
            0
        }
    }

    /// Reads a signed 64-bit integer (big-endian).
    pub fn read_i64(&mut self) -> i64 {
        let mut buf = [0u8; 8];
        if self.fill(&mut buf) {
            decode_i64_be(&buf, 0)
        } else {
            0
        }
    }

    /// Reads a 32-bit float (big-endian bit pattern).
    pub fn read_f32(&mut self) -> f32 {
        let mut buf = [0u8; 4];
        if self.fill(&mut buf) {
            decode_f32_be(&buf, 0)
        } else {
            0.0
        }
    }

    /// Reads a 64-bit float (big-endian bit pattern).
    pub fn read_f64(&mut self) -> f64 {
        let mut buf = [0u8; 8];
        if self.fill(&mut buf) {
            decode_f64_be(&buf, 0)
        } else {
            0.0
        }
    }

    /// One best-effort transport read into `dest`; returns the count
    /// delivered, which may be anything from 0 to `dest.len()`.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        if dest.is_empty() {
            self.status = Status::Success;
            return 0;
        }
        let mut filled = 0;
        if let Some(byte) = self.pushback.take() {
            dest[0] = byte;
            filled = 1;
        }
        loop {
            match self.inner.read(&mut dest[filled..]) {
                Ok(0) => {
                    self.status = if filled == 0 {
                        Status::EndOfData
                    } else {
                        Status::Success
                    };
                    return filled;
                }
                Ok(n) => {
                    self.status = Status::Success;
                    return filled + n;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.status = Status::IoFailure;
                    debug!(error = %err, "transport read failed");
                    return filled;
                }
            }
        }
    }

    /// Reads and discards exactly `n` bytes; returns the count skipped.
    pub fn skip(&mut self, n: usize) -> usize {
        let mut scratch = [0u8; 256];
        let mut skipped = 0;
        while skipped < n {
            let step = (n - skipped).min(scratch.len());
            if !self.fill(&mut scratch[..step]) {
                return skipped;
            }
            skipped += step;
        }
        self.status = Status::Success;
        skipped
    }

    /// Reads a length-prefixed compact string from the transport.
    ///
    /// Returns `None` on a cut-off prefix or body, or on a body that is
    /// not a valid compact sequence ([`Status::UnsupportedEncoding`]).
    pub fn read_utf(&mut self) -> Option<String> {
        let len = self.read_u16() as usize;
        if !self.status.is_ok() {
            return None;
        }
        let mut body = vec![0u8; len];
        if !self.fill(&mut body) {
            return None;
        }
        match decode_compact_body(&body) {
            Ok(text) => Some(text),
            Err(_) => {
                self.status = Status::UnsupportedEncoding;
                None
            }
        }
    }

    /// Reads one Latin-1 line terminated by `\r`, `\n`, or `\r\n`.
    ///
    /// The transport delivers no lookahead, so the byte after a lone `\r`
    /// is pushed back for the next read. Returns `None` when the stream
    /// ends before a terminator (bytes read up to that point are
    /// consumed) or when the line exceeds the configured bound.
    pub fn read_line(&mut self) -> Option<String> {
        let mut body = Vec::new();
        loop {
            let mut one = [0u8; 1];
            if !self.fill(&mut one) {
                return None;
            }
            match one[0] {
                b'\n' => break,
                b'\r' => {
                    let mut next = [0u8; 1];
                    if self.fill(&mut next) && next[0] != b'\n' {
                        self.pushback = Some(next[0]);
                    }
                    // EOF after '\r' still ends a complete line.
                    self.status = Status::Success;
                    break;
                }
                byte => body.push(byte),
            }
            if body.len() > self.config.max_line_bytes {
                self.status = Status::InvalidArgument;
                debug!(limit = self.config.max_line_bytes, "line exceeds configured bound");
                return None;
            }
        }
        Some(decode_latin1(&body))
    }
}

impl<R: Read + AvailableHint> TransportReader<R> {
    /// Best-effort count of bytes readable without blocking, as reported
    /// by the transport. Possibly stale; not a guarantee.
    pub fn available(&self) -> usize {
        usize::from(self.pushback.is_some()) + self.inner.available_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_primitives_from_cursor() {
        let wire = vec![0x01, 0x02, 0x03, 0xff, 0xff, 0xff, 0xff, 0xfe];
        let mut reader = TransportReader::new(Cursor::new(wire));
        assert_eq!(reader.read_u8(), 0x01);
        assert_eq!(reader.read_i16(), 0x0203);
        assert_eq!(reader.read_i32(), -1);
        assert_eq!(reader.read_i8(), -2);
        assert!(reader.status().is_ok());
    }

    #[test]
    fn clean_eof_maps_to_end_of_data() {
        let mut reader = TransportReader::new(Cursor::new(vec![0x01]));
        assert_eq!(reader.read_i32(), 0);
        assert_eq!(reader.status(), Status::EndOfData);
    }

    #[test]
    fn io_error_maps_to_io_failure() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(ErrorKind::ConnectionReset))
            }
        }
        let mut reader = TransportReader::new(Broken);
        assert_eq!(reader.read_u8(), 0);
        assert_eq!(reader.status(), Status::IoFailure);
    }

    #[test]
    fn interrupted_read_retries() {
        struct InterruptedThenData {
            state: u8,
        }
        impl Read for InterruptedThenData {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.state == 0 {
                    self.state = 1;
                    return Err(std::io::Error::from(ErrorKind::Interrupted));
                }
                buf[0] = 0x42;
                Ok(1)
            }
        }
        let mut reader = TransportReader::new(InterruptedThenData { state: 0 });
        assert_eq!(reader.read_u8(), 0x42);
        assert!(reader.status().is_ok());
    }

    #[test]
    fn multibyte_read_survives_partial_delivery() {
        struct ByteByByte {
            bytes: Vec<u8>,
            pos: usize,
        }
        impl Read for ByteByByte {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.pos >= self.bytes.len() || buf.is_empty() {
                    return Ok(0);
                }
                buf[0] = self.bytes[self.pos];
                self.pos += 1;
                Ok(1)
            }
        }
        let transport = ByteByByte {
            bytes: vec![0x01, 0x02, 0x03, 0x04],
            pos: 0,
        };
        let mut reader = TransportReader::new(transport);
        assert_eq!(reader.read_i32(), 0x01020304);
        assert!(reader.status().is_ok());
    }

    #[test]
    fn utf_roundtrip_over_wire() {
        let wire = wirebuf_codec::encode_compact("méta\u{0}data").unwrap();
        let mut reader = TransportReader::new(Cursor::new(wire));
        assert_eq!(reader.read_utf().as_deref(), Some("méta\u{0}data"));
        // Stream is exhausted now.
        assert_eq!(reader.read_utf(), None);
        assert_eq!(reader.status(), Status::EndOfData);
    }

    #[test]
    fn line_with_crlf_and_pushback() {
        let mut reader = TransportReader::new(Cursor::new(b"a\r\nb\rc\nd".to_vec()));
        assert_eq!(reader.read_line().as_deref(), Some("a"));
        // Lone '\r': the 'c' after it must be pushed back, not lost.
        assert_eq!(reader.read_line().as_deref(), Some("b"));
        assert_eq!(reader.read_line().as_deref(), Some("c"));
        // "d" never sees a terminator.
        assert_eq!(reader.read_line(), None);
        assert_eq!(reader.status(), Status::EndOfData);
    }

    #[test]
    fn line_bound_is_enforced() {
        let config = TransportConfig { max_line_bytes: 4 };
        let mut reader =
            TransportReader::with_config(Cursor::new(b"toolong\n".to_vec()), config);
        assert_eq!(reader.read_line(), None);
        assert_eq!(reader.status(), Status::InvalidArgument);
    }

    #[test]
    fn best_effort_read_and_skip() {
        let mut reader = TransportReader::new(Cursor::new(vec![1u8, 2, 3, 4, 5]));
        assert_eq!(reader.skip(2), 2);
        let mut dest = [0u8; 8];
        assert_eq!(reader.read(&mut dest), 3);
        assert_eq!(&dest[..3], &[3, 4, 5]);
        assert_eq!(reader.read(&mut dest), 0);
        assert_eq!(reader.status(), Status::EndOfData);
    }

    #[test]
    fn available_counts_pushback() {
        let mut reader = TransportReader::new(Cursor::new(b"x\rzy".to_vec()));
        assert_eq!(reader.available(), 4);
        assert_eq!(reader.read_line().as_deref(), Some("x"));
        // 'z' sits in the pushback slot, 'y' in the transport.
        assert_eq!(reader.available(), 2);
        assert_eq!(reader.read_u8(), b'z');
        assert_eq!(reader.read_u8(), b'y');
    }
}
