//! Growable buffer with independent read and write cursors.

use std::io::{ErrorKind, Read, Write};

use crate::{hex_preview, ByteReader, Status, DEFAULT_CAPACITY};
use wirebuf_codec::{
    decode_compact_body, decode_f32_be, decode_f32_le, decode_f64_be, decode_f64_le, decode_i16_be,
    decode_i16_le, decode_i32_be, decode_i32_le, decode_i64_be, decode_i64_le, decode_latin1,
    decode_terminated, decode_u16_be, encode_compact, encode_f32_be, encode_f32_le, encode_f64_be,
    encode_f64_le, encode_fixed, encode_i16_be, encode_i16_le, encode_i32_be, encode_i32_le,
    encode_i64_be, encode_i64_le, encode_latin1, encode_u16_be, encode_utf16be, Encoding,
};

/// Chunk size for draining a source of unknown length.
const READ_CHUNK: usize = 8 * 1024;

/// A growable byte buffer with independent read and write cursors.
///
/// The buffer holds `0 <= read <= write <= capacity` after every
/// operation. Bytes in `[0, write)` are valid data; bytes at or past the
/// write cursor are allocated but undefined. Reads advance the read
/// cursor, writes advance the write cursor, and growth reallocates
/// transparently unless the buffer was constructed fixed.
///
/// Primitive reads come in two families chosen per call: the `read_*`
/// set is big-endian and the `read_*_le` set is little-endian (writes
/// mirror this with `write_*` / `write_*_le`).
///
/// Every operation records its outcome: reads in
/// [`read_status`](ByteStream::read_status), writes in
/// [`write_status`](ByteStream::write_status). A read that cannot be
/// satisfied returns the type's zero value, leaves the read cursor
/// unchanged, and records [`Status::EndOfData`]; since a legitimate zero
/// reads back identically, callers that care must check the status. A
/// write that cannot fit records [`Status::OutOfMemory`] and writes
/// nothing.
///
/// # Example
///
/// ```
/// use wirebuf_buffers::ByteStream;
///
/// let mut stream = ByteStream::new();
/// stream.write_i32_le(0x01020304);
/// stream.write_i32(0x01020304);
/// assert_eq!(stream.as_slice(), &[4, 3, 2, 1, 1, 2, 3, 4]);
/// assert_eq!(stream.read_i32_le(), 0x01020304);
/// assert_eq!(stream.read_i32(), 0x01020304);
/// ```
pub struct ByteStream {
    data: Vec<u8>,
    read: usize,
    write: usize,
    growable: bool,
    read_status: Status,
    write_status: Status,
}

impl Default for ByteStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteStream {
    /// Creates an empty growable buffer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty growable buffer with an initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            read: 0,
            write: 0,
            growable: true,
            read_status: Status::Success,
            write_status: Status::Success,
        }
    }

    /// Creates a growable buffer pre-loaded with `data`; the write cursor
    /// starts at the end of the loaded bytes.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Creates a growable buffer taking ownership of `data`; the write
    /// cursor starts at the end of the loaded bytes.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let write = data.len();
        Self {
            data,
            read: 0,
            write,
            growable: true,
            read_status: Status::Success,
            write_status: Status::Success,
        }
    }

    /// Creates an empty buffer of fixed capacity; writes that would need
    /// more space fail with [`Status::OutOfMemory`].
    pub fn fixed(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            read: 0,
            write: 0,
            growable: false,
            read_status: Status::Success,
            write_status: Status::Success,
        }
    }

    /// Number of unread bytes, `write_pos - read_pos`.
    pub fn available(&self) -> usize {
        self.write - self.read
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Current read cursor offset.
    pub fn read_pos(&self) -> usize {
        self.read
    }

    /// Current write cursor offset; also the count of valid bytes.
    pub fn write_pos(&self) -> usize {
        self.write
    }

    /// Outcome of the most recent read operation.
    pub fn read_status(&self) -> Status {
        self.read_status
    }

    /// Outcome of the most recent write operation.
    pub fn write_status(&self) -> Status {
        self.write_status
    }

    /// The valid region `[0, write_pos)`.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.write]
    }

    /// The unread region `[read_pos, write_pos)`.
    pub fn unread(&self) -> &[u8] {
        &self.data[self.read..self.write]
    }

    /// A sequential reader over the unread region, leaving this buffer's
    /// cursors untouched.
    pub fn reader(&self) -> ByteReader<'_> {
        ByteReader::new(self.unread())
    }

    /// Repositions the read cursor; valid positions are `0..=write_pos`.
    pub fn set_read_pos(&mut self, pos: usize) -> Status {
        self.read_status = if pos <= self.write {
            self.read = pos;
            Status::Success
        } else {
            Status::InvalidArgument
        };
        self.read_status
    }

    /// Repositions the write cursor; valid positions are `0..=capacity`.
    ///
    /// Content past the new write position is no longer valid data, so the
    /// read cursor resets to 0.
    pub fn set_write_pos(&mut self, pos: usize) -> Status {
        self.write_status = if pos <= self.data.len() {
            self.write = pos;
            self.read = 0;
            Status::Success
        } else {
            Status::InvalidArgument
        };
        self.write_status
    }

    /// Discards everything before the read cursor by shifting the unread
    /// bytes to offset 0; returns the number of bytes discarded.
    ///
    /// Reclaims space in a long-lived buffer without losing unread data.
    pub fn purge(&mut self) -> usize {
        let discarded = self.read;
        if discarded > 0 {
            self.data.copy_within(self.read..self.write, 0);
            self.write -= discarded;
            self.read = 0;
        }
        discarded
    }

    /// Resets both cursors to zero; capacity and allocation are retained.
    pub fn reset(&mut self) {
        self.read = 0;
        self.write = 0;
        self.read_status = Status::Success;
        self.write_status = Status::Success;
    }

    /// Releases the underlying storage, leaving an empty buffer.
    pub fn free(&mut self) {
        self.data = Vec::new();
        self.reset();
    }

    /// Next unread byte without advancing, if any.
    pub fn peek(&self) -> Option<u8> {
        if self.available() > 0 {
            Some(self.data[self.read])
        } else {
            None
        }
    }

    /// Advances the read cursor past up to `n` bytes; returns the count
    /// skipped. Records [`Status::EndOfData`] when nothing could be
    /// skipped against a non-zero request.
    pub fn skip(&mut self, n: usize) -> usize {
        let skipped = n.min(self.available());
        self.read += skipped;
        self.read_status = if skipped == 0 && n > 0 {
            Status::EndOfData
        } else {
            Status::Success
        };
        skipped
    }

    /// Checksums `[start, start + count)` within the valid region using
    /// the register recurrence with seed `0xFFFF`.
    ///
    /// Returns `None` when the range reaches past the write cursor.
    pub fn crc16(&self, start: usize, count: usize) -> Option<u16> {
        let end = start.checked_add(count)?;
        if end > self.write {
            return None;
        }
        Some(wirebuf_codec::crc16(&self.data[start..end]))
    }

    fn take(&mut self, n: usize) -> Option<usize> {
        if self.available() < n {
            self.read_status = Status::EndOfData;
            return None;
        }
        let at = self.read;
        self.read += n;
        self.read_status = Status::Success;
        Some(at)
    }

    fn ensure(&mut self, extra: usize) -> bool {
        if self.write + extra <= self.data.len() {
            return true;
        }
        if !self.growable {
            self.write_status = Status::OutOfMemory;
            return false;
        }
        let needed = self.write + extra;
        let grown = (self.data.len() * 2).max(needed).max(DEFAULT_CAPACITY);
        self.data.resize(grown, 0);
        true
    }

    fn put(&mut self, bytes: &[u8]) {
        if !self.ensure(bytes.len()) {
            return;
        }
        self.data[self.write..self.write + bytes.len()].copy_from_slice(bytes);
        self.write += bytes.len();
        self.write_status = Status::Success;
    }

    /// Ensures room for `amount` more bytes past the write cursor.
    pub fn grow(&mut self, amount: usize) -> Status {
        if self.ensure(amount) {
            self.write_status = Status::Success;
        }
        self.write_status
    }

    // ---------------------------------------------------------------- reads

    /// Reads one byte as a boolean (non-zero is `true`).
    pub fn read_bool(&mut self) -> bool {
        self.read_u8() != 0
    }

    /// Reads an unsigned 8-bit integer.
    pub fn read_u8(&mut self) -> u8 {
        match self.take(1) {
            Some(at) => self.data[at],
            None => 0,
        }
    }

    /// Reads a signed 8-bit integer.
    pub fn read_i8(&mut self) -> i8 {
        self.read_u8() as i8
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    pub fn read_u16(&mut self) -> u16 {
        match self.take(2) {
            Some(at) => decode_u16_be(&self.data, at),
            None => 0,
        }
    }

    /// Reads a signed 16-bit integer (big-endian).
    pub fn read_i16(&mut self) -> i16 {
        match self.take(2) {
            Some(at) => decode_i16_be(&self.data, at),
            None => 0,
        }
    }

    /// Reads a signed 32-bit integer (big-endian).
    pub fn read_i32(&mut self) -> i32 {
        match self.take(4) {
            Some(at) => decode_i32_be(&self.data, at),
            None => 0,
        }
    }

    /// Reads a signed 64-bit integer (big-endian).
    pub fn read_i64(&mut self) -> i64 {
        match self.take(8) {
            Some(at) => decode_i64_be(&self.data, at),
            None => 0,
        }
    }

    /// Reads a 32-bit float (big-endian bit pattern).
    pub fn read_f32(&mut self) -> f32 {
        match self.take(4) {
            Some(at) => decode_f32_be(&self.data, at),
            None => 0.0,
        }
    }

    /// Reads a 64-bit float (big-endian bit pattern).
    pub fn read_f64(&mut self) -> f64 {
        match self.take(8) {
            Some(at) => decode_f64_be(&self.data, at),
            None => 0.0,
        }
    }

    /// Reads a signed 16-bit integer (little-endian).
    pub fn read_i16_le(&mut self) -> i16 {
        match self.take(2) {
            Some(at) => decode_i16_le(&self.data, at),
            None => 0,
        }
    }

    /// Reads a signed 32-bit integer (little-endian).
    pub fn read_i32_le(&mut self) -> i32 {
        match self.take(4) {
            Some(at) => decode_i32_le(&self.data, at),
            None => 0,
        }
    }

    /// Reads a signed 64-bit integer (little-endian).
    pub fn read_i64_le(&mut self) -> i64 {
        match self.take(8) {
            Some(at) => decode_i64_le(&self.data, at),
            None => 0,
        }
    }

    /// Reads a 32-bit float (little-endian bit pattern).
    pub fn read_f32_le(&mut self) -> f32 {
        match self.take(4) {
            Some(at) => decode_f32_le(&self.data, at),
            None => 0.0,
        }
    }

    /// Reads a 64-bit float (little-endian bit pattern).
    pub fn read_f64_le(&mut self) -> f64 {
        match self.take(8) {
            Some(at) => decode_f64_le(&self.data, at),
            None => 0.0,
        }
    }

    /// Copies up to `dest.len()` bytes into `dest`; returns the count
    /// copied. Records [`Status::EndOfData`] only when nothing could be
    /// copied against a non-empty destination.
    pub fn read_bytes(&mut self, dest: &mut [u8]) -> usize {
        let n = dest.len().min(self.available());
        dest[..n].copy_from_slice(&self.data[self.read..self.read + n]);
        self.read += n;
        self.read_status = if n == 0 && !dest.is_empty() {
            Status::EndOfData
        } else {
            Status::Success
        };
        n
    }

    /// Reads a length-prefixed compact string.
    ///
    /// Returns `None` without advancing on a cut-off prefix or body
    /// ([`Status::EndOfData`]) or a body that is not a valid compact
    /// sequence ([`Status::UnsupportedEncoding`]).
    pub fn read_utf(&mut self) -> Option<String> {
        if self.available() < 2 {
            self.read_status = Status::EndOfData;
            return None;
        }
        let len = decode_u16_be(&self.data, self.read) as usize;
        if self.available() < 2 + len {
            self.read_status = Status::EndOfData;
            return None;
        }
        let start = self.read + 2;
        match decode_compact_body(&self.data[start..start + len]) {
            Ok(text) => {
                self.read += 2 + len;
                self.read_status = Status::Success;
                Some(text)
            }
            Err(_) => {
                self.read_status = Status::UnsupportedEncoding;
                None
            }
        }
    }

    /// Reads one Latin-1 line terminated by `\r`, `\n`, or `\r\n`,
    /// advancing past the terminator.
    ///
    /// Returns `None` with [`Status::EndOfData`] and an unchanged cursor
    /// when no terminator remains in the buffer.
    pub fn read_line(&mut self) -> Option<String> {
        let rest = &self.data[self.read..self.write];
        let end = match rest.iter().position(|&b| b == b'\r' || b == b'\n') {
            Some(end) => end,
            None => {
                self.read_status = Status::EndOfData;
                return None;
            }
        };
        let text = decode_latin1(&rest[..end]);
        let mut consumed = end + 1;
        if rest[end] == b'\r' && rest.get(end + 1) == Some(&b'\n') {
            consumed += 1;
        }
        self.read += consumed;
        self.read_status = Status::Success;
        Some(text)
    }

    /// Reads a fixed Latin-1 field of `len` bytes, stopping at the zero
    /// terminator within it.
    pub fn read_latin1(&mut self, len: usize) -> Option<String> {
        self.read_fixed_field(len, Encoding::Latin1)
    }

    /// Reads a fixed big-endian UTF-16 field of `len` bytes, stopping at
    /// the zero code unit within it.
    pub fn read_utf16(&mut self, len: usize) -> Option<String> {
        self.read_fixed_field(len, Encoding::Utf16Be)
    }

    fn read_fixed_field(&mut self, len: usize, encoding: Encoding) -> Option<String> {
        if self.available() < len {
            self.read_status = Status::EndOfData;
            return None;
        }
        let field = &self.data[self.read..self.read + len];
        match decode_terminated(field, encoding) {
            Ok(text) => {
                self.read += len;
                self.read_status = Status::Success;
                Some(text)
            }
            Err(_) => {
                self.read_status = Status::UnsupportedEncoding;
                None
            }
        }
    }

    // --------------------------------------------------------------- writes

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

    /// Writes a signed 16-bit integer (little-endian).
    pub fn write_i16_le(&mut self, value: i16) {
        self.put(&encode_i16_le(value));
    }

    /// Writes a signed 32-bit integer (little-endian).
    pub fn write_i32_le(&mut self, value: i32) {
        self.put(&encode_i32_le(value));
    }

    /// Writes a signed 64-bit integer (little-endian).
    pub fn write_i64_le(&mut self, value: i64) {
        self.put(&encode_i64_le(value));
    }

    /// Writes a 32-bit float (little-endian bit pattern).
    pub fn write_f32_le(&mut self, value: f32) {
        self.put(&encode_f32_le(value));
    }

    /// Writes a 64-bit float (little-endian bit pattern).
    pub fn write_f64_le(&mut self, value: f64) {
        self.put(&encode_f64_le(value));
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
            Err(_) => self.write_status = Status::InvalidArgument,
        }
    }

    /// Appends a fixed Latin-1 field of exactly `len` bytes.
    pub fn write_latin1_fixed(&mut self, text: &str, len: usize) {
        self.write_fixed_field(text, len, Encoding::Latin1);
    }

    /// Appends a fixed big-endian UTF-16 field of exactly `len` bytes.
    pub fn write_utf16_fixed(&mut self, text: &str, len: usize) {
        self.write_fixed_field(text, len, Encoding::Utf16Be);
    }

    fn write_fixed_field(&mut self, text: &str, len: usize, encoding: Encoding) {
        match encode_fixed(text, len, encoding) {
            Ok(field) => self.put(&field),
            Err(_) => self.write_status = Status::UnsupportedEncoding,
        }
    }

    // --------------------------------------------------------------- bridge

    /// Appends bytes pulled from `src`, advancing the write cursor by the
    /// amount actually transferred, which is returned.
    ///
    /// `Some(n)` pulls until `n` bytes arrived or the source is exhausted;
    /// `None` drains the source until end of stream (a fixed buffer stops
    /// when full). Transport failures record [`Status::IoFailure`] on the
    /// write status; bytes already transferred stay in the buffer.
    pub fn write_from<R: Read>(&mut self, src: &mut R, count: Option<usize>) -> usize {
        match count {
            Some(n) => {
                if !self.ensure(n) {
                    return 0;
                }
                let mut done = 0;
                while done < n {
                    match src.read(&mut self.data[self.write + done..self.write + n]) {
                        Ok(0) => break,
                        Ok(m) => done += m,
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(_) => {
                            self.write += done;
                            self.write_status = Status::IoFailure;
                            return done;
                        }
                    }
                }
                self.write += done;
                self.write_status = Status::Success;
                done
            }
            None => {
                let mut total = 0;
                loop {
                    if self.write == self.data.len() {
                        if !self.growable {
                            break;
                        }
                        self.ensure(READ_CHUNK);
                    }
                    match src.read(&mut self.data[self.write..]) {
                        Ok(0) => break,
                        Ok(m) => {
                            self.write += m;
                            total += m;
                        }
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(_) => {
                            self.write_status = Status::IoFailure;
                            return total;
                        }
                    }
                }
                self.write_status = Status::Success;
                total
            }
        }
    }

    /// Drains unread bytes into `sink`, advancing the read cursor by the
    /// amount actually transferred, which is returned.
    ///
    /// `Some(n)` transfers `min(n, available)` bytes and records
    /// [`Status::EndOfData`] when that fell short of `n`; `None` transfers
    /// everything available. A sink failure records
    /// [`Status::IoFailure`] and leaves the read cursor where it was.
    pub fn read_into<W: Write>(&mut self, sink: &mut W, count: Option<usize>) -> usize {
        let requested = count.unwrap_or(self.available());
        let n = requested.min(self.available());
        match sink.write_all(&self.data[self.read..self.read + n]) {
            Ok(()) => {
                self.read += n;
                self.read_status = if n < requested {
                    Status::EndOfData
                } else {
                    Status::Success
                };
                n
            }
            Err(_) => {
                self.read_status = Status::IoFailure;
                0
            }
        }
    }
}

impl Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.available());
        buf[..n].copy_from_slice(&self.data[self.read..self.read + n]);
        self.read += n;
        Ok(n)
    }
}

impl Write for ByteStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if !self.ensure(buf.len()) {
            return Err(std::io::Error::new(
                ErrorKind::OutOfMemory,
                "fixed buffer capacity exhausted",
            ));
        }
        self.data[self.write..self.write + buf.len()].copy_from_slice(buf);
        self.write += buf.len();
        self.write_status = Status::Success;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream")
            .field("read", &self.read)
            .field("write", &self.write)
            .field("capacity", &self.data.len())
            .field("unread", &hex_preview(self.unread(), 16))
            .finish()
    }
}
