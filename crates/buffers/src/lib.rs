//! Cursor-tracked binary buffers for wirebuf.
//!
//! # Overview
//!
//! - [`ByteReader`] - Reads binary data from a fixed byte slice with a
//!   single cursor; underflow silently yields zero values
//! - [`ByteWriter`] - Writes binary data to a fixed or growing buffer,
//!   recording a [`Status`] per operation
//! - [`ByteStream`] - Growable buffer with independent read and write
//!   cursors, big- and little-endian primitive families, and transport
//!   interop
//!
//! # Example
//!
//! ```
//! use wirebuf_buffers::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.write_utf("hello");
//! let data = writer.flush();
//!
//! let mut reader = ByteReader::new(&data);
//! assert_eq!(reader.u8(), 0x01);
//! assert_eq!(reader.u16(), 0x0203);
//! assert_eq!(reader.utf().as_deref(), Some("hello"));
//! ```
//!
//! Failed operations never panic and never unwind; each buffer records the
//! outcome of its most recent read and write separately. Because primitive
//! reads return the type's zero value on underflow, a zero return is
//! indistinguishable from legitimately-zero data; callers that need the
//! distinction check the status accessors after the call.

mod hex;
mod reader;
mod status;
mod stream;
mod writer;

pub use hex::hex_preview;
pub use reader::ByteReader;
pub use status::Status;
pub use stream::ByteStream;
pub use writer::{ByteWriter, DEFAULT_CAPACITY};
