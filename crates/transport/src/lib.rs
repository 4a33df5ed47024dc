//! Blocking transport adapters speaking the wirebuf primitive vocabulary.
//!
//! [`TransportReader`] and [`TransportWriter`] wrap a connected blocking
//! byte source or sink — a socket, a pipe, a file — and expose the same
//! typed read/write methods as the buffer layer, without buffering of
//! their own. Transport failures never unwind across this boundary; they
//! are recorded as [`Status`] values on the adapter, with clean end of
//! stream distinguished from I/O errors.
//!
//! Calls may block for as long as the underlying transport blocks. No
//! timeouts are enforced here; closing the transport from another thread
//! surfaces as [`Status::IoFailure`] on the blocked call.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use wirebuf_transport::{TransportReader, TransportWriter};
//!
//! let mut wire = Vec::new();
//! let mut writer = TransportWriter::new(&mut wire);
//! writer.write_i32(0x01020304);
//! writer.write_utf("ping");
//! assert!(writer.status().is_ok());
//!
//! let mut reader = TransportReader::new(Cursor::new(wire));
//! assert_eq!(reader.read_i32(), 0x01020304);
//! assert_eq!(reader.read_utf().as_deref(), Some("ping"));
//! ```

mod hint;
mod reader;
mod writer;

pub use hint::AvailableHint;
pub use reader::{TransportConfig, TransportReader};
pub use writer::TransportWriter;

pub use wirebuf_buffers::Status;
