//! End-to-end adapter scenarios: writer → wire → reader, buffer bridging,
//! and a real socketpair roundtrip.

use std::io::Cursor;

use wirebuf_buffers::{ByteStream, Status};
use wirebuf_transport::{TransportConfig, TransportReader, TransportWriter};

#[test]
fn writer_to_reader_roundtrip() {
    let mut wire = Vec::new();
    let mut writer = TransportWriter::new(&mut wire);
    writer.write_bool(true);
    writer.write_i16(-5);
    writer.write_i32(0x01020304);
    writer.write_i64(i64::MIN);
    writer.write_f32(1.5);
    writer.write_f64(-0.25);
    writer.write_utf("hëllo");
    writer.write_latin1("bye");
    assert!(writer.status().is_ok());

    let mut reader = TransportReader::new(Cursor::new(wire));
    assert!(reader.read_bool());
    assert_eq!(reader.read_i16(), -5);
    assert_eq!(reader.read_i32(), 0x01020304);
    assert_eq!(reader.read_i64(), i64::MIN);
    assert_eq!(reader.read_f32(), 1.5);
    assert_eq!(reader.read_f64(), -0.25);
    assert_eq!(reader.read_utf().as_deref(), Some("hëllo"));
    // The zero-terminated Latin-1 tail reads as a line-less fixed scan:
    // pull the remaining 4 bytes and check the terminator.
    let mut tail = [0u8; 4];
    assert_eq!(reader.read(&mut tail), 4);
    assert_eq!(&tail, &[b'b', b'y', b'e', 0x00]);
}

#[test]
fn buffer_fills_from_transport_and_drains_back() {
    let mut wire = Vec::new();
    let mut writer = TransportWriter::new(&mut wire);
    writer.write_i32(7);
    writer.write_utf("chunk");

    // Stage the wire bytes through a dual-cursor buffer.
    let mut staging = ByteStream::new();
    let mut src = Cursor::new(wire);
    staging.write_from(&mut src, None);
    assert_eq!(staging.read_i32(), 7);
    assert_eq!(staging.read_utf().as_deref(), Some("chunk"));

    // And back out through a transport writer.
    staging.reset();
    staging.write_i16(42);
    let mut out = Vec::new();
    staging.read_into(&mut out, None);
    assert_eq!(out, vec![0x00, 0x2a]);
}

#[test]
fn end_of_data_is_not_sticky_across_transports() {
    let mut reader = TransportReader::new(Cursor::new(vec![0x01]));
    assert_eq!(reader.read_i16(), 0);
    assert_eq!(reader.status(), Status::EndOfData);
}

#[test]
fn line_protocol_over_wire() {
    let wire = b"PUT item\r\nsize 3\r\n".to_vec();
    let config = TransportConfig {
        max_line_bytes: 128,
    };
    let mut reader = TransportReader::with_config(Cursor::new(wire), config);
    assert_eq!(reader.read_line().as_deref(), Some("PUT item"));
    assert_eq!(reader.read_line().as_deref(), Some("size 3"));
    assert_eq!(reader.read_line(), None);
}

#[cfg(unix)]
#[test]
fn roundtrip_over_socketpair() {
    let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();

    let server = std::thread::spawn(move || {
        let mut reader = TransportReader::new(right);
        assert_eq!(reader.read_i32(), 0x600d);
        assert_eq!(reader.read_utf().as_deref(), Some("over the wire"));
        // Peer closes: the next read observes end of data.
        assert_eq!(reader.read_u8(), 0);
        assert_eq!(reader.status(), Status::EndOfData);
    });

    let mut writer = TransportWriter::new(left);
    writer.write_i32(0x600d);
    writer.write_utf("over the wire");
    assert!(writer.status().is_ok());
    drop(writer);

    server.join().unwrap();
}
