//! Chunked driver and one-shot helper tests.

use oxizlib_core::{ErrorCode, FlushMode, Mode, StreamOptions, ZlibError};
use oxizlib_stream::{
    BlockTable, ZlibWriter, deflate_raw_sync, deflate_sync, gunzip_sync, gzip_sync,
    inflate_raw_sync, inflate_sync,
};
use std::io::Write;

/// `printf 'hello\n' | gzip -n`
const HELLO_GZ: [u8; 26] = [
    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0xff, 0xcb, 0x48, 0xcd, 0xc9, 0xc9,
    0xe7, 0x02, 0x00, 0x20, 0x30, 0x3a, 0x36, 0x06, 0x00, 0x00, 0x00,
];

fn lines(count: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| format!("line {i}: the quick brown fox\n").into_bytes())
        .collect()
}

#[test]
fn test_gunzip_fixture() {
    let opts = StreamOptions::default();
    assert_eq!(gunzip_sync(&HELLO_GZ, &opts).unwrap(), b"hello\n");
}

#[test]
fn test_gunzip_fixture_byte_by_byte() {
    let opts = StreamOptions::default().with_chunk_size(64);
    let mut writer = ZlibWriter::gunzip(Vec::new(), &opts).unwrap();
    for byte in HELLO_GZ {
        writer.write_all(&[byte]).unwrap();
    }
    assert_eq!(writer.finish().unwrap(), b"hello\n");
}

#[test]
fn test_one_shot_round_trips() {
    let opts = StreamOptions::default();
    let data = lines(2000);

    let zlib = deflate_sync(&data, &opts).unwrap();
    assert_eq!(inflate_sync(&zlib, &opts).unwrap(), data);

    let gz = gzip_sync(&data, &opts).unwrap();
    assert_eq!(&gz[..2], &[0x1f, 0x8b]);
    assert_eq!(gunzip_sync(&gz, &opts).unwrap(), data);

    let raw = deflate_raw_sync(&data, &opts).unwrap();
    assert_eq!(inflate_raw_sync(&raw, &opts).unwrap(), data);
}

#[test]
fn test_inflate_foo_bar_fails() {
    let opts = StreamOptions::default();
    let err = inflate_sync(b"foo bar", &opts).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::DataError));
    let err = inflate_raw_sync(b"foo bar", &opts).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::DataError));
}

#[test]
fn test_sync_flush_makes_prefix_decodable() {
    let opts = StreamOptions::default().with_chunk_size(256);
    let first = lines(100);
    let second = lines(50);

    let mut writer = ZlibWriter::deflate(Vec::new(), &opts).unwrap();
    writer.write_all(&first).unwrap();
    writer.flush().unwrap();
    let flushed = writer.get_ref().unwrap().clone();

    // Everything written so far decodes without the stream being finished.
    let mut reader = ZlibWriter::inflate(Vec::new(), &opts).unwrap();
    reader.write_all(&flushed).unwrap();
    reader.flush().unwrap();
    assert_eq!(reader.get_ref().unwrap(), &first);

    writer.write_all(&second).unwrap();
    let compressed = writer.finish().unwrap();
    assert!(compressed.starts_with(&flushed));

    let mut expected = first;
    expected.extend_from_slice(&second);
    assert_eq!(inflate_sync(&compressed, &opts).unwrap(), expected);
}

#[test]
fn test_small_chunks_round_trip() {
    let data = lines(500);
    let opts = StreamOptions::default().with_chunk_size(64);

    for mode in [Mode::Deflate, Mode::DeflateRaw, Mode::Gzip] {
        let mut writer = ZlibWriter::new(Vec::new(), mode, &opts).unwrap();
        for piece in data.chunks(37) {
            writer.write_all(piece).unwrap();
        }
        let compressed = writer.finish().unwrap();

        let mut reader = ZlibWriter::new(Vec::new(), mode.inverse(), &opts).unwrap();
        for piece in compressed.chunks(11) {
            reader.write_all(piece).unwrap();
        }
        assert_eq!(reader.finish().unwrap(), data, "mode {mode}");
    }
}

#[test]
fn test_full_flush_per_write() {
    let opts = StreamOptions::default().with_flush(FlushMode::Full);
    let mut writer = ZlibWriter::deflate_raw(Vec::new(), &opts).unwrap();
    writer.write_all(b"first").unwrap();
    writer.write_all(b"second").unwrap();
    let raw = writer.finish().unwrap();
    assert_eq!(inflate_raw_sync(&raw, &opts).unwrap(), b"firstsecond");
}

#[test]
fn test_write_after_finish_is_stream_closed() {
    let mut writer = ZlibWriter::gzip(Vec::new(), &StreamOptions::default()).unwrap();
    writer.write_all(b"data").unwrap();
    writer.try_finish().unwrap();

    let err = writer.write(b"late").unwrap_err();
    let inner = err
        .get_ref()
        .and_then(|e| e.downcast_ref::<ZlibError>())
        .unwrap();
    assert_eq!(inner.code(), Some(ErrorCode::StreamClosed));
    assert!(err.to_string().starts_with("STREAM_CLOSED: "));
}

#[test]
fn test_truncated_stream_fails_on_finish() {
    let opts = StreamOptions::default();
    let compressed = deflate_sync(&lines(300), &opts).unwrap();
    let mut writer = ZlibWriter::inflate(Vec::new(), &opts).unwrap();
    writer.write_all(&compressed[..compressed.len() / 2]).unwrap();
    let err = writer.try_finish().unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::BufError));
}

#[test]
fn test_corrupt_stream_is_invalid_data() {
    let opts = StreamOptions::default();
    let mut writer = ZlibWriter::inflate(Vec::new(), &opts).unwrap();
    let err = writer.write_all(b"not a zlib stream").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn test_reset_between_members() {
    let opts = StreamOptions::default();
    let mut writer = ZlibWriter::gzip(Vec::new(), &opts).unwrap();
    writer.write_all(b"discarded").unwrap();
    writer.reset().unwrap();
    writer.get_mut().unwrap().clear();
    writer.write_all(b"kept").unwrap();
    let gz = writer.finish().unwrap();
    assert_eq!(gunzip_sync(&gz, &opts).unwrap(), b"kept");
}

#[test]
fn test_driver_with_hooks_releases_everything() {
    let table = BlockTable::new();
    let opts = StreamOptions::default();
    let data = lines(1000);

    let mut writer = ZlibWriter::with_hooks(Vec::new(), Mode::Gzip, &opts, table.clone()).unwrap();
    writer.write_all(&data).unwrap();
    assert!(table.stats().live_blocks > 0);
    assert_eq!(writer.total_in(), Some(data.len() as u64));
    let gz = writer.finish().unwrap();

    let stats = table.stats();
    assert_eq!(stats.live_blocks, 0);
    assert_eq!(stats.allocations, stats.frees);
    assert_eq!(gunzip_sync(&gz, &opts).unwrap(), data);
}

#[test]
fn test_dropping_unfinished_writer_finishes() {
    let table = BlockTable::new();
    let opts = StreamOptions::default();
    let mut sink = Vec::new();
    {
        let mut writer =
            ZlibWriter::with_hooks(&mut sink, Mode::Deflate, &opts, table.clone()).unwrap();
        writer.write_all(b"dropped").unwrap();
    }
    assert_eq!(table.stats().live_blocks, 0);
    assert_eq!(inflate_sync(&sink, &opts).unwrap(), b"dropped");
}
