//! One-shot helpers over in-memory buffers.

use crate::write::ZlibWriter;
use oxizlib_core::{Mode, Result, StreamOptions};

/// Run `data` through a fresh stream in `mode` and return the result.
///
/// Bytes following the end of a compressed stream are ignored.
pub fn process_sync(mode: Mode, data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    let mut writer = ZlibWriter::new(Vec::with_capacity(data.len() / 2), mode, options)?;
    writer.feed(data)?;
    writer.finish()
}

/// Compress into the zlib format.
pub fn deflate_sync(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    process_sync(Mode::Deflate, data, options)
}

/// Decompress zlib-format data.
pub fn inflate_sync(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    process_sync(Mode::Inflate, data, options)
}

/// Compress into the gzip format.
pub fn gzip_sync(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    process_sync(Mode::Gzip, data, options)
}

/// Decompress gzip-format data.
pub fn gunzip_sync(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    process_sync(Mode::Gunzip, data, options)
}

/// Compress into a raw DEFLATE bitstream.
pub fn deflate_raw_sync(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    process_sync(Mode::DeflateRaw, data, options)
}

/// Decompress a raw DEFLATE bitstream.
pub fn inflate_raw_sync(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    process_sync(Mode::InflateRaw, data, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxizlib_core::ErrorCode;

    #[test]
    fn test_trailing_bytes_ignored() {
        let opts = StreamOptions::default();
        let mut compressed = deflate_sync(b"payload", &opts).unwrap();
        compressed.extend_from_slice(b"garbage");
        assert_eq!(inflate_sync(&compressed, &opts).unwrap(), b"payload");
    }

    #[test]
    fn test_truncated_input_reported() {
        let opts = StreamOptions::default();
        let data = vec![b'z'; 10_000];
        let compressed = gzip_sync(&data, &opts).unwrap();
        let err = gunzip_sync(&compressed[..compressed.len() - 4], &opts).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::BufError));
    }

    #[test]
    fn test_preset_dictionary_stream_fails() {
        let opts = StreamOptions::default();
        let err = inflate_sync(&[0x78, 0xbb, 0x06, 0x2c, 0x02, 0x15], &opts).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::NeedDict));
    }

    #[test]
    fn test_window_bits_eight_round_trips() {
        let opts = StreamOptions::default().with_window_bits(8);
        let data: Vec<u8> = b"eight bit window ".iter().copied().cycle().take(4000).collect();
        for mode in [Mode::Deflate, Mode::DeflateRaw, Mode::Gzip] {
            let compressed = process_sync(mode, &data, &opts).unwrap();
            let restored = process_sync(mode.inverse(), &compressed, &opts).unwrap();
            assert_eq!(restored, data, "mode {mode}");
        }
    }

    #[test]
    fn test_empty_input() {
        let opts = StreamOptions::default();
        for mode in [Mode::Deflate, Mode::DeflateRaw, Mode::Gzip] {
            let compressed = process_sync(mode, b"", &opts).unwrap();
            assert!(!compressed.is_empty());
            assert!(process_sync(mode.inverse(), &compressed, &opts).unwrap().is_empty());
        }
    }
}
