//! Property-based round-trip tests.
//!
//! Compressing arbitrary bytes and decompressing the result with the
//! matching mode must reproduce the input for every framing and a spread of
//! codec parameters.

use oxizlib_core::{Mode, StreamOptions, Strategy as CodecStrategy};
use oxizlib_stream::{ZlibWriter, process_sync};
use proptest::prelude::*;
use std::io::Write;

fn compress_mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Deflate), Just(Mode::DeflateRaw), Just(Mode::Gzip)]
}

fn codec_strategy_strategy() -> impl Strategy<Value = CodecStrategy> {
    prop_oneof![
        Just(CodecStrategy::Default),
        Just(CodecStrategy::Filtered),
        Just(CodecStrategy::HuffmanOnly),
        Just(CodecStrategy::Rle),
        Just(CodecStrategy::Fixed),
    ]
}

fn options_strategy() -> impl Strategy<Value = StreamOptions> {
    (-1i32..=9, 8i32..=15, 1i32..=9, codec_strategy_strategy(), 64usize..=4096).prop_map(
        |(level, window_bits, mem_level, strategy, chunk_size)| {
            StreamOptions::new()
                .with_level(level)
                .with_window_bits(window_bits)
                .with_mem_level(mem_level)
                .with_strategy(strategy)
                .with_chunk_size(chunk_size)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: decompress(compress(B)) == B for all framings.
    #[test]
    fn prop_round_trip(
        data in prop::collection::vec(any::<u8>(), 0..8192),
        mode in compress_mode_strategy(),
        opts in options_strategy(),
    ) {
        let compressed = process_sync(mode, &data, &opts).unwrap();
        prop_assert_eq!(compressed.starts_with(&[0x1f, 0x8b]), mode == Mode::Gzip);
        let restored = process_sync(mode.inverse(), &compressed, &opts).unwrap();
        prop_assert_eq!(restored, data);
    }

    /// Property: splitting writes arbitrarily does not change the result.
    #[test]
    fn prop_split_writes(
        data in prop::collection::vec(any::<u8>(), 1..4096),
        split in 1usize..512,
        mode in compress_mode_strategy(),
    ) {
        let opts = StreamOptions::default().with_chunk_size(64);
        let mut writer = ZlibWriter::new(Vec::new(), mode, &opts).unwrap();
        for piece in data.chunks(split) {
            writer.write_all(piece).unwrap();
        }
        let compressed = writer.finish().unwrap();

        let mut reader = ZlibWriter::new(Vec::new(), mode.inverse(), &opts).unwrap();
        for piece in compressed.chunks(split) {
            reader.write_all(piece).unwrap();
        }
        prop_assert_eq!(reader.finish().unwrap(), data);
    }
}
