//! Exposed constants.
//!
//! Numeric values match zlib's own constants so that streams produced here
//! stay interoperable with any standard zlib/gzip consumer.

#![allow(missing_docs)]

// Flush modes
pub const Z_NO_FLUSH: i32 = 0;
pub const Z_PARTIAL_FLUSH: i32 = 1;
pub const Z_SYNC_FLUSH: i32 = 2;
pub const Z_FULL_FLUSH: i32 = 3;
pub const Z_FINISH: i32 = 4;
pub const Z_BLOCK: i32 = 5;
pub const Z_TREES: i32 = 6;

// Strategies
pub const Z_FILTERED: i32 = 1;
pub const Z_HUFFMAN_ONLY: i32 = 2;
pub const Z_RLE: i32 = 3;
pub const Z_FIXED: i32 = 4;
pub const Z_DEFAULT_STRATEGY: i32 = 0;

// Compression levels
pub const Z_NO_COMPRESSION: i32 = 0;
pub const Z_BEST_SPEED: i32 = 1;
pub const Z_BEST_COMPRESSION: i32 = 9;
pub const Z_DEFAULT_COMPRESSION: i32 = -1;

// Suggested chunk sizes for stream drivers
pub const Z_MIN_CHUNK: i32 = 64;
pub const Z_MAX_CHUNK: i32 = i32::MAX;
pub const Z_DEFAULT_CHUNK: i32 = 16 * 1024;

pub const Z_MIN_MEMLEVEL: i32 = 1;
pub const Z_MAX_MEMLEVEL: i32 = 9;
pub const Z_DEFAULT_MEMLEVEL: i32 = 8;

pub const Z_MIN_LEVEL: i32 = -1;
pub const Z_MAX_LEVEL: i32 = 9;
pub const Z_DEFAULT_LEVEL: i32 = Z_DEFAULT_COMPRESSION;

pub const Z_MIN_WINDOWBITS: i32 = 8;
pub const Z_MAX_WINDOWBITS: i32 = 15;
pub const Z_DEFAULT_WINDOWBITS: i32 = 15;

// Status codes
pub const Z_OK: i32 = 0;
pub const Z_STREAM_END: i32 = 1;
pub const Z_NEED_DICT: i32 = 2;
pub const Z_ERRNO: i32 = -1;
pub const Z_STREAM_ERROR: i32 = -2;
pub const Z_DATA_ERROR: i32 = -3;
pub const Z_MEM_ERROR: i32 = -4;
pub const Z_BUF_ERROR: i32 = -5;
pub const Z_VERSION_ERROR: i32 = -6;

// Stream modes
pub const DEFLATE: i32 = 1;
pub const INFLATE: i32 = 2;
pub const DEFLATE_RAW: i32 = 3;
pub const INFLATE_RAW: i32 = 4;
pub const GZIP: i32 = 5;
pub const GUNZIP: i32 = 6;

/// The only compression method zlib knows.
pub const Z_DEFLATED: i32 = 8;

/// Every exposed constant as a `(name, value)` pair, in declaration order.
pub fn all() -> &'static [(&'static str, i32)] {
    &[
        ("Z_NO_FLUSH", Z_NO_FLUSH),
        ("Z_PARTIAL_FLUSH", Z_PARTIAL_FLUSH),
        ("Z_SYNC_FLUSH", Z_SYNC_FLUSH),
        ("Z_FULL_FLUSH", Z_FULL_FLUSH),
        ("Z_FINISH", Z_FINISH),
        ("Z_BLOCK", Z_BLOCK),
        ("Z_TREES", Z_TREES),
        ("Z_FILTERED", Z_FILTERED),
        ("Z_HUFFMAN_ONLY", Z_HUFFMAN_ONLY),
        ("Z_RLE", Z_RLE),
        ("Z_FIXED", Z_FIXED),
        ("Z_DEFAULT_STRATEGY", Z_DEFAULT_STRATEGY),
        ("Z_NO_COMPRESSION", Z_NO_COMPRESSION),
        ("Z_BEST_SPEED", Z_BEST_SPEED),
        ("Z_BEST_COMPRESSION", Z_BEST_COMPRESSION),
        ("Z_DEFAULT_COMPRESSION", Z_DEFAULT_COMPRESSION),
        ("Z_MIN_CHUNK", Z_MIN_CHUNK),
        ("Z_MAX_CHUNK", Z_MAX_CHUNK),
        ("Z_DEFAULT_CHUNK", Z_DEFAULT_CHUNK),
        ("Z_MIN_MEMLEVEL", Z_MIN_MEMLEVEL),
        ("Z_MAX_MEMLEVEL", Z_MAX_MEMLEVEL),
        ("Z_DEFAULT_MEMLEVEL", Z_DEFAULT_MEMLEVEL),
        ("Z_MIN_LEVEL", Z_MIN_LEVEL),
        ("Z_MAX_LEVEL", Z_MAX_LEVEL),
        ("Z_DEFAULT_LEVEL", Z_DEFAULT_LEVEL),
        ("Z_MIN_WINDOWBITS", Z_MIN_WINDOWBITS),
        ("Z_MAX_WINDOWBITS", Z_MAX_WINDOWBITS),
        ("Z_DEFAULT_WINDOWBITS", Z_DEFAULT_WINDOWBITS),
        ("Z_OK", Z_OK),
        ("Z_STREAM_END", Z_STREAM_END),
        ("Z_NEED_DICT", Z_NEED_DICT),
        ("Z_ERRNO", Z_ERRNO),
        ("Z_STREAM_ERROR", Z_STREAM_ERROR),
        ("Z_DATA_ERROR", Z_DATA_ERROR),
        ("Z_MEM_ERROR", Z_MEM_ERROR),
        ("Z_BUF_ERROR", Z_BUF_ERROR),
        ("Z_VERSION_ERROR", Z_VERSION_ERROR),
        ("DEFLATE", DEFLATE),
        ("INFLATE", INFLATE),
        ("DEFLATE_RAW", DEFLATE_RAW),
        ("INFLATE_RAW", INFLATE_RAW),
        ("GZIP", GZIP),
        ("GUNZIP", GUNZIP),
    ]
}
