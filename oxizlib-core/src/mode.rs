//! Stream modes and the window-bits transform that selects framing.
//!
//! zlib repurposes the window-bits parameter as a framing selector:
//!
//! | Mode                      | Effective window bits |
//! |---------------------------|-----------------------|
//! | `Deflate` / `Inflate`     | `w` (zlib wrapper)    |
//! | `DeflateRaw` / `InflateRaw` | `-w` (no wrapper)   |
//! | `Gzip` / `Gunzip`         | `w + 16` (gzip wrapper) |
//!
//! A base of 8 is raised to 9 for every mode. zlib's compressor already
//! writes a 9-bit window into zlib headers when asked for 8 and refuses 8
//! for raw and gzip framing, so the bump keeps each mode able to decode what
//! its inverse produced.

use crate::constants::{DEFLATE, DEFLATE_RAW, GUNZIP, GZIP, INFLATE, INFLATE_RAW, Z_MIN_WINDOWBITS};
use crate::error::{Result, ZlibError};
use std::fmt;

/// Framing and direction of a stream. Fixed for the stream's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Mode {
    /// Compress into a zlib-wrapped stream.
    Deflate = DEFLATE,
    /// Decompress a zlib-wrapped stream.
    Inflate = INFLATE,
    /// Compress into a raw DEFLATE bitstream.
    DeflateRaw = DEFLATE_RAW,
    /// Decompress a raw DEFLATE bitstream.
    InflateRaw = INFLATE_RAW,
    /// Compress into a gzip-framed stream.
    Gzip = GZIP,
    /// Decompress a gzip-framed stream.
    Gunzip = GUNZIP,
}

impl Mode {
    /// All modes, in numeric order.
    pub const ALL: [Mode; 6] = [
        Mode::Deflate,
        Mode::Inflate,
        Mode::DeflateRaw,
        Mode::InflateRaw,
        Mode::Gzip,
        Mode::Gunzip,
    ];

    /// Whether this mode drives the compressor.
    pub fn is_compress(&self) -> bool {
        matches!(self, Self::Deflate | Self::DeflateRaw | Self::Gzip)
    }

    /// Whether this mode produces or consumes a raw bitstream.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::DeflateRaw | Self::InflateRaw)
    }

    /// Whether this mode produces or consumes gzip framing.
    pub fn is_gzip(&self) -> bool {
        matches!(self, Self::Gzip | Self::Gunzip)
    }

    /// The mode running in the opposite direction with the same framing.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Deflate => Self::Inflate,
            Self::Inflate => Self::Deflate,
            Self::DeflateRaw => Self::InflateRaw,
            Self::InflateRaw => Self::DeflateRaw,
            Self::Gzip => Self::Gunzip,
            Self::Gunzip => Self::Gzip,
        }
    }

    /// Window bits handed to the codec for a base window size of `window_bits`.
    pub fn effective_window_bits(&self, window_bits: i32) -> i32 {
        let window_bits = if window_bits == Z_MIN_WINDOWBITS {
            window_bits + 1
        } else {
            window_bits
        };
        if self.is_gzip() {
            window_bits + 16
        } else if self.is_raw() {
            -window_bits
        } else {
            window_bits
        }
    }

    /// Numeric identifier of the mode.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Name used in diagnostics and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deflate => "deflate",
            Self::Inflate => "inflate",
            Self::DeflateRaw => "deflate-raw",
            Self::InflateRaw => "inflate-raw",
            Self::Gzip => "gzip",
            Self::Gunzip => "gunzip",
        }
    }
}

impl TryFrom<i32> for Mode {
    type Error = ZlibError;

    fn try_from(value: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_i32() == value)
            .ok_or_else(|| ZlibError::invalid_parameter("mode", value.into(), 1, 6))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bits_transform() {
        assert_eq!(Mode::Deflate.effective_window_bits(15), 15);
        assert_eq!(Mode::Inflate.effective_window_bits(12), 12);
        assert_eq!(Mode::DeflateRaw.effective_window_bits(15), -15);
        assert_eq!(Mode::InflateRaw.effective_window_bits(9), -9);
        assert_eq!(Mode::Gzip.effective_window_bits(15), 31);
        assert_eq!(Mode::Gunzip.effective_window_bits(10), 26);
    }

    #[test]
    fn test_window_bits_eight_raised_to_nine() {
        assert_eq!(Mode::Deflate.effective_window_bits(8), 9);
        assert_eq!(Mode::Inflate.effective_window_bits(8), 9);
        assert_eq!(Mode::DeflateRaw.effective_window_bits(8), -9);
        assert_eq!(Mode::InflateRaw.effective_window_bits(8), -9);
        assert_eq!(Mode::Gzip.effective_window_bits(8), 25);
        assert_eq!(Mode::Gunzip.effective_window_bits(8), 25);
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(Mode::Deflate.as_i32(), 1);
        assert_eq!(Mode::Gunzip.as_i32(), 6);
        for mode in Mode::ALL {
            assert_eq!(Mode::try_from(mode.as_i32()).unwrap(), mode);
        }
        assert!(Mode::try_from(0).is_err());
        assert!(Mode::try_from(7).is_err());
    }

    #[test]
    fn test_direction_and_inverse() {
        for mode in Mode::ALL {
            assert_ne!(mode.is_compress(), mode.inverse().is_compress());
            assert_eq!(mode.inverse().inverse(), mode);
            assert_eq!(mode.is_raw(), mode.inverse().is_raw());
            assert_eq!(mode.is_gzip(), mode.inverse().is_gzip());
        }
    }
}
