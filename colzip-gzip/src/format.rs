//! Stream-format variants of the deflate family and their window-bits
//! configuration.
//!
//! All three variants carry the same raw DEFLATE payload (RFC 1951) and
//! differ only in the container around it:
//!
//! ```text
//! Raw:   [ deflate blocks ]
//! Zlib:  [CMF|FLG] [ deflate blocks ] [ADLER32]          (RFC 1950)
//! Gzip:  [10-byte header] [ deflate blocks ] [CRC32|ISIZE] (RFC 1952)
//! ```
//!
//! In zlib terms the variant is selected through the window-bits parameter:
//! raw deflate uses the negated ("no header") window setting, zlib the
//! plain setting, and gzip adds a header/trailer flag on top of the plain
//! setting. flate2 exposes the same three configurations through its
//! constructor surface, which is what the helpers here map onto.

use colzip_core::CompressionLevel;
use flate2::{Compress, Compression, Decompress};

/// Maximum deflate window size (32 KiB), used for every stream.
pub const WINDOW_BITS: u8 = 15;

/// Container variant for a deflate-family stream.
///
/// Immutable once a codec is constructed; every stream the codec or its
/// streaming objects initialize uses the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamFormat {
    /// Raw deflate stream with no header or trailer.
    Raw,
    /// Zlib-wrapped stream: short header plus Adler-32 trailer.
    Zlib,
    /// Gzip-wrapped stream: full header plus CRC-32/length trailer.
    #[default]
    Gzip,
}

impl StreamFormat {
    /// Lowercase name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Raw => "deflate",
            Self::Zlib => "zlib",
            Self::Gzip => "gzip",
        }
    }

    /// Build a compress stream for this format at the given level.
    pub(crate) fn deflater(self, level: CompressionLevel) -> Compress {
        let level = Compression::new(u32::from(level.level()));
        match self {
            Self::Raw => Compress::new_with_window_bits(level, false, WINDOW_BITS),
            Self::Zlib => Compress::new_with_window_bits(level, true, WINDOW_BITS),
            Self::Gzip => Compress::new_gzip(level, WINDOW_BITS),
        }
    }

    /// Build a decompress stream for this format.
    pub(crate) fn inflater(self) -> Decompress {
        match self {
            Self::Raw => Decompress::new_with_window_bits(false, WINDOW_BITS),
            Self::Zlib => Decompress::new_with_window_bits(true, WINDOW_BITS),
            Self::Gzip => Decompress::new_gzip(WINDOW_BITS),
        }
    }
}

impl std::fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(StreamFormat::Raw.name(), "deflate");
        assert_eq!(StreamFormat::Zlib.name(), "zlib");
        assert_eq!(StreamFormat::Gzip.to_string(), "gzip");
    }

    #[test]
    fn test_format_default() {
        assert_eq!(StreamFormat::default(), StreamFormat::Gzip);
    }
}
