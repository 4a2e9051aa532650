//! Block-only codec over the libdeflate engine.
//!
//! libdeflate works on whole buffers with no stream state, which makes it
//! considerably faster than zlib for block workloads but leaves it without
//! a streaming mode: the streaming factory methods report
//! `UnsupportedOperation` instead of degrading to block calls.
//!
//! Engine setup is amortized through a thread-scoped session: one
//! compressor/decompressor pair per thread, reused across codec lifetimes
//! on that thread and rebuilt only when the requested level changes. The
//! session never crosses threads.

use std::cell::RefCell;

use colzip_core::error::{ColzipError, Result};
use colzip_core::traits::{Algorithm, Codec, CompressionLevel};
use colzip_core::{StreamingCompressor, StreamingDecompressor};
use libdeflater::{
    CompressionError, CompressionLvl, Compressor, DecompressionError, Decompressor,
};

use crate::format::StreamFormat;

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

/// Thread-scoped engine handles, independent of any single codec lifetime.
struct Session {
    level: CompressionLevel,
    compressor: Compressor,
    decompressor: Decompressor,
}

impl Session {
    fn new(level: CompressionLevel) -> Self {
        // Levels 0-9 are all valid for libdeflate (its own range extends
        // to 12), so this cannot miss; fall back to the engine default
        // rather than unwrapping.
        let lvl = CompressionLvl::new(i32::from(level.level()))
            .unwrap_or_else(|_| CompressionLvl::default());
        Self {
            level,
            compressor: Compressor::new(lvl),
            decompressor: Decompressor::new(),
        }
    }
}

/// Run `f` against this thread's session, (re)building it on first use or
/// on a level change.
fn with_session<R>(level: CompressionLevel, f: impl FnOnce(&mut Session) -> R) -> R {
    SESSION.with(|slot| {
        let mut slot = slot.borrow_mut();
        let session = match slot.as_mut() {
            Some(session) if session.level == level => session,
            _ => slot.insert(Session::new(level)),
        };
        f(session)
    })
}

/// Deflate-family block codec over the libdeflate engine.
///
/// Produces and consumes the same standard raw/zlib/gzip containers as
/// [`crate::codec::GzipCodec`]; data compressed by one backend is
/// decompressible by the other.
pub struct LibdeflateCodec {
    format: StreamFormat,
    level: CompressionLevel,
}

impl LibdeflateCodec {
    /// Create a codec for the given level and stream format.
    pub fn new(level: CompressionLevel, format: StreamFormat) -> Self {
        Self { format, level }
    }

    /// Get the stream format this codec was constructed with.
    pub fn format(&self) -> StreamFormat {
        self.format
    }
}

impl Codec for LibdeflateCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn compression_level(&self) -> CompressionLevel {
        self.level
    }

    fn init(&mut self) -> Result<()> {
        // Force session construction so engine setup cost is paid (and any
        // failure would surface) before data flows.
        with_session(self.level, |_| ());
        Ok(())
    }

    fn max_compressed_len(&self, input_len: usize) -> usize {
        with_session(self.level, |session| match self.format {
            StreamFormat::Raw => session.compressor.deflate_compress_bound(input_len),
            StreamFormat::Zlib => session.compressor.zlib_compress_bound(input_len),
            StreamFormat::Gzip => session.compressor.gzip_compress_bound(input_len),
        })
    }

    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        with_session(self.level, |session| {
            let result = match self.format {
                StreamFormat::Raw => session.compressor.deflate_compress(input, output),
                StreamFormat::Zlib => session.compressor.zlib_compress(input, output),
                StreamFormat::Gzip => session.compressor.gzip_compress(input, output),
            };
            result.map_err(|e| match e {
                CompressionError::InsufficientSpace => {
                    ColzipError::buffer_too_small(input.len(), output.len())
                }
            })
        })
    }

    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        if output.is_empty() {
            // Explicit no-output request; not an error regardless of what
            // `input` encodes.
            return Ok(0);
        }
        with_session(self.level, |session| {
            let result = match self.format {
                StreamFormat::Raw => session.decompressor.deflate_decompress(input, output),
                StreamFormat::Zlib => session.decompressor.zlib_decompress(input, output),
                StreamFormat::Gzip => session.decompressor.gzip_decompress(input, output),
            };
            result.map_err(|e| match e {
                DecompressionError::InsufficientSpace => {
                    ColzipError::buffer_too_small(input.len(), output.len())
                }
                DecompressionError::BadData => {
                    ColzipError::corrupt("libdeflate rejected the stream as malformed")
                }
            })
        })
    }

    fn make_compressor(&self) -> Result<Box<dyn StreamingCompressor>> {
        Err(ColzipError::unsupported(
            "streaming compression with the libdeflate backend",
        ))
    }

    fn make_decompressor(&self) -> Result<Box<dyn StreamingDecompressor>> {
        Err(ColzipError::unsupported(
            "streaming decompression with the libdeflate backend",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::GzipCodec;

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_block_roundtrip_all_formats() {
        for format in [StreamFormat::Raw, StreamFormat::Zlib, StreamFormat::Gzip] {
            let mut codec = LibdeflateCodec::new(CompressionLevel::DEFAULT, format);
            let data = patterned(10_000);
            let compressed = codec.compress_to_vec(&data).expect("compress failed");
            assert!(compressed.len() <= codec.max_compressed_len(data.len()));
            let decompressed = codec
                .decompress_to_vec(&compressed, data.len())
                .expect("decompress failed");
            assert_eq!(decompressed, data, "{format} roundtrip failed");
        }
    }

    #[test]
    fn test_interop_with_zlib_backend() {
        // Frames are standard containers, interchangeable across backends.
        let data = patterned(5000);

        let mut accel = LibdeflateCodec::new(CompressionLevel::DEFAULT, StreamFormat::Gzip);
        let mut soft = GzipCodec::new(CompressionLevel::DEFAULT, StreamFormat::Gzip);

        let compressed = accel.compress_to_vec(&data).expect("accel compress failed");
        let decompressed = soft
            .decompress_to_vec(&compressed, data.len())
            .expect("soft decompress failed");
        assert_eq!(decompressed, data);

        let compressed = soft.compress_to_vec(&data).expect("soft compress failed");
        let decompressed = accel
            .decompress_to_vec(&compressed, data.len())
            .expect("accel decompress failed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_streaming_is_unsupported() {
        let codec = LibdeflateCodec::new(CompressionLevel::DEFAULT, StreamFormat::Gzip);
        assert!(matches!(
            codec.make_compressor(),
            Err(ColzipError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            codec.make_decompressor(),
            Err(ColzipError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_session_survives_codec_lifetimes() {
        // Two codecs on the same thread share the session; both work.
        let data = patterned(1000);
        let compressed = {
            let mut first = LibdeflateCodec::new(CompressionLevel::FAST, StreamFormat::Zlib);
            first.compress_to_vec(&data).expect("compress failed")
        };
        let mut second = LibdeflateCodec::new(CompressionLevel::FAST, StreamFormat::Zlib);
        let decompressed = second
            .decompress_to_vec(&compressed, data.len())
            .expect("decompress failed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_decompress_buffer_too_small() {
        let mut codec = LibdeflateCodec::new(CompressionLevel::DEFAULT, StreamFormat::Gzip);
        let data = patterned(4096);
        let compressed = codec.compress_to_vec(&data).expect("compress failed");

        let mut short = vec![0u8; data.len() - 1];
        let result = codec.decompress(&compressed, &mut short);
        assert!(matches!(result, Err(ColzipError::BufferTooSmall { .. })));
    }
}
