//! Core traits for block and streaming codec operations.
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Codec  (block compress/decompress, owns one backend resource)
//!   ├── make_compressor()   -> StreamingCompressor  (incremental encode)
//!   └── make_decompressor() -> StreamingDecompressor (incremental decode)
//! ```
//!
//! A [`Codec`] performs one-shot transforms over whole buffers. The
//! streaming objects it produces process bounded buffer slices in a
//! caller-driven loop: the caller supplies fresh input/output slices each
//! call until all input is consumed and (for compression) the stream is
//! finalized.

use crate::error::Result;

/// Compression algorithm family of a codec.
///
/// Only the deflate family ([`Algorithm::Gzip`]) is implemented in this
/// workspace; the remaining variants name the id space that additional
/// backend crates plug into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Deflate family: raw deflate, zlib-wrapped, or gzip-wrapped streams.
    Gzip,
    /// LZ4 block/frame compression.
    Lz4,
    /// Zstandard compression.
    Zstd,
    /// Snappy compression.
    Snappy,
    /// Brotli compression.
    Brotli,
}

impl Algorithm {
    /// Lowercase name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Lz4 => "lz4",
            Self::Zstd => "zstd",
            Self::Snappy => "snappy",
            Self::Brotli => "brotli",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compression level for algorithms that support it.
///
/// Resolved once at codec construction; every stream the codec initializes
/// uses the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// No compression (store only).
    pub const NONE: Self = Self(0);
    /// Fastest compression.
    pub const FAST: Self = Self(1);
    /// Default compression (balanced).
    pub const DEFAULT: Self = Self(6);
    /// Best compression (slowest).
    pub const BEST: Self = Self(9);

    /// Create a custom compression level (0-9, clamped).
    pub fn new(level: u8) -> Self {
        Self(level.min(9))
    }

    /// Get the level value.
    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for CompressionLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

/// Partial progress of one streaming compress call.
///
/// Both fields may be smaller than the buffers supplied; a result of
/// `(0, 0)` is not an error, it means the output buffer must be drained or
/// enlarged before retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressResult {
    /// Bytes consumed from the input slice.
    pub bytes_read: usize,
    /// Bytes written to the output slice.
    pub bytes_written: usize,
}

/// Partial progress of one streaming decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressResult {
    /// Bytes consumed from the input slice.
    pub bytes_read: usize,
    /// Bytes written to the output slice.
    pub bytes_written: usize,
    /// True only when the backend has consumed a complete end-of-stream
    /// marker for the current logical stream.
    pub finished: bool,
}

/// Outcome of a streaming flush (sync point) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushResult {
    /// Bytes written to the output slice.
    pub bytes_written: usize,
    /// True when flush must be called again with a fresh or larger output
    /// buffer before more input is supplied.
    pub needs_more_output: bool,
}

/// Outcome of a streaming finalize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndResult {
    /// Bytes written to the output slice.
    pub bytes_written: usize,
    /// True when finalization is incomplete and `end` must be called again
    /// with a fresh output buffer. The native resource is released only
    /// once this is false.
    pub should_retry: bool,
}

/// Stateful incremental encoder over one backend stream.
///
/// Calls must be sequenced by the caller: any number of `compress` and
/// `flush` calls, then `end` until it reports completion. Instances are not
/// safe for concurrent use from multiple threads.
pub trait StreamingCompressor {
    /// Compress a chunk of data.
    ///
    /// Consumes as much of `input` as fits while producing as much of
    /// `output` as fits. Never reads past `input` nor writes past `output`.
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<CompressResult>;

    /// Force all buffered-but-unemitted compressed data up to a
    /// synchronization point into `output` without terminating the stream.
    ///
    /// Repeat until [`FlushResult::needs_more_output`] is false.
    fn flush(&mut self, output: &mut [u8]) -> Result<FlushResult>;

    /// Emit the final stream trailer.
    ///
    /// Repeat with fresh output buffers until [`EndResult::should_retry`]
    /// is false, at which point the backend resource is released and
    /// further calls return [`ColzipError::StreamFinished`](crate::error::ColzipError::StreamFinished).
    fn end(&mut self, output: &mut [u8]) -> Result<EndResult>;
}

/// Stateful incremental decoder over one backend stream.
pub trait StreamingDecompressor {
    /// Decompress a chunk of data.
    ///
    /// Truncated input is not an error: the call reports partial progress
    /// with `finished == false` and the caller supplies more input in a
    /// subsequent call on the same instance.
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<DecompressResult>;

    /// Rewind to the start of a new, independent logical stream.
    fn reset(&mut self) -> Result<()>;

    /// Whether the last `decompress` call consumed a complete end-of-stream
    /// marker. Does not invoke the backend.
    fn is_finished(&self) -> bool;
}

/// A block codec: one-shot compress/decompress over whole buffers, plus
/// factories for the streaming objects above.
///
/// A codec owns at most one live backend stream; switching between block
/// compress and block decompress calls tears down the other direction's
/// stream and initializes fresh state. Instances are not safe for
/// concurrent use from multiple threads; construct one per task.
pub trait Codec {
    /// Get the compression algorithm family.
    fn algorithm(&self) -> Algorithm;

    /// Get the configured compression level.
    fn compression_level(&self) -> CompressionLevel;

    /// Eagerly prepare both compress- and decompress-capable state,
    /// surfacing backend setup failures before any data flows.
    ///
    /// Optional: block calls initialize lazily on first use.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Pessimistic upper bound on compressed size for `input_len` input
    /// bytes. An actual `compress` call with that input length never
    /// produces more bytes than this on any supported backend.
    fn max_compressed_len(&self, input_len: usize) -> usize;

    /// One-shot compress; the whole input is consumed in this call.
    ///
    /// Returns the number of bytes written. Fails with
    /// [`ColzipError::BufferTooSmall`](crate::error::ColzipError::BufferTooSmall) if the backend runs out of output
    /// space; never silently truncates. On success the internal stream is
    /// reset, so the next call emits an independent frame.
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// One-shot decompress; `output` must be large enough for the full
    /// decompressed payload.
    ///
    /// An empty `output` returns `Ok(0)` without invoking the backend,
    /// even if `input` encodes a nonzero-length payload: the caller has
    /// explicitly requested no output.
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Build and initialize a streaming encoder sharing this codec's level
    /// and format.
    ///
    /// Fails with [`ColzipError::UnsupportedOperation`](crate::error::ColzipError::UnsupportedOperation) if the active
    /// backend has no streaming encode capability.
    fn make_compressor(&self) -> Result<Box<dyn StreamingCompressor>>;

    /// Build and initialize a streaming decoder sharing this codec's
    /// format.
    fn make_decompressor(&self) -> Result<Box<dyn StreamingDecompressor>>;

    /// Compress into a freshly allocated vector (convenience method).
    fn compress_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.max_compressed_len(input.len())];
        let written = self.compress(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }

    /// Decompress into a freshly allocated vector of `uncompressed_len`
    /// bytes (convenience method).
    fn decompress_to_vec(&mut self, input: &[u8], uncompressed_len: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; uncompressed_len];
        let written = self.decompress(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_level() {
        assert_eq!(CompressionLevel::NONE.level(), 0);
        assert_eq!(CompressionLevel::FAST.level(), 1);
        assert_eq!(CompressionLevel::DEFAULT.level(), 6);
        assert_eq!(CompressionLevel::BEST.level(), 9);

        // Test clamping
        assert_eq!(CompressionLevel::new(100).level(), 9);
        assert_eq!(CompressionLevel::from(7u8).level(), 7);
    }

    #[test]
    fn test_compression_level_default() {
        assert_eq!(CompressionLevel::default(), CompressionLevel::DEFAULT);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::Gzip.name(), "gzip");
        assert_eq!(Algorithm::Zstd.to_string(), "zstd");
    }
}
