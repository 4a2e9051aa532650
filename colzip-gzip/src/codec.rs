//! Block codec over the zlib backend.

use colzip_core::error::{ColzipError, Result};
use colzip_core::traits::{Algorithm, Codec, CompressionLevel};
use colzip_core::{StreamingCompressor, StreamingDecompressor};
use flate2::{Compress, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compressor::GzipCompressor;
use crate::decompressor::GzipDecompressor;
use crate::format::StreamFormat;

/// Fixed padding added to the compressed-size bound, for old zlib builds
/// that could exceed their own deflateBound() estimate.
const BOUND_SLACK: usize = 12;

/// Worst-case container overhead: 10-byte gzip header plus 8-byte trailer.
const GZIP_OVERHEAD: usize = 18;

/// Zlib container overhead: 2-byte header plus 4-byte Adler-32 trailer.
const ZLIB_OVERHEAD: usize = 6;

/// The one live backend stream a codec may hold.
///
/// Compress and decompress state are mutually exclusive; switching
/// direction replaces the variant, which drops the previous stream and any
/// uncommitted state it held.
enum Mode {
    Idle,
    Compress(Compress),
    Decompress(Decompress),
}

/// Deflate-family block codec over the software zlib backend.
///
/// Block calls initialize the backend stream lazily on first use and keep
/// it across calls in the same direction; each successful block compress
/// resets the stream so consecutive calls emit independent frames, and
/// each block decompress starts from a fresh decode state.
pub struct GzipCodec {
    format: StreamFormat,
    level: CompressionLevel,
    mode: Mode,
}

impl GzipCodec {
    /// Create a codec for the given level and stream format.
    pub fn new(level: CompressionLevel, format: StreamFormat) -> Self {
        Self {
            format,
            level,
            mode: Mode::Idle,
        }
    }

    /// Get the stream format this codec was constructed with.
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Enter compress mode, tearing down decompress state if present.
    fn deflater(&mut self) -> &mut Compress {
        if !matches!(self.mode, Mode::Compress(_)) {
            self.mode = Mode::Compress(self.format.deflater(self.level));
        }
        match &mut self.mode {
            Mode::Compress(stream) => stream,
            _ => unreachable!("compress mode was just installed"),
        }
    }

    /// Enter decompress mode with fresh decode state for one block,
    /// tearing down compress state if present.
    fn fresh_inflater(&mut self) -> &mut Decompress {
        self.mode = Mode::Decompress(self.format.inflater());
        match &mut self.mode {
            Mode::Decompress(stream) => stream,
            _ => unreachable!("decompress mode was just installed"),
        }
    }
}

impl Codec for GzipCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gzip
    }

    fn compression_level(&self) -> CompressionLevel {
        self.level
    }

    fn init(&mut self) -> Result<()> {
        // Constructing both directions surfaces any backend setup failure
        // before data flows; the codec is left holding decode state.
        let _ = self.format.deflater(self.level);
        self.mode = Mode::Decompress(self.format.inflater());
        Ok(())
    }

    fn max_compressed_len(&self, input_len: usize) -> usize {
        // deflateBound() for a stream that degrades to stored blocks,
        // independent of level.
        let bound = input_len + (input_len >> 12) + (input_len >> 14) + (input_len >> 25) + 13;
        let wrapper = match self.format {
            StreamFormat::Raw => 0,
            StreamFormat::Zlib => ZLIB_OVERHEAD,
            StreamFormat::Gzip => GZIP_OVERHEAD,
        };
        bound + wrapper + BOUND_SLACK
    }

    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let stream = self.deflater();
        let before_out = stream.total_out();

        match stream.compress(input, output, FlushCompress::Finish) {
            Ok(Status::StreamEnd) => {
                let written = (stream.total_out() - before_out) as usize;
                // Rewind so the next block call emits an independent frame
                // with no residual state from this one.
                stream.reset();
                Ok(written)
            }
            // Finish without StreamEnd means the output buffer could not
            // hold the whole frame. Rewind so a retry with a larger buffer
            // starts fresh.
            Ok(Status::Ok | Status::BufError) => {
                stream.reset();
                Err(ColzipError::buffer_too_small(input.len(), output.len()))
            }
            Err(e) => {
                self.mode = Mode::Idle;
                Err(ColzipError::corrupt(e.to_string()))
            }
        }
    }

    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        if output.is_empty() {
            // zlib rejects a null output pointer even with zero available
            // space. The caller has explicitly requested no output, which
            // is not an error regardless of what `input` encodes.
            return Ok(0);
        }

        let stream = self.fresh_inflater();
        match stream.decompress(input, output, FlushDecompress::Finish) {
            Ok(Status::StreamEnd) => Ok(stream.total_out() as usize),
            Ok(Status::Ok | Status::BufError) => {
                if stream.total_out() as usize == output.len() {
                    Err(ColzipError::buffer_too_small(input.len(), output.len()))
                } else {
                    // Output space remained, so the stream itself ended
                    // before its terminal marker.
                    Err(ColzipError::corrupt("truncated deflate stream"))
                }
            }
            Err(e) => Err(ColzipError::corrupt(e.to_string())),
        }
    }

    fn make_compressor(&self) -> Result<Box<dyn StreamingCompressor>> {
        Ok(Box::new(GzipCompressor::new(self.level, self.format)))
    }

    fn make_decompressor(&self) -> Result<Box<dyn StreamingDecompressor>> {
        Ok(Box::new(GzipDecompressor::new(self.format)))
    }
}
