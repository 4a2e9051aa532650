//! Streaming decompressor over the zlib backend.

use colzip_core::error::{ColzipError, Result};
use colzip_core::traits::DecompressResult;
use colzip_core::StreamingDecompressor;
use flate2::{Decompress, FlushDecompress, Status};

use crate::format::StreamFormat;

/// Incremental deflate-family decoder.
///
/// Created by `GzipCodec::make_decompressor`. Truncated input is handled
/// as partial progress: the caller keeps feeding the remaining bytes into
/// the same instance until `finished` is reported. `reset` rewinds the
/// instance to decode a new, independent logical stream.
pub struct GzipDecompressor {
    stream: Decompress,
    format: StreamFormat,
    finished: bool,
}

impl GzipDecompressor {
    /// Create a streaming decoder for the given format.
    pub fn new(format: StreamFormat) -> Self {
        Self {
            stream: format.inflater(),
            format,
            finished: false,
        }
    }
}

impl StreamingDecompressor for GzipDecompressor {
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<DecompressResult> {
        let before_in = self.stream.total_in();
        let before_out = self.stream.total_out();

        let status = self
            .stream
            .decompress(input, output, FlushDecompress::None)
            .map_err(|e| ColzipError::corrupt(e.to_string()))?;

        // Running out of input or output space is not an error here; the
        // caller resumes with more of either. Only a complete terminal
        // marker flips `finished`.
        self.finished = matches!(status, Status::StreamEnd);

        Ok(DecompressResult {
            bytes_read: (self.stream.total_in() - before_in) as usize,
            bytes_written: (self.stream.total_out() - before_out) as usize,
            finished: self.finished,
        })
    }

    fn reset(&mut self) -> Result<()> {
        self.stream = self.format.inflater();
        self.finished = false;
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
