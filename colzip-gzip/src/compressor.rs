//! Streaming compressor over the zlib backend.

use colzip_core::error::{ColzipError, Result};
use colzip_core::traits::{CompressResult, CompressionLevel, EndResult, FlushResult};
use colzip_core::StreamingCompressor;
use flate2::{Compress, FlushCompress, Status};

use crate::format::StreamFormat;

/// Incremental deflate-family encoder.
///
/// Created by `GzipCodec::make_compressor`; the window-bits configuration
/// for the codec's [`StreamFormat`] is selected at construction. The
/// underlying stream is released when `end` reports completion, or on drop,
/// whichever comes first.
pub struct GzipCompressor {
    /// Live backend stream; `None` once the stream has been finalized.
    stream: Option<Compress>,
}

impl GzipCompressor {
    /// Create a streaming encoder for the given level and format.
    pub fn new(level: CompressionLevel, format: StreamFormat) -> Self {
        Self {
            stream: Some(format.deflater(level)),
        }
    }

    fn stream_mut(&mut self) -> Result<&mut Compress> {
        self.stream.as_mut().ok_or(ColzipError::StreamFinished)
    }
}

impl StreamingCompressor for GzipCompressor {
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<CompressResult> {
        let stream = self.stream_mut()?;
        let before_in = stream.total_in();
        let before_out = stream.total_out();

        let status = stream
            .compress(input, output, FlushCompress::None)
            .map_err(|e| ColzipError::corrupt(e.to_string()))?;

        match status {
            // Ok: some progress was made. BufError: no progress was
            // possible; the caller must drain or enlarge the output buffer
            // and retry. Neither is an error.
            Status::Ok | Status::BufError => Ok(CompressResult {
                bytes_read: (stream.total_in() - before_in) as usize,
                bytes_written: (stream.total_out() - before_out) as usize,
            }),
            Status::StreamEnd => {
                unreachable!("deflate reported end of stream without a finish request")
            }
        }
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<FlushResult> {
        let stream = self.stream_mut()?;
        let before_out = stream.total_out();

        stream
            .compress(&[], output, FlushCompress::Sync)
            .map_err(|e| ColzipError::corrupt(e.to_string()))?;

        let bytes_written = (stream.total_out() - before_out) as usize;
        // A sync flush that fills the whole output buffer may have more
        // pending data; it must be called again with fresh output space
        // until it leaves room behind.
        Ok(FlushResult {
            bytes_written,
            needs_more_output: bytes_written == output.len(),
        })
    }

    fn end(&mut self, output: &mut [u8]) -> Result<EndResult> {
        let stream = self.stream_mut()?;
        let before_out = stream.total_out();

        let status = stream
            .compress(&[], output, FlushCompress::Finish)
            .map_err(|e| ColzipError::corrupt(e.to_string()))?;

        let bytes_written = (stream.total_out() - before_out) as usize;
        match status {
            Status::StreamEnd => {
                // Trailer fully emitted; release the backend stream.
                self.stream = None;
                Ok(EndResult {
                    bytes_written,
                    should_retry: false,
                })
            }
            Status::Ok | Status::BufError => Ok(EndResult {
                bytes_written,
                should_retry: true,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_progress_is_not_an_error() {
        let mut comp = GzipCompressor::new(CompressionLevel::DEFAULT, StreamFormat::Zlib);
        // Zero-length output: nothing can be consumed or produced.
        let result = comp
            .compress(b"some input data", &mut [])
            .expect("compress failed");
        assert_eq!(result.bytes_read, 0);
        assert_eq!(result.bytes_written, 0);
    }

    #[test]
    fn test_end_releases_stream() {
        let mut comp = GzipCompressor::new(CompressionLevel::DEFAULT, StreamFormat::Raw);
        let mut out = vec![0u8; 128];
        let r = comp.compress(b"abc", &mut out).expect("compress failed");
        assert_eq!(r.bytes_read, 3);

        let mut trailer = vec![0u8; 128];
        let end = comp.end(&mut trailer).expect("end failed");
        assert!(!end.should_retry);

        // Every call after completed finalization is invalid.
        assert!(matches!(
            comp.end(&mut trailer),
            Err(ColzipError::StreamFinished)
        ));
        assert!(matches!(
            comp.compress(b"more", &mut out),
            Err(ColzipError::StreamFinished)
        ));
    }

    #[test]
    fn test_end_retries_with_tiny_output() {
        let mut comp = GzipCompressor::new(CompressionLevel::DEFAULT, StreamFormat::Gzip);
        let data = vec![7u8; 4096];
        let mut sink = vec![0u8; 4096];
        let r = comp.compress(&data, &mut sink).expect("compress failed");
        assert_eq!(r.bytes_read, data.len());

        // Force the finish loop through many one-byte output buffers.
        let mut rounds = 0;
        loop {
            let mut byte = [0u8; 1];
            let end = comp.end(&mut byte).expect("end failed");
            rounds += 1;
            assert!(rounds < 10_000, "finish loop did not terminate");
            if !end.should_retry {
                break;
            }
        }
        // The gzip trailer alone is 8 bytes, so several rounds were needed.
        assert!(rounds > 1);
    }
}
