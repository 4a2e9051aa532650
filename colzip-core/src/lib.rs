//! # ColZip Core
//!
//! Core contracts for the ColZip codec layer.
//!
//! ColZip shrinks and restores byte buffers (column chunks, IPC frames)
//! for a columnar data engine. This crate defines the backend-independent
//! surface; backend crates such as `colzip-gzip` implement it:
//!
//! - [`traits`]: the [`Codec`] block contract and the
//!   [`StreamingCompressor`] / [`StreamingDecompressor`] streaming
//!   contracts, with their progress-result types
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Callers: file-format readers/writers, IPC framing        │
//! ├──────────────────────────────────────────────────────────┤
//! │ Contracts (this crate)                                   │
//! │     Codec, StreamingCompressor, StreamingDecompressor    │
//! ├──────────────────────────────────────────────────────────┤
//! │ Backend crates                                           │
//! │     colzip-gzip: zlib backend, libdeflate backend        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are synchronous, bounded, CPU-only transforms over the
//! supplied byte slices. Codec and streaming instances hold mutable native
//! stream state and are meant to be used by one task at a time; callers
//! needing parallelism construct one instance per task.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod traits;

// Re-exports for convenience
pub use error::{ColzipError, Result};
pub use traits::{
    Algorithm, Codec, CompressResult, CompressionLevel, DecompressResult, EndResult, FlushResult,
    StreamingCompressor, StreamingDecompressor,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ColzipError, Result};
    pub use crate::traits::{
        Algorithm, Codec, CompressionLevel, StreamingCompressor, StreamingDecompressor,
    };
}
