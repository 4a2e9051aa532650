//! # ColZip Gzip
//!
//! Deflate-family (raw deflate / zlib / gzip) backends for the ColZip
//! codec layer.
//!
//! Two interchangeable backends implement the `colzip-core` contracts:
//!
//! - **zlib** (default): wraps the zlib-compatible engine behind `flate2`;
//!   block and streaming capable.
//! - **libdeflate** (cargo feature `libdeflate`): block-only engine with a
//!   thread-scoped session; streaming factories report
//!   `UnsupportedOperation`.
//!
//! Both emit standard containers, so data compressed by one backend (or by
//! any external deflate tool) is decompressible by the other.
//!
//! The backend is selected at runtime through the `COLZIP_GZIP_BACKEND`
//! environment variable; unrecognized or unavailable selectors log a
//! warning and fall back to zlib.
//!
//! ## Example
//!
//! ```rust
//! use colzip_core::{Codec, CompressionLevel};
//! use colzip_gzip::{make_gzip_codec, StreamFormat};
//!
//! let mut codec = make_gzip_codec(CompressionLevel::default(), StreamFormat::Gzip);
//!
//! let original = b"Hello, World! Hello, World!";
//! let compressed = codec.compress_to_vec(original).unwrap();
//! let decompressed = codec.decompress_to_vec(&compressed, original.len()).unwrap();
//! assert_eq!(&decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "libdeflate")]
pub mod accel;
pub mod backend;
pub mod codec;
pub mod compressor;
pub mod decompressor;
pub mod format;

// Re-exports
#[cfg(feature = "libdeflate")]
pub use accel::LibdeflateCodec;
pub use backend::{make_gzip_codec, select_backend, BackendKind, BACKEND_ENV};
pub use codec::GzipCodec;
pub use compressor::GzipCompressor;
pub use decompressor::GzipDecompressor;
pub use format::{StreamFormat, WINDOW_BITS};
