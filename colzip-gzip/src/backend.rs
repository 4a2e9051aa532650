//! Backend selection for the deflate-family codec.
//!
//! The backend is chosen once per factory invocation from the
//! [`BACKEND_ENV`] environment variable. Selection never fails hard:
//! unrecognized or unavailable selectors log a warning and fall back to
//! the software zlib backend.

use colzip_core::traits::{Codec, CompressionLevel};

use crate::codec::GzipCodec;
use crate::format::StreamFormat;

/// Environment variable naming the backend to use.
///
/// Recognized values (case-insensitive): empty/absent for the software
/// zlib backend, `libdeflate` for the block-only accelerated backend when
/// the `libdeflate` cargo feature is built in.
pub const BACKEND_ENV: &str = "COLZIP_GZIP_BACKEND";

/// The closed set of deflate-family backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Software zlib engine: block and streaming capable. The default.
    Zlib,
    /// libdeflate engine: block capable only.
    #[cfg(feature = "libdeflate")]
    Libdeflate,
}

/// Resolve a backend from a configuration selector.
///
/// Pure over the selector value so callers and tests do not have to go
/// through the process environment; [`make_gzip_codec`] feeds it the
/// [`BACKEND_ENV`] value.
pub fn select_backend(selector: Option<&str>) -> BackendKind {
    let Some(selector) = selector else {
        return BackendKind::Zlib;
    };
    if selector.is_empty() {
        return BackendKind::Zlib;
    }
    if selector.eq_ignore_ascii_case("libdeflate") {
        #[cfg(feature = "libdeflate")]
        {
            return BackendKind::Libdeflate;
        }
        #[cfg(not(feature = "libdeflate"))]
        {
            tracing::warn!(
                selector,
                "support for the libdeflate backend was not built, using zlib"
            );
            return BackendKind::Zlib;
        }
    }
    tracing::warn!(
        selector,
        "invalid backend for {BACKEND_ENV}, only libdeflate is recognized; using zlib"
    );
    BackendKind::Zlib
}

/// Build a deflate-family codec around the configured backend.
///
/// `level` is resolved at construction (use `CompressionLevel::default()`
/// for the backend's recommended default); `format` selects the container
/// variant. The backend comes from [`BACKEND_ENV`], falling back to the
/// software zlib backend on any unrecognized or absent selector.
pub fn make_gzip_codec(level: CompressionLevel, format: StreamFormat) -> Box<dyn Codec> {
    let selector = std::env::var(BACKEND_ENV).ok();
    match select_backend(selector.as_deref()) {
        BackendKind::Zlib => Box::new(GzipCodec::new(level, format)),
        #[cfg(feature = "libdeflate")]
        BackendKind::Libdeflate => Box::new(crate::accel::LibdeflateCodec::new(level, format)),
    }
}
