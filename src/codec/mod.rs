//! Bounded-buffer entry points.
//!
//! Every function here is a single synchronous call: it borrows a source
//! slice and a destination slice, wraps them in bounded streams, drives one
//! freshly created engine, and returns either the number of bytes produced
//! or a [`CodecError`].  The destination's length is its capacity; the
//! returned length is the actual size.  On error the destination's contents
//! are undefined.
//!
//! | Function                    | Input shape                               |
//! |-----------------------------|-------------------------------------------|
//! | [`compress`]                | any bytes; emits raw LZMA, lc3/lp0/pb2    |
//! | [`decompress_ddwrt`]        | `{pb, lc, lp, _}` header + raw LZMA       |
//! | [`decompress_standard`]     | optional `"7zip"` tag + raw LZMA          |
//! | [`decompress_linksys`]      | raw LZMA, lc0/lp0/pb2                     |
//! | [`decompress_squashfs7z`]   | 4 bytes + 5-byte property block + raw LZMA|
//! | [`decompress_explicit`]     | raw LZMA at `offset`, caller parameters   |
//!
//! [`compress`], [`decompress`] and [`decompress_explicit`] have `_with` twins
//! that take the [`CoderEngine`] to drive.
//!
//! [`CoderEngine`]: crate::engine::CoderEngine

pub mod compress;
pub mod decode;
pub mod header;

use std::fmt;

pub use crate::engine::CodecParams;
pub use compress::{compress, compress_bound, compress_with, encoder_profile};
pub use decode::{decompress_explicit, decompress_explicit_with, run_decode};
pub use header::{
    decompress, decompress_ddwrt, decompress_linksys, decompress_squashfs7z,
    decompress_standard, decompress_with, ContainerFormat, HeaderParams,
};

// ─────────────────────────────────────────────────────────────────────────────
// Status codes (numerically identical to zlib's)
// ─────────────────────────────────────────────────────────────────────────────

pub const Z_OK: i32 = 0;
pub const Z_DATA_ERROR: i32 = -3;
pub const Z_MEM_ERROR: i32 = -4;
pub const Z_BUF_ERROR: i32 = -5;

/// Failure status of an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecError {
    /// The engine could not be configured for compression or ran out of memory.
    Memory,
    /// Compression failed for any other reason, e.g. the destination is too small.
    Buffer,
    /// Decompression failed: invalid header, rejected parameters, or corrupt payload.
    Data,
}

impl CodecError {
    /// zlib-compatible integer status.
    pub const fn code(self) -> i32 {
        match self {
            CodecError::Memory => Z_MEM_ERROR,
            CodecError::Buffer => Z_BUF_ERROR,
            CodecError::Data => Z_DATA_ERROR,
        }
    }

    /// zlib-style symbolic name.
    pub const fn name(self) -> &'static str {
        match self {
            CodecError::Memory => "Z_MEM_ERROR",
            CodecError::Buffer => "Z_BUF_ERROR",
            CodecError::Data => "Z_DATA_ERROR",
        }
    }

    /// Inverse of [`code`](Self::code); `None` for `Z_OK` and unknown codes.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            Z_MEM_ERROR => Some(CodecError::Memory),
            Z_BUF_ERROR => Some(CodecError::Buffer),
            Z_DATA_ERROR => Some(CodecError::Data),
            _ => None,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::error::Error for CodecError {}

/// Collapse an entry-point result into its integer status.
#[inline]
pub fn status_code<T>(result: &Result<T, CodecError>) -> i32 {
    match result {
        Ok(_) => Z_OK,
        Err(e) => e.code(),
    }
}
