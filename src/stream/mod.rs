//! Bounded in-memory streams handed to the coder engine.
//!
//! Both adapters borrow a caller-owned buffer for the duration of a single
//! entry-point call and never allocate, grow, or outlive it:
//!
//! | Type             | Direction | Bound            | `End` origin      |
//! |------------------|-----------|------------------|-------------------|
//! | [`InputStream`]  | engine pulls | `size`        | `size`            |
//! | [`OutputStream`] | engine pushes | `capacity`   | `written_size`    |
//!
//! Reads and writes clamp silently at the bound and report the number of
//! bytes actually transferred.  Seeks outside the bound fail with
//! [`StreamError::SeekOutOfRange`] and leave the cursor where it was.
//!
//! Both types also implement the `std::io` traits so the engine can drive them
//! through ordinary `Read` / `Write` / `Seek` bounds.

pub mod input;
pub mod output;

use std::fmt;
use std::io;

pub use input::InputStream;
pub use output::OutputStream;

// ─────────────────────────────────────────────────────────────────────────────
// Seek origin
// ─────────────────────────────────────────────────────────────────────────────

/// Reference point for [`InputStream::seek`] / [`OutputStream::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    /// Absolute position from the start of the buffer.
    Start,
    /// Relative to the current cursor.
    Current,
    /// Relative to the logical end: `size` for input, `written_size` for output.
    End,
}

impl SeekOrigin {
    /// Split a `std::io::SeekFrom` into `(delta, origin)`.
    ///
    /// Returns `None` for a `Start` position that does not fit in an `i64`;
    /// such a position is beyond any in-memory bound anyway.
    pub fn from_seek_from(pos: io::SeekFrom) -> Option<(i64, SeekOrigin)> {
        match pos {
            io::SeekFrom::Start(n) => i64::try_from(n).ok().map(|d| (d, SeekOrigin::Start)),
            io::SeekFrom::Current(d) => Some((d, SeekOrigin::Current)),
            io::SeekFrom::End(d) => Some((d, SeekOrigin::End)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors reported by the bounded streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// The requested seek lands before 0 or past the stream bound.
    SeekOutOfRange,
    /// `set_size` asked for more than the fixed capacity.
    MediumFull,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::SeekOutOfRange => f.write_str("seek position out of range"),
            StreamError::MediumFull => f.write_str("requested size exceeds stream capacity"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        let kind = match e {
            StreamError::SeekOutOfRange => io::ErrorKind::InvalidInput,
            StreamError::MediumFull => io::ErrorKind::WriteZero,
        };
        io::Error::new(kind, e)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared cursor arithmetic
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve `(delta, origin)` against a cursor and return the new absolute
/// offset, or `SeekOutOfRange` if it falls outside `[0, bound]`.
///
/// `end` is the position the `End` origin refers to.
#[inline]
pub(crate) fn resolve_seek(
    current: u64,
    end: u64,
    bound: u64,
    delta: i64,
    origin: SeekOrigin,
) -> Result<u64, StreamError> {
    let base: i128 = match origin {
        SeekOrigin::Start => 0,
        SeekOrigin::Current => current as i128,
        SeekOrigin::End => end as i128,
    };
    let target = base + delta as i128;
    if target < 0 || target > bound as i128 {
        return Err(StreamError::SeekOutOfRange);
    }
    Ok(target as u64)
}
