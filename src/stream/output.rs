//! Write-only bounded stream over a fixed-capacity caller buffer.

use std::io;

use super::{resolve_seek, SeekOrigin, StreamError};

/// Write view over a caller buffer of fixed capacity.
///
/// Tracks a cursor and a high-water mark (`written_size`): the furthest
/// position any write has reached.  Invariants:
/// `0 <= offset <= capacity` and `written_size <= capacity`.
///
/// The buffer is never reallocated; writes past the capacity are clamped and
/// [`set_size`](Self::set_size) refuses to grow it.
#[derive(Debug)]
pub struct OutputStream<'a> {
    data: &'a mut [u8],
    written_size: usize,
    offset: usize,
}

impl<'a> OutputStream<'a> {
    /// Wrap `data`; the capacity is `data.len()`, nothing is written yet.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self {
            data,
            written_size: 0,
            offset: 0,
        }
    }

    /// Fixed capacity of the destination buffer.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.data.len() as u64
    }

    /// High-water mark of all writes so far.
    #[inline]
    pub fn written_size(&self) -> u64 {
        self.written_size as u64
    }

    /// Current cursor position.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset as u64
    }

    /// Bytes left between the cursor and the capacity.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// The bytes written so far (`data[..written_size]`).
    pub fn written(&self) -> &[u8] {
        &self.data[..self.written_size]
    }

    /// Copy up to `buf.len()` bytes at the cursor.
    ///
    /// The request is clamped to [`remaining`](Self::remaining).  The cursor
    /// advances by the amount copied, `written_size` is raised to the new
    /// cursor if it went further, and the copied length is returned.
    pub fn write(&mut self, buf: &[u8]) -> usize {
        let n = buf.len().min(self.remaining());
        if n > 0 {
            self.data[self.offset..self.offset + n].copy_from_slice(&buf[..n]);
        }
        self.offset += n;
        if self.offset > self.written_size {
            self.written_size = self.offset;
        }
        n
    }

    /// Move the cursor and return the new absolute offset.
    ///
    /// Bounded by `capacity`; `End` is relative to `written_size`.  Out-of-range
    /// targets return [`StreamError::SeekOutOfRange`] and leave the cursor alone.
    pub fn seek(&mut self, delta: i64, origin: SeekOrigin) -> Result<u64, StreamError> {
        let target = resolve_seek(
            self.offset(),
            self.written_size(),
            self.capacity(),
            delta,
            origin,
        )?;
        self.offset = target as usize;
        Ok(target)
    }

    /// Validate a requested stream length against the fixed capacity.
    ///
    /// Nothing is truncated or extended; the only effect is the check.
    pub fn set_size(&mut self, new_size: u64) -> Result<(), StreamError> {
        if new_size > self.capacity() {
            return Err(StreamError::MediumFull);
        }
        Ok(())
    }
}

impl io::Write for OutputStream<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(OutputStream::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Seek for OutputStream<'_> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (delta, origin) =
            SeekOrigin::from_seek_from(pos).ok_or(StreamError::SeekOutOfRange)?;
        Ok(OutputStream::seek(self, delta, origin)?)
    }
}
