//! Read-only bounded stream over a caller buffer.

use std::io;

use super::{resolve_seek, SeekOrigin, StreamError};

/// Read view over `data[..size]` with a seekable cursor.
///
/// Invariant: `0 <= offset <= size`.  The stream owns nothing; it borrows the
/// caller's slice for at most the duration of one codec call.
#[derive(Debug)]
pub struct InputStream<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InputStream<'a> {
    /// Wrap `data`; the stream size is `data.len()` and the cursor starts at 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Total number of readable bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Current cursor position.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset as u64
    }

    /// Bytes left between the cursor and `size`.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Copy up to `buf.len()` bytes from the cursor into `buf`.
    ///
    /// The request is clamped to [`remaining`](Self::remaining); the cursor
    /// advances by the number of bytes copied, which is returned.  Reading at
    /// the end returns 0.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.remaining());
        if n > 0 {
            buf[..n].copy_from_slice(&self.data[self.offset..self.offset + n]);
        }
        self.offset += n;
        n
    }

    /// Move the cursor and return the new absolute offset.
    ///
    /// `End` is relative to `size`.  A target outside `[0, size]` returns
    /// [`StreamError::SeekOutOfRange`] without moving the cursor.
    pub fn seek(&mut self, delta: i64, origin: SeekOrigin) -> Result<u64, StreamError> {
        let size = self.size();
        let target = resolve_seek(self.offset(), size, size, delta, origin)?;
        self.offset = target as usize;
        Ok(target)
    }
}

impl io::Read for InputStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(InputStream::read(self, buf))
    }
}

impl io::BufRead for InputStream<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(&self.data[self.offset..])
    }

    fn consume(&mut self, amt: usize) {
        self.offset += amt.min(self.remaining());
    }
}

impl io::Seek for InputStream<'_> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (delta, origin) =
            SeekOrigin::from_seek_from(pos).ok_or(StreamError::SeekOutOfRange)?;
        Ok(InputStream::seek(self, delta, origin)?)
    }
}
