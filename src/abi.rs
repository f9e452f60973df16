//! C-ABI shims: zlib-shaped exports over the codec entry points.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `liblzmadapt.a` exports the symbols SquashFS tools link
//! against.  On every call `*dest_len` holds the destination capacity on entry
//! and, on `Z_OK` only, the number of bytes produced on exit.

use std::slice;

use libc::{c_int, c_uchar, c_ulong};

use crate::codec::{
    compress, decompress, decompress_explicit, status_code, CodecError, ContainerFormat, Z_OK,
};

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Borrow the caller's buffers, or `None` for a null pointer or a length that
/// does not fit `usize`.
#[inline]
unsafe fn buffers<'a>(
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
) -> Option<(&'a mut [u8], &'a [u8])> {
    if dest_len.is_null() || (dest.is_null() && *dest_len != 0) {
        return None;
    }
    if source.is_null() && source_len != 0 {
        return None;
    }
    let dst_cap = usize::try_from(*dest_len).ok()?;
    let src_len = usize::try_from(source_len).ok()?;
    let dst: &'a mut [u8] = if dst_cap == 0 {
        &mut []
    } else {
        slice::from_raw_parts_mut(dest, dst_cap)
    };
    let src: &'a [u8] = if src_len == 0 {
        &[]
    } else {
        slice::from_raw_parts(source, src_len)
    };
    Some((dst, src))
}

/// Store the produced length in `*dest_len` on success and return the status.
#[inline]
unsafe fn finish(dest_len: *mut c_ulong, result: Result<usize, CodecError>) -> c_int {
    if let Ok(n) = result {
        *dest_len = n as c_ulong;
    }
    status_code(&result) as c_int
}

unsafe fn uncompress_as(
    format: ContainerFormat,
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
) -> c_int {
    match buffers(dest, dest_len, source, source_len) {
        Some((dst, src)) => finish(dest_len, decompress(format, src, dst)),
        None => CodecError::Data.code() as c_int,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// compress2
//
// int compress2(Bytef *dest, uLongf *destLen,
//               const Bytef *source, uLong sourceLen, int level);
// ─────────────────────────────────────────────────────────────────────────────

/// # Safety
/// `dest` must be valid for `*dest_len` writable bytes and `source` for
/// `source_len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn compress2(
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
    level: c_int,
) -> c_int {
    match buffers(dest, dest_len, source, source_len) {
        Some((dst, src)) => finish(dest_len, compress(src, dst, level)),
        None => CodecError::Buffer.code() as c_int,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Header variants
//
// int <name>(Bytef *dest, uLongf *destLen,
//            const Bytef *source, uLong sourceLen);
// ─────────────────────────────────────────────────────────────────────────────

/// DD-WRT `{pb, lc, lp, _}` header.
///
/// # Safety
/// See [`compress2`].
#[no_mangle]
pub unsafe extern "C" fn lzmawrt_uncompress(
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
) -> c_int {
    uncompress_as(ContainerFormat::DdWrt, dest, dest_len, source, source_len)
}

/// Raw lc3/lp0/pb2 stream, optionally tagged `"7zip"`.
///
/// # Safety
/// See [`compress2`].
#[no_mangle]
pub unsafe extern "C" fn lzmalib_uncompress(
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
) -> c_int {
    uncompress_as(ContainerFormat::Standard, dest, dest_len, source, source_len)
}

/// Linksys E2100 profile (lc0/lp0/pb2).
///
/// # Safety
/// See [`compress2`].
#[no_mangle]
pub unsafe extern "C" fn lzmalinksys_uncompress(
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
) -> c_int {
    uncompress_as(ContainerFormat::Linksys, dest, dest_len, source, source_len)
}

/// squashfs7z: property block at bytes 4..9.
///
/// # Safety
/// See [`compress2`].
#[no_mangle]
pub unsafe extern "C" fn lzma7z_uncompress(
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
) -> c_int {
    uncompress_as(ContainerFormat::SquashFs7z, dest, dest_len, source, source_len)
}

// ─────────────────────────────────────────────────────────────────────────────
// lzmaspec_uncompress
//
// int lzmaspec_uncompress(Bytef *dest, uLongf *destLen,
//                         const Bytef *source, uLong sourceLen,
//                         int lc, int lp, int pb, int dictionary_size, int offset);
//
// Negative lc/lp/pb/offset are Z_DATA_ERROR; dictionary_size <= 0 selects 8 MiB.
// ─────────────────────────────────────────────────────────────────────────────

/// # Safety
/// See [`compress2`].
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn lzmaspec_uncompress(
    dest: *mut c_uchar,
    dest_len: *mut c_ulong,
    source: *const c_uchar,
    source_len: c_ulong,
    lc: c_int,
    lp: c_int,
    pb: c_int,
    dictionary_size: c_int,
    offset: c_int,
) -> c_int {
    let data_error = CodecError::Data.code() as c_int;
    let (Ok(lc), Ok(lp), Ok(pb), Ok(offset)) = (
        u32::try_from(lc),
        u32::try_from(lp),
        u32::try_from(pb),
        usize::try_from(offset),
    ) else {
        return data_error;
    };
    let dictionary_size = u32::try_from(dictionary_size).unwrap_or(0);
    match buffers(dest, dest_len, source, source_len) {
        Some((dst, src)) => finish(
            dest_len,
            decompress_explicit(src, dst, lc, lp, pb, dictionary_size, offset),
        ),
        None => data_error,
    }
}
