//! Compression entry point.
//!
//! The profile is fixed apart from the dictionary: lc=3, lp=0, pb=2,
//! 128 fast bytes, optimal parsing, BT4 match finder and an end marker, so
//! the output is a self-terminating raw LZMA stream that decodes with
//! `decompress_explicit(.., 3, 0, 2, 0, 0)` or `decompress_standard`.

use crate::config::{DICT_LOG_BASE, FAST_BYTES, ZLIB_LC, ZLIB_LP, ZLIB_PB};
use crate::displaylevel;
use crate::engine::{
    Algorithm, CodecParams, CoderEngine, EncoderProfile, EngineError, LzmaEngine, MatchFinder,
};
use crate::stream::{InputStream, OutputStream, SeekOrigin};

use super::CodecError;

/// Destination capacity that always fits `compress` output for
/// `input_size` bytes of input.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    input_size
        .saturating_add(input_size / 3)
        .saturating_add(128)
}

/// Encoder profile for a zlib-style `level`.
///
/// The dictionary is `1 << (14 + level)`: 32 KiB at level 1, 8 MiB at
/// level 9.  Returns `None` when that shift does not fit a `u32`.
pub fn encoder_profile(level: i32) -> Option<EncoderProfile> {
    let shift = u32::try_from(DICT_LOG_BASE.checked_add(level)?).ok()?;
    let dictionary_size = 1u32.checked_shl(shift)?;
    Some(EncoderProfile {
        params: CodecParams::new(ZLIB_LC, ZLIB_LP, ZLIB_PB, dictionary_size),
        algorithm: Algorithm::Maximum,
        fast_bytes: FAST_BYTES,
        match_finder: MatchFinder::Bt4,
        end_marker: true,
    })
}

/// Compress `src` into `dst` and return the compressed length.
///
/// Equivalent to zlib's `compress2` with an LZMA engine behind it.
///
/// # Errors
/// - [`CodecError::Memory`]: `level` yields an unusable dictionary, or the
///   engine ran out of memory.
/// - [`CodecError::Buffer`]: any other engine failure, in practice a `dst`
///   smaller than the compressed stream.  Size `dst` with [`compress_bound`].
pub fn compress(src: &[u8], dst: &mut [u8], level: i32) -> Result<usize, CodecError> {
    compress_with(&mut LzmaEngine::new(), src, dst, level)
}

/// [`compress`] driving a caller-supplied engine.
pub fn compress_with<E: CoderEngine>(
    engine: &mut E,
    src: &[u8],
    dst: &mut [u8],
    level: i32,
) -> Result<usize, CodecError> {
    let profile = encoder_profile(level).ok_or_else(|| {
        displaylevel!(4, "compress: level {} has no dictionary size\n", level);
        CodecError::Memory
    })?;

    let mut input = InputStream::new(src);
    let mut output = OutputStream::new(dst);

    engine.configure_encode(&profile).map_err(|e| {
        displaylevel!(4, "compress: level {}: {}\n", level, e);
        CodecError::Memory
    })?;

    match engine.run(&mut input, &mut output, None) {
        Ok(()) => {}
        Err(EngineError::OutOfMemory) => return Err(CodecError::Memory),
        Err(e) => {
            displaylevel!(4, "compress: {}\n", e);
            return Err(CodecError::Buffer);
        }
    }

    let compressed_len = output
        .seek(0, SeekOrigin::End)
        .map_err(|_| CodecError::Buffer)?;
    displaylevel!(
        4,
        "compress: {} -> {} bytes (dict {})\n",
        src.len(),
        compressed_len,
        profile.params.dictionary_size
    );
    Ok(compressed_len as usize)
}
