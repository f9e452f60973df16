//! Shared decode routine and the parameterized decompression entry point.

use crate::config::DEFAULT_DICTIONARY_SIZE;
use crate::displaylevel;
use crate::engine::{CodecParams, CoderEngine, LzmaEngine};
use crate::stream::{InputStream, OutputStream, SeekOrigin};

use super::CodecError;

/// Decode the raw LZMA stream `payload` into `dst` with `params`.
///
/// The destination capacity is passed to the engine as the expected output
/// size: decoding stops at the stream's end marker or once `dst` is full.
/// Every failure, including a configuration the engine refuses, is
/// [`CodecError::Data`].
///
/// A stream without an end marker must be decoded into a destination of
/// exactly its decompressed size; any spare capacity runs the engine past
/// the end of `payload` and fails.
pub fn run_decode<E: CoderEngine>(
    engine: &mut E,
    payload: &[u8],
    dst: &mut [u8],
    params: &CodecParams,
) -> Result<usize, CodecError> {
    let mut input = InputStream::new(payload);
    let mut output = OutputStream::new(dst);

    engine.configure_decode_raw(params).map_err(|e| {
        displaylevel!(4, "decode: {}\n", e);
        CodecError::Data
    })?;

    let expected_output_size = output.capacity();
    if let Err(e) = engine.run(&mut input, &mut output, Some(expected_output_size)) {
        displaylevel!(4, "decode: {} after {} bytes\n", e, output.written_size());
        return Err(CodecError::Data);
    }

    let decompressed_len = output
        .seek(0, SeekOrigin::End)
        .map_err(|_| CodecError::Data)?;
    Ok(decompressed_len as usize)
}

/// Decompress a raw LZMA stream starting at `offset` with caller-chosen
/// parameters.
///
/// Meant for probing unknown containers: lc/lp/pb are passed through
/// unchecked (the engine still refuses what it cannot model), and a
/// `dictionary_size` of 0 selects the 8 MiB default.  An `offset` beyond
/// `src.len()` is [`CodecError::Data`]; an offset equal to it leaves an empty
/// payload, which fails in the engine rather than here.
pub fn decompress_explicit(
    src: &[u8],
    dst: &mut [u8],
    lc: u32,
    lp: u32,
    pb: u32,
    dictionary_size: u32,
    offset: usize,
) -> Result<usize, CodecError> {
    decompress_explicit_with(
        &mut LzmaEngine::new(),
        src,
        dst,
        lc,
        lp,
        pb,
        dictionary_size,
        offset,
    )
}

/// [`decompress_explicit`] driving a caller-supplied engine.
#[allow(clippy::too_many_arguments)]
pub fn decompress_explicit_with<E: CoderEngine>(
    engine: &mut E,
    src: &[u8],
    dst: &mut [u8],
    lc: u32,
    lp: u32,
    pb: u32,
    dictionary_size: u32,
    offset: usize,
) -> Result<usize, CodecError> {
    let payload = src.get(offset..).ok_or_else(|| {
        displaylevel!(4, "explicit: offset {} past end of {} bytes\n", offset, src.len());
        CodecError::Data
    })?;
    let dictionary_size = if dictionary_size == 0 {
        DEFAULT_DICTIONARY_SIZE
    } else {
        dictionary_size
    };
    run_decode(
        engine,
        payload,
        dst,
        &CodecParams::new(lc, lp, pb, dictionary_size),
    )
}
