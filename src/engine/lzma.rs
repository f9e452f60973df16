//! [`CoderEngine`] backed by the pure-Rust `lzma-rust2` coder.
//!
//! Encoding produces a raw LZMA stream (no `.lzma` header), optionally
//! terminated by an end marker.  Decoding reads a raw stream with explicitly
//! supplied lc/lp/pb and dictionary size, stopping at the end marker, at the
//! expected output size, or when the destination is full, whichever comes
//! first.

use std::io::{self, Read};

use lzma_rust2::{EncodeMode, LzmaOptions, LzmaReader, LzmaWriter, MfType};

use super::{Algorithm, CodecParams, CoderEngine, EncoderProfile, EngineError, MatchFinder};
use crate::displaylevel;
use crate::stream::{InputStream, OutputStream};

// ─────────────────────────────────────────────────────────────────────────────
// Engine limits
// ─────────────────────────────────────────────────────────────────────────────

/// Largest literal-context bit count the range coder models.
pub const LC_MAX: u32 = 8;
/// Largest literal-position bit count.
pub const LP_MAX: u32 = 4;
/// Largest position bit count.
pub const PB_MAX: u32 = 4;
/// Smallest dictionary the coder allocates.
pub const DICT_SIZE_MIN: u32 = 4096;
/// Largest dictionary accepted for encoding (1.5 GiB).
pub const ENCODE_DICT_SIZE_MAX: u32 = 3 << 29;
/// Accepted range for the encoder's fast-bytes / nice-length setting.
pub const FAST_BYTES_MIN: u32 = 8;
pub const FAST_BYTES_MAX: u32 = 273;

/// Size of the scratch buffer used to shuttle decoded bytes into the output.
const DECODE_CHUNK: usize = 64 * 1024;

/// Sentinel size telling the reader that the stream length is unknown.
const UNKNOWN_SIZE: u64 = u64::MAX;

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Unconfigured,
    Encode(EncoderProfile),
    Decode(CodecParams),
}

/// LZMA coder engine; configure once, run once.
#[derive(Debug, Default)]
pub struct LzmaEngine {
    mode: Mode,
}

impl LzmaEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_model_bits(lc: u32, lp: u32, pb: u32) -> Result<(), EngineError> {
    if lc > LC_MAX || lp > LP_MAX || pb > PB_MAX {
        return Err(EngineError::Rejected(format!(
            "lc={lc} lp={lp} pb={pb} outside lc<={LC_MAX} lp<={LP_MAX} pb<={PB_MAX}"
        )));
    }
    Ok(())
}

impl CoderEngine for LzmaEngine {
    fn configure_encode(&mut self, profile: &EncoderProfile) -> Result<(), EngineError> {
        let p = &profile.params;
        check_model_bits(p.lc, p.lp, p.pb)?;
        if !(DICT_SIZE_MIN..=ENCODE_DICT_SIZE_MAX).contains(&p.dictionary_size) {
            return Err(EngineError::Rejected(format!(
                "dictionary size {} outside {DICT_SIZE_MIN}..={ENCODE_DICT_SIZE_MAX}",
                p.dictionary_size
            )));
        }
        if !(FAST_BYTES_MIN..=FAST_BYTES_MAX).contains(&profile.fast_bytes) {
            return Err(EngineError::Rejected(format!(
                "fast bytes {} outside {FAST_BYTES_MIN}..={FAST_BYTES_MAX}",
                profile.fast_bytes
            )));
        }
        self.mode = Mode::Encode(*profile);
        Ok(())
    }

    fn configure_decode_raw(&mut self, params: &CodecParams) -> Result<(), EngineError> {
        check_model_bits(params.lc, params.lp, params.pb)?;
        self.mode = Mode::Decode(*params);
        Ok(())
    }

    fn run(
        &mut self,
        input: &mut InputStream<'_>,
        output: &mut OutputStream<'_>,
        expected_output_size: Option<u64>,
    ) -> Result<(), EngineError> {
        match self.mode {
            Mode::Unconfigured => Err(EngineError::NotConfigured),
            Mode::Encode(profile) => encode(&profile, input, output),
            Mode::Decode(params) => decode(&params, input, output, expected_output_size),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encode
// ─────────────────────────────────────────────────────────────────────────────

fn lzma_options(profile: &EncoderProfile) -> LzmaOptions {
    let mut opts = LzmaOptions::with_preset(6);
    opts.dict_size = profile.params.dictionary_size;
    opts.lc = profile.params.lc;
    opts.lp = profile.params.lp;
    opts.pb = profile.params.pb;
    opts.nice_len = profile.fast_bytes;
    opts.mode = match profile.algorithm {
        Algorithm::Fast => EncodeMode::Fast,
        Algorithm::Maximum => EncodeMode::Normal,
    };
    opts.mf = match profile.match_finder {
        MatchFinder::Hc4 => MfType::Hc4,
        MatchFinder::Bt4 => MfType::Bt4,
    };
    opts
}

fn encode(
    profile: &EncoderProfile,
    input: &mut InputStream<'_>,
    output: &mut OutputStream<'_>,
) -> Result<(), EngineError> {
    let opts = lzma_options(profile);
    let mut writer = LzmaWriter::new_no_header(&mut *output, &opts, profile.end_marker)
        .map_err(|e| EngineError::Failed(e.to_string()))?;
    io::copy(input, &mut writer).map_err(EngineError::from_io)?;
    writer
        .finish()
        .map_err(|e| EngineError::Failed(e.to_string()))?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode
// ─────────────────────────────────────────────────────────────────────────────

/// Window actually allocated for a decode producing at most `limit` bytes.
///
/// No back-reference can reach further than the bytes already produced, so
/// a dictionary larger than the output bound is never needed.
fn window_size(dictionary_size: u32, limit: u64) -> u32 {
    let cap = u32::try_from(limit).unwrap_or(u32::MAX);
    dictionary_size.min(cap).max(DICT_SIZE_MIN)
}

fn decode(
    params: &CodecParams,
    input: &mut InputStream<'_>,
    output: &mut OutputStream<'_>,
    expected_output_size: Option<u64>,
) -> Result<(), EngineError> {
    let room = output.remaining() as u64;
    let limit = expected_output_size.map_or(room, |n| n.min(room));
    let window = window_size(params.dictionary_size, limit);
    displaylevel!(
        4,
        "lzma: decode lc={} lp={} pb={} dict={} (window {}) limit={}\n",
        params.lc,
        params.lp,
        params.pb,
        params.dictionary_size,
        window,
        limit
    );

    let mut reader = LzmaReader::new(
        &mut *input,
        UNKNOWN_SIZE,
        params.lc,
        params.lp,
        params.pb,
        window,
        None,
    )
    .map_err(|e| EngineError::Failed(e.to_string()))?;

    let mut chunk = vec![0u8; DECODE_CHUNK.min(limit as usize).max(1)];
    let mut produced: u64 = 0;
    while produced < limit {
        let want = (limit - produced).min(chunk.len() as u64) as usize;
        let n = reader.read(&mut chunk[..want]).map_err(EngineError::from_io)?;
        if n == 0 {
            break;
        }
        produced += output.write(&chunk[..n]) as u64;
    }
    Ok(())
}
