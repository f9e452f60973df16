//! The coder-engine seam.
//!
//! The bounded-buffer entry points never touch LZMA internals.  They build a
//! parameter set, hand it to a [`CoderEngine`], and let the engine pull from
//! an [`InputStream`] and push into an [`OutputStream`].  [`LzmaEngine`] is
//! the production implementation; tests substitute spies.

pub mod lzma;

use std::fmt;
use std::io;

use crate::stream::{InputStream, OutputStream};

pub use lzma::LzmaEngine;

// ─────────────────────────────────────────────────────────────────────────────
// Parameter sets
// ─────────────────────────────────────────────────────────────────────────────

/// Raw LZMA model parameters plus the dictionary (window) size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodecParams {
    /// Literal-context bits.
    pub lc: u32,
    /// Literal-position bits.
    pub lp: u32,
    /// Position bits.
    pub pb: u32,
    /// Dictionary size in bytes.
    pub dictionary_size: u32,
}

impl CodecParams {
    pub const fn new(lc: u32, lp: u32, pb: u32, dictionary_size: u32) -> Self {
        Self {
            lc,
            lp,
            pb,
            dictionary_size,
        }
    }

    /// Conservative bound applied to header-derived parameters:
    /// each of lc/lp/pb at most 4 and `lc + lp <= 4`.
    pub fn is_bounded(&self) -> bool {
        self.lc <= 4 && self.lp <= 4 && self.pb <= 4 && self.lc + self.lp <= 4
    }

    /// Decode the classic packed properties byte `(pb * 5 + lp) * 9 + lc`.
    ///
    /// Returns `None` for values of 225 and above, which no valid
    /// combination produces.
    pub fn from_props_byte(props: u8, dictionary_size: u32) -> Option<Self> {
        if props >= 9 * 5 * 5 {
            return None;
        }
        let d = u32::from(props);
        Some(Self::new(d % 9, (d / 9) % 5, d / 45, dictionary_size))
    }

    /// Inverse of [`from_props_byte`](Self::from_props_byte).
    ///
    /// Returns `None` if lc/lp/pb are outside the packed encoding's range.
    pub fn props_byte(&self) -> Option<u8> {
        if self.lc > 8 || self.lp > 4 || self.pb > 4 {
            return None;
        }
        Some(((self.pb * 5 + self.lp) * 9 + self.lc) as u8)
    }
}

/// Encoder search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Greedy/fast parsing.
    Fast,
    /// Optimal parsing ("algorithm 2").
    Maximum,
}

/// Match finder used by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFinder {
    /// Hash chain, 4-byte hashing.
    Hc4,
    /// Binary tree, 4-byte hashing.
    Bt4,
}

/// Complete encoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderProfile {
    pub params: CodecParams,
    pub algorithm: Algorithm,
    /// Number of fast bytes (the encoder's "nice length").
    pub fast_bytes: u32,
    pub match_finder: MatchFinder,
    /// Terminate the stream with an end-of-stream marker.
    pub end_marker: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Failures reported by a [`CoderEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The parameter set was refused at configuration time.
    Rejected(String),
    /// The engine could not obtain the memory it needed.
    OutOfMemory,
    /// `run` was called before any `configure_*`.
    NotConfigured,
    /// Any other coding failure (corrupt input, destination exhausted, ...).
    Failed(String),
}

impl EngineError {
    /// Classify an I/O error raised while the engine drives the streams.
    pub fn from_io(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::OutOfMemory {
            EngineError::OutOfMemory
        } else {
            EngineError::Failed(e.to_string())
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Rejected(why) => write!(f, "parameters rejected: {why}"),
            EngineError::OutOfMemory => f.write_str("out of memory"),
            EngineError::NotConfigured => f.write_str("engine used before configuration"),
            EngineError::Failed(why) => write!(f, "coding failed: {why}"),
        }
    }
}

impl std::error::Error for EngineError {}

// ─────────────────────────────────────────────────────────────────────────────
// Engine trait
// ─────────────────────────────────────────────────────────────────────────────

/// An LZMA coder driven through bounded streams.
///
/// One engine value is owned by exactly one entry-point call.  The call
/// configures it once, runs it once, and drops it.
pub trait CoderEngine {
    /// Prepare to encode with `profile`.
    fn configure_encode(&mut self, profile: &EncoderProfile) -> Result<(), EngineError>;

    /// Prepare to decode a raw (headerless) stream with `params`.
    fn configure_decode_raw(&mut self, params: &CodecParams) -> Result<(), EngineError>;

    /// Code everything from `input` into `output`.
    ///
    /// `expected_output_size` is an upper bound on the bytes to produce; the
    /// engine may stop earlier if the stream ends.  `None` means unbounded:
    /// the encoder runs until the input is exhausted.
    fn run(
        &mut self,
        input: &mut InputStream<'_>,
        output: &mut OutputStream<'_>,
        expected_output_size: Option<u64>,
    ) -> Result<(), EngineError>;
}

impl<E: CoderEngine + ?Sized> CoderEngine for &mut E {
    fn configure_encode(&mut self, profile: &EncoderProfile) -> Result<(), EngineError> {
        (**self).configure_encode(profile)
    }

    fn configure_decode_raw(&mut self, params: &CodecParams) -> Result<(), EngineError> {
        (**self).configure_decode_raw(params)
    }

    fn run(
        &mut self,
        input: &mut InputStream<'_>,
        output: &mut OutputStream<'_>,
        expected_output_size: Option<u64>,
    ) -> Result<(), EngineError> {
        (**self).run(input, output, expected_output_size)
    }
}
