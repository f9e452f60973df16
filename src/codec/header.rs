//! Container-header variants.
//!
//! Firmware and tooling wrap raw LZMA payloads in several small, mutually
//! incompatible headers.  Each [`ContainerFormat`] maps its header onto one
//! [`HeaderParams`] (model parameters plus payload offset); every variant
//! then goes through the same [`run_decode`](super::decode::run_decode).
//!
//! | Format       | Header bytes                          | Payload | Parameters           |
//! |--------------|---------------------------------------|---------|----------------------|
//! | `DdWrt`      | `pb, lc, lp, reserved`                | 4       | from header, bounded |
//! | `Standard`   | optional `"7zip"`                     | 0 or 4  | lc3 lp0 pb2          |
//! | `Linksys`    | none                                  | 0       | lc0 lp0 pb2          |
//! | `SquashFs7z` | 4 opaque, props byte, dict u32 LE     | 9       | from property block  |
//!
//! Only `SquashFs7z` carries a dictionary size; the others use 8 MiB.
//! The caller picks the format: nothing here sniffs headers to guess one.

use std::fmt;
use std::str::FromStr;

use crate::config::{
    DEFAULT_DICTIONARY_SIZE, E2100_LC, E2100_LP, E2100_PB, ZLIB_LC, ZLIB_LP, ZLIB_PB,
};
use crate::displaylevel;
use crate::engine::{CodecParams, CoderEngine, LzmaEngine};

use super::decode::run_decode;
use super::CodecError;

// ─────────────────────────────────────────────────────────────────────────────
// Header constants
// ─────────────────────────────────────────────────────────────────────────────

/// Length of the DD-WRT `{pb, lc, lp, reserved}` prefix.
pub const DDWRT_HEADER_SIZE: usize = 4;

/// Tag some LZMA producers put in front of an otherwise raw stream.
pub const SEVENZIP_MAGIC: &[u8; 4] = b"7zip";

/// squashfs7z: offset of the 5-byte property block, and total header length.
pub const SQUASHFS7Z_PROPS_OFFSET: usize = 4;
pub const SQUASHFS7Z_HEADER_SIZE: usize = 9;

// ─────────────────────────────────────────────────────────────────────────────
// Extracted parameters
// ─────────────────────────────────────────────────────────────────────────────

/// What a header says about its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderParams {
    pub params: CodecParams,
    /// Index of the first payload byte in the source buffer.
    pub payload_offset: usize,
}

type Extractor = fn(&[u8]) -> Result<HeaderParams, CodecError>;

fn extract_ddwrt(src: &[u8]) -> Result<HeaderParams, CodecError> {
    let header = src.get(..DDWRT_HEADER_SIZE).ok_or_else(|| {
        displaylevel!(4, "ddwrt: {} bytes is shorter than the header\n", src.len());
        CodecError::Data
    })?;
    let (pb, lc, lp) = (header[0], header[1], header[2]);
    let params = CodecParams::new(
        u32::from(lc),
        u32::from(lp),
        u32::from(pb),
        DEFAULT_DICTIONARY_SIZE,
    );
    if !params.is_bounded() {
        displaylevel!(4, "ddwrt: rejecting properties lc={} lp={} pb={}\n", lc, lp, pb);
        return Err(CodecError::Data);
    }
    Ok(HeaderParams {
        params,
        payload_offset: DDWRT_HEADER_SIZE,
    })
}

fn extract_standard(src: &[u8]) -> Result<HeaderParams, CodecError> {
    let payload_offset = if src.starts_with(SEVENZIP_MAGIC) {
        SEVENZIP_MAGIC.len()
    } else {
        0
    };
    Ok(HeaderParams {
        params: CodecParams::new(ZLIB_LC, ZLIB_LP, ZLIB_PB, DEFAULT_DICTIONARY_SIZE),
        payload_offset,
    })
}

fn extract_linksys(_src: &[u8]) -> Result<HeaderParams, CodecError> {
    Ok(HeaderParams {
        params: CodecParams::new(E2100_LC, E2100_LP, E2100_PB, DEFAULT_DICTIONARY_SIZE),
        payload_offset: 0,
    })
}

fn extract_squashfs7z(src: &[u8]) -> Result<HeaderParams, CodecError> {
    let block = src
        .get(SQUASHFS7Z_PROPS_OFFSET..SQUASHFS7Z_HEADER_SIZE)
        .ok_or_else(|| {
            displaylevel!(4, "squashfs7z: {} bytes is shorter than the header\n", src.len());
            CodecError::Data
        })?;
    let dictionary_size = u32::from_le_bytes([block[1], block[2], block[3], block[4]]);
    let params = CodecParams::from_props_byte(block[0], dictionary_size).ok_or_else(|| {
        displaylevel!(4, "squashfs7z: invalid properties byte 0x{:02x}\n", block[0]);
        CodecError::Data
    })?;
    Ok(HeaderParams {
        params,
        payload_offset: SQUASHFS7Z_HEADER_SIZE,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Format tag
// ─────────────────────────────────────────────────────────────────────────────

/// Known container headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// DD-WRT SquashFS blocks: `{pb, lc, lp, reserved}` then payload.
    DdWrt,
    /// Plain raw stream with the default profile, optionally tagged `"7zip"`.
    Standard,
    /// Linksys (E2100) SquashFS blocks: raw stream, lc0/lp0/pb2.
    Linksys,
    /// "squashfs7z" blocks: 4 bytes, a 5-byte property block, then payload.
    SquashFs7z,
}

impl ContainerFormat {
    pub const ALL: [ContainerFormat; 4] = [
        ContainerFormat::DdWrt,
        ContainerFormat::Standard,
        ContainerFormat::Linksys,
        ContainerFormat::SquashFs7z,
    ];

    /// Short name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            ContainerFormat::DdWrt => "ddwrt",
            ContainerFormat::Standard => "lzma",
            ContainerFormat::Linksys => "linksys",
            ContainerFormat::SquashFs7z => "squashfs7z",
        }
    }

    fn extractor(self) -> Extractor {
        match self {
            ContainerFormat::DdWrt => extract_ddwrt,
            ContainerFormat::Standard => extract_standard,
            ContainerFormat::Linksys => extract_linksys,
            ContainerFormat::SquashFs7z => extract_squashfs7z,
        }
    }

    /// Read this format's header from the front of `src`.
    ///
    /// Fails with [`CodecError::Data`] if `src` is shorter than the header or
    /// the header's parameters are invalid for the format.
    pub fn extract(self, src: &[u8]) -> Result<HeaderParams, CodecError> {
        let header = (self.extractor())(src)?;
        displaylevel!(
            4,
            "{}: lc={} lp={} pb={} dict={} payload@{}\n",
            self.name(),
            header.params.lc,
            header.params.lp,
            header.params.pb,
            header.params.dictionary_size,
            header.payload_offset
        );
        Ok(header)
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by `ContainerFormat::from_str` for an unrecognised name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown container format '{}' (expected ddwrt, lzma, linksys or squashfs7z)",
            self.0
        )
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for ContainerFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ddwrt" | "dd-wrt" | "wrt" => Ok(ContainerFormat::DdWrt),
            "lzma" | "standard" | "7zip" => Ok(ContainerFormat::Standard),
            "linksys" | "e2100" => Ok(ContainerFormat::Linksys),
            "squashfs7z" | "7z" => Ok(ContainerFormat::SquashFs7z),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Strip `format`'s header from `src` and decode the payload into `dst`.
///
/// Header problems are reported before the engine is configured.
pub fn decompress_with<E: CoderEngine>(
    engine: &mut E,
    format: ContainerFormat,
    src: &[u8],
    dst: &mut [u8],
) -> Result<usize, CodecError> {
    let header = format.extract(src)?;
    run_decode(engine, &src[header.payload_offset..], dst, &header.params)
}

/// [`decompress_with`] on a fresh [`LzmaEngine`].
pub fn decompress(format: ContainerFormat, src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    decompress_with(&mut LzmaEngine::new(), format, src, dst)
}

/// Decompress a DD-WRT SquashFS block.
///
/// Bytes 0..3 hold pb, lc and lp; byte 3 is ignored.  Headers with any value
/// above 4 or with `lc + lp > 4` are [`CodecError::Data`].
pub fn decompress_ddwrt(src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    decompress(ContainerFormat::DdWrt, src, dst)
}

/// Decompress a raw lc3/lp0/pb2 stream, skipping a leading `"7zip"` tag.
pub fn decompress_standard(src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    decompress(ContainerFormat::Standard, src, dst)
}

/// Decompress a Linksys E2100 SquashFS block (raw, lc0/lp0/pb2).
pub fn decompress_linksys(src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    decompress(ContainerFormat::Linksys, src, dst)
}

/// Decompress a squashfs7z block using its embedded property block.
pub fn decompress_squashfs7z(src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    decompress(ContainerFormat::SquashFs7z, src, dst)
}
