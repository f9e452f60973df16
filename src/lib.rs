// lzmadapt — bounded-buffer LZMA entry points for SquashFS and firmware tooling

pub mod config;
pub mod cli;
pub mod stream;
pub mod engine;
pub mod codec;
pub mod scan;
#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ─────────────────────────────────────────────────────────
pub const LZMADAPT_VERSION_MAJOR: u32 = 0;
pub const LZMADAPT_VERSION_MINOR: u32 = 4;
pub const LZMADAPT_VERSION_RELEASE: u32 = 0;
pub const LZMADAPT_VERSION_NUMBER: u32 = LZMADAPT_VERSION_MAJOR * 100 * 100
    + LZMADAPT_VERSION_MINOR * 100
    + LZMADAPT_VERSION_RELEASE;
pub const LZMADAPT_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number (`major * 10000 + minor * 100 + release`).
pub fn version_number() -> u32 {
    LZMADAPT_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    LZMADAPT_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use codec::{
    compress, compress_bound, decompress, decompress_ddwrt, decompress_explicit,
    decompress_linksys, decompress_squashfs7z, decompress_standard, run_decode, CodecError,
    CodecParams, ContainerFormat,
};
pub use scan::{scan, ScanHit, ScanOptions};
pub use stream::{InputStream, OutputStream, SeekOrigin};
