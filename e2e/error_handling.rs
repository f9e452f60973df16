//! E2E Suite 03: error handling
//!
//! Every failure an entry point can report, driven through the public API
//! with realistic inputs, plus the status codes those failures map to.

use lzmadapt::codec::{status_code, Z_BUF_ERROR, Z_DATA_ERROR, Z_MEM_ERROR, Z_OK};
use lzmadapt::{
    compress, compress_bound, decompress_ddwrt, decompress_explicit, decompress_linksys,
    decompress_squashfs7z, decompress_standard, CodecError,
};

fn packed(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; compress_bound(data.len())];
    let n = compress(data, &mut out, 6).expect("compress");
    out.truncate(n);
    out
}

fn text(len: usize) -> Vec<u8> {
    b"Error paths must never panic and never write past the destination. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn small_compress_destination_is_buffer_error() {
    let data = text(20_000);
    let needed = packed(&data).len();
    let mut dst = vec![0u8; needed / 2];
    assert_eq!(compress(&data, &mut dst, 6), Err(CodecError::Buffer));
}

#[test]
fn bad_level_is_memory_error() {
    let mut dst = vec![0u8; 1024];
    for level in [-20, 18, 100, i32::MIN, i32::MAX] {
        assert_eq!(compress(b"abc", &mut dst, level), Err(CodecError::Memory), "level {level}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DD-WRT header
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn ddwrt_rejects_out_of_bound_properties() {
    let payload = packed(&text(1_000));
    let mut dst = vec![0u8; 1_000];
    for (pb, lc, lp) in [(5, 3, 0), (2, 5, 0), (2, 0, 5), (2, 3, 2), (2, 4, 1)] {
        let mut block = vec![pb, lc, lp, 0];
        block.extend_from_slice(&payload);
        assert_eq!(
            decompress_ddwrt(&block, &mut dst),
            Err(CodecError::Data),
            "pb={pb} lc={lc} lp={lp}"
        );
    }
}

#[test]
fn ddwrt_rejects_short_block() {
    let mut dst = [0u8; 64];
    for len in 0..4 {
        assert_eq!(decompress_ddwrt(&[2, 3, 0, 0][..len], &mut dst), Err(CodecError::Data));
    }
}

#[test]
fn squashfs7z_rejects_bad_props_and_short_header() {
    let mut dst = [0u8; 64];
    assert_eq!(
        decompress_squashfs7z(b"sqz\0\xE1\x00\x00\x01\x00\x00", &mut dst),
        Err(CodecError::Data)
    );
    assert_eq!(decompress_squashfs7z(b"sqz\0\x5D\x00", &mut dst), Err(CodecError::Data));
}

// ─────────────────────────────────────────────────────────────────────────────
// Payload damage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn capacity_exhaustion_returns_what_fits() {
    let data = text(50_000);
    let src = packed(&data);
    let mut dst = vec![0u8; 12_345];
    assert_eq!(decompress_standard(&src, &mut dst), Ok(12_345));
    assert_eq!(&dst[..], &data[..12_345]);
}

#[test]
fn empty_payload_is_data_error() {
    let mut dst = [0u8; 64];
    assert_eq!(decompress_standard(&[], &mut dst), Err(CodecError::Data));
    assert_eq!(decompress_standard(b"7zip", &mut dst), Err(CodecError::Data));
    assert_eq!(decompress_linksys(&[], &mut dst), Err(CodecError::Data));
}

#[test]
fn truncated_stream_is_data_error() {
    let data = text(30_000);
    let src = packed(&data);
    let mut dst = vec![0u8; data.len()];
    assert_eq!(
        decompress_standard(&src[..src.len() / 2], &mut dst),
        Err(CodecError::Data)
    );
}

#[test]
fn corrupt_stream_never_overruns_destination() {
    let data = text(8_000);
    let mut src = packed(&data);
    for i in (5..src.len()).step_by(7) {
        src[i] ^= 0xA5;
    }
    let mut dst = vec![0u8; data.len()];
    match decompress_standard(&src, &mut dst) {
        Ok(n) => assert!(n <= dst.len()),
        Err(e) => assert_eq!(e, CodecError::Data),
    }
}

#[test]
fn offset_past_end_is_data_error() {
    let src = packed(&text(100));
    let mut dst = [0u8; 100];
    assert_eq!(
        decompress_explicit(&src, &mut dst, 3, 0, 2, 0, src.len() + 1),
        Err(CodecError::Data)
    );
    assert_eq!(
        decompress_explicit(&src, &mut dst, 3, 0, 2, 0, src.len()),
        Err(CodecError::Data)
    );
}

#[test]
fn explicit_rejects_model_bits_the_engine_cannot_model() {
    let src = packed(&text(100));
    let mut dst = [0u8; 100];
    for (lc, lp, pb) in [(9, 0, 2), (3, 5, 2), (3, 0, 5)] {
        assert_eq!(
            decompress_explicit(&src, &mut dst, lc, lp, pb, 0, 0),
            Err(CodecError::Data)
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Status codes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn status_codes_follow_zlib() {
    assert_eq!(status_code::<usize>(&Ok(10)), Z_OK);
    assert_eq!(status_code::<usize>(&Err(CodecError::Memory)), Z_MEM_ERROR);
    assert_eq!(status_code::<usize>(&Err(CodecError::Buffer)), Z_BUF_ERROR);
    assert_eq!(status_code::<usize>(&Err(CodecError::Data)), Z_DATA_ERROR);
    assert_eq!(CodecError::Data.to_string(), "Z_DATA_ERROR");
}
