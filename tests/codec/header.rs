// Integration tests for the container-header variants.
//
// Covers:
//   - DD-WRT: header field order, payload at offset 4, bounded-parameter rule
//   - rejected headers never reach the engine
//   - Standard ("7zip" tag optional), Linksys and squashfs7z round trips
//   - short sources for fixed-size headers

use lzmadapt::codec::{decompress_with, HeaderParams};
use lzmadapt::config::DEFAULT_DICTIONARY_SIZE;
use lzmadapt::engine::CodecParams;
use lzmadapt::{
    decompress, decompress_ddwrt, decompress_linksys, decompress_squashfs7z, decompress_standard,
    CodecError, ContainerFormat,
};

use super::support::{encode_raw, packed, sample, SpyEngine};

fn ddwrt_block(pb: u8, lc: u8, lp: u8, payload: &[u8]) -> Vec<u8> {
    let mut v = vec![pb, lc, lp, 0x00];
    v.extend_from_slice(payload);
    v
}

// ─────────────────────────────────────────────────────────────────────────────
// DD-WRT
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn ddwrt_round_trip() {
    let data = sample(12_000);
    let src = ddwrt_block(2, 3, 0, &packed(&data, 6));
    let mut dst = vec![0u8; data.len()];
    assert_eq!(decompress_ddwrt(&src, &mut dst), Ok(data.len()));
    assert_eq!(dst, data);
}

#[test]
fn ddwrt_non_default_parameters() {
    let data = sample(3_000);
    let src = ddwrt_block(0, 1, 2, &encode_raw(&data, 1, 2, 0, 1 << 16));
    let mut dst = vec![0u8; data.len()];
    assert_eq!(decompress_ddwrt(&src, &mut dst), Ok(data.len()));
    assert_eq!(dst, data);
}

#[test]
fn ddwrt_header_passed_in_pb_lc_lp_order() {
    let mut spy = SpyEngine::default();
    let src = [4u8, 1, 3, 0xFF, 0xAA];
    let mut dst = [0u8; 8];
    decompress_with(&mut spy, ContainerFormat::DdWrt, &src, &mut dst).unwrap();
    assert_eq!(
        spy.decode_params,
        [CodecParams::new(1, 3, 4, DEFAULT_DICTIONARY_SIZE)]
    );
}

#[test]
fn ddwrt_rejections_skip_the_engine() {
    for header in [[5u8, 0, 0], [0, 5, 0], [0, 0, 5], [2, 3, 2], [2, 4, 1]] {
        let mut spy = SpyEngine::default();
        let src = ddwrt_block(header[0], header[1], header[2], &[0u8; 16]);
        let mut dst = [0u8; 16];
        assert_eq!(
            decompress_with(&mut spy, ContainerFormat::DdWrt, &src, &mut dst),
            Err(CodecError::Data),
            "{header:?}"
        );
        assert_eq!(spy.configure_calls(), 0, "{header:?}");
        assert_eq!(spy.runs, 0);
    }
}

#[test]
fn ddwrt_header_only_is_data_error() {
    let mut dst = [0u8; 16];
    assert_eq!(decompress_ddwrt(&[2, 3, 0, 0], &mut dst), Err(CodecError::Data));
    assert_eq!(decompress_ddwrt(&[2, 3], &mut dst), Err(CodecError::Data));
    assert_eq!(decompress_ddwrt(&[], &mut dst), Err(CodecError::Data));
}

#[test]
fn ddwrt_capacity_exhaustion() {
    let data = sample(50_000);
    let src = ddwrt_block(2, 3, 0, &packed(&data, 6));
    let mut dst = vec![0u8; 4_096];
    assert_eq!(decompress_ddwrt(&src, &mut dst), Ok(4_096));
    assert_eq!(&dst[..], &data[..4_096]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Other variants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn standard_with_and_without_magic() {
    let data = sample(6_000);
    let raw = packed(&data, 5);
    let mut tagged = b"7zip".to_vec();
    tagged.extend_from_slice(&raw);

    for src in [&raw, &tagged] {
        let mut dst = vec![0u8; data.len()];
        assert_eq!(decompress_standard(src, &mut dst), Ok(data.len()));
        assert_eq!(dst, data);
    }
}

#[test]
fn linksys_uses_lc0() {
    let data = sample(6_000);
    let src = encode_raw(&data, 0, 0, 2, 1 << 16);
    let mut dst = vec![0u8; data.len()];
    assert_eq!(decompress_linksys(&src, &mut dst), Ok(data.len()));
    assert_eq!(dst, data);
}

#[test]
fn squashfs7z_reads_embedded_properties() {
    let data = sample(9_000);
    let params = CodecParams::new(0, 1, 2, 1 << 16);
    let mut src = vec![0x11, 0x22, 0x33, 0x44, params.props_byte().unwrap()];
    src.extend_from_slice(&params.dictionary_size.to_le_bytes());
    src.extend_from_slice(&encode_raw(&data, 0, 1, 2, 1 << 16));

    assert_eq!(
        ContainerFormat::SquashFs7z.extract(&src),
        Ok(HeaderParams {
            params,
            payload_offset: 9
        })
    );
    let mut dst = vec![0u8; data.len()];
    assert_eq!(decompress_squashfs7z(&src, &mut dst), Ok(data.len()));
    assert_eq!(dst, data);
}

#[test]
fn squashfs7z_short_or_invalid_header() {
    let mut dst = [0u8; 8];
    assert_eq!(decompress_squashfs7z(&[0u8; 8], &mut dst), Err(CodecError::Data));
    let mut src = [0u8; 20];
    src[4] = 0xFF;
    assert_eq!(decompress_squashfs7z(&src, &mut dst), Err(CodecError::Data));
}

#[test]
fn generic_entry_point_matches_named_ones() {
    let data = sample(2_000);
    let src = ddwrt_block(2, 3, 0, &packed(&data, 6));
    let mut a = vec![0u8; data.len()];
    let mut b = vec![0u8; data.len()];
    assert_eq!(
        decompress(ContainerFormat::DdWrt, &src, &mut a),
        decompress_ddwrt(&src, &mut b)
    );
    assert_eq!(a, b);
}

#[test]
fn format_names() {
    let names: Vec<String> = ContainerFormat::ALL.iter().map(|f| f.to_string()).collect();
    assert_eq!(names, ["ddwrt", "lzma", "linksys", "squashfs7z"]);
    assert_eq!("linksys".parse::<ContainerFormat>(), Ok(ContainerFormat::Linksys));
}
