//! E2E Suite 01: compress → decompress round trips
//!
//! Drives the public entry points on realistic payloads and checks that the
//! fixed compression profile decodes through every path that shares it.
//!
//! Coverage:
//! - text, binary, highly repetitive and incompressible inputs
//! - all levels 1..9
//! - destinations sized exactly, generously and short
//! - the same stream through `decompress_standard`, `decompress_explicit`,
//!   a DD-WRT wrapper and a squashfs7z wrapper

use lzmadapt::{
    compress, compress_bound, decompress_ddwrt, decompress_explicit, decompress_squashfs7z,
    decompress_standard, CodecError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn lorem(len: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
        "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(WORDS[(i * 7 + i / 3) % WORDS.len()].as_bytes());
        out.push(if i % 11 == 10 { b'\n' } else { b' ' });
        i += 1;
    }
    out.truncate(len);
    out
}

fn binary_table(len: usize) -> Vec<u8> {
    (0..len as u32)
        .flat_map(|i| (i.wrapping_mul(2_654_435_761) >> 8).to_le_bytes())
        .take(len)
        .collect()
}

fn noise(len: usize) -> Vec<u8> {
    let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|_| {
            x ^= x << 7;
            x ^= x >> 9;
            x as u8
        })
        .collect()
}

fn pack(data: &[u8], level: i32) -> Vec<u8> {
    let mut out = vec![0u8; compress_bound(data.len())];
    let n = compress(data, &mut out, level).expect("compress");
    out.truncate(n);
    out
}

fn unpack_standard(src: &[u8], capacity: usize) -> Result<Vec<u8>, CodecError> {
    let mut out = vec![0u8; capacity];
    let n = decompress_standard(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn text_round_trip() {
    let data = lorem(100_000);
    let src = pack(&data, 6);
    assert!(src.len() < data.len() / 3, "ratio: {} / {}", src.len(), data.len());
    assert_eq!(unpack_standard(&src, data.len()).unwrap(), data);
}

#[test]
fn binary_round_trip() {
    let data = binary_table(64 * 1024);
    assert_eq!(unpack_standard(&pack(&data, 9), data.len()).unwrap(), data);
}

#[test]
fn repetitive_round_trip() {
    let data = vec![0x42u8; 1 << 20];
    let src = pack(&data, 1);
    assert!(src.len() < 4096);
    assert_eq!(unpack_standard(&src, data.len()).unwrap(), data);
}

#[test]
fn incompressible_round_trip() {
    let data = noise(200_000);
    let src = pack(&data, 6);
    assert!(src.len() <= compress_bound(data.len()));
    assert_eq!(unpack_standard(&src, data.len()).unwrap(), data);
}

#[test]
fn single_byte_round_trip() {
    let src = pack(b"!", 6);
    assert_eq!(unpack_standard(&src, 1).unwrap(), b"!");
}

#[test]
fn all_levels() {
    let data = lorem(20_000);
    for level in 1..=9 {
        let src = pack(&data, level);
        assert_eq!(unpack_standard(&src, data.len()).unwrap(), data, "level {level}");
    }
}

#[test]
fn higher_level_is_not_worse_on_long_range_repeats() {
    // A 96 KiB period is beyond the level-1 window (32 KiB) but inside level 9's.
    let block = noise(96 * 1024);
    let mut data = block.clone();
    data.extend_from_slice(&block);
    let small = pack(&data, 1);
    let large = pack(&data, 9);
    assert!(large.len() < small.len(), "{} vs {}", large.len(), small.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Destination sizing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn generous_destination_reports_actual_size() {
    let data = lorem(3_333);
    let out = unpack_standard(&pack(&data, 6), 1 << 20).unwrap();
    assert_eq!(out.len(), 3_333);
    assert_eq!(out, data);
}

#[test]
fn short_destination_holds_a_prefix() {
    let data = lorem(50_000);
    let out = unpack_standard(&pack(&data, 6), 10_000).unwrap();
    assert_eq!(out.len(), 10_000);
    assert_eq!(&out[..], &data[..10_000]);
}

// ─────────────────────────────────────────────────────────────────────────────
// One stream, every compatible path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn one_stream_through_every_compatible_decoder() {
    let data = lorem(30_000);
    let raw = pack(&data, 7);
    let mut out = vec![0u8; data.len()];

    assert_eq!(decompress_explicit(&raw, &mut out, 3, 0, 2, 0, 0), Ok(data.len()));
    assert_eq!(out, data);

    let mut ddwrt = vec![2, 3, 0, 0];
    ddwrt.extend_from_slice(&raw);
    out.fill(0);
    assert_eq!(decompress_ddwrt(&ddwrt, &mut out), Ok(data.len()));
    assert_eq!(out, data);

    let mut tagged = b"7zip".to_vec();
    tagged.extend_from_slice(&raw);
    out.fill(0);
    assert_eq!(decompress_standard(&tagged, &mut out), Ok(data.len()));
    assert_eq!(out, data);

    let mut sq = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x5D];
    sq.extend_from_slice(&(1u32 << 21).to_le_bytes());
    sq.extend_from_slice(&raw);
    out.fill(0);
    assert_eq!(decompress_squashfs7z(&sq, &mut out), Ok(data.len()));
    assert_eq!(out, data);
}
