//! E2E Suite 02: firmware container formats
//!
//! Builds blocks the way router firmware images lay them out and decodes them
//! through the matching container variant, the generic dispatcher and the
//! parameter scanner.
//!
//! Coverage:
//! - DD-WRT blocks with several valid property triples
//! - Linksys (E2100) blocks, lc0/lp0/pb2
//! - squashfs7z blocks with embedded property blocks and dictionary sizes
//! - a scan recovering the parameters of a Linksys block behind a vendor header

use lzmadapt::engine::{
    Algorithm, CodecParams, CoderEngine, EncoderProfile, LzmaEngine, MatchFinder,
};
use lzmadapt::{
    compress_bound, decompress, scan, CodecError, ContainerFormat, InputStream, OutputStream,
    ScanOptions,
};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Something shaped like a SquashFS metadata block: short records, many repeats.
fn metadata_block(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut inode: u32 = 1;
    while out.len() < len {
        out.extend_from_slice(&inode.to_le_bytes());
        out.extend_from_slice(&0o100644u16.to_le_bytes());
        out.extend_from_slice(format!("/usr/lib/lib{:04}.so", inode % 97).as_bytes());
        out.push(0);
        inode += 1;
    }
    out.truncate(len);
    out
}

fn raw_stream(data: &[u8], params: CodecParams) -> Vec<u8> {
    let mut engine = LzmaEngine::new();
    engine
        .configure_encode(&EncoderProfile {
            params,
            algorithm: Algorithm::Maximum,
            fast_bytes: 64,
            match_finder: MatchFinder::Bt4,
            end_marker: true,
        })
        .expect("configure");
    let mut out = vec![0u8; compress_bound(data.len())];
    let mut output = OutputStream::new(&mut out);
    engine
        .run(&mut InputStream::new(data), &mut output, None)
        .expect("encode");
    let n = output.written_size() as usize;
    out.truncate(n);
    out
}

fn ddwrt_block(data: &[u8], lc: u8, lp: u8, pb: u8) -> Vec<u8> {
    let params = CodecParams::new(lc.into(), lp.into(), pb.into(), 1 << 20);
    let mut block = vec![pb, lc, lp, 0];
    block.extend_from_slice(&raw_stream(data, params));
    block
}

fn squashfs7z_block(data: &[u8], params: CodecParams) -> Vec<u8> {
    let mut block = b"sqz\0".to_vec();
    block.push(params.props_byte().expect("packable"));
    block.extend_from_slice(&params.dictionary_size.to_le_bytes());
    block.extend_from_slice(&raw_stream(data, params));
    block
}

fn decode(format: ContainerFormat, src: &[u8], capacity: usize) -> Result<Vec<u8>, CodecError> {
    let mut out = vec![0u8; capacity];
    let n = decompress(format, src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// DD-WRT
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn ddwrt_blocks_with_varied_properties() {
    let data = metadata_block(40_000);
    for (lc, lp, pb) in [(3, 0, 2), (0, 0, 2), (1, 3, 0), (4, 0, 4), (2, 2, 1)] {
        let block = ddwrt_block(&data, lc, lp, pb);
        assert_eq!(
            decode(ContainerFormat::DdWrt, &block, data.len()),
            Ok(data.clone()),
            "lc={lc} lp={lp} pb={pb}"
        );
    }
}

#[test]
fn ddwrt_reserved_byte_is_ignored() {
    let data = metadata_block(5_000);
    let mut block = ddwrt_block(&data, 3, 0, 2);
    for reserved in [0x00, 0x5A, 0xFF] {
        block[3] = reserved;
        assert_eq!(decode(ContainerFormat::DdWrt, &block, data.len()), Ok(data.clone()));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Linksys
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn linksys_block() {
    let data = metadata_block(64 * 1024);
    let block = raw_stream(&data, CodecParams::new(0, 0, 2, 1 << 23));
    assert_eq!(decode(ContainerFormat::Linksys, &block, data.len()), Ok(data));
}

// ─────────────────────────────────────────────────────────────────────────────
// squashfs7z
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn squashfs7z_blocks() {
    let data = metadata_block(24_000);
    for params in [
        CodecParams::new(3, 0, 2, 1 << 16),
        CodecParams::new(0, 2, 0, 1 << 12),
        CodecParams::new(2, 2, 4, 1 << 20),
    ] {
        let block = squashfs7z_block(&data, params);
        assert_eq!(
            decode(ContainerFormat::SquashFs7z, &block, data.len()),
            Ok(data.clone()),
            "{params:?}"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scan
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn scan_recovers_linksys_parameters_behind_vendor_header() {
    let data = metadata_block(2_048);
    let mut image = b"HDR0\x10\x00\x00\x00".to_vec();
    image.extend_from_slice(&raw_stream(&data, CodecParams::new(0, 0, 2, 1 << 16)));

    let hits = scan(
        &image,
        &ScanOptions {
            capacity: data.len(),
            max_offset: 12,
            min_output: data.len(),
            threads: 0,
            dictionary_sizes: vec![0],
        },
    );
    let exact: Vec<_> = hits
        .iter()
        .filter(|h| h.offset == 8 && (h.params.lc, h.params.lp, h.params.pb) == (0, 0, 2))
        .collect();
    assert_eq!(exact.len(), 1, "hits: {hits:?}");

    let hit = exact[0];
    let mut out = vec![0u8; data.len()];
    let n = lzmadapt::decompress_explicit(
        &image,
        &mut out,
        hit.params.lc,
        hit.params.lp,
        hit.params.pb,
        hit.params.dictionary_size,
        hit.offset,
    )
    .unwrap();
    assert_eq!(&out[..n], &data[..]);
}
