// Integration tests for the LZMA engine behind the entry points.
//
// Covers:
//   - configure-once / run-once through bounded streams
//   - decode stops at the expected size even with a larger destination
//   - encode into a full destination fails instead of truncating

use lzmadapt::engine::{CodecParams, CoderEngine, EngineError, LzmaEngine};
use lzmadapt::codec::encoder_profile;
use lzmadapt::{InputStream, OutputStream};

use super::support::{packed, sample};

#[test]
fn decode_honours_expected_size() {
    let data = sample(5_000);
    let src = packed(&data, 6);

    let mut engine = LzmaEngine::new();
    engine
        .configure_decode_raw(&CodecParams::new(3, 0, 2, 1 << 23))
        .unwrap();
    let mut dst = vec![0u8; data.len()];
    let mut out = OutputStream::new(&mut dst);
    engine
        .run(&mut InputStream::new(&src), &mut out, Some(300))
        .unwrap();
    assert_eq!(out.written_size(), 300);
    assert_eq!(out.written(), &data[..300]);
}

#[test]
fn encode_into_tiny_destination_fails() {
    let data = sample(5_000);
    let mut engine = LzmaEngine::new();
    engine.configure_encode(&encoder_profile(6).unwrap()).unwrap();
    let mut dst = [0u8; 3];
    let r = engine.run(
        &mut InputStream::new(&data),
        &mut OutputStream::new(&mut dst),
        None,
    );
    assert!(matches!(r, Err(EngineError::Failed(_))));
}

#[test]
fn garbage_payload_fails() {
    let mut engine = LzmaEngine::new();
    engine
        .configure_decode_raw(&CodecParams::new(3, 0, 2, 1 << 16))
        .unwrap();
    let mut dst = [0u8; 64];
    let r = engine.run(
        &mut InputStream::new(&[0xFF; 3]),
        &mut OutputStream::new(&mut dst),
        Some(64),
    );
    assert!(r.is_err());
}
