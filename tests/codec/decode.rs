// Integration tests for the shared decode routine and the parameterized
// decompression entry point.
//
// Covers:
//   - offset handling: 0, a prefix, exactly the source length, past it
//   - the 8 MiB default for a zero dictionary size
//   - capacity exhaustion returns the capacity
//   - corrupt payloads and refused parameters are Data errors

use lzmadapt::codec::decompress_explicit_with;
use lzmadapt::config::DEFAULT_DICTIONARY_SIZE;
use lzmadapt::engine::{CodecParams, EngineError, LzmaEngine};
use lzmadapt::{decompress_explicit, run_decode, CodecError};

use super::support::{encode_raw, encode_unterminated, noise, packed, sample, SpyEngine};

// ─────────────────────────────────────────────────────────────────────────────
// Offsets
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn offset_skips_leading_bytes() {
    let data = sample(5_000);
    let mut src = vec![0xA5; 4];
    src.extend_from_slice(&packed(&data, 6));

    let mut dst = vec![0u8; data.len()];
    let n = decompress_explicit(&src, &mut dst, 3, 0, 2, 0, 4).unwrap();
    assert_eq!(&dst[..n], &data[..]);
}

#[test]
fn offset_equal_to_length_is_data_error() {
    let src = packed(b"abc", 6);
    let mut dst = [0u8; 16];
    assert_eq!(
        decompress_explicit(&src, &mut dst, 3, 0, 2, 0, src.len()),
        Err(CodecError::Data)
    );
}

#[test]
fn offset_past_length_never_configures_engine() {
    let mut spy = SpyEngine::default();
    let mut dst = [0u8; 16];
    assert_eq!(
        decompress_explicit_with(&mut spy, &[1, 2, 3], &mut dst, 3, 0, 2, 0, 4),
        Err(CodecError::Data)
    );
    assert_eq!(spy.configure_calls(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameters
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zero_dictionary_selects_default() {
    let mut spy = SpyEngine::default();
    let mut dst = [0u8; 16];
    decompress_explicit_with(&mut spy, &[0u8; 8], &mut dst, 1, 2, 3, 0, 0).unwrap();
    assert_eq!(
        spy.decode_params,
        [CodecParams::new(1, 2, 3, DEFAULT_DICTIONARY_SIZE)]
    );

    let mut spy = SpyEngine::default();
    decompress_explicit_with(&mut spy, &[0u8; 8], &mut dst, 1, 2, 3, 65_536, 0).unwrap();
    assert_eq!(spy.decode_params[0].dictionary_size, 65_536);
}

#[test]
fn explicit_parameters_are_not_bounded_by_the_header_rule() {
    // lc + lp = 12 breaks the DD-WRT rule; it still reaches the engine.
    let mut spy = SpyEngine::default();
    let mut dst = [0u8; 16];
    decompress_explicit_with(&mut spy, &[0u8; 8], &mut dst, 8, 4, 4, 0, 0).unwrap();
    assert_eq!(spy.decode_params[0].lc, 8);
    assert_eq!(spy.decode_params[0].lp, 4);
    assert_eq!(spy.runs, 1);
}

#[test]
fn non_default_profile_round_trips() {
    let data = sample(2_000);
    let src = encode_raw(&data, 1, 1, 1, 1 << 16);
    let mut dst = vec![0u8; data.len()];
    let n = decompress_explicit(&src, &mut dst, 1, 1, 1, 1 << 16, 0).unwrap();
    assert_eq!(&dst[..n], &data[..]);
}

#[test]
fn engine_refusal_is_data_error() {
    let mut dst = [0u8; 16];
    assert_eq!(
        decompress_explicit(&[0u8; 16], &mut dst, 9, 0, 0, 0, 0),
        Err(CodecError::Data)
    );
    assert_eq!(
        decompress_explicit(&[0u8; 16], &mut dst, 0, 5, 0, 0, 0),
        Err(CodecError::Data)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared decode routine
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn capacity_is_the_expected_output_size() {
    let mut spy = SpyEngine::default();
    let mut dst = [0u8; 77];
    run_decode(&mut spy, &[0u8; 4], &mut dst, &CodecParams::new(3, 0, 2, 1 << 20)).unwrap();
    assert_eq!(spy.expected_sizes, [Some(77)]);
    assert_eq!(spy.runs, 1);
}

#[test]
fn capacity_exhaustion_returns_capacity() {
    let data = sample(10_000);
    let src = packed(&data, 6);
    let mut dst = vec![0u8; 1_000];
    let n = decompress_explicit(&src, &mut dst, 3, 0, 2, 0, 0).unwrap();
    assert_eq!(n, 1_000);
    assert_eq!(&dst[..], &data[..1_000]);
}

#[test]
fn output_shorter_than_capacity_reports_actual_size() {
    let data = sample(1_234);
    let src = packed(&data, 6);
    let mut dst = vec![0u8; 64 * 1024];
    assert_eq!(decompress_explicit(&src, &mut dst, 3, 0, 2, 0, 0), Ok(1_234));
}

#[test]
fn wrong_parameters_fail_or_differ() {
    let data = sample(8_000);
    let src = encode_raw(&data, 0, 0, 2, 1 << 16);
    let mut dst = vec![0u8; data.len()];
    match decompress_explicit(&src, &mut dst, 3, 0, 2, 1 << 16, 0) {
        Err(e) => assert_eq!(e, CodecError::Data),
        Ok(n) => assert_ne!(&dst[..n], &data[..]),
    }
}

#[test]
fn truncated_payload_is_data_error() {
    let src = packed(&noise(30_000, 11), 6);
    let mut dst = vec![0u8; 30_000];
    assert_eq!(
        decompress_explicit(&src[..src.len() / 2], &mut dst, 3, 0, 2, 0, 0),
        Err(CodecError::Data)
    );
}

#[test]
fn run_failure_is_data_error() {
    let mut spy = SpyEngine {
        run_error: Some(EngineError::Failed("corrupt".into())),
        ..SpyEngine::default()
    };
    let mut dst = [0u8; 8];
    assert_eq!(
        run_decode(&mut spy, &[1], &mut dst, &CodecParams::new(3, 0, 2, 1 << 20)),
        Err(CodecError::Data)
    );

    let mut refused = SpyEngine {
        configure_error: Some(EngineError::Rejected("lc".into())),
        ..SpyEngine::default()
    };
    assert_eq!(
        run_decode(&mut refused, &[1], &mut dst, &CodecParams::new(3, 0, 2, 1 << 20)),
        Err(CodecError::Data)
    );
    assert_eq!(refused.runs, 0);
}

#[test]
fn real_engine_round_trip_via_run_decode() {
    let data = sample(4_096);
    let src = packed(&data, 4);
    let mut dst = vec![0u8; data.len()];
    let n = run_decode(
        &mut LzmaEngine::new(),
        &src,
        &mut dst,
        &CodecParams::new(3, 0, 2, 1 << 18),
    )
    .unwrap();
    assert_eq!(&dst[..n], &data[..]);
}

#[test]
fn unterminated_stream_needs_exact_capacity() {
    let data = sample(5_000);
    let src = encode_unterminated(&data);

    let mut exact = vec![0u8; data.len()];
    assert_eq!(decompress_explicit(&src, &mut exact, 3, 0, 2, 0, 0), Ok(data.len()));
    assert_eq!(exact, data);

    let mut spare = vec![0u8; data.len() + 64 * 1024];
    assert_eq!(
        decompress_explicit(&src, &mut spare, 3, 0, 2, 0, 0),
        Err(CodecError::Data)
    );
}
