#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&level, payload)) = data.split_first() else {
        return;
    };
    // Levels 1..=4 keep the dictionary small enough for fuzzing throughput.
    let level = i32::from(level % 4) + 1;

    let mut packed = vec![0u8; lzmadapt::compress_bound(payload.len())];
    let n = lzmadapt::compress(payload, &mut packed, level)
        .expect("compress_bound must always be enough");
    packed.truncate(n);

    let mut recovered = vec![0u8; payload.len()];
    let m = lzmadapt::decompress_standard(&packed, &mut recovered)
        .expect("own output must decode");
    assert_eq!(&recovered[..m], payload, "level {level}: {n} compressed bytes");
});
