#![no_main]
use libfuzzer_sys::fuzz_target;
use lzmadapt::ContainerFormat;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through every container and a few raw parameter sets.
    // Errors are expected; panics and out-of-bounds writes are not.
    for &capacity in &[0usize, 4096, 1 << 20] {
        let mut dst = vec![0u8; capacity];
        for format in ContainerFormat::ALL {
            if let Ok(n) = lzmadapt::decompress(format, data, &mut dst) {
                assert!(n <= capacity);
            }
        }
    }

    let mut dst = vec![0u8; 64 * 1024];
    for (lc, lp, pb, offset) in [(3, 0, 2, 0), (0, 0, 2, 1), (8, 4, 4, 4)] {
        if let Ok(n) = lzmadapt::decompress_explicit(data, &mut dst, lc, lp, pb, 0, offset) {
            assert!(n <= dst.len());
        }
    }
});
