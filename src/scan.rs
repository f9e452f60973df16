//! Brute-force search for decode parameters.
//!
//! Firmware images often carry LZMA payloads behind headers nobody documented.
//! [`scan`] runs every (offset, lc, lp, pb, dictionary) candidate through
//! [`decompress_explicit`] and reports the ones that produce output.
//!
//! Candidates are independent, so they are decoded in parallel on a dedicated
//! rayon pool; each worker reuses one destination buffer of
//! [`ScanOptions::capacity`] bytes.

use rayon::prelude::*;

use crate::codec::decompress_explicit;
use crate::config::{
    CAPACITY_DEFAULT, DEFAULT_DICTIONARY_SIZE, SCAN_MAX_OFFSET_DEFAULT, SCAN_MIN_OUTPUT_DEFAULT,
};
use crate::displaylevel;
use crate::engine::lzma::{LC_MAX, LP_MAX, PB_MAX};
use crate::engine::CodecParams;

/// Search bounds for [`scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Destination capacity handed to every candidate decode.
    pub capacity: usize,
    /// Highest payload offset tried (clamped to the source length).
    pub max_offset: usize,
    /// Minimum decoded length for a candidate to count as a hit.
    pub min_output: usize,
    /// Worker threads; 0 uses every core.
    pub threads: usize,
    /// Dictionary sizes tried per (offset, lc, lp, pb); 0 means 8 MiB.
    pub dictionary_sizes: Vec<u32>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            capacity: CAPACITY_DEFAULT,
            max_offset: SCAN_MAX_OFFSET_DEFAULT,
            min_output: SCAN_MIN_OUTPUT_DEFAULT,
            threads: 0,
            dictionary_sizes: vec![0],
        }
    }
}

/// A parameter set that decoded successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanHit {
    /// Parameters as tried; a requested dictionary of 0 is reported as 8 MiB.
    pub params: CodecParams,
    pub offset: usize,
    pub decompressed_len: usize,
}

fn candidates(source_len: usize, opts: &ScanOptions) -> Vec<(usize, CodecParams)> {
    let last_offset = opts.max_offset.min(source_len);
    let dictionary_sizes: &[u32] = if opts.dictionary_sizes.is_empty() {
        &[0]
    } else {
        &opts.dictionary_sizes
    };

    let mut out = Vec::new();
    for offset in 0..=last_offset {
        for lc in 0..=LC_MAX {
            for lp in 0..=LP_MAX {
                for pb in 0..=PB_MAX {
                    for &dict in dictionary_sizes {
                        out.push((offset, CodecParams::new(lc, lp, pb, dict)));
                    }
                }
            }
        }
    }
    out
}

fn worker_count(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

fn try_candidate(
    source: &[u8],
    buf: &mut [u8],
    offset: usize,
    params: CodecParams,
    min_output: usize,
) -> Option<ScanHit> {
    let n = decompress_explicit(
        source,
        buf,
        params.lc,
        params.lp,
        params.pb,
        params.dictionary_size,
        offset,
    )
    .ok()?;
    if n < min_output {
        return None;
    }
    let dictionary_size = if params.dictionary_size == 0 {
        DEFAULT_DICTIONARY_SIZE
    } else {
        params.dictionary_size
    };
    Some(ScanHit {
        params: CodecParams { dictionary_size, ..params },
        offset,
        decompressed_len: n,
    })
}

/// Try every candidate parameter set against `source`.
///
/// Hits are sorted by offset, then lc, lp, pb and dictionary size.
pub fn scan(source: &[u8], opts: &ScanOptions) -> Vec<ScanHit> {
    let candidates = candidates(source.len(), opts);
    let nb_workers = worker_count(opts.threads);
    let min_output = opts.min_output.max(1);
    displaylevel!(
        3,
        "scan: {} candidates over {} bytes, {} workers\n",
        candidates.len(),
        source.len(),
        nb_workers
    );

    let run = || -> Vec<ScanHit> {
        candidates
            .par_iter()
            .map_init(
                || vec![0u8; opts.capacity],
                |buf, &(offset, params)| try_candidate(source, buf, offset, params, min_output),
            )
            .flatten()
            .collect()
    };

    let mut hits = match rayon::ThreadPoolBuilder::new()
        .num_threads(nb_workers)
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(e) => {
            displaylevel!(
                2,
                "scan: cannot start {} workers ({}); using the global pool\n",
                nb_workers,
                e
            );
            run()
        }
    };

    hits.sort_by_key(|h| (h.offset, h.params));
    displaylevel!(3, "scan: {} hits\n", hits.len());
    hits
}
