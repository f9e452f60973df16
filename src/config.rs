// config.rs — Compile-time configuration constants.
//
// Nothing here is read from disk.  The CLI layers two environment variables
// (LZMADAPT_CLEVEL, LZMADAPT_NBWORKERS) and its own flags on top of these
// defaults; the library entry points use them as-is.

// Default dictionary size for every decode path that does not carry one in
// its header: 8 MiB.
pub const DEFAULT_DICTIONARY_SIZE: u32 = 1 << 23;

// Profile used by the compression entry point and by plain ("7zip"-tagged or
// untagged) streams: tuned for generic, text-like data.
pub const ZLIB_LC: u32 = 3;
pub const ZLIB_LP: u32 = 0;
pub const ZLIB_PB: u32 = 2;

// Profile used by the Linksys E2100 SquashFS images.
pub const E2100_LC: u32 = 0;
pub const E2100_LP: u32 = 0;
pub const E2100_PB: u32 = 2;

// Encoder settings fixed by the compression entry point.
pub const FAST_BYTES: u32 = 128;
// The dictionary for level `n` is `1 << (DICT_LOG_BASE + n)`.
pub const DICT_LOG_BASE: i32 = 14;

// Compression levels, zlib numbering.
pub const CLEVEL_MIN: i32 = 1;
pub const CLEVEL_MAX: i32 = 9;
// Default level for the CLI.  Can be overridden by the LZMADAPT_CLEVEL
// environment variable or by the -# flag.
pub const CLEVEL_DEFAULT: i32 = 6;

// Default destination capacity for CLI decompression and scanning: 16 MiB.
// Override with -B#.
pub const CAPACITY_DEFAULT: usize = 16 << 20;

// Scanner defaults.  Offsets 0..=SCAN_MAX_OFFSET_DEFAULT are probed, and a
// candidate must produce at least SCAN_MIN_OUTPUT_DEFAULT bytes to count.
pub const SCAN_MAX_OFFSET_DEFAULT: usize = 16;
pub const SCAN_MIN_OUTPUT_DEFAULT: usize = 1;

// Default number of scan workers (0 = one per logical core).
// Override with LZMADAPT_NBWORKERS or -T#.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Maximum number of scan worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;
