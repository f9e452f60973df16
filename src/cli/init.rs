//! CLI initialization and binary-alias detection.
//!
//! `lzmadapt` may be installed under extra names via links; the mode those
//! names imply is picked up from `argv[0]` before any flag is parsed.
//!
//! | Binary name   | Effect                 |
//! |---------------|------------------------|
//! | `unlzmadapt`  | Decompress             |
//! | `lzmascan`    | Scan for parameters    |
//!
//! Environment defaults (`LZMADAPT_CLEVEL`, `LZMADAPT_NBWORKERS`) are read
//! here as well; explicit flags override them.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::op_mode::{init_c_level, init_nb_workers, OpMode};

pub const UNLZMADAPT: &str = "unlzmadapt";
pub const LZMASCAN: &str = "lzmascan";

/// Initial CLI state derived from the binary name and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliInit {
    pub op_mode: OpMode,
    /// From `LZMADAPT_CLEVEL`, or the default level.
    pub c_level: i32,
    /// From `LZMADAPT_NBWORKERS`, or 0 (all cores).
    pub nb_workers: usize,
}

/// Detect the operation mode from `argv0` (full paths accepted) and read the
/// environment defaults.
pub fn detect_alias(argv0: &str) -> CliInit {
    CliInit {
        op_mode: alias_op_mode(argv0),
        c_level: init_c_level(),
        nb_workers: init_nb_workers(),
    }
}

fn alias_op_mode(argv0: &str) -> OpMode {
    let exe_name = last_name_from_path(argv0);
    if exe_name_match(exe_name, UNLZMADAPT) {
        OpMode::Decompress
    } else if exe_name_match(exe_name, LZMASCAN) {
        OpMode::Scan
    } else {
        OpMode::Auto
    }
}
