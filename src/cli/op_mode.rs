//! Operation mode selection and startup defaults for the CLI.
//!
//! - [`OpMode`]: compress, decompress or scan.
//! - [`determine_op_mode`]: infers the mode from a filename's extension.
//! - [`init_nb_workers`] / [`init_c_level`]: per-process defaults from
//!   `LZMADAPT_NBWORKERS` / `LZMADAPT_CLEVEL`.

use crate::cli::arg_utils::read_u32_exact;
use crate::cli::constants::{display_level, LZMA_EXTENSION};
use crate::config::{CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN, NB_WORKERS_DEFAULT, NB_WORKERS_MAX};

pub const ENV_CLEVEL: &str = "LZMADAPT_CLEVEL";
pub const ENV_NBWORKERS: &str = "LZMADAPT_NBWORKERS";

/// What the CLI should do with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// No `-z`/`-d`/`-s` given: decided by [`determine_op_mode`].
    Auto,
    Compress,
    Decompress,
    /// Try every parameter set against the input and list the ones that decode.
    Scan,
}

/// Decompress if `filename` ends with `.lzma`, compress otherwise.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if filename.ends_with(LZMA_EXTENSION) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

fn warn_ignored(var: &str, value: &str, why: &str) {
    if display_level() >= 2 {
        eprintln!("Ignore environment variable setting {}={}: {}", var, value, why);
    }
}

/// Scan worker count from `LZMADAPT_NBWORKERS`, or [`NB_WORKERS_DEFAULT`] (auto).
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`]; `None` means the variable is unset.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    let Some(env) = env_val else {
        return NB_WORKERS_DEFAULT;
    };
    match read_u32_exact(env) {
        Some(n) if n as usize <= NB_WORKERS_MAX => n as usize,
        Some(_) => {
            warn_ignored(ENV_NBWORKERS, env, "too many workers");
            NB_WORKERS_DEFAULT
        }
        None => {
            warn_ignored(ENV_NBWORKERS, env, "not a valid unsigned value");
            NB_WORKERS_DEFAULT
        }
    }
}

/// Default compression level from `LZMADAPT_CLEVEL`, or [`CLEVEL_DEFAULT`].
pub fn init_c_level() -> i32 {
    init_c_level_from(std::env::var(ENV_CLEVEL).ok().as_deref())
}

/// Testable core of [`init_c_level`]; `None` means the variable is unset.
pub fn init_c_level_from(env_val: Option<&str>) -> i32 {
    let Some(env) = env_val else {
        return CLEVEL_DEFAULT;
    };
    match read_u32_exact(env) {
        Some(n) if (CLEVEL_MIN as u32..=CLEVEL_MAX as u32).contains(&n) => n as i32,
        Some(_) => {
            warn_ignored(ENV_CLEVEL, env, "level out of range");
            CLEVEL_DEFAULT
        }
        None => {
            warn_ignored(ENV_CLEVEL, env, "not a valid unsigned value");
            CLEVEL_DEFAULT
        }
    }
}
