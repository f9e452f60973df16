//! Command-line argument parsing for `lzmadapt` and its aliases.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and filename
//! discovered during the parse.
//!
//! Short options may be aggregated (e.g. `-9fv`).  Long options use
//! `--option=VALUE`.  A bare `--` marks the end of options.
//!
//! Bad or unrecognised options return an `Err` whose message begins with
//! `"bad usage: "`.

use anyhow::anyhow;

use crate::cli::arg_utils::{long_command_w_arg, read_u32_exact, read_u32_from_str};
use crate::cli::constants::{display_level, set_display_level};
use crate::cli::help::{print_long_help, print_usage_advanced, welcome_message};
use crate::cli::init::CliInit;
use crate::cli::op_mode::{determine_op_mode, OpMode};
use crate::codec::ContainerFormat;
use crate::config::{
    CAPACITY_DEFAULT, CLEVEL_MAX, CLEVEL_MIN, NB_WORKERS_MAX, SCAN_MAX_OFFSET_DEFAULT,
    SCAN_MIN_OUTPUT_DEFAULT, ZLIB_LC, ZLIB_LP, ZLIB_PB,
};
use crate::displaylevel;

// ── Decode format ─────────────────────────────────────────────────────────────

/// How `-d` interprets its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFormat {
    /// A known header, parsed by the matching container variant.
    Container(ContainerFormat),
    /// Headerless: parameters and offset come from `--lc/--lp/--pb/--dict/--offset`.
    Raw,
}

impl Default for DecodeFormat {
    fn default() -> Self {
        DecodeFormat::Container(ContainerFormat::Standard)
    }
}

fn parse_format(name: &str) -> anyhow::Result<DecodeFormat> {
    if name.eq_ignore_ascii_case("raw") {
        return Ok(DecodeFormat::Raw);
    }
    name.parse::<ContainerFormat>()
        .map(DecodeFormat::Container)
        .map_err(|e| anyhow!("bad usage: --format: {}", e))
}

/// Parameters for [`DecodeFormat::Raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParams {
    pub lc: u32,
    pub lp: u32,
    pub pb: u32,
    /// 0 selects the 8 MiB default.
    pub dictionary_size: u32,
    pub offset: usize,
}

impl Default for RawParams {
    fn default() -> Self {
        Self {
            lc: ZLIB_LC,
            lp: ZLIB_LP,
            pb: ZLIB_PB,
            dictionary_size: 0,
            offset: 0,
        }
    }
}

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by the argument parsing loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Resolved operation mode; never [`OpMode::Auto`] unless `exit_early`.
    pub op_mode: OpMode,
    /// Compression level.
    pub c_level: i32,
    pub format: DecodeFormat,
    pub raw: RawParams,
    /// Destination capacity for decompression and scan candidates.
    pub capacity: usize,
    /// Scan worker threads (0 = all cores).
    pub nb_workers: usize,
    pub max_offset: usize,
    pub min_output: usize,
    /// Overwrite existing destination files.
    pub force_overwrite: bool,
    pub input_filename: Option<String>,
    pub output_filename: Option<String>,
    /// When `true`, a --version / --help flag was processed; the caller should
    /// exit 0 without touching any file.
    pub exit_early: bool,
    /// Program name (argv[0]), used by help functions.
    pub exe_name: String,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]) using `init` as the starting state.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_default();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(init, &exe_name, &argv)
}

/// Parse an explicit argument list using `init` as the starting state.
///
/// `exe_name` is argv[0] (used for help text). `argv` is argv[1..].
pub fn parse_args_from(
    init: CliInit,
    exe_name: &str,
    argv: &[String],
) -> anyhow::Result<ParsedArgs> {
    let CliInit {
        op_mode: init_op_mode,
        c_level: init_c_level,
        nb_workers: init_nb_workers,
    } = init;

    let mut op_mode = init_op_mode;
    let mut c_level = init_c_level;
    let mut format = DecodeFormat::default();
    let mut raw = RawParams::default();
    let mut raw_option_seen = false;
    let mut capacity = CAPACITY_DEFAULT;
    let mut nb_workers = init_nb_workers;
    let mut max_offset = SCAN_MAX_OFFSET_DEFAULT;
    let mut min_output = SCAN_MIN_OUTPUT_DEFAULT;
    let mut force_overwrite = false;
    let mut all_arguments_are_files = false;
    let mut input_filename: Option<String> = None;
    let mut output_filename: Option<String> = None;
    let mut exit_early = false;

    'args: for argument in argv {
        if argument.is_empty() {
            continue;
        }
        let bytes = argument.as_bytes();

        // ── Filenames ─────────────────────────────────────────────────────────
        if all_arguments_are_files || bytes[0] != b'-' || bytes.len() == 1 {
            if input_filename.is_none() {
                input_filename = Some(argument.clone());
            } else if output_filename.is_none() {
                output_filename = Some(argument.clone());
            } else {
                return Err(anyhow!("bad usage: {} won't be used: too many files", argument));
            }
            continue;
        }

        // ── Long options ──────────────────────────────────────────────────────
        if bytes[1] == b'-' {
            match argument.as_str() {
                "--" => all_arguments_are_files = true,
                "--compress" => op_mode = OpMode::Compress,
                "--decompress" | "--uncompress" => op_mode = OpMode::Decompress,
                "--scan" => op_mode = OpMode::Scan,
                "--force" => force_overwrite = true,
                "--no-force" => force_overwrite = false,
                "--verbose" => set_display_level(display_level().saturating_add(1)),
                "--quiet" => set_display_level(display_level().saturating_sub(1)),
                "--version" => {
                    println!("{}", welcome_message());
                    exit_early = true;
                    break 'args;
                }
                "--help" => {
                    print_usage_advanced(exe_name);
                    exit_early = true;
                    break 'args;
                }
                _ => {
                    if let Some(name) = long_command_w_arg(argument, "--format=") {
                        format = parse_format(name)?;
                    } else if let Some(v) = long_command_w_arg(argument, "--lc=") {
                        raw.lc = long_u32("--lc", v)?;
                        raw_option_seen = true;
                    } else if let Some(v) = long_command_w_arg(argument, "--lp=") {
                        raw.lp = long_u32("--lp", v)?;
                        raw_option_seen = true;
                    } else if let Some(v) = long_command_w_arg(argument, "--pb=") {
                        raw.pb = long_u32("--pb", v)?;
                        raw_option_seen = true;
                    } else if let Some(v) = long_command_w_arg(argument, "--dict=") {
                        raw.dictionary_size = long_u32("--dict", v)?;
                        raw_option_seen = true;
                    } else if let Some(v) = long_command_w_arg(argument, "--offset=") {
                        raw.offset = long_u32("--offset", v)? as usize;
                        raw_option_seen = true;
                    } else if let Some(v) = long_command_w_arg(argument, "--max-offset=") {
                        max_offset = long_u32("--max-offset", v)? as usize;
                    } else if let Some(v) = long_command_w_arg(argument, "--min-output=") {
                        min_output = long_u32("--min-output", v)? as usize;
                    } else if let Some(v) = long_command_w_arg(argument, "--threads=") {
                        nb_workers = checked_workers(long_u32("--threads", v)?)?;
                    } else if let Some(v) = long_command_w_arg(argument, "--capacity=") {
                        capacity = checked_capacity(long_u32("--capacity", v)?)?;
                    } else {
                        return Err(anyhow!("bad usage: unknown option: {}", argument));
                    }
                }
            }
            continue;
        }

        // ── Short options (possibly aggregated, e.g. `-9fv`) ─────────────────
        let mut char_pos: usize = 1;
        while char_pos < bytes.len() {
            let rest = &argument[char_pos..];

            if bytes[char_pos].is_ascii_digit() {
                let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
                let level = read_u32_exact(&rest[..digits])
                    .filter(|l| (CLEVEL_MIN as u32..=CLEVEL_MAX as u32).contains(l))
                    .ok_or_else(|| {
                        anyhow!(
                            "bad usage: -{}: level must be {}..{}",
                            &rest[..digits],
                            CLEVEL_MIN,
                            CLEVEL_MAX
                        )
                    })?;
                c_level = level as i32;
                char_pos += digits;
                continue;
            }

            match bytes[char_pos] {
                b'z' => op_mode = OpMode::Compress,
                b'd' => op_mode = OpMode::Decompress,
                b's' => op_mode = OpMode::Scan,
                b'f' => force_overwrite = true,
                b'v' => set_display_level(display_level().saturating_add(1)),
                b'q' => set_display_level(display_level().saturating_sub(1)),
                b'V' => {
                    println!("{}", welcome_message());
                    exit_early = true;
                    break 'args;
                }
                b'h' => {
                    print_usage_advanced(exe_name);
                    exit_early = true;
                    break 'args;
                }
                b'H' => {
                    print_long_help(exe_name);
                    exit_early = true;
                    break 'args;
                }
                b'B' => {
                    let (value, remainder) = read_u32_from_str(&rest[1..])
                        .ok_or_else(|| anyhow!("bad usage: -B requires a numeric argument"))?;
                    capacity = checked_capacity(value)?;
                    char_pos = bytes.len() - remainder.len();
                    continue;
                }
                b'T' => {
                    let digits = rest[1..].bytes().take_while(u8::is_ascii_digit).count();
                    let value = read_u32_exact(&rest[1..1 + digits])
                        .ok_or_else(|| anyhow!("bad usage: -T requires a numeric argument"))?;
                    nb_workers = checked_workers(value)?;
                    char_pos += 1 + digits;
                    continue;
                }
                other => {
                    return Err(anyhow!("bad usage: unknown option: -{}", other as char));
                }
            }
            char_pos += 1;
        }
    }

    if !exit_early {
        let input = input_filename
            .as_deref()
            .ok_or_else(|| anyhow!("bad usage: no input file"))?;
        if op_mode == OpMode::Auto {
            op_mode = determine_op_mode(input);
        }
        if raw_option_seen && !(op_mode == OpMode::Decompress && format == DecodeFormat::Raw) {
            displaylevel!(
                2,
                "Warning : --lc/--lp/--pb/--dict/--offset only apply to -d --format=raw \n"
            );
        }
        if op_mode == OpMode::Scan && output_filename.is_some() {
            displaylevel!(2, "Warning : scan mode does not write an output file \n");
        }
    }

    Ok(ParsedArgs {
        op_mode,
        c_level,
        format,
        raw,
        capacity,
        nb_workers,
        max_offset,
        min_output,
        force_overwrite,
        input_filename,
        output_filename,
        exit_early,
        exe_name: exe_name.to_owned(),
    })
}

// ── Private helpers ────────────────────────────────────────────────────────────

fn long_u32(option: &str, value: &str) -> anyhow::Result<u32> {
    read_u32_exact(value).ok_or_else(|| anyhow!("bad usage: {}: expected numeric argument", option))
}

fn checked_capacity(value: u32) -> anyhow::Result<usize> {
    if value == 0 {
        return Err(anyhow!("bad usage: capacity must be at least 1 byte"));
    }
    Ok(value as usize)
}

fn checked_workers(value: u32) -> anyhow::Result<usize> {
    let n = value as usize;
    if n > NB_WORKERS_MAX {
        return Err(anyhow!(
            "bad usage: at most {} threads are allowed",
            NB_WORKERS_MAX
        ));
    }
    Ok(n)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
