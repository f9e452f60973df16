//! Binary entry point for the `lzmadapt` command-line tool.
//!
//! # Control flow
//!
//! 1. [`detect_alias`] inspects `argv[0]` to infer an initial mode
//!    (e.g. `unlzmadapt` implies decompress) and reads the environment.
//! 2. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 3. [`run`] dispatches to compress / decompress / scan and returns an exit code.
//!
//! Exit codes: 0 success, 1 usage or file errors, 2 codec failures.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context};

use lzmadapt::cli::args::{parse_args, DecodeFormat, ParsedArgs};
use lzmadapt::cli::constants::{COMPRESSOR_NAME, DECODED_EXTENSION, LZMA_EXTENSION};
use lzmadapt::cli::init::detect_alias;
use lzmadapt::cli::op_mode::OpMode;
use lzmadapt::codec::{
    compress, compress_bound, decompress, decompress_explicit, CodecError,
};
use lzmadapt::scan::{scan, ScanOptions};
use lzmadapt::{displaylevel, displayout, end_process};

const EXIT_USAGE: i32 = 1;
const EXIT_CODEC: i32 = 2;

// ── Output naming ─────────────────────────────────────────────────────────────

fn default_output_name(input: &str, op_mode: OpMode) -> String {
    match op_mode {
        OpMode::Decompress => match input.strip_suffix(LZMA_EXTENSION) {
            Some(stem) if !stem.is_empty() && !stem.ends_with('/') => stem.to_owned(),
            _ => format!("{}{}", input, DECODED_EXTENSION),
        },
        _ => format!("{}{}", input, LZMA_EXTENSION),
    }
}

fn read_input(input: &str) -> anyhow::Result<Vec<u8>> {
    fs::read(input).with_context(|| format!("cannot read {}", input))
}

fn write_output(output: &str, data: &[u8], force: bool) -> anyhow::Result<()> {
    if !force && Path::new(output).exists() {
        bail!("{} already exists; use -f to overwrite", output);
    }
    fs::write(output, data).with_context(|| format!("cannot write {}", output))
}

// ── Operations ────────────────────────────────────────────────────────────────

fn run_compress(args: &ParsedArgs, input: &str, output: &str) -> anyhow::Result<()> {
    let src = read_input(input)?;
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress(&src, &mut dst, args.c_level)
        .with_context(|| format!("compressing {} at level {}", input, args.c_level))?;
    write_output(output, &dst[..n], args.force_overwrite)?;

    let ratio = if src.is_empty() {
        100.0
    } else {
        n as f64 / src.len() as f64 * 100.0
    };
    displaylevel!(
        2,
        "Compressed {} bytes into {} bytes ==> {:.2}% \n",
        src.len(),
        n,
        ratio
    );
    Ok(())
}

fn run_decompress(args: &ParsedArgs, input: &str, output: &str) -> anyhow::Result<()> {
    let src = read_input(input)?;
    let mut dst = vec![0u8; args.capacity];
    let result = match args.format {
        DecodeFormat::Container(format) => decompress(format, &src, &mut dst),
        DecodeFormat::Raw => decompress_explicit(
            &src,
            &mut dst,
            args.raw.lc,
            args.raw.lp,
            args.raw.pb,
            args.raw.dictionary_size,
            args.raw.offset,
        ),
    };
    let format_name = match args.format {
        DecodeFormat::Container(format) => format.name(),
        DecodeFormat::Raw => "raw",
    };
    let n = result.with_context(|| format!("decoding {} as {}", input, format_name))?;
    if n == args.capacity {
        displaylevel!(
            2,
            "Warning : output filled all {} bytes of capacity and may be truncated (raise -B) \n",
            args.capacity
        );
    }
    write_output(output, &dst[..n], args.force_overwrite)?;
    displaylevel!(2, "{}: decoded {} bytes \n", input, n);
    Ok(())
}

fn run_scan(args: &ParsedArgs, input: &str) -> anyhow::Result<()> {
    let src = read_input(input)?;
    let opts = ScanOptions {
        capacity: args.capacity,
        max_offset: args.max_offset,
        min_output: args.min_output,
        threads: args.nb_workers,
        dictionary_sizes: vec![args.raw.dictionary_size],
    };
    let hits = scan(&src, &opts);
    if hits.is_empty() {
        return Err(anyhow!(CodecError::Data))
            .with_context(|| format!("no parameter set decodes {}", input));
    }
    for hit in &hits {
        displayout!(
            "offset={} lc={} lp={} pb={} dict={} -> {} bytes\n",
            hit.offset,
            hit.params.lc,
            hit.params.lp,
            hit.params.pb,
            hit.params.dictionary_size,
            hit.decompressed_len
        );
    }
    displaylevel!(2, "{}: {} candidate parameter sets \n", input, hits.len());
    Ok(())
}

/// Execute the operation selected by argument parsing and return the exit code.
fn run(args: ParsedArgs) -> i32 {
    displaylevel!(3, "{}\n", lzmadapt::cli::help::welcome_message());

    let Some(input) = args.input_filename.as_deref() else {
        lzmadapt::cli::help::print_bad_usage(&args.exe_name);
    };
    let output = args
        .output_filename
        .clone()
        .unwrap_or_else(|| default_output_name(input, args.op_mode));

    let result = match args.op_mode {
        OpMode::Compress | OpMode::Auto => run_compress(&args, input, &output),
        OpMode::Decompress => run_decompress(&args, input, &output),
        OpMode::Scan => run_scan(&args, input),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
            // `{:#}` already ends with the codec status name, e.g. "...: Z_DATA_ERROR".
            if e.downcast_ref::<CodecError>().is_some() {
                EXIT_CODEC
            } else {
                EXIT_USAGE
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| COMPRESSOR_NAME.to_owned());
    let init = detect_alias(&argv0);

    let args = match parse_args(init) {
        Ok(a) => a,
        Err(e) => end_process!(EXIT_USAGE, "{}: {}", COMPRESSOR_NAME, e),
    };

    if args.exit_early {
        std::process::exit(0);
    }

    std::process::exit(run(args));
}
