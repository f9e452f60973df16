// Integration tests for cli/args.rs
//
//   - mode flags, aliases and extension-based auto mode
//   - decode format selection and raw parameters
//   - scan options
//   - bad usage paths

use lzmadapt::cli::args::{parse_args_from, DecodeFormat, ParsedArgs, RawParams};
use lzmadapt::cli::init::CliInit;
use lzmadapt::cli::op_mode::OpMode;
use lzmadapt::config::{CAPACITY_DEFAULT, SCAN_MAX_OFFSET_DEFAULT};
use lzmadapt::ContainerFormat;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn init(op_mode: OpMode) -> CliInit {
    CliInit {
        op_mode,
        c_level: 6,
        nb_workers: 0,
    }
}

fn args(a: &[&str]) -> Vec<String> {
    a.iter().map(|s| s.to_string()).collect()
}

fn parse(argv: &[&str]) -> ParsedArgs {
    parse_args_from(init(OpMode::Auto), "lzmadapt", &args(argv)).expect("parse should succeed")
}

fn parse_err(argv: &[&str]) -> String {
    parse_args_from(init(OpMode::Auto), "lzmadapt", &args(argv))
        .expect_err("expected parse error")
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn defaults_for_plain_input() {
    let p = parse(&["image.bin"]);
    assert_eq!(p.op_mode, OpMode::Compress);
    assert_eq!(p.c_level, 6);
    assert_eq!(p.format, DecodeFormat::Container(ContainerFormat::Standard));
    assert_eq!(p.raw, RawParams::default());
    assert_eq!(p.capacity, CAPACITY_DEFAULT);
    assert_eq!(p.max_offset, SCAN_MAX_OFFSET_DEFAULT);
    assert!(!p.force_overwrite);
    assert!(p.output_filename.is_none());
    assert!(!p.exit_early);
}

#[test]
fn alias_mode_survives_parse() {
    let p = parse_args_from(init(OpMode::Decompress), "unlzmadapt", &args(&["x.bin"])).unwrap();
    assert_eq!(p.op_mode, OpMode::Decompress);
    let p = parse_args_from(init(OpMode::Scan), "lzmascan", &args(&["x.bin"])).unwrap();
    assert_eq!(p.op_mode, OpMode::Scan);
}

#[test]
fn env_level_is_overridden_by_flag() {
    let p = parse_args_from(
        CliInit {
            op_mode: OpMode::Auto,
            c_level: 2,
            nb_workers: 3,
        },
        "lzmadapt",
        &args(&["-8", "x"]),
    )
    .unwrap();
    assert_eq!(p.c_level, 8);
    assert_eq!(p.nb_workers, 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Modes and formats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn long_mode_flags() {
    assert_eq!(parse(&["--decompress", "x"]).op_mode, OpMode::Decompress);
    assert_eq!(parse(&["--uncompress", "x"]).op_mode, OpMode::Decompress);
    assert_eq!(parse(&["--compress", "x.lzma"]).op_mode, OpMode::Compress);
    assert_eq!(parse(&["--scan", "x"]).op_mode, OpMode::Scan);
}

#[test]
fn last_mode_flag_wins() {
    assert_eq!(parse(&["-d", "-z", "x"]).op_mode, OpMode::Compress);
    assert_eq!(parse(&["-zs", "x"]).op_mode, OpMode::Scan);
}

#[test]
fn every_format_name() {
    for (name, expected) in [
        ("ddwrt", DecodeFormat::Container(ContainerFormat::DdWrt)),
        ("lzma", DecodeFormat::Container(ContainerFormat::Standard)),
        ("linksys", DecodeFormat::Container(ContainerFormat::Linksys)),
        ("squashfs7z", DecodeFormat::Container(ContainerFormat::SquashFs7z)),
        ("raw", DecodeFormat::Raw),
        ("RAW", DecodeFormat::Raw),
    ] {
        let flag = format!("--format={name}");
        assert_eq!(parse(&["-d", &flag, "x"]).format, expected, "{name}");
    }
}

#[test]
fn unknown_format_names_the_choices() {
    let e = parse_err(&["-d", "--format=bzip2", "x"]);
    assert!(e.contains("bzip2"));
    assert!(e.contains("ddwrt"));
}

#[test]
fn raw_parameters() {
    let p = parse(&["-d", "--format=raw", "--pb=0", "--dict=1MiB", "x"]);
    assert_eq!(p.raw.lc, 3);
    assert_eq!(p.raw.lp, 0);
    assert_eq!(p.raw.pb, 0);
    assert_eq!(p.raw.dictionary_size, 1 << 20);
    assert_eq!(p.raw.offset, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn input_and_output_positions() {
    let p = parse(&["-d", "in.lzma", "out.bin"]);
    assert_eq!(p.input_filename.as_deref(), Some("in.lzma"));
    assert_eq!(p.output_filename.as_deref(), Some("out.bin"));
}

#[test]
fn single_dash_is_a_filename() {
    let p = parse(&["-"]);
    assert_eq!(p.input_filename.as_deref(), Some("-"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bad_usage_messages() {
    assert!(parse_err(&[]).starts_with("bad usage"));
    assert!(parse_err(&["-y", "x"]).contains("unknown option"));
    assert!(parse_err(&["--lp=", "x"]).contains("--lp"));
    assert!(parse_err(&["--offset=-4", "x"]).contains("--offset"));
    assert!(parse_err(&["-B", "x"]).contains("-B"));
    assert!(parse_err(&["a", "b", "c"]).contains("c"));
}

#[test]
fn help_and_version_exit_early() {
    assert!(parse(&["-h"]).exit_early);
    assert!(parse(&["-H"]).exit_early);
    assert!(parse(&["--help"]).exit_early);
    assert!(parse(&["--version", "ignored", "files"]).exit_early);
}
