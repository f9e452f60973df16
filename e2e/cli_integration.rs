// e2e/cli_integration.rs — CLI integration tests (Suite 04)
//
// Drives the `lzmadapt` binary as a black box with std::process::Command.
// Covers compress/decompress dispatch, container and raw decoding, scan
// output, default output names, overwrite protection and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Locate the `lzmadapt` binary produced by Cargo.
fn lzmadapt_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_lzmadapt") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("lzmadapt");
    p
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(lzmadapt_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("LZMADAPT_CLEVEL")
        .env_remove("LZMADAPT_NBWORKERS")
        .output()
        .expect("failed to run lzmadapt")
}

/// TempDir holding `input.txt` with ~6 KB of text.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    fs::write(&input_path, "squashfs block, lzma payload\n".repeat(210)).unwrap();
    (dir, input_path)
}

fn packed(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; lzmadapt::compress_bound(data.len())];
    let n = lzmadapt::compress(data, &mut out, 6).unwrap();
    out.truncate(n);
    out
}

// ── 1. Round trip ────────────────────────────────────────────────────────────

#[test]
fn cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run_in(dir.path(), &["-9", "-f", "input.txt", "packed.lzma"]);
    assert!(out.status.success(), "compress: {}", String::from_utf8_lossy(&out.stderr));
    let compressed = fs::read(dir.path().join("packed.lzma")).unwrap();
    assert!(compressed.len() < original.len());

    let out = run_in(dir.path(), &["-d", "-f", "packed.lzma", "restored.txt"]);
    assert!(out.status.success(), "decompress: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("restored.txt")).unwrap(), original);
}

#[test]
fn cli_default_output_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run_in(dir.path(), &["input.txt"]);
    assert!(out.status.success());
    assert!(dir.path().join("input.txt.lzma").exists());

    // Auto mode picks decompress from the extension.
    fs::remove_file(&input).unwrap();
    let out = run_in(dir.path(), &["input.txt.lzma"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&input).unwrap(), original);
}

#[test]
fn cli_unknown_extension_decodes_to_out_file() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    fs::write(dir.path().join("block.bin"), packed(&original)).unwrap();

    let out = run_in(dir.path(), &["-d", "block.bin"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("block.bin.out")).unwrap(), original);
}

// ── 2. Formats ───────────────────────────────────────────────────────────────

#[test]
fn cli_ddwrt_format() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let mut block = vec![2, 3, 0, 0];
    block.extend_from_slice(&packed(&original));
    fs::write(dir.path().join("block.wrt"), block).unwrap();

    let out = run_in(dir.path(), &["-d", "--format=ddwrt", "block.wrt", "plain"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("plain")).unwrap(), original);
}

#[test]
fn cli_raw_format_with_explicit_parameters() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let mut image = b"VNDR".to_vec();
    image.extend_from_slice(&packed(&original));
    fs::write(dir.path().join("image.bin"), image).unwrap();

    let out = run_in(
        dir.path(),
        &[
            "-d",
            "--format=raw",
            "--lc=3",
            "--lp=0",
            "--pb=2",
            "--dict=1M",
            "--offset=4",
            "image.bin",
            "plain",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("plain")).unwrap(), original);
}

#[test]
fn cli_capacity_limits_output() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    fs::write(dir.path().join("block.lzma"), packed(&original)).unwrap();

    let out = run_in(dir.path(), &["-d", "-B1000", "block.lzma", "head"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("head")).unwrap(), &original[..1000]);
    assert!(String::from_utf8_lossy(&out.stderr).contains("capacity"));
}

// ── 3. Scan ──────────────────────────────────────────────────────────────────

#[test]
fn cli_scan_lists_default_profile() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let mut image = b"HDR".to_vec();
    image.extend_from_slice(&packed(&original));
    fs::write(dir.path().join("image.bin"), image).unwrap();

    let min_output = format!("--min-output={}", original.len());
    let out = run_in(
        dir.path(),
        &["-s", "--max-offset=4", &min_output, "-B64K", "-T2", "image.bin"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.lines().any(|l| l.starts_with("offset=3 lc=3 lp=0 pb=2 ")),
        "scan output:\n{stdout}"
    );
}

#[test]
fn cli_scan_without_hits_is_codec_failure() {
    let dir = TempDir::new().unwrap();
    // Too short for any range coder to start at any offset.
    fs::write(dir.path().join("tiny.bin"), b"abc").unwrap();
    let out = run_in(dir.path(), &["-s", "--max-offset=2", "tiny.bin"]);
    assert_eq!(out.status.code(), Some(2));
}

// ── 4. Info and exit codes ───────────────────────────────────────────────────

#[test]
fn cli_version_flag() {
    let dir = TempDir::new().unwrap();
    let out = run_in(dir.path(), &["-V"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {stdout}");
}

#[test]
fn cli_help_flag() {
    let dir = TempDir::new().unwrap();
    let out = run_in(dir.path(), &["--help"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr).to_lowercase();
    assert!(stderr.contains("usage"));
    assert!(stderr.contains("ddwrt"));
}

#[test]
fn cli_bad_ddwrt_header_exits_with_codec_code() {
    let dir = TempDir::new().unwrap();
    let mut block = vec![9, 9, 9, 0];
    block.extend_from_slice(&packed(b"never decoded"));
    fs::write(dir.path().join("block.wrt"), block).unwrap();

    let out = run_in(dir.path(), &["-d", "--format=ddwrt", "block.wrt", "plain"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Z_DATA_ERROR"));
    assert!(!dir.path().join("plain").exists());
}

#[test]
fn cli_bad_option_exits_with_usage_code() {
    let (dir, _input) = make_temp_input();
    let out = run_in(dir.path(), &["-x", "input.txt"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Error 1 : lzmadapt: bad usage: unknown option: -x"),
        "got: {stderr}"
    );
    assert_eq!(
        run_in(dir.path(), &["-d", "--format=zip", "input.txt"]).status.code(),
        Some(1)
    );
}

#[test]
fn cli_missing_input_file_exits_with_usage_code() {
    let dir = TempDir::new().unwrap();
    let out = run_in(dir.path(), &["-d", "absent.lzma", "plain"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn cli_refuses_to_overwrite_without_force() {
    let (dir, _input) = make_temp_input();
    fs::write(dir.path().join("taken.lzma"), b"keep me").unwrap();

    let out = run_in(dir.path(), &["input.txt", "taken.lzma"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("taken.lzma")).unwrap(), b"keep me");

    let out = run_in(dir.path(), &["-f", "input.txt", "taken.lzma"]);
    assert!(out.status.success());
    assert_ne!(fs::read(dir.path().join("taken.lzma")).unwrap(), b"keep me");
}
