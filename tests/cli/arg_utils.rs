// Integration tests for cli/arg_utils.rs

use lzmadapt::cli::arg_utils::{
    exe_name_match, last_name_from_path, long_command_w_arg, read_u32_exact, read_u32_from_str,
};

#[test]
fn basename_handles_both_separators() {
    assert_eq!(last_name_from_path("/usr/bin/lzmadapt"), "lzmadapt");
    assert_eq!(last_name_from_path("C:\\bin\\lzmadapt.exe"), "lzmadapt.exe");
    assert_eq!(last_name_from_path(""), "");
}

#[test]
fn exe_name_ignores_extension_only() {
    assert!(exe_name_match("lzmascan", "lzmascan"));
    assert!(exe_name_match("lzmascan.exe", "lzmascan"));
    assert!(!exe_name_match("lzmascanner", "lzmascan"));
}

#[test]
fn sizes_with_suffixes() {
    assert_eq!(read_u32_exact("16M"), Some(16 << 20));
    assert_eq!(read_u32_exact("512KiB"), Some(512 << 10));
    assert_eq!(read_u32_exact("3GB"), Some(3 << 30));
    assert_eq!(read_u32_exact("5G"), None);
    assert_eq!(read_u32_from_str("7,rest"), Some((7, ",rest")));
}

#[test]
fn long_command_prefix() {
    assert_eq!(long_command_w_arg("--dict=1M", "--dict="), Some("1M"));
    assert_eq!(long_command_w_arg("--dictionary", "--dict="), None);
}
