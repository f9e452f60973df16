// arg_utils.rs — small parsing helpers for the argument loop

use crate::cli::constants::{GB, KB, MB};

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Returns `true` if `exe_path` is `name`, optionally followed by an extension.
pub fn exe_name_match(exe_path: &str, name: &str) -> bool {
    match exe_path.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Parses an unsigned 32-bit integer from the start of `s`, optionally
/// followed by a size suffix, and returns it with the unconsumed remainder.
///
/// `None` if `s` does not start with a digit or the value overflows `u32`.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
///   `G` / `GB` / `GiB`  → multiply by 1 073 741 824
pub fn read_u32_from_str(s: &str) -> Option<(u32, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let mut result: u32 = 0;
    for b in s[..digits].bytes() {
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    let mut rest = &s[digits..];
    let multiplier = match rest.as_bytes().first() {
        Some(b'K') => KB,
        Some(b'M') => MB,
        Some(b'G') => GB,
        _ => return Some((result, rest)),
    };
    result = u32::try_from(u64::from(result) * multiplier).ok()?;
    rest = &rest[1..];
    rest = rest.strip_prefix('i').unwrap_or(rest);
    rest = rest.strip_prefix('B').unwrap_or(rest);
    Some((result, rest))
}

/// Like [`read_u32_from_str`] but the whole of `s` must be consumed.
pub fn read_u32_exact(s: &str) -> Option<u32> {
    match read_u32_from_str(s)? {
        (value, "") => Some(value),
        _ => None,
    }
}

/// If `arg` starts with `prefix`, returns the remainder of `arg` after `prefix`.
pub fn long_command_w_arg<'a>(arg: &'a str, prefix: &str) -> Option<&'a str> {
    arg.strip_prefix(prefix)
}
