//! Command-line interface for the `lzmadapt` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, size multipliers, the `DISPLAY_LEVEL` atomic and the display macros. |
//! | [`help`]      | Usage/help text printers and the `print_bad_usage` exit helper. |
//! | [`arg_utils`] | Low-level argument parsing utilities: path basename, executable-name matching, integer parsing. |
//! | [`op_mode`]   | `OpMode` enum and environment-based defaults. |
//! | [`init`]      | `CliInit`: initial state from the binary name and environment. |
//! | [`args`]      | `ParsedArgs`: the argument-parsing loop. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch in `main`.

pub mod constants;
pub mod help;
pub mod arg_utils;
pub mod op_mode;
pub mod init;
pub mod args;
