// cli/help.rs — usage text and the bad-usage exit helper

use crate::cli::constants::{
    display_level, AUTHOR, COMPRESSOR_NAME, DECODED_EXTENSION, LZMA_EXTENSION,
};
use crate::cli::op_mode::{ENV_CLEVEL, ENV_NBWORKERS};
use crate::codec::ContainerFormat;
use crate::config::{
    CAPACITY_DEFAULT, CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN, NB_WORKERS_DEFAULT,
    SCAN_MAX_OFFSET_DEFAULT, SCAN_MIN_OUTPUT_DEFAULT,
};

/// Version banner, as printed by `-V`.
pub fn welcome_message() -> String {
    format!(
        "*** {} v{} {}-bit, by {} ***",
        COMPRESSOR_NAME,
        crate::version_string(),
        usize::BITS,
        AUTHOR
    )
}

fn format_names() -> String {
    let mut names: Vec<&str> = ContainerFormat::ALL.iter().map(|f| f.name()).collect();
    names.push("raw");
    names.join("|")
}

/// Print brief usage to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage : ");
    eprintln!("      {} [arg] input [output] ", program);
    eprintln!();
    eprintln!("Arguments : ");
    eprintln!(" -z     : compress (default unless input ends in {})", LZMA_EXTENSION);
    eprintln!(" -d     : decompress (default for {} extension)", LZMA_EXTENSION);
    eprintln!(" -s     : scan input for working decode parameters");
    eprintln!(
        " -#     : compression level {}..{} (default: {})",
        CLEVEL_MIN, CLEVEL_MAX, CLEVEL_DEFAULT
    );
    eprintln!(" -f     : overwrite output without prompting ");
    eprintln!(" -h/-H  : display help/long help and exit ");
}

/// Print the banner, brief usage and advanced options to stderr.
pub fn print_usage_advanced(program: &str) {
    eprintln!("{}", welcome_message());
    print_usage(program);

    eprintln!();
    eprintln!("Advanced arguments :");
    eprintln!(" -V     : display Version number and exit ");
    eprintln!(" -v     : verbose mode (repeat for codec traces)");
    eprintln!(" -q     : suppress warnings; specify twice to suppress errors too");
    eprintln!(
        " -B#    : destination capacity in bytes (default: {} MiB)",
        CAPACITY_DEFAULT >> 20
    );
    eprintln!("--format=NAME : container header, {} (default: lzma)", format_names());
    eprintln!("--lc=# --lp=# --pb=# : raw-format model parameters (default: 3, 0, 2)");
    eprintln!("--dict=#      : raw-format dictionary size (default: 8 MiB)");
    eprintln!("--offset=#    : raw-format payload offset (default: 0)");
    eprintln!("Scan arguments : ");
    eprintln!(
        " -T#    : use # threads (default: {}==all cores) ",
        NB_WORKERS_DEFAULT
    );
    eprintln!(
        "--max-offset=# : highest payload offset tried (default: {})",
        SCAN_MAX_OFFSET_DEFAULT
    );
    eprintln!(
        "--min-output=# : bytes a candidate must produce (default: {})",
        SCAN_MIN_OUTPUT_DEFAULT
    );
}

/// Print the full long-form help to stderr.
pub fn print_long_help(program: &str) {
    print_usage_advanced(program);

    eprintln!();
    eprintln!("Which values can [output] have ? ");
    eprintln!("---------------------------------");
    eprintln!("[output] can be left empty. In this case, it receives the following value :");
    eprintln!("          + for compression, output to input{} ", LZMA_EXTENSION);
    eprintln!(
        "          + for decompression, output to input without '{}', or input{}",
        LZMA_EXTENSION, DECODED_EXTENSION
    );
    eprintln!("Scan mode never writes a file; hits are listed on stdout.");
    eprintln!();
    eprintln!("Environment : ");
    eprintln!("-------------");
    eprintln!("{}  : default compression level", ENV_CLEVEL);
    eprintln!("{} : default scan threads", ENV_NBWORKERS);
    eprintln!();
    eprintln!("Examples :");
    eprintln!("----------");
    eprintln!("1 : unpack a DD-WRT SquashFS block");
    eprintln!("          {} -d --format=ddwrt block.bin", program);
    eprintln!("2 : find the parameters of an unknown payload, 8 threads");
    eprintln!("          {} -s -T8 --max-offset=64 blob.bin", program);
    eprintln!("3 : decode it with what the scan found");
    eprintln!(
        "          {} -d --format=raw --lc=0 --lp=0 --pb=2 --offset=12 blob.bin out.bin",
        program
    );
}

/// Print "Incorrect parameters" and brief usage to stderr, then exit 1.
pub fn print_bad_usage(program: &str) -> ! {
    if display_level() >= 1 {
        crate::display!("Incorrect parameters\n");
        print_usage(program);
    }
    std::process::exit(1);
}
