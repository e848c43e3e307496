//! Help message display for CLI.

#![allow(clippy::print_stdout)]

/// Print a brief usage reminder when invoked without a source media file.
pub fn print_usage_help() {
    println!("Usage: reelcut <SOURCE_MEDIA> --events <FILE_OR_URL> --group <NAME> [OPTIONS]");
    println!();
    println!("Example: reelcut match.mp4 --events events.csv --group \"spring final\" --padding 2");
    println!();
    println!("Run 'reelcut -h' for all options or 'reelcut config init' to create a config file.");
}
