//! Kodegen Bundler WiX - WiX installer source generator.
//!
//! This binary scans the source groups named in a packaging config and writes
//! a `.wxs` manifest plus the GUID registry that keeps component GUIDs stable.

use kodegen_bundler_wix::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse_args();

    // RUST_LOG still wins over -v
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    let exit_code = match cli::run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
