//! # ExtractPics CLI
//!
//! A thin client over [`extractpics::api::RetentionApi`] backed by the
//! file-system store. Useful for looking at what a user's retention state
//! contains, seeding it for manual testing, or repairing it.
//!
//! All terminal concerns (parsing, printing, exit codes, log output) live in
//! `args.rs` and `cli/`; nothing below the API layer writes to stdout.

mod args;
mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
