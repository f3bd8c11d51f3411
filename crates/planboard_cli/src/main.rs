//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `planboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!("planboard_core ping={}", planboard_core::ping());
    println!(
        "planboard_core version={}",
        planboard_core::core_version()
    );

    // Opening an in-memory database exercises the full migration chain.
    match planboard_core::db::open_db_in_memory() {
        Ok(_) => {
            println!(
                "planboard_core schema_version={}",
                planboard_core::db::migrations::latest_version()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("planboard_core db probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}
