//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `breadbox_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("breadbox_core version={}", breadbox_core::core_version());

    match breadbox_core::Console::open_in_memory() {
        Ok(_) => println!("breadbox_core store=ok"),
        Err(err) => println!("breadbox_core store=error {err}"),
    }
}
