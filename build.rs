// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use std::env;
use std::fs;
use std::path::Path;

/// Largest power of two that still fits a signed 32-bit element count.
const DEFAULT_MAX_BUFFER_CAPACITY: usize = 1 << 30;

fn main() {
    // Allow override via environment variable
    // Format: FRAME_KERNELS_MAX_BUFFER_CAPACITY="4096"
    let override_capacity = env::var("FRAME_KERNELS_MAX_BUFFER_CAPACITY").ok();

    let max_capacity = if let Some(val) = override_capacity {
        match val.trim().parse::<usize>() {
            Ok(cap) if cap.is_power_of_two() && cap <= i32::MAX as usize => {
                println!("cargo:warning=FRAME_KERNELS_MAX_BUFFER_CAPACITY applied: {cap}");
                cap
            }
            _ => panic!(
                "Invalid FRAME_KERNELS_MAX_BUFFER_CAPACITY. Expected a power of two no larger than {}, e.g. \"65536\"",
                i32::MAX
            ),
        }
    } else {
        DEFAULT_MAX_BUFFER_CAPACITY
    };

    // Writes to a consts file that `config.rs` includes, keeping the crate free of lazy statics.
    let out_path = Path::new(&env::var("OUT_DIR").unwrap()).join("buffer_capacity.rs");

    fs::write(
        &out_path,
        format!(
            "
/// Auto-generated maximum number of elements held by a single buffer (chunk).
/// Always a power of two no larger than `i32::MAX`.
/// Overridden at build time via `FRAME_KERNELS_MAX_BUFFER_CAPACITY`.
pub const MAX_BUFFER_CAPACITY: usize = {max_capacity};
"
        ),
    )
    .unwrap();

    println!("cargo:rerun-if-env-changed=FRAME_KERNELS_MAX_BUFFER_CAPACITY");
}
