// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Runtime Behaviour Parameters*
//!
//! Global configuration constants controlling sort and buffer behaviour.
//! These values are compile-time constants; `MAX_BUFFER_CAPACITY` is generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/buffer_capacity.rs"));

/// Partitions at or below this size are finished without further quicksort passes.
///
/// Sizes 2 and 3 use fixed compare-and-swap networks, everything else up to this
/// threshold uses a stable insertion sort over the index array.
pub const INTROSORT_SIZE_THRESHOLD: usize = 16;
