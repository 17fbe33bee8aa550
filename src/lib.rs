// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **Frame Kernels** - *Sort engine and null-aware kernels for chunked columns*
//!
//! Columns are typed, nullable sequences of primitive values stored Arrow-style: fixed-capacity
//! chunks of 64-byte aligned values, each with a parallel LSB-first validity `Bitmask`.
//!
//! - [`kernels::sort`]: indirect introspective sort producing index permutations
//! - [`kernels::merge`]: k-way merge of per-chunk sort runs into a global order
//! - [`kernels::arithmetic`] and [`kernels::comparison`]: null-aware element-wise kernels in
//!   column⊕column, column⊕scalar and scalar⊕column shapes
//! - [`kernels::bitmap`]: validity bit operations
//! - [`structs`]: the chunk and column containers that call into the kernels
//!
//! Everything runs synchronously on the calling thread. The library emits `tracing` events
//! but installs no subscriber.

pub mod operators;

pub mod errors;

pub mod kernels {
    pub mod arithmetic;
    pub mod bitmap;
    pub mod comparison;
    pub mod merge;
    pub mod sort;
}

pub mod structs {
    pub mod buffer;
    pub mod column;
}

pub mod traits {
    pub mod dense_iter;
    pub mod element;
}

pub mod config;

pub mod utils;

pub use errors::KernelError;
pub use kernels::sort::{SortOptions, argsort, introspective_sort};
pub use minarrow::Bitmask;
pub use operators::{BinaryIntOperation, BinaryOperation, ComparisonOperation};
pub use structs::buffer::Buffer;
pub use structs::column::{PrimitiveColumn, SortIndices};
pub use traits::element::{Element, Timestamp};
