// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Validity Bitmap Module** - *Null-Aware Bit Operations*
//!
//! Bit-level validity handling for Arrow-compatible nullable buffers.
//!
//! ## Layout
//! - **LSB bit ordering**: slot `i` lives in byte `i / 8` under mask `1 << (i % 8)`
//! - **1 = valid, 0 = null**: no sentinel value is written into the value buffer for nulls,
//!   the stale value is simply ignored
//! - **Trailing bits**: bits at or beyond the logical length are kept cleared
//!
//! ## Core Operations
//! - **`is_valid`** / **`set_bit`** / **`clear_bit`**: constant time single bit access
//! - **`elementwise_and`**: folds one operand's nulls into another, used after every
//!   column⊕column kernel so the result is null wherever either input was null
//! - **`null_count`**: cleared bits across the live range
//!
//! The kernels run over raw byte slices, so they accept the bytes of a [`minarrow::Bitmask`]
//! (through its `Deref<Target = [u8]>`) as readily as a borrowed FFI buffer.
//! Indices outside the bitmap are a contract violation and panic through slice indexing.

/// Number of bytes required to hold `len` validity bits.
#[inline(always)]
pub fn bytes_for(len: usize) -> usize {
    (len + 7) / 8
}

/// Returns whether bit `i` is set.
#[inline(always)]
pub fn is_valid(bitmap: &[u8], i: usize) -> bool {
    (bitmap[i >> 3] >> (i & 7)) & 1 != 0
}

/// Sets bit `i` in place.
#[inline(always)]
pub fn set_bit(bitmap: &mut [u8], i: usize) {
    bitmap[i >> 3] |= 1u8 << (i & 7);
}

/// Clears bit `i` in place.
#[inline(always)]
pub fn clear_bit(bitmap: &mut [u8], i: usize) {
    bitmap[i >> 3] &= !(1u8 << (i & 7));
}

/// `destination[k] = a[k] & b[k]` for every byte of `destination`.
///
/// Processes 64-bit words, then finishes the remaining bytes one at a time.
/// When `destination` is also the left operand use [`elementwise_and_in_place`].
#[inline]
pub fn elementwise_and(a: &[u8], b: &[u8], destination: &mut [u8]) {
    let n = destination.len();
    debug_assert!(a.len() >= n && b.len() >= n, "elementwise_and: operand shorter than destination");
    let (a, b) = (&a[..n], &b[..n]);

    let mut dst_words = destination.chunks_exact_mut(8);
    let mut a_words = a.chunks_exact(8);
    let mut b_words = b.chunks_exact(8);
    for ((d, x), y) in (&mut dst_words).zip(&mut a_words).zip(&mut b_words) {
        let w = u64::from_le_bytes(word(x)) & u64::from_le_bytes(word(y));
        d.copy_from_slice(&w.to_le_bytes());
    }
    for ((d, x), y) in dst_words
        .into_remainder()
        .iter_mut()
        .zip(a_words.remainder())
        .zip(b_words.remainder())
    {
        *d = x & y;
    }
}

/// `destination[k] &= b[k]` for every byte of `destination`.
#[inline]
pub fn elementwise_and_in_place(destination: &mut [u8], b: &[u8]) {
    let n = destination.len();
    debug_assert!(b.len() >= n, "elementwise_and_in_place: operand shorter than destination");

    let mut dst_words = destination.chunks_exact_mut(8);
    let mut b_words = b[..n].chunks_exact(8);
    for (d, y) in (&mut dst_words).zip(&mut b_words) {
        let w = u64::from_le_bytes(word(d)) & u64::from_le_bytes(word(y));
        d.copy_from_slice(&w.to_le_bytes());
    }
    for (d, y) in dst_words.into_remainder().iter_mut().zip(b_words.remainder()) {
        *d &= y;
    }
}

/// Number of cleared (null) bits in `[0, len)`.
#[inline]
pub fn null_count(bitmap: &[u8], len: usize) -> usize {
    let full = len / 8;
    let mut set: usize = bitmap[..full].iter().map(|b| b.count_ones() as usize).sum();
    let rem = len & 7;
    if rem != 0 {
        let tail = bitmap[full] & ((1u8 << rem) - 1);
        set += tail.count_ones() as usize;
    }
    len - set
}

#[inline(always)]
fn word(bytes: &[u8]) -> [u8; 8] {
    let mut w = [0u8; 8];
    w.copy_from_slice(bytes);
    w
}
