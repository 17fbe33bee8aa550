// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Element trait** - *Compile-time kernel selection per primitive type*
//!
//! Every primitive a column can hold implements [`Element`]. The trait names the zero-sized
//! kernel strategy for that type and hands out its `'static` instance, so the
//! "which primitive am I" branch is resolved once by monomorphisation rather than by
//! runtime type checks on every call.

use core::cmp::Ordering;
use core::fmt;

use crate::kernels::arithmetic::{
    BooleanKernels, FloatKernels, IntegerKernels, PrimitiveKernels, TimestampKernels,
};

/// A primitive value storable in a column buffer.
///
/// `total_cmp` is the ordering used by the sort engine and the multi-buffer merge.
/// It must be a total order: floats use IEEE 754 `totalOrder`
/// (`-NaN < -Inf < … < -0.0 < +0.0 < … < +Inf < +NaN`).
pub trait Element: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Kernel strategy implementing arithmetic, shift and comparison for this type.
    type Kernels: PrimitiveKernels<Self> + 'static;

    /// Type name used in error messages and logs.
    const NAME: &'static str;

    /// The process-wide strategy instance for this type.
    fn kernels() -> &'static Self::Kernels;

    /// Total ordering used for sorting.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

/// Milliseconds since the Unix epoch.
///
/// Only equality and inequality kernels are defined for timestamps; arithmetic and
/// ordering comparisons are rejected as unsupported. Sorting still uses the
/// underlying tick order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.as_millis())
    }
}

macro_rules! impl_element_int {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                type Kernels = IntegerKernels<$ty>;
                const NAME: &'static str = stringify!($ty);

                #[inline(always)]
                fn kernels() -> &'static Self::Kernels {
                    static INSTANCE: IntegerKernels<$ty> = IntegerKernels::new();
                    &INSTANCE
                }

                #[inline(always)]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

macro_rules! impl_element_float {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                type Kernels = FloatKernels<$ty>;
                const NAME: &'static str = stringify!($ty);

                #[inline(always)]
                fn kernels() -> &'static Self::Kernels {
                    static INSTANCE: FloatKernels<$ty> = FloatKernels::new();
                    &INSTANCE
                }

                #[inline(always)]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$ty>::total_cmp(self, other)
                }
            }
        )*
    };
}

impl_element_int!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_element_float!(f32, f64);

impl Element for bool {
    type Kernels = BooleanKernels;
    const NAME: &'static str = "bool";

    #[inline(always)]
    fn kernels() -> &'static Self::Kernels {
        static INSTANCE: BooleanKernels = BooleanKernels;
        &INSTANCE
    }

    #[inline(always)]
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Element for Timestamp {
    type Kernels = TimestampKernels;
    const NAME: &'static str = "timestamp";

    #[inline(always)]
    fn kernels() -> &'static Self::Kernels {
        static INSTANCE: TimestampKernels = TimestampKernels;
        &INSTANCE
    }

    #[inline(always)]
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernels_are_singletons() {
        let a = <i32 as Element>::kernels() as *const _;
        let b = <i32 as Element>::kernels() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn test_float_total_cmp_orders_nan_last() {
        assert_eq!(Element::total_cmp(&f64::NAN, &f64::INFINITY), Ordering::Greater);
        assert_eq!(Element::total_cmp(&-0.0f32, &0.0f32), Ordering::Less);
        assert_eq!(Element::total_cmp(&1.0f32, &1.0f32), Ordering::Equal);
    }

    #[test]
    fn test_names() {
        assert_eq!(<u8 as Element>::NAME, "u8");
        assert_eq!(<f64 as Element>::NAME, "f64");
        assert_eq!(<Timestamp as Element>::NAME, "timestamp");
        assert_eq!(Timestamp::from_millis(5).to_string(), "5ms");
    }

    #[test]
    fn test_timestamp_millis_round_trip_and_order() {
        let t = Timestamp::from_millis(-1_500);
        assert_eq!(t.as_millis(), -1_500);
        assert_eq!(t, Timestamp(-1_500));
        assert_eq!(
            Element::total_cmp(&t, &Timestamp::from_millis(0)),
            Ordering::Less
        );
    }
}
