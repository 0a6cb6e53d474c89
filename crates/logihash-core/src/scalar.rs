//! Leaf value hashing.
//!
//! Values that do not expose the logical hash capability are folded to a
//! 32-bit digest with the JVM value-hash conventions, so digests agree with
//! those produced for the same data by JVM hosts:
//!
//! - integers up to 32 bits hash to themselves, wider integers fold their
//!   high word into the low word
//! - `true`/`false` hash to `1231`/`1237`
//! - strings use the polynomial-31 hash over UTF-16 code units
//! - floats fold their IEEE bits, with every NaN collapsed to the canonical NaN
//!
//! Unlike `std::hash::Hash` with the default hasher, these digests are stable
//! across processes and platforms.

/// A leaf value with a stable 32-bit digest.
pub trait ScalarHash {
    fn scalar_hash(&self) -> i32;
}

/// Digest used for an object whose selected properties all contribute zero.
pub fn type_name_hash(type_name: &str) -> i32 {
    type_name.scalar_hash()
}

#[inline]
fn fold_u64(bits: u64) -> i32 {
    (bits ^ (bits >> 32)) as u32 as i32
}

macro_rules! widen_to_i32 {
    ($($t:ty),*) => {
        $(impl ScalarHash for $t {
            #[inline]
            fn scalar_hash(&self) -> i32 {
                i32::from(*self)
            }
        })*
    };
}

widen_to_i32!(i8, i16, i32, u8, u16);

impl ScalarHash for u32 {
    #[inline]
    fn scalar_hash(&self) -> i32 {
        *self as i32
    }
}

impl ScalarHash for i64 {
    #[inline]
    fn scalar_hash(&self) -> i32 {
        fold_u64(*self as u64)
    }
}

impl ScalarHash for u64 {
    #[inline]
    fn scalar_hash(&self) -> i32 {
        fold_u64(*self)
    }
}

impl ScalarHash for isize {
    #[inline]
    fn scalar_hash(&self) -> i32 {
        (*self as i64).scalar_hash()
    }
}

impl ScalarHash for usize {
    #[inline]
    fn scalar_hash(&self) -> i32 {
        (*self as u64).scalar_hash()
    }
}

impl ScalarHash for bool {
    #[inline]
    fn scalar_hash(&self) -> i32 {
        if *self {
            1231
        } else {
            1237
        }
    }
}

impl ScalarHash for char {
    #[inline]
    fn scalar_hash(&self) -> i32 {
        *self as i32
    }
}

impl ScalarHash for f32 {
    fn scalar_hash(&self) -> i32 {
        if self.is_nan() {
            0x7fc0_0000
        } else {
            self.to_bits() as i32
        }
    }
}

impl ScalarHash for f64 {
    fn scalar_hash(&self) -> i32 {
        if self.is_nan() {
            fold_u64(0x7ff8_0000_0000_0000)
        } else {
            fold_u64(self.to_bits())
        }
    }
}

impl ScalarHash for str {
    fn scalar_hash(&self) -> i32 {
        self.encode_utf16()
            .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
    }
}

impl ScalarHash for String {
    fn scalar_hash(&self) -> i32 {
        self.as_str().scalar_hash()
    }
}

impl<T: ScalarHash + ?Sized> ScalarHash for &T {
    fn scalar_hash(&self) -> i32 {
        (**self).scalar_hash()
    }
}

impl<T: ScalarHash + ?Sized> ScalarHash for Box<T> {
    fn scalar_hash(&self) -> i32 {
        (**self).scalar_hash()
    }
}
