use crate::kind::ElementKind;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Element is a primitive value storable in a large array.
///
/// Each element converts from and to all scalar value types.
/// Reading follows numeric promotion, writing follows the
/// truncation of a numeric cast: floating values are first
/// saturated to i32 (i64 for long) and then narrowed, NaN becomes 0.
/// Boolean reads are false on zero and true otherwise, boolean
/// writes store canonical 1 or 0.
pub trait Element: Pod + Default + PartialEq + fmt::Debug + Send + Sync {
    const KIND: ElementKind;

    fn to_bool(self) -> bool;

    fn to_i8(self) -> i8;

    fn to_i16(self) -> i16;

    fn to_i32(self) -> i32;

    fn to_i64(self) -> i64;

    fn to_f32(self) -> f32;

    fn to_f64(self) -> f64;

    fn from_bool(v: bool) -> Self;

    fn from_i8(v: i8) -> Self;

    fn from_i16(v: i16) -> Self;

    fn from_i32(v: i32) -> Self;

    fn from_i64(v: i64) -> Self;

    fn from_f32(v: f32) -> Self;

    fn from_f64(v: f64) -> Self;
}

/// Logic is a boolean element backed by a single byte.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Logic(u8);

impl Logic {
    pub const TRUE: Logic = Logic(1);
    pub const FALSE: Logic = Logic(0);

    #[inline]
    pub const fn new(v: bool) -> Self {
        Logic(v as u8)
    }

    /// Returns the stored byte. Bit-level copies from other
    /// one-byte kinds may leave values other than 0 and 1.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl From<bool> for Logic {
    #[inline]
    fn from(v: bool) -> Self {
        Logic::new(v)
    }
}

/// Complex number of two f32 parts.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ComplexF32 {
    pub re: f32,
    pub im: f32,
}

impl ComplexF32 {
    #[inline]
    pub const fn new(re: f32, im: f32) -> Self {
        ComplexF32 { re, im }
    }
}

macro_rules! impl_int {
    ($ty:ty, $kind:expr, $via:ty) => {
        impl Element for $ty {
            const KIND: ElementKind = $kind;

            #[inline]
            fn to_bool(self) -> bool {
                self != 0
            }

            #[inline]
            fn to_i8(self) -> i8 {
                self as i8
            }

            #[inline]
            fn to_i16(self) -> i16 {
                self as i16
            }

            #[inline]
            fn to_i32(self) -> i32 {
                self as i32
            }

            #[inline]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline]
            fn to_f32(self) -> f32 {
                self as f32
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_bool(v: bool) -> Self {
                v as $ty
            }

            #[inline]
            fn from_i8(v: i8) -> Self {
                v as $ty
            }

            #[inline]
            fn from_i16(v: i16) -> Self {
                v as $ty
            }

            #[inline]
            fn from_i32(v: i32) -> Self {
                v as $ty
            }

            #[inline]
            fn from_i64(v: i64) -> Self {
                v as $ty
            }

            #[inline]
            fn from_f32(v: f32) -> Self {
                v as $via as $ty
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $via as $ty
            }
        }
    };
}

impl_int!(i8, ElementKind::Byte, i32);
impl_int!(i16, ElementKind::Short, i32);
impl_int!(i32, ElementKind::Int, i32);
impl_int!(i64, ElementKind::Long, i64);

macro_rules! impl_float {
    ($ty:ty, $kind:expr) => {
        impl Element for $ty {
            const KIND: ElementKind = $kind;

            #[inline]
            fn to_bool(self) -> bool {
                self != 0.0
            }

            #[inline]
            fn to_i8(self) -> i8 {
                self as i32 as i8
            }

            #[inline]
            fn to_i16(self) -> i16 {
                self as i32 as i16
            }

            #[inline]
            fn to_i32(self) -> i32 {
                self as i32
            }

            #[inline]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline]
            fn to_f32(self) -> f32 {
                self as f32
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_bool(v: bool) -> Self {
                if v {
                    1.0
                } else {
                    0.0
                }
            }

            #[inline]
            fn from_i8(v: i8) -> Self {
                v as $ty
            }

            #[inline]
            fn from_i16(v: i16) -> Self {
                v as $ty
            }

            #[inline]
            fn from_i32(v: i32) -> Self {
                v as $ty
            }

            #[inline]
            fn from_i64(v: i64) -> Self {
                v as $ty
            }

            #[inline]
            fn from_f32(v: f32) -> Self {
                v as $ty
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $ty
            }
        }
    };
}

impl_float!(f32, ElementKind::Float);
impl_float!(f64, ElementKind::Double);

impl Element for Logic {
    const KIND: ElementKind = ElementKind::Logic;

    #[inline]
    fn to_bool(self) -> bool {
        self.0 != 0
    }

    #[inline]
    fn to_i8(self) -> i8 {
        self.0 as i8
    }

    #[inline]
    fn to_i16(self) -> i16 {
        self.0 as i16
    }

    #[inline]
    fn to_i32(self) -> i32 {
        self.0 as i32
    }

    #[inline]
    fn to_i64(self) -> i64 {
        self.0 as i64
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self.0 as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.0 as f64
    }

    #[inline]
    fn from_bool(v: bool) -> Self {
        Logic::new(v)
    }

    #[inline]
    fn from_i8(v: i8) -> Self {
        Logic::new(v != 0)
    }

    #[inline]
    fn from_i16(v: i16) -> Self {
        Logic::new(v != 0)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        Logic::new(v != 0)
    }

    #[inline]
    fn from_i64(v: i64) -> Self {
        Logic::new(v != 0)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        Logic::new(v != 0.0)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Logic::new(v != 0.0)
    }
}

// Scalar access on complex elements reads and writes the real part.
impl Element for ComplexF32 {
    const KIND: ElementKind = ElementKind::ComplexFloat;

    #[inline]
    fn to_bool(self) -> bool {
        self.re.to_bool()
    }

    #[inline]
    fn to_i8(self) -> i8 {
        self.re.to_i8()
    }

    #[inline]
    fn to_i16(self) -> i16 {
        self.re.to_i16()
    }

    #[inline]
    fn to_i32(self) -> i32 {
        self.re.to_i32()
    }

    #[inline]
    fn to_i64(self) -> i64 {
        self.re.to_i64()
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self.re
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.re as f64
    }

    #[inline]
    fn from_bool(v: bool) -> Self {
        ComplexF32::new(f32::from_bool(v), 0.0)
    }

    #[inline]
    fn from_i8(v: i8) -> Self {
        ComplexF32::new(v as f32, 0.0)
    }

    #[inline]
    fn from_i16(v: i16) -> Self {
        ComplexF32::new(v as f32, 0.0)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        ComplexF32::new(v as f32, 0.0)
    }

    #[inline]
    fn from_i64(v: i64) -> Self {
        ComplexF32::new(v as f32, 0.0)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        ComplexF32::new(v, 0.0)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        ComplexF32::new(v as f32, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_narrowing() {
        assert_eq!(0x34i8, i8::from_i16(0x1234));
        assert_eq!(-1i8, i8::from_i32(255));
        assert_eq!(0i8, i8::from_i64(256));
        assert_eq!(1i8, i8::from_bool(true));
        assert_eq!(0i8, i8::from_bool(false));
        assert_eq!(42i8, i8::from_f64(42.9));
        assert_eq!(-42i8, i8::from_f32(-42.9));
        // 300 wraps to 44 after passing through int.
        assert_eq!(44i8, i8::from_f64(300.0));
        // saturates to i32::MAX, whose low byte is 0xff.
        assert_eq!(-1i8, i8::from_f64(1e20));
        assert_eq!(0i8, i8::from_f32(f32::NAN));
    }

    #[test]
    fn test_int_and_long_from_float() {
        assert_eq!(i32::MAX, i32::from_f64(1e20));
        assert_eq!(i32::MIN, i32::from_f64(-1e20));
        assert_eq!(i64::MAX, i64::from_f64(1e30));
        assert_eq!(0i64, i64::from_f64(f64::NAN));
        assert_eq!(-1i16, i16::from_f32(65535.0));
    }

    #[test]
    fn test_widening_preserves_value() {
        let v = -123i8;
        assert_eq!(-123i16, v.to_i16());
        assert_eq!(-123i32, v.to_i32());
        assert_eq!(-123i64, v.to_i64());
        assert_eq!(-123.0f32, v.to_f32());
        assert_eq!(-123.0f64, v.to_f64());
        assert!(v.to_bool());
        assert!(!0i64.to_bool());
    }

    #[test]
    fn test_float_reads() {
        assert_eq!(2i8, 2.75f32.to_i8());
        assert_eq!(i64::MIN, f64::NEG_INFINITY.to_i64());
        assert!(f64::NAN.to_bool());
        assert!(!(-0.0f64).to_bool());
        assert_eq!(1.0f64, f64::from_bool(true));
        assert_eq!(0.1f32 as f64, 0.1f32.to_f64());
    }

    #[test]
    fn test_logic_canonical() {
        assert_eq!(Logic::TRUE, Logic::from_i32(-7));
        assert_eq!(Logic::FALSE, Logic::from_i64(0));
        assert_eq!(Logic::TRUE, Logic::from_f64(0.5));
        assert_eq!(Logic::FALSE, Logic::from_f32(0.0));
        assert_eq!(1u8, Logic::from(true).raw());
        assert_eq!(1i32, Logic::TRUE.to_i32());
        assert!(!Logic::default().to_bool());
    }

    #[test]
    fn test_complex_real_part() {
        let c = ComplexF32::new(3.5, -2.0);
        assert_eq!(3i32, c.to_i32());
        assert_eq!(3.5f64, c.to_f64());
        assert!(c.to_bool());
        assert!(!ComplexF32::new(0.0, 1.0).to_bool());
        assert_eq!(ComplexF32::new(7.0, 0.0), ComplexF32::from_i16(7));
        assert_eq!(ComplexF32::new(1.0, 0.0), ComplexF32::from_bool(true));
    }
}
