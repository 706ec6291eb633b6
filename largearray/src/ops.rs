use crate::array::LargeArray;
use crate::config::LargeArrayConfig;
use crate::element::{ComplexF32, Element, Logic};
use crate::kind::ElementKind;
use largearray_common::error::Result;

/// LargeArrayOps is the common contract of large arrays of all
/// element kinds, usable as a trait object.
///
/// Every getter and setter accepts any scalar value type and
/// converts by the rules of [`Element`].
pub trait LargeArrayOps: Send + Sync {
    fn kind(&self) -> ElementKind;

    #[inline]
    fn element_width(&self) -> usize {
        self.kind().width()
    }

    fn len(&self) -> usize;

    /// Returns whether the array is stored in native memory.
    fn is_large(&self) -> bool;

    fn get_bool(&self, idx: usize) -> bool;

    fn get_byte(&self, idx: usize) -> i8;

    fn get_short(&self, idx: usize) -> i16;

    fn get_int(&self, idx: usize) -> i32;

    fn get_long(&self, idx: usize) -> i64;

    fn get_float(&self, idx: usize) -> f32;

    fn get_double(&self, idx: usize) -> f64;

    fn set_bool(&mut self, idx: usize, val: bool);

    fn set_byte(&mut self, idx: usize, val: i8);

    fn set_short(&mut self, idx: usize, val: i16);

    fn set_int(&mut self, idx: usize, val: i32);

    fn set_long(&mut self, idx: usize, val: i64);

    fn set_float(&mut self, idx: usize, val: f32);

    fn set_double(&mut self, idx: usize, val: f64);

    /// Extract every `step`-th element in `[start_pos, end_pos)`.
    /// See [`LargeArray::get_converted_data`].
    fn get_bool_data(
        &self,
        buf: Option<Vec<bool>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<bool>>>;

    fn get_byte_data(
        &self,
        buf: Option<Vec<i8>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<i8>>>;

    fn get_short_data(
        &self,
        buf: Option<Vec<i16>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<i16>>>;

    fn get_int_data(
        &self,
        buf: Option<Vec<i32>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<i32>>>;

    fn get_long_data(
        &self,
        buf: Option<Vec<i64>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<i64>>>;

    fn get_float_data(
        &self,
        buf: Option<Vec<f32>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<f32>>>;

    fn get_double_data(
        &self,
        buf: Option<Vec<f64>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<f64>>>;

    /// Returns all elements converted, None if stored natively.
    fn to_bool_vec(&self) -> Option<Vec<bool>>;

    fn to_byte_vec(&self) -> Option<Vec<i8>>;

    fn to_short_vec(&self) -> Option<Vec<i16>>;

    fn to_int_vec(&self) -> Option<Vec<i32>>;

    fn to_long_vec(&self) -> Option<Vec<i64>>;

    fn to_float_vec(&self) -> Option<Vec<f32>>;

    fn to_double_vec(&self) -> Option<Vec<f64>>;

    /// Returns all elements as raw bytes in native endianness.
    fn as_bytes(&self) -> &[u8];

    fn try_clone_boxed(&self) -> Result<Box<dyn LargeArrayOps>>;
}

macro_rules! impl_accessors {
    ($($get:ident, $set:ident, $ty:ty, $to:ident, $from:ident);* $(;)?) => {
        $(
            #[inline]
            fn $get(&self, idx: usize) -> $ty {
                self.get(idx).$to()
            }

            #[inline]
            fn $set(&mut self, idx: usize, val: $ty) {
                self.set(idx, T::$from(val))
            }
        )*
    };
}

macro_rules! impl_extractors {
    ($($name:ident, $all:ident, $ty:ty);* $(;)?) => {
        $(
            #[inline]
            fn $name(
                &self,
                buf: Option<Vec<$ty>>,
                start_pos: i64,
                end_pos: i64,
                step: i64,
            ) -> Result<Option<Vec<$ty>>> {
                LargeArray::$name(self, buf, start_pos, end_pos, step)
            }

            #[inline]
            fn $all(&self) -> Option<Vec<$ty>> {
                LargeArray::$all(self)
            }
        )*
    };
}

impl<T: Element> LargeArrayOps for LargeArray<T> {
    #[inline]
    fn kind(&self) -> ElementKind {
        T::KIND
    }

    #[inline]
    fn len(&self) -> usize {
        LargeArray::len(self)
    }

    #[inline]
    fn is_large(&self) -> bool {
        LargeArray::is_large(self)
    }

    impl_accessors!(
        get_bool, set_bool, bool, to_bool, from_bool;
        get_byte, set_byte, i8, to_i8, from_i8;
        get_short, set_short, i16, to_i16, from_i16;
        get_int, set_int, i32, to_i32, from_i32;
        get_long, set_long, i64, to_i64, from_i64;
        get_float, set_float, f32, to_f32, from_f32;
        get_double, set_double, f64, to_f64, from_f64;
    );

    impl_extractors!(
        get_bool_data, to_bool_vec, bool;
        get_byte_data, to_byte_vec, i8;
        get_short_data, to_short_vec, i16;
        get_int_data, to_int_vec, i32;
        get_long_data, to_long_vec, i64;
        get_float_data, to_float_vec, f32;
        get_double_data, to_double_vec, f64;
    );

    #[inline]
    fn as_bytes(&self) -> &[u8] {
        LargeArray::as_bytes(self)
    }

    #[inline]
    fn try_clone_boxed(&self) -> Result<Box<dyn LargeArrayOps>> {
        Ok(Box::new(self.try_clone()?))
    }
}

/// Create a zero-initialized array of given kind and length with
/// default configuration.
#[inline]
pub fn create(kind: ElementKind, len: i64) -> Result<Box<dyn LargeArrayOps>> {
    create_with_config(kind, len, LargeArrayConfig::default())
}

pub fn create_with_config(
    kind: ElementKind,
    len: i64,
    config: LargeArrayConfig,
) -> Result<Box<dyn LargeArrayOps>> {
    fn boxed<T: Element>(len: i64, config: LargeArrayConfig) -> Result<Box<dyn LargeArrayOps>> {
        Ok(Box::new(LargeArray::<T>::with_config(len, config)?))
    }
    match kind {
        ElementKind::Logic => boxed::<Logic>(len, config),
        ElementKind::Byte => boxed::<i8>(len, config),
        ElementKind::Short => boxed::<i16>(len, config),
        ElementKind::Int => boxed::<i32>(len, config),
        ElementKind::Long => boxed::<i64>(len, config),
        ElementKind::Float => boxed::<f32>(len, config),
        ElementKind::Double => boxed::<f64>(len, config),
        ElementKind::ComplexFloat => boxed::<ComplexF32>(len, config),
    }
}
