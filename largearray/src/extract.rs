use crate::array::LargeArray;
use crate::element::Element;
use largearray_common::error::{Error, Result};

/// Validate a strided range and returns the number of elements in it.
///
/// `start_pos` and `end_pos` must be within `[0, len)` and `end_pos`
/// must not precede `start_pos`. The range excludes `end_pos`.
#[inline]
pub fn strided_count(start_pos: i64, end_pos: i64, step: i64, len: usize) -> Result<usize> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    if start_pos < 0 || start_pos >= len {
        return Err(Error::IndexOutOfBound(format!(
            "start position {} out of range [0, {})",
            start_pos, len
        )));
    }
    if end_pos < 0 || end_pos >= len || end_pos < start_pos {
        return Err(Error::IndexOutOfBound(format!(
            "end position {} out of range [{}, {})",
            end_pos, start_pos, len
        )));
    }
    if step < 1 {
        return Err(Error::InvalidArgument(format!("step {} is less than 1", step)));
    }
    let span = end_pos - start_pos;
    let n = span / step + i64::from(span % step != 0);
    // n is within [0, len), so it always fits.
    Ok(n as usize)
}

macro_rules! strided_data {
    ($($name:ident, $all:ident, $ty:ty, $conv:ident);* $(;)?) => {
        $(
            #[inline]
            pub fn $name(
                &self,
                buf: Option<Vec<$ty>>,
                start_pos: i64,
                end_pos: i64,
                step: i64,
            ) -> Result<Option<Vec<$ty>>> {
                self.get_converted_data(buf, start_pos, end_pos, step, T::$conv)
            }

            #[inline]
            pub fn $all(&self) -> Option<Vec<$ty>> {
                self.get_data().map(|data| data.iter().map(|v| v.$conv()).collect())
            }
        )*
    };
}

impl<T: Element> LargeArray<T> {
    /// Extract every `step`-th element in `[start_pos, end_pos)`,
    /// converted by `conv`.
    ///
    /// The given buffer is reused if it holds enough elements, and
    /// output is written from its beginning. Returns None if output
    /// length exceeds the managed limit, caller should fall back to
    /// element access in that case.
    pub fn get_converted_data<U, F>(
        &self,
        buf: Option<Vec<U>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
        conv: F,
    ) -> Result<Option<Vec<U>>>
    where
        U: Copy + Default,
        F: Fn(T) -> U,
    {
        let n = strided_count(start_pos, end_pos, step, self.len())?;
        if n > self.config().managed_limit {
            return Ok(None);
        }
        let mut out = match buf {
            Some(buf) if buf.len() >= n => buf,
            _ => vec![U::default(); n],
        };
        // start, end and step are validated to be non-negative.
        let indexes = (start_pos as usize..end_pos as usize).step_by(step as usize);
        for (o, i) in out.iter_mut().zip(indexes) {
            *o = conv(self.get(i));
        }
        Ok(Some(out))
    }

    /// Extract elements without conversion.
    #[inline]
    pub fn get_elem_data(
        &self,
        buf: Option<Vec<T>>,
        start_pos: i64,
        end_pos: i64,
        step: i64,
    ) -> Result<Option<Vec<T>>> {
        self.get_converted_data(buf, start_pos, end_pos, step, |v| v)
    }

    /// Returns a copy of all elements.
    /// Native arrays return None.
    #[inline]
    pub fn to_vec(&self) -> Option<Vec<T>> {
        self.get_data().map(|data| data.to_vec())
    }

    strided_data!(
        get_bool_data, to_bool_vec, bool, to_bool;
        get_byte_data, to_byte_vec, i8, to_i8;
        get_short_data, to_short_vec, i16, to_i16;
        get_int_data, to_int_vec, i32, to_i32;
        get_long_data, to_long_vec, i64, to_i64;
        get_float_data, to_float_vec, f32, to_f32;
        get_double_data, to_double_vec, f64, to_f64;
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LargeArrayConfig;
    use crate::counter::MemoryCounter;
    use crate::element::Logic;
    use rand::Rng;

    static COUNTER: MemoryCounter = MemoryCounter::new();

    fn filled(config: LargeArrayConfig) -> Result<LargeArray<i16>> {
        let mut arr = LargeArray::<i16>::with_config(10, config)?;
        for i in 0..10 {
            arr.set(i, i as i16 * 100);
        }
        Ok(arr)
    }

    #[test]
    fn test_strided_count() -> Result<()> {
        assert_eq!(3, strided_count(2, 8, 2, 10)?);
        assert_eq!(3, strided_count(2, 9, 3, 10)?);
        assert_eq!(0, strided_count(4, 4, 1, 10)?);
        assert_eq!(1, strided_count(0, 9, i64::MAX, 10)?);
        assert!(matches!(strided_count(-1, 5, 1, 10), Err(Error::IndexOutOfBound(_))));
        assert!(matches!(strided_count(10, 5, 1, 10), Err(Error::IndexOutOfBound(_))));
        assert!(matches!(strided_count(0, 10, 1, 10), Err(Error::IndexOutOfBound(_))));
        assert!(matches!(strided_count(5, 4, 1, 10), Err(Error::IndexOutOfBound(_))));
        assert!(matches!(strided_count(0, 5, 0, 10), Err(Error::InvalidArgument(_))));
        assert!(matches!(strided_count(0, 5, -2, 10), Err(Error::InvalidArgument(_))));
        Ok(())
    }

    #[test]
    fn test_strided_extraction() -> Result<()> {
        for config in [LargeArrayConfig::default(), LargeArrayConfig::new(4).with_counter(&COUNTER)] {
            let arr = filled(config)?;
            let out = arr.get_short_data(None, 2, 8, 2)?.unwrap();
            assert_eq!(vec![200, 400, 600], out);
            let out = arr.get_double_data(None, 1, 9, 3)?.unwrap();
            assert_eq!(vec![100.0, 400.0, 700.0], out);
            let out = arr.get_byte_data(None, 2, 3, 1)?.unwrap();
            // 200 truncated to a byte.
            assert_eq!(vec![-56], out);
            let out = arr.get_bool_data(None, 0, 2, 1)?.unwrap();
            assert_eq!(vec![false, true], out);
            let out = arr.get_elem_data(None, 5, 5, 1)?.unwrap();
            assert!(out.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_buffer_reuse() -> Result<()> {
        let arr = filled(LargeArrayConfig::default())?;
        let buf = vec![-1i32; 5];
        let ptr = buf.as_ptr();
        let out = arr.get_int_data(Some(buf), 2, 8, 2)?.unwrap();
        assert_eq!(ptr, out.as_ptr());
        assert_eq!(vec![200, 400, 600, -1, -1], out);
        // too short, a fresh buffer is returned.
        let out = arr.get_int_data(Some(vec![0; 2]), 2, 8, 2)?.unwrap();
        assert_eq!(vec![200, 400, 600], out);
        Ok(())
    }

    #[test]
    fn test_not_representable() -> Result<()> {
        static LOCAL: MemoryCounter = MemoryCounter::new();
        let config = LargeArrayConfig::new(4).with_counter(&LOCAL);
        let arr = LargeArray::<f32>::with_config(20, config)?;
        assert!(arr.get_float_data(None, 0, 19, 1)?.is_none());
        assert!(arr.get_float_data(Some(vec![0.0; 100]), 0, 19, 1)?.is_none());
        assert_eq!(4, arr.get_float_data(None, 0, 19, 5)?.unwrap().len());
        assert!(arr.get_float_data(None, 0, 20, 5).is_err());
        Ok(())
    }

    #[test]
    fn test_full_data() -> Result<()> {
        let mut rng = rand::thread_rng();
        let input: Vec<i8> = (0..64).map(|_| rng.gen()).collect();
        let arr = LargeArray::from_vec(input.clone())?;
        assert_eq!(Some(input.clone()), arr.to_vec());
        let ints = arr.to_int_vec().unwrap();
        assert!(input.iter().zip(ints).all(|(a, b)| *a as i32 == b));
        let bools = arr.to_bool_vec().unwrap();
        assert!(input.iter().zip(bools).all(|(a, b)| (*a != 0) == b));

        let native =
            LargeArray::<Logic>::with_config(10, LargeArrayConfig::new(4).with_counter(&COUNTER))?;
        assert!(native.to_vec().is_none());
        assert!(native.to_bool_vec().is_none());
        assert!(native.to_double_vec().is_none());
        Ok(())
    }
}
