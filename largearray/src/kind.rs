/// ElementKind identifies the primitive representation of
/// array elements and its fixed byte width.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// Boolean stored as one byte of 0 or 1.
    Logic,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Pair of f32 as real and imaginary part.
    ComplexFloat,
}

impl ElementKind {
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Logic,
        ElementKind::Byte,
        ElementKind::Short,
        ElementKind::Int,
        ElementKind::Long,
        ElementKind::Float,
        ElementKind::Double,
        ElementKind::ComplexFloat,
    ];

    /// Returns byte width of one element.
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            ElementKind::Logic | ElementKind::Byte => 1,
            ElementKind::Short => 2,
            ElementKind::Int | ElementKind::Float => 4,
            ElementKind::Long | ElementKind::Double | ElementKind::ComplexFloat => 8,
        }
    }

    #[inline]
    pub const fn to_lower(self) -> &'static str {
        match self {
            ElementKind::Logic => "logic",
            ElementKind::Byte => "byte",
            ElementKind::Short => "short",
            ElementKind::Int => "int",
            ElementKind::Long => "long",
            ElementKind::Float => "float",
            ElementKind::Double => "double",
            ElementKind::ComplexFloat => "complex_float",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ComplexF32, Element, Logic};
    use std::mem::size_of;

    #[test]
    fn test_kind_width_matches_element_size() {
        assert_eq!(Logic::KIND.width(), size_of::<Logic>());
        assert_eq!(i8::KIND.width(), size_of::<i8>());
        assert_eq!(i16::KIND.width(), size_of::<i16>());
        assert_eq!(i32::KIND.width(), size_of::<i32>());
        assert_eq!(i64::KIND.width(), size_of::<i64>());
        assert_eq!(f32::KIND.width(), size_of::<f32>());
        assert_eq!(f64::KIND.width(), size_of::<f64>());
        assert_eq!(ComplexF32::KIND.width(), size_of::<ComplexF32>());
    }

    #[test]
    fn test_kind_names_unique() {
        let mut names: Vec<_> = ElementKind::ALL.iter().map(|k| k.to_lower()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(ElementKind::ALL.len(), names.len());
    }
}
