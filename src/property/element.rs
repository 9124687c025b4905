//! Element - binds concrete Rust types to their metadata type tags.
//!
//! Every concrete type a property view can store implements [`Element`]:
//! the ten numeric scalars, the glam vector types across all component
//! kinds, [`MatN`] matrices, bool, String, and [`ElementArray`] for array
//! properties. The dispatcher recovers these types from their tags; the
//! trait carries the reverse mapping plus raw/normalized boxing.

use crate::util::{Component, ComponentType, MatN, MetadataType, ValueType};
use crate::util::{
    DVec2, DVec3, DVec4, I16Vec2, I16Vec3, I16Vec4, I64Vec2, I64Vec3, I64Vec4, I8Vec2, I8Vec3,
    I8Vec4, IVec2, IVec3, IVec4, U16Vec2, U16Vec3, U16Vec4, U64Vec2, U64Vec3, U64Vec4, U8Vec2,
    U8Vec3, U8Vec4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4,
};
use crate::value::{MetadataValue, PropertyArray};
use std::fmt;
use std::sync::Arc;

/// A concrete element type a property view can store.
pub trait Element: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Logical shape of this element.
    const TYPE: MetadataType;
    /// Numeric component kind, `None` for boolean/string.
    const COMPONENT: ComponentType;
    /// Whether this element is itself an array of values.
    const IS_ARRAY: bool = false;

    /// The full value-type descriptor for this element type.
    #[inline]
    fn value_type() -> ValueType {
        ValueType::new(Self::TYPE, Self::COMPONENT, Self::IS_ARRAY)
    }

    /// Box the stored value as-is.
    fn to_value(&self) -> MetadataValue;

    /// Box the value with normalized-integer semantics applied.
    fn to_normalized(&self) -> MetadataValue;
}

// === Scalars ===

macro_rules! impl_scalar_element {
    ($($t:ty => $ct:ident, $wide:ident, $wty:ty);+ $(;)?) => {$(
        impl Element for $t {
            const TYPE: MetadataType = MetadataType::Scalar;
            const COMPONENT: ComponentType = ComponentType::$ct;

            #[inline]
            fn to_value(&self) -> MetadataValue {
                MetadataValue::$wide(*self as $wty)
            }

            #[inline]
            fn to_normalized(&self) -> MetadataValue {
                MetadataValue::Float64(Component::normalize(*self))
            }
        }
    )+};
}

impl_scalar_element! {
    i8 => Int8, Int64, i64;
    u8 => Uint8, Uint64, u64;
    i16 => Int16, Int64, i64;
    u16 => Uint16, Uint64, u64;
    i32 => Int32, Int64, i64;
    u32 => Uint32, Uint64, u64;
    i64 => Int64, Int64, i64;
    u64 => Uint64, Uint64, u64;
    f32 => Float32, Float32, f32;
    f64 => Float64, Float64, f64;
}

// === Vectors ===

macro_rules! impl_vec2_element {
    ($($t:ty => $ct:ident, $wide:ident, $wty:ty);+ $(;)?) => {$(
        impl Element for $t {
            const TYPE: MetadataType = MetadataType::Vec2;
            const COMPONENT: ComponentType = ComponentType::$ct;

            #[inline]
            fn to_value(&self) -> MetadataValue {
                MetadataValue::$wide($wide::new(self.x as $wty, self.y as $wty))
            }

            #[inline]
            fn to_normalized(&self) -> MetadataValue {
                MetadataValue::DVec2(DVec2::new(
                    Component::normalize(self.x),
                    Component::normalize(self.y),
                ))
            }
        }
    )+};
}

macro_rules! impl_vec3_element {
    ($($t:ty => $ct:ident, $wide:ident, $wty:ty);+ $(;)?) => {$(
        impl Element for $t {
            const TYPE: MetadataType = MetadataType::Vec3;
            const COMPONENT: ComponentType = ComponentType::$ct;

            #[inline]
            fn to_value(&self) -> MetadataValue {
                MetadataValue::$wide($wide::new(
                    self.x as $wty,
                    self.y as $wty,
                    self.z as $wty,
                ))
            }

            #[inline]
            fn to_normalized(&self) -> MetadataValue {
                MetadataValue::DVec3(DVec3::new(
                    Component::normalize(self.x),
                    Component::normalize(self.y),
                    Component::normalize(self.z),
                ))
            }
        }
    )+};
}

macro_rules! impl_vec4_element {
    ($($t:ty => $ct:ident, $wide:ident, $wty:ty);+ $(;)?) => {$(
        impl Element for $t {
            const TYPE: MetadataType = MetadataType::Vec4;
            const COMPONENT: ComponentType = ComponentType::$ct;

            #[inline]
            fn to_value(&self) -> MetadataValue {
                MetadataValue::$wide($wide::new(
                    self.x as $wty,
                    self.y as $wty,
                    self.z as $wty,
                    self.w as $wty,
                ))
            }

            #[inline]
            fn to_normalized(&self) -> MetadataValue {
                MetadataValue::DVec4(DVec4::new(
                    Component::normalize(self.x),
                    Component::normalize(self.y),
                    Component::normalize(self.z),
                    Component::normalize(self.w),
                ))
            }
        }
    )+};
}

impl_vec2_element! {
    I8Vec2 => Int8, I64Vec2, i64;
    U8Vec2 => Uint8, U64Vec2, u64;
    I16Vec2 => Int16, I64Vec2, i64;
    U16Vec2 => Uint16, U64Vec2, u64;
    IVec2 => Int32, I64Vec2, i64;
    UVec2 => Uint32, U64Vec2, u64;
    I64Vec2 => Int64, I64Vec2, i64;
    U64Vec2 => Uint64, U64Vec2, u64;
    Vec2 => Float32, DVec2, f64;
    DVec2 => Float64, DVec2, f64;
}

impl_vec3_element! {
    I8Vec3 => Int8, I64Vec3, i64;
    U8Vec3 => Uint8, U64Vec3, u64;
    I16Vec3 => Int16, I64Vec3, i64;
    U16Vec3 => Uint16, U64Vec3, u64;
    IVec3 => Int32, I64Vec3, i64;
    UVec3 => Uint32, U64Vec3, u64;
    I64Vec3 => Int64, I64Vec3, i64;
    U64Vec3 => Uint64, U64Vec3, u64;
    Vec3 => Float32, DVec3, f64;
    DVec3 => Float64, DVec3, f64;
}

impl_vec4_element! {
    I8Vec4 => Int8, I64Vec4, i64;
    U8Vec4 => Uint8, U64Vec4, u64;
    I16Vec4 => Int16, I64Vec4, i64;
    U16Vec4 => Uint16, U64Vec4, u64;
    IVec4 => Int32, I64Vec4, i64;
    UVec4 => Uint32, U64Vec4, u64;
    I64Vec4 => Int64, I64Vec4, i64;
    U64Vec4 => Uint64, U64Vec4, u64;
    Vec4 => Float32, DVec4, f64;
    DVec4 => Float64, DVec4, f64;
}

// === Matrices ===

impl<T: Component> Element for MatN<T, 2> {
    const TYPE: MetadataType = MetadataType::Mat2;
    const COMPONENT: ComponentType = T::COMPONENT_TYPE;

    #[inline]
    fn to_value(&self) -> MetadataValue {
        MetadataValue::DMat2(self.as_dmat2())
    }

    #[inline]
    fn to_normalized(&self) -> MetadataValue {
        MetadataValue::DMat2(self.normalized_dmat2())
    }
}

impl<T: Component> Element for MatN<T, 3> {
    const TYPE: MetadataType = MetadataType::Mat3;
    const COMPONENT: ComponentType = T::COMPONENT_TYPE;

    #[inline]
    fn to_value(&self) -> MetadataValue {
        MetadataValue::DMat3(self.as_dmat3())
    }

    #[inline]
    fn to_normalized(&self) -> MetadataValue {
        MetadataValue::DMat3(self.normalized_dmat3())
    }
}

impl<T: Component> Element for MatN<T, 4> {
    const TYPE: MetadataType = MetadataType::Mat4;
    const COMPONENT: ComponentType = T::COMPONENT_TYPE;

    #[inline]
    fn to_value(&self) -> MetadataValue {
        MetadataValue::DMat4(self.as_dmat4())
    }

    #[inline]
    fn to_normalized(&self) -> MetadataValue {
        MetadataValue::DMat4(self.normalized_dmat4())
    }
}

// === Boolean and string ===

impl Element for bool {
    const TYPE: MetadataType = MetadataType::Boolean;
    const COMPONENT: ComponentType = ComponentType::None;

    #[inline]
    fn to_value(&self) -> MetadataValue {
        MetadataValue::Boolean(*self)
    }

    #[inline]
    fn to_normalized(&self) -> MetadataValue {
        self.to_value()
    }
}

impl Element for String {
    const TYPE: MetadataType = MetadataType::String;
    const COMPONENT: ComponentType = ComponentType::None;

    #[inline]
    fn to_value(&self) -> MetadataValue {
        MetadataValue::String(self.clone())
    }

    #[inline]
    fn to_normalized(&self) -> MetadataValue {
        self.to_value()
    }
}

// === Arrays ===

/// One feature's slice of an array property's value buffer.
///
/// Shares the column's buffer; cloning is cheap and never copies values.
#[derive(Clone, Debug)]
pub struct ElementArray<T> {
    buf: Arc<[T]>,
    start: usize,
    len: usize,
}

impl<T> ElementArray<T> {
    /// Create a standalone array owning its values.
    pub fn new(values: impl Into<Arc<[T]>>) -> Self {
        let buf = values.into();
        let len = buf.len();
        Self { buf, start: 0, len }
    }

    pub(crate) fn slice(buf: Arc<[T]>, start: usize, len: usize) -> Self {
        Self { buf, start, len }
    }

    /// The values of this array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf[self.start..self.start + self.len]
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the array holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the value at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Iterate over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.as_slice().iter()
    }
}

impl<T: PartialEq> PartialEq for ElementArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element> Element for ElementArray<T> {
    const TYPE: MetadataType = T::TYPE;
    const COMPONENT: ComponentType = T::COMPONENT;
    const IS_ARRAY: bool = true;

    fn to_value(&self) -> MetadataValue {
        MetadataValue::Array(PropertyArray::new(
            T::value_type(),
            self.iter().map(Element::to_value),
        ))
    }

    fn to_normalized(&self) -> MetadataValue {
        MetadataValue::Array(PropertyArray::new(
            T::value_type(),
            self.iter().map(Element::to_normalized),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tags() {
        assert_eq!(<i32 as Element>::TYPE, MetadataType::Scalar);
        assert_eq!(<i32 as Element>::COMPONENT, ComponentType::Int32);
        assert!(!<i32 as Element>::IS_ARRAY);
        assert_eq!(
            <f64 as Element>::value_type(),
            ValueType::scalar(ComponentType::Float64)
        );
    }

    #[test]
    fn test_scalar_boxing() {
        assert_eq!(42i16.to_value(), MetadataValue::Int64(42));
        assert_eq!(42u8.to_value(), MetadataValue::Uint64(42));
        assert_eq!(1.5f32.to_value(), MetadataValue::Float32(1.5));
        assert_eq!(u8::MAX.to_normalized(), MetadataValue::Float64(1.0));
    }

    #[test]
    fn test_vector_boxing() {
        let v = I8Vec3::new(1, -2, 3);
        assert_eq!(<I8Vec3 as Element>::TYPE, MetadataType::Vec3);
        assert_eq!(v.to_value(), MetadataValue::I64Vec3(I64Vec3::new(1, -2, 3)));

        let v = Vec2::new(0.5, 1.5);
        assert_eq!(v.to_value(), MetadataValue::DVec2(DVec2::new(0.5, 1.5)));
    }

    #[test]
    fn test_matrix_tags() {
        assert_eq!(<MatN<u8, 3> as Element>::TYPE, MetadataType::Mat3);
        assert_eq!(<MatN<u8, 3> as Element>::COMPONENT, ComponentType::Uint8);
        assert_eq!(<MatN<f64, 4> as Element>::COMPONENT, ComponentType::Float64);
    }

    #[test]
    fn test_array_element() {
        let a = ElementArray::new(vec![1i32, 2, 3]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.get(1), Some(&2));
        assert!(<ElementArray<i32> as Element>::IS_ARRAY);

        match a.to_value() {
            MetadataValue::Array(arr) => {
                assert_eq!(arr.size(), 3);
                assert_eq!(arr.get(2), MetadataValue::Int64(3));
                assert_eq!(arr.element_type(), ValueType::scalar(ComponentType::Int32));
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_array_slicing() {
        let buf: Arc<[u8]> = vec![1, 2, 3, 4, 5, 6].into();
        let a = ElementArray::slice(buf.clone(), 2, 2);
        assert_eq!(a.as_slice(), &[3, 4]);
        let b = ElementArray::slice(buf, 4, 2);
        assert_eq!(b.as_slice(), &[5, 6]);
        assert_ne!(a, b);
    }
}
