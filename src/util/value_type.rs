//! ValueType - the runtime descriptor of a property's logical shape.

use super::ComponentType;
use std::fmt;

/// Logical shape of a metadata value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MetadataType {
    /// Unknown/unset shape
    #[default]
    Invalid = 0,
    /// Single component
    Scalar,
    /// Two components
    Vec2,
    /// Three components
    Vec3,
    /// Four components
    Vec4,
    /// 2x2 square matrix
    Mat2,
    /// 3x3 square matrix
    Mat3,
    /// 4x4 square matrix
    Mat4,
    /// True/false
    Boolean,
    /// UTF-8 string
    String,
    /// Enumerated value (carried in the descriptor, never dispatched)
    Enum,
}

impl MetadataType {
    /// Number of components one value of this shape holds.
    #[inline]
    pub const fn component_count(self) -> usize {
        match self {
            Self::Scalar | Self::Boolean | Self::String | Self::Enum => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
            Self::Invalid => 0,
        }
    }

    /// Returns true for Vec2/Vec3/Vec4.
    #[inline]
    pub const fn is_vec(self) -> bool {
        matches!(self, Self::Vec2 | Self::Vec3 | Self::Vec4)
    }

    /// Returns true for Mat2/Mat3/Mat4.
    #[inline]
    pub const fn is_mat(self) -> bool {
        matches!(self, Self::Mat2 | Self::Mat3 | Self::Mat4)
    }

    /// Returns true for shapes built from numeric components.
    #[inline]
    pub const fn has_components(self) -> bool {
        matches!(self, Self::Scalar) || self.is_vec() || self.is_mat()
    }

    /// Returns the name of this shape as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "INVALID",
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Mat2 => "MAT2",
            Self::Mat3 => "MAT3",
            Self::Mat4 => "MAT4",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Enum => "ENUM",
        }
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Full value-type descriptor of one property column.
///
/// Combines a [`MetadataType`] shape with a [`ComponentType`] and an
/// array flag. The component type is meaningful only for Scalar/VecN/MatN
/// shapes; Boolean and String ignore it. Constructed once when a column is
/// first inspected and immutable thereafter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueType {
    /// The logical shape
    pub ty: MetadataType,
    /// The numeric component kind (None for Boolean/String)
    pub component: ComponentType,
    /// Whether each element is a (fixed or variable length) array of values
    pub is_array: bool,
}

impl ValueType {
    /// Create a new descriptor.
    #[inline]
    pub const fn new(ty: MetadataType, component: ComponentType, is_array: bool) -> Self {
        Self { ty, component, is_array }
    }

    /// Create a non-array scalar descriptor.
    #[inline]
    pub const fn scalar(component: ComponentType) -> Self {
        Self::new(MetadataType::Scalar, component, false)
    }

    /// Unknown/invalid descriptor.
    pub const INVALID: Self = Self::new(MetadataType::Invalid, ComponentType::None, false);

    /// Number of components in one value (array-ness aside).
    #[inline]
    pub const fn component_count(&self) -> usize {
        self.ty.component_count()
    }

    /// Size in bytes of one value, 0 for shapes without numeric components.
    #[inline]
    pub const fn num_bytes(&self) -> usize {
        self.ty.component_count() * self.component.num_bytes()
    }

    /// A descriptor is well-formed when its shape is known and, for numeric
    /// shapes, a component type is set.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        match self.ty {
            MetadataType::Invalid => false,
            _ => !self.ty.has_components() || self.component.is_numeric(),
        }
    }

    /// The descriptor of one element of an array property.
    /// Returns None for non-array descriptors.
    #[inline]
    pub fn element_type(&self) -> Option<Self> {
        self.is_array
            .then_some(Self::new(self.ty, self.component, false))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ty.has_components() {
            write!(f, "{}<{}>", self.ty, self.component)?;
        } else {
            write!(f, "{}", self.ty)?;
        }
        if self.is_array {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_counts() {
        assert_eq!(MetadataType::Scalar.component_count(), 1);
        assert_eq!(MetadataType::Vec3.component_count(), 3);
        assert_eq!(MetadataType::Mat4.component_count(), 16);
        assert_eq!(MetadataType::Invalid.component_count(), 0);
    }

    #[test]
    fn test_value_type_bytes() {
        let vt = ValueType::new(MetadataType::Vec3, ComponentType::Float32, false);
        assert_eq!(vt.num_bytes(), 12);
        let vt = ValueType::new(MetadataType::Mat4, ComponentType::Float64, false);
        assert_eq!(vt.num_bytes(), 128);
        let vt = ValueType::new(MetadataType::String, ComponentType::None, false);
        assert_eq!(vt.num_bytes(), 0);
    }

    #[test]
    fn test_validity() {
        assert!(ValueType::scalar(ComponentType::Int32).is_valid());
        assert!(ValueType::new(MetadataType::Boolean, ComponentType::None, false).is_valid());
        assert!(!ValueType::scalar(ComponentType::None).is_valid());
        assert!(!ValueType::INVALID.is_valid());
        assert!(!ValueType::default().is_valid());
    }

    #[test]
    fn test_element_type() {
        let vt = ValueType::new(MetadataType::Vec2, ComponentType::Uint8, true);
        let elem = vt.element_type().unwrap();
        assert_eq!(elem.ty, MetadataType::Vec2);
        assert!(!elem.is_array);
        assert_eq!(ValueType::scalar(ComponentType::Int8).element_type(), None);
    }

    #[test]
    fn test_display() {
        let vt = ValueType::new(MetadataType::Vec3, ComponentType::Float32, false);
        assert_eq!(format!("{}", vt), "VEC3<FLOAT32>");
        let vt = ValueType::new(MetadataType::Scalar, ComponentType::Uint8, true);
        assert_eq!(format!("{}", vt), "SCALAR<UINT8>[]");
        let vt = ValueType::new(MetadataType::String, ComponentType::None, false);
        assert_eq!(format!("{}", vt), "STRING");
    }
}
