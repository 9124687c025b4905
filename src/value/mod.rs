//! Boxed metadata values.
//!
//! [`MetadataValue`] is the generic "any value" box handed to consumers:
//! one element's value widened to a canonical representation. Absence is a
//! value here ([`MetadataValue::Empty`]), not an error - optional property
//! metadata (offset, scale, min, max, ...) reads back as `Empty` when it was
//! never declared.
//!
//! Integer scalars and vectors widen to 64 bits, floats keep their
//! precision, and matrices widen to f64. These canonical forms are what the
//! conversion layer in [`convert`] operates on.

mod array;
pub mod convert;

pub use array::PropertyArray;
pub use convert::FromMetadata;

use crate::util::{
    ComponentType, DMat2, DMat3, DMat4, DVec2, DVec3, DVec4, I64Vec2, I64Vec3, I64Vec4,
    MetadataType, U64Vec2, U64Vec3, U64Vec4, ValueType,
};
use std::fmt;

/// One metadata value, widened to its canonical representation.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MetadataValue {
    /// No value. The normal "absent" state, not an error.
    #[default]
    Empty,
    /// Boolean value
    Boolean(bool),
    /// Signed integer scalar (any width, widened)
    Int64(i64),
    /// Unsigned integer scalar (any width, widened)
    Uint64(u64),
    /// Single-precision float scalar
    Float32(f32),
    /// Double-precision float scalar
    Float64(f64),
    /// Signed integer 2-vector
    I64Vec2(I64Vec2),
    /// Signed integer 3-vector
    I64Vec3(I64Vec3),
    /// Signed integer 4-vector
    I64Vec4(I64Vec4),
    /// Unsigned integer 2-vector
    U64Vec2(U64Vec2),
    /// Unsigned integer 3-vector
    U64Vec3(U64Vec3),
    /// Unsigned integer 4-vector
    U64Vec4(U64Vec4),
    /// Float 2-vector (f32 sources widen losslessly)
    DVec2(DVec2),
    /// Float 3-vector
    DVec3(DVec3),
    /// Float 4-vector
    DVec4(DVec4),
    /// 2x2 matrix, widened to f64
    DMat2(DMat2),
    /// 3x3 matrix, widened to f64
    DMat3(DMat3),
    /// 4x4 matrix, widened to f64
    DMat4(DMat4),
    /// UTF-8 string
    String(String),
    /// Array of values
    Array(PropertyArray),
}

impl MetadataValue {
    /// Returns true for [`MetadataValue::Empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The canonical value type of this box.
    ///
    /// Widening means the reported component type is the canonical one
    /// (e.g. an i16 element reports `Int64`), not the storage type of the
    /// column the value came from.
    pub fn value_type(&self) -> ValueType {
        use MetadataType as T;
        match self {
            Self::Empty => ValueType::INVALID,
            Self::Boolean(_) => ValueType::new(T::Boolean, ComponentType::None, false),
            Self::Int64(_) => ValueType::scalar(ComponentType::Int64),
            Self::Uint64(_) => ValueType::scalar(ComponentType::Uint64),
            Self::Float32(_) => ValueType::scalar(ComponentType::Float32),
            Self::Float64(_) => ValueType::scalar(ComponentType::Float64),
            Self::I64Vec2(_) => ValueType::new(T::Vec2, ComponentType::Int64, false),
            Self::I64Vec3(_) => ValueType::new(T::Vec3, ComponentType::Int64, false),
            Self::I64Vec4(_) => ValueType::new(T::Vec4, ComponentType::Int64, false),
            Self::U64Vec2(_) => ValueType::new(T::Vec2, ComponentType::Uint64, false),
            Self::U64Vec3(_) => ValueType::new(T::Vec3, ComponentType::Uint64, false),
            Self::U64Vec4(_) => ValueType::new(T::Vec4, ComponentType::Uint64, false),
            Self::DVec2(_) => ValueType::new(T::Vec2, ComponentType::Float64, false),
            Self::DVec3(_) => ValueType::new(T::Vec3, ComponentType::Float64, false),
            Self::DVec4(_) => ValueType::new(T::Vec4, ComponentType::Float64, false),
            Self::DMat2(_) => ValueType::new(T::Mat2, ComponentType::Float64, false),
            Self::DMat3(_) => ValueType::new(T::Mat3, ComponentType::Float64, false),
            Self::DMat4(_) => ValueType::new(T::Mat4, ComponentType::Float64, false),
            Self::String(_) => ValueType::new(T::String, ComponentType::None, false),
            Self::Array(a) => {
                let elem = a.element_type();
                ValueType::new(elem.ty, elem.component, true)
            }
        }
    }

    /// Convert to `T`, or return `default` when no conversion path exists.
    #[inline]
    pub fn to_or<T: FromMetadata>(&self, default: T) -> T {
        T::from_value(self).unwrap_or(default)
    }

    /// Convert to `T` if a conversion path exists.
    #[inline]
    pub fn to<T: FromMetadata>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// Numeric scalar as f64, if this is a numeric scalar.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Uint64(v) => Some(*v as f64),
            Self::Float32(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    fn as_dvec2(&self) -> Option<DVec2> {
        match self {
            Self::DVec2(v) => Some(*v),
            _ => None,
        }
    }

    fn as_dvec3(&self) -> Option<DVec3> {
        match self {
            Self::DVec3(v) => Some(*v),
            _ => None,
        }
    }

    fn as_dvec4(&self) -> Option<DVec4> {
        match self {
            Self::DVec4(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::Uint64(v) => write!(f, "{}", v),
            Self::Float32(v) => write!(f, "{}", v),
            Self::Float64(v) => write!(f, "{}", v),
            Self::I64Vec2(v) => write!(f, "{}", v),
            Self::I64Vec3(v) => write!(f, "{}", v),
            Self::I64Vec4(v) => write!(f, "{}", v),
            Self::U64Vec2(v) => write!(f, "{}", v),
            Self::U64Vec3(v) => write!(f, "{}", v),
            Self::U64Vec4(v) => write!(f, "{}", v),
            Self::DVec2(v) => write!(f, "{}", v),
            Self::DVec3(v) => write!(f, "{}", v),
            Self::DVec4(v) => write!(f, "{}", v),
            Self::DMat2(v) => write!(f, "{}", v),
            Self::DMat3(v) => write!(f, "{}", v),
            Self::DMat4(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
            Self::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

fn transform_flat<const M: usize>(
    mut v: [f64; M],
    scale: Option<[f64; M]>,
    offset: Option<[f64; M]>,
) -> [f64; M] {
    if let Some(s) = scale {
        for i in 0..M {
            v[i] *= s[i];
        }
    }
    if let Some(o) = offset {
        for i in 0..M {
            v[i] += o[i];
        }
    }
    v
}

/// Apply the `value * scale + offset` transform component-wise.
///
/// Only float-space values transform (offset/scale are declared for float
/// or normalized-integer properties, and normalization has already widened
/// the value by the time this runs). Everything else passes through
/// unchanged, as do mismatched shapes.
pub(crate) fn apply_scale_offset(
    value: MetadataValue,
    scale: Option<&MetadataValue>,
    offset: Option<&MetadataValue>,
) -> MetadataValue {
    if scale.is_none() && offset.is_none() {
        return value;
    }
    let s = scale;
    let o = offset;
    match value {
        MetadataValue::Float32(v) => {
            let [r] = transform_flat(
                [v as f64],
                s.and_then(MetadataValue::as_f64).map(|x| [x]),
                o.and_then(MetadataValue::as_f64).map(|x| [x]),
            );
            MetadataValue::Float32(r as f32)
        }
        MetadataValue::Float64(v) => {
            let [r] = transform_flat(
                [v],
                s.and_then(MetadataValue::as_f64).map(|x| [x]),
                o.and_then(MetadataValue::as_f64).map(|x| [x]),
            );
            MetadataValue::Float64(r)
        }
        MetadataValue::DVec2(v) => MetadataValue::DVec2(DVec2::from_array(transform_flat(
            v.to_array(),
            s.and_then(MetadataValue::as_dvec2).map(|x| x.to_array()),
            o.and_then(MetadataValue::as_dvec2).map(|x| x.to_array()),
        ))),
        MetadataValue::DVec3(v) => MetadataValue::DVec3(DVec3::from_array(transform_flat(
            v.to_array(),
            s.and_then(MetadataValue::as_dvec3).map(|x| x.to_array()),
            o.and_then(MetadataValue::as_dvec3).map(|x| x.to_array()),
        ))),
        MetadataValue::DVec4(v) => MetadataValue::DVec4(DVec4::from_array(transform_flat(
            v.to_array(),
            s.and_then(MetadataValue::as_dvec4).map(|x| x.to_array()),
            o.and_then(MetadataValue::as_dvec4).map(|x| x.to_array()),
        ))),
        MetadataValue::DMat2(v) => {
            let s = s.and_then(|x| match x {
                MetadataValue::DMat2(m) => Some(m.to_cols_array()),
                _ => None,
            });
            let o = o.and_then(|x| match x {
                MetadataValue::DMat2(m) => Some(m.to_cols_array()),
                _ => None,
            });
            MetadataValue::DMat2(DMat2::from_cols_array(&transform_flat(
                v.to_cols_array(),
                s,
                o,
            )))
        }
        MetadataValue::DMat3(v) => {
            let s = s.and_then(|x| match x {
                MetadataValue::DMat3(m) => Some(m.to_cols_array()),
                _ => None,
            });
            let o = o.and_then(|x| match x {
                MetadataValue::DMat3(m) => Some(m.to_cols_array()),
                _ => None,
            });
            MetadataValue::DMat3(DMat3::from_cols_array(&transform_flat(
                v.to_cols_array(),
                s,
                o,
            )))
        }
        MetadataValue::DMat4(v) => {
            let s = s.and_then(|x| match x {
                MetadataValue::DMat4(m) => Some(m.to_cols_array()),
                _ => None,
            });
            let o = o.and_then(|x| match x {
                MetadataValue::DMat4(m) => Some(m.to_cols_array()),
                _ => None,
            });
            MetadataValue::DMat4(DMat4::from_cols_array(&transform_flat(
                v.to_cols_array(),
                s,
                o,
            )))
        }
        other => other,
    }
}
