//! Conversion from boxed metadata values to consumer representations.
//!
//! Every conversion is fallible and silent: when no conversion path exists
//! (or a numeric value is unrepresentable in the target), the result is
//! `None` and callers substitute their own default. Policy:
//!
//! - numeric -> numeric preserves the value when representable; floats
//!   truncate toward zero into integer targets, NaN and out-of-range fail
//! - bool <-> numeric (`!= 0`), strings parse into bool/numeric targets
//! - scalars splat across vector destinations; vectors copy per component,
//!   zero-filling missing destination components and dropping trailing
//!   source components; matrices embed into an identity destination
//! - anything except arrays formats into a string

use super::MetadataValue;
use crate::util::{DMat4, DVec2, DVec3, DVec4, IVec2, IVec3, Vec3};

/// Conversion from a boxed metadata value, with no path expressed as `None`.
pub trait FromMetadata: Sized {
    /// Convert `value` to this representation if a conversion path exists.
    fn from_value(value: &MetadataValue) -> Option<Self>;
}

/// Truncate a float toward zero into an integer target, failing on NaN,
/// infinity, and out-of-range values.
fn float_to_int<T: TryFrom<i128>>(v: f64) -> Option<T> {
    if !v.is_finite() {
        return None;
    }
    let t = v.trunc();
    if t < i128::MIN as f64 || t > i128::MAX as f64 {
        return None;
    }
    T::try_from(t as i128).ok()
}

fn parse_int<T: std::str::FromStr + TryFrom<i128>>(s: &str) -> Option<T> {
    let s = s.trim();
    s.parse::<T>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s.eq_ignore_ascii_case("no") || s == "0" {
        Some(false)
    } else {
        None
    }
}

impl FromMetadata for bool {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Boolean(v) => Some(*v),
            MetadataValue::Int64(v) => Some(*v != 0),
            MetadataValue::Uint64(v) => Some(*v != 0),
            MetadataValue::Float32(v) => Some(*v != 0.0),
            MetadataValue::Float64(v) => Some(*v != 0.0),
            MetadataValue::String(s) => parse_bool(s),
            _ => None,
        }
    }
}

macro_rules! impl_from_metadata_int {
    ($($t:ty),+ $(,)?) => {$(
        impl FromMetadata for $t {
            fn from_value(value: &MetadataValue) -> Option<Self> {
                match value {
                    MetadataValue::Boolean(v) => Some(*v as $t),
                    MetadataValue::Int64(v) => <$t>::try_from(i128::from(*v)).ok(),
                    MetadataValue::Uint64(v) => <$t>::try_from(i128::from(*v)).ok(),
                    MetadataValue::Float32(v) => float_to_int(*v as f64),
                    MetadataValue::Float64(v) => float_to_int(*v),
                    MetadataValue::String(s) => parse_int(s),
                    _ => None,
                }
            }
        }
    )+};
}

impl_from_metadata_int!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! impl_from_metadata_float {
    ($($t:ty),+ $(,)?) => {$(
        impl FromMetadata for $t {
            fn from_value(value: &MetadataValue) -> Option<Self> {
                match value {
                    MetadataValue::Boolean(v) => Some(*v as u8 as $t),
                    MetadataValue::Int64(v) => Some(*v as $t),
                    MetadataValue::Uint64(v) => Some(*v as $t),
                    MetadataValue::Float32(v) => Some(*v as $t),
                    MetadataValue::Float64(v) => Some(*v as $t),
                    MetadataValue::String(s) => s.trim().parse::<$t>().ok(),
                    _ => None,
                }
            }
        }
    )+};
}

impl_from_metadata_float!(f32, f64);

/// Up to four f64 components of a numeric value, plus its arity.
/// Scalars splat across all four slots; vectors zero-fill trailing slots.
fn vector_parts(value: &MetadataValue) -> Option<([f64; 4], usize)> {
    Some(match value {
        MetadataValue::Int64(v) => ([*v as f64; 4], 1),
        MetadataValue::Uint64(v) => ([*v as f64; 4], 1),
        MetadataValue::Float32(v) => ([*v as f64; 4], 1),
        MetadataValue::Float64(v) => ([*v; 4], 1),
        MetadataValue::I64Vec2(v) => ([v.x as f64, v.y as f64, 0.0, 0.0], 2),
        MetadataValue::I64Vec3(v) => ([v.x as f64, v.y as f64, v.z as f64, 0.0], 3),
        MetadataValue::I64Vec4(v) => ([v.x as f64, v.y as f64, v.z as f64, v.w as f64], 4),
        MetadataValue::U64Vec2(v) => ([v.x as f64, v.y as f64, 0.0, 0.0], 2),
        MetadataValue::U64Vec3(v) => ([v.x as f64, v.y as f64, v.z as f64, 0.0], 3),
        MetadataValue::U64Vec4(v) => ([v.x as f64, v.y as f64, v.z as f64, v.w as f64], 4),
        MetadataValue::DVec2(v) => ([v.x, v.y, 0.0, 0.0], 2),
        MetadataValue::DVec3(v) => ([v.x, v.y, v.z, 0.0], 3),
        MetadataValue::DVec4(v) => ([v.x, v.y, v.z, v.w], 4),
        _ => return None,
    })
}

impl FromMetadata for IVec2 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        let (p, _) = vector_parts(value)?;
        Some(IVec2::new(float_to_int(p[0])?, float_to_int(p[1])?))
    }
}

impl FromMetadata for IVec3 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        let (p, _) = vector_parts(value)?;
        Some(IVec3::new(
            float_to_int(p[0])?,
            float_to_int(p[1])?,
            float_to_int(p[2])?,
        ))
    }
}

impl FromMetadata for DVec2 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        let (p, _) = vector_parts(value)?;
        Some(DVec2::new(p[0], p[1]))
    }
}

impl FromMetadata for Vec3 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        let (p, _) = vector_parts(value)?;
        Some(Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32))
    }
}

impl FromMetadata for DVec3 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        let (p, _) = vector_parts(value)?;
        Some(DVec3::new(p[0], p[1], p[2]))
    }
}

impl FromMetadata for DVec4 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        let (p, _) = vector_parts(value)?;
        Some(DVec4::new(p[0], p[1], p[2], p[3]))
    }
}

impl FromMetadata for DMat4 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::DMat2(m) => {
                let c = m.to_cols_array_2d();
                let mut out = DMat4::IDENTITY;
                for i in 0..2 {
                    for j in 0..2 {
                        out.col_mut(i)[j] = c[i][j];
                    }
                }
                Some(out)
            }
            MetadataValue::DMat3(m) => {
                let c = m.to_cols_array_2d();
                let mut out = DMat4::IDENTITY;
                for i in 0..3 {
                    for j in 0..3 {
                        out.col_mut(i)[j] = c[i][j];
                    }
                }
                Some(out)
            }
            MetadataValue::DMat4(m) => Some(*m),
            _ => None,
        }
    }
}

impl FromMetadata for String {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Empty | MetadataValue::Array(_) => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{DMat2, I64Vec2};

    #[test]
    fn test_int_conversions() {
        assert_eq!(i32::from_value(&MetadataValue::Int64(42)), Some(42));
        assert_eq!(i32::from_value(&MetadataValue::Uint64(7)), Some(7));
        assert_eq!(u8::from_value(&MetadataValue::Int64(300)), None);
        assert_eq!(i32::from_value(&MetadataValue::Int64(i64::MAX)), None);
        assert_eq!(i64::from_value(&MetadataValue::Uint64(u64::MAX)), None);
        assert_eq!(u64::from_value(&MetadataValue::Int64(-1)), None);
    }

    #[test]
    fn test_float_truncation() {
        assert_eq!(i32::from_value(&MetadataValue::Float64(3.9)), Some(3));
        assert_eq!(i32::from_value(&MetadataValue::Float64(-3.9)), Some(-3));
        assert_eq!(i32::from_value(&MetadataValue::Float64(f64::NAN)), None);
        assert_eq!(i32::from_value(&MetadataValue::Float64(1e300)), None);
        assert_eq!(i32::from_value(&MetadataValue::Float64(f64::INFINITY)), None);
    }

    #[test]
    fn test_bool_conversions() {
        assert_eq!(bool::from_value(&MetadataValue::Int64(0)), Some(false));
        assert_eq!(bool::from_value(&MetadataValue::Int64(-3)), Some(true));
        assert_eq!(bool::from_value(&MetadataValue::String("TRUE".into())), Some(true));
        assert_eq!(bool::from_value(&MetadataValue::String("no".into())), Some(false));
        assert_eq!(bool::from_value(&MetadataValue::String("maybe".into())), None);
        assert_eq!(i32::from_value(&MetadataValue::Boolean(true)), Some(1));
        assert_eq!(f64::from_value(&MetadataValue::Boolean(true)), Some(1.0));
    }

    #[test]
    fn test_string_parsing() {
        assert_eq!(i32::from_value(&MetadataValue::String(" 12 ".into())), Some(12));
        assert_eq!(i32::from_value(&MetadataValue::String("12.7".into())), Some(12));
        assert_eq!(f64::from_value(&MetadataValue::String("2.5".into())), Some(2.5));
        assert_eq!(i32::from_value(&MetadataValue::String("twelve".into())), None);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(
            String::from_value(&MetadataValue::Int64(9)),
            Some("9".to_string())
        );
        assert_eq!(String::from_value(&MetadataValue::Empty), None);
        assert_eq!(
            String::from_value(&MetadataValue::Array(Default::default())),
            None
        );
    }

    #[test]
    fn test_vector_widening() {
        let v = MetadataValue::DVec2(DVec2::new(1.0, 2.0));
        assert_eq!(
            DVec4::from_value(&v),
            Some(DVec4::new(1.0, 2.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_vector_narrowing() {
        let v = MetadataValue::DVec4(DVec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(DVec2::from_value(&v), Some(DVec2::new(1.0, 2.0)));
        assert_eq!(Vec3::from_value(&v), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_scalar_splat() {
        assert_eq!(
            DVec3::from_value(&MetadataValue::Int64(2)),
            Some(DVec3::splat(2.0))
        );
        assert_eq!(
            IVec2::from_value(&MetadataValue::Float64(3.5)),
            Some(IVec2::new(3, 3))
        );
    }

    #[test]
    fn test_int_vector_range() {
        let v = MetadataValue::I64Vec2(I64Vec2::new(1, i64::MAX));
        assert_eq!(IVec2::from_value(&v), None);
    }

    #[test]
    fn test_matrix_embedding() {
        let m = DMat2::from_cols_array(&[1.0, 2.0, 3.0, 4.0]);
        let out = DMat4::from_value(&MetadataValue::DMat2(m)).unwrap();
        assert_eq!(out.col(0), DVec4::new(1.0, 2.0, 0.0, 0.0));
        assert_eq!(out.col(1), DVec4::new(3.0, 4.0, 0.0, 0.0));
        assert_eq!(out.col(2), DVec4::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(out.col(3), DVec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_no_path() {
        let s = MetadataValue::String("hello".into());
        assert_eq!(DMat4::from_value(&s), None);
        assert_eq!(DVec3::from_value(&s), None);
        assert_eq!(i32::from_value(&MetadataValue::Empty), None);
    }
}
