//! PropertyTableProperty - the untyped facade over one property column.
//!
//! Holds a type-erased view plus the descriptor needed to recover it, and
//! exposes typed getters that never fail: every accessor takes a caller
//! default (or has a canonical empty result) and substitutes it whenever
//! the index is out of range, the property is invalid, or the stored value
//! does not convert to the requested type.

use super::dispatch::{dispatch, ViewOp};
use super::element::Element;
use super::view::{OpaqueView, PropertyView, ViewStatus};
use crate::util::{DMat4, DVec2, DVec3, DVec4, IVec2, IVec3, ValueType, Vec3};
use crate::value::{FromMetadata, MetadataValue, PropertyArray};

/// One property column of a property table, type-erased.
///
/// Cloning shares the underlying column.
#[derive(Clone, Debug, Default)]
pub struct PropertyTableProperty {
    column: OpaqueView,
    value_type: ValueType,
    normalized: bool,
}

struct StatusOp;
impl ViewOp<ViewStatus> for StatusOp {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> ViewStatus {
        view.status()
    }
}

struct SizeOp;
impl ViewOp<i64> for SizeOp {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> i64 {
        view.size()
    }
}

struct ArraySizeOp;
impl ViewOp<i64> for ArraySizeOp {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> i64 {
        view.array_count()
    }
}

/// Read an index and convert to `T`, falling back to the caller's default.
struct GetOp<T> {
    index: i64,
    default: T,
}
impl<T: FromMetadata> ViewOp<T> for GetOp<T> {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> T {
        match view.get(self.index) {
            Some(value) => T::from_value(&value).unwrap_or(self.default),
            None => self.default,
        }
    }
}

struct ValueOp {
    index: i64,
}
impl ViewOp<MetadataValue> for ValueOp {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> MetadataValue {
        view.get(self.index).unwrap_or(MetadataValue::Empty)
    }
}

struct RawValueOp {
    index: i64,
}
impl ViewOp<MetadataValue> for RawValueOp {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> MetadataValue {
        view.get_raw(self.index).unwrap_or(MetadataValue::Empty)
    }
}

struct ArrayOp {
    index: i64,
}
impl ViewOp<PropertyArray> for ArrayOp {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> PropertyArray {
        match view.get(self.index) {
            Some(MetadataValue::Array(array)) => array,
            _ => PropertyArray::default(),
        }
    }
}

enum Field {
    Offset,
    Scale,
    Min,
    Max,
    NoData,
    Default,
}
struct FieldOp(Field);
impl ViewOp<MetadataValue> for FieldOp {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> MetadataValue {
        let field = match self.0 {
            Field::Offset => view.offset(),
            Field::Scale => view.scale(),
            Field::Min => view.min(),
            Field::Max => view.max(),
            Field::NoData => view.no_data_value(),
            Field::Default => view.default_value(),
        };
        field.unwrap_or(MetadataValue::Empty)
    }
}

impl PropertyTableProperty {
    /// Wrap a typed view, recording its descriptor for later dispatch.
    pub fn new<E: Element>(view: PropertyView<E>) -> Self {
        let normalized = view.is_normalized();
        Self {
            column: OpaqueView::new(view),
            value_type: E::value_type(),
            normalized,
        }
    }

    /// Assemble from an already-erased view and its descriptor.
    ///
    /// A descriptor that does not match the erased view is not an error
    /// here; every read through it yields the type-mismatch fallback.
    pub fn from_parts(column: OpaqueView, value_type: ValueType, normalized: bool) -> Self {
        Self {
            column,
            value_type,
            normalized,
        }
    }

    /// The canonical invalid property: size 0, every getter falls back.
    pub fn invalid() -> Self {
        Self::default()
    }

    fn run<R, Op: ViewOp<R>>(&self, op: Op) -> R {
        dispatch(&self.column, self.value_type, self.normalized, op)
    }

    /// Health of the underlying view.
    pub fn status(&self) -> ViewStatus {
        self.run(StatusOp)
    }

    /// The property's declared value type.
    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// For array properties, the value type of one element; invalid for
    /// non-array properties.
    pub fn array_element_type(&self) -> ValueType {
        self.value_type.element_type().unwrap_or(ValueType::INVALID)
    }

    /// Number of features. Invalid properties report 0.
    pub fn size(&self) -> i64 {
        self.run(SizeOp)
    }

    /// Fixed element count of array properties; 0 for variable-size
    /// arrays and non-array properties.
    pub fn array_size(&self) -> i64 {
        self.run(ArraySizeOp)
    }

    /// Whether integer values are read as normalized floats.
    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Read feature `index` and convert to `T`, or `default` when the
    /// index is out of range or the value does not convert.
    pub fn get_as<T: FromMetadata>(&self, index: i64, default: T) -> T {
        self.run(GetOp { index, default })
    }

    /// Read feature `index` as a boolean.
    pub fn get_boolean(&self, index: i64, default: bool) -> bool {
        self.get_as(index, default)
    }

    /// Read feature `index` as an unsigned byte.
    pub fn get_byte(&self, index: i64, default: u8) -> u8 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a 32-bit integer.
    pub fn get_integer(&self, index: i64, default: i32) -> i32 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a 64-bit integer.
    pub fn get_integer64(&self, index: i64, default: i64) -> i64 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a single-precision float.
    pub fn get_float(&self, index: i64, default: f32) -> f32 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a double-precision float.
    pub fn get_float64(&self, index: i64, default: f64) -> f64 {
        self.get_as(index, default)
    }

    /// Read feature `index` as an integer 2-vector.
    pub fn get_int_point(&self, index: i64, default: IVec2) -> IVec2 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a double-precision 2-vector.
    pub fn get_vector2(&self, index: i64, default: DVec2) -> DVec2 {
        self.get_as(index, default)
    }

    /// Read feature `index` as an integer 3-vector.
    pub fn get_int_vector(&self, index: i64, default: IVec3) -> IVec3 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a single-precision 3-vector.
    pub fn get_vector3(&self, index: i64, default: Vec3) -> Vec3 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a double-precision 3-vector.
    pub fn get_vector(&self, index: i64, default: DVec3) -> DVec3 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a double-precision 4-vector.
    pub fn get_vector4(&self, index: i64, default: DVec4) -> DVec4 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a double-precision 4x4 matrix. Smaller
    /// matrices embed into the identity.
    pub fn get_matrix(&self, index: i64, default: DMat4) -> DMat4 {
        self.get_as(index, default)
    }

    /// Read feature `index` as a string.
    pub fn get_string(&self, index: i64, default: impl Into<String>) -> String {
        self.get_as(index, default.into())
    }

    /// Read feature `index` as an array; empty for non-array properties
    /// and failed reads.
    pub fn get_array(&self, index: i64) -> PropertyArray {
        self.run(ArrayOp { index })
    }

    /// Read feature `index` through the full pipeline, boxed.
    pub fn get_value(&self, index: i64) -> MetadataValue {
        self.run(ValueOp { index })
    }

    /// Read the stored value at `index` with no substitution or
    /// transform, boxed. Empty for empty-with-default properties.
    pub fn get_raw_value(&self, index: i64) -> MetadataValue {
        self.run(RawValueOp { index })
    }

    /// The declared offset, or empty.
    pub fn offset(&self) -> MetadataValue {
        self.run(FieldOp(Field::Offset))
    }

    /// The declared scale, or empty.
    pub fn scale(&self) -> MetadataValue {
        self.run(FieldOp(Field::Scale))
    }

    /// The declared minimum value, or empty.
    pub fn minimum_value(&self) -> MetadataValue {
        self.run(FieldOp(Field::Min))
    }

    /// The declared maximum value, or empty.
    pub fn maximum_value(&self) -> MetadataValue {
        self.run(FieldOp(Field::Max))
    }

    /// The no-data sentinel, or empty.
    pub fn no_data_value(&self) -> MetadataValue {
        self.run(FieldOp(Field::NoData))
    }

    /// The declared default value, or empty.
    pub fn default_value(&self) -> MetadataValue {
        self.run(FieldOp(Field::Default))
    }
}
