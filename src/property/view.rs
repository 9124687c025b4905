//! PropertyView - a typed view over one property's column of values.
//!
//! A view either holds a shared value buffer (status `Valid`), stands in
//! for a property that declares only a default value
//! (`EmptyPropertyWithDefault`), or is an error placeholder that reports
//! size 0 and yields nothing. The read path is total: every index in or
//! out of range produces a value or `None`, never a panic.

use super::element::{Element, ElementArray};
use crate::util::{Error, Result};
use crate::value::{apply_scale_offset, MetadataValue};
use bytemuck::Pod;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Health of a property view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewStatus {
    /// The view is backed by values and can be read.
    #[default]
    Valid,
    /// The property declares no value buffer, only a default value; normal
    /// reads yield the default, raw reads yield nothing.
    EmptyPropertyWithDefault,
    /// The property is malformed or was never resolved.
    ErrorInvalidProperty,
    /// The stored view does not match the requested descriptor.
    ErrorTypeMismatch,
}

impl ViewStatus {
    /// Returns true for the error statuses.
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Self::ErrorInvalidProperty | Self::ErrorTypeMismatch)
    }
}

/// A typed column of metadata values for one property.
///
/// Reads go through the full pipeline: raw value, no-data substitution,
/// normalization, then the offset/scale transform. `get_raw` skips all of
/// it and returns the stored value as-is.
#[derive(Clone, Debug)]
pub struct PropertyView<E: Element> {
    status: ViewStatus,
    values: Option<Arc<[E]>>,
    declared_size: i64,
    array_count: i64,
    normalized: bool,
    offset: Option<MetadataValue>,
    scale: Option<MetadataValue>,
    min: Option<MetadataValue>,
    max: Option<MetadataValue>,
    no_data: Option<E>,
    default_value: Option<MetadataValue>,
}

impl<E: Element> PropertyView<E> {
    /// A valid view over the given values.
    pub fn new(values: impl Into<Arc<[E]>>) -> Self {
        Self {
            status: ViewStatus::Valid,
            values: Some(values.into()),
            declared_size: 0,
            array_count: 0,
            normalized: false,
            offset: None,
            scale: None,
            min: None,
            max: None,
            no_data: None,
            default_value: None,
        }
    }

    fn with_error(status: ViewStatus) -> Self {
        Self {
            status,
            values: None,
            declared_size: 0,
            array_count: 0,
            normalized: false,
            offset: None,
            scale: None,
            min: None,
            max: None,
            no_data: None,
            default_value: None,
        }
    }

    /// The canonical invalid view: size 0, yields nothing.
    pub fn invalid() -> Self {
        Self::with_error(ViewStatus::ErrorInvalidProperty)
    }

    /// An error view for a descriptor that does not match the stored data.
    pub fn mismatched() -> Self {
        Self::with_error(ViewStatus::ErrorTypeMismatch)
    }

    /// A view for a property with no value buffer, only a default value.
    ///
    /// Reports `count` as its size; normal reads of any in-range index
    /// yield the default, raw reads yield nothing.
    pub fn empty_with_default(count: i64, default: MetadataValue) -> Self {
        Self {
            status: ViewStatus::EmptyPropertyWithDefault,
            values: None,
            declared_size: count.max(0),
            array_count: 0,
            normalized: false,
            offset: None,
            scale: None,
            min: None,
            max: None,
            no_data: None,
            default_value: Some(default),
        }
    }

    /// Mark the view's integer values as normalized.
    ///
    /// Float components cannot be normalized; the flag is dropped for them.
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized && E::COMPONENT.is_integer();
        self
    }

    /// Attach an offset to add after scaling.
    pub fn with_offset(mut self, offset: MetadataValue) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attach a scale to multiply values by.
    pub fn with_scale(mut self, scale: MetadataValue) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Attach the declared minimum value.
    pub fn with_min(mut self, min: MetadataValue) -> Self {
        self.min = Some(min);
        self
    }

    /// Attach the declared maximum value.
    pub fn with_max(mut self, max: MetadataValue) -> Self {
        self.max = Some(max);
        self
    }

    /// Attach the sentinel raw value that reads as "no data".
    pub fn with_no_data(mut self, no_data: E) -> Self {
        self.no_data = Some(no_data);
        self
    }

    /// Attach the default value substituted for no-data reads.
    pub fn with_default(mut self, default: MetadataValue) -> Self {
        self.default_value = Some(default);
        self
    }

    /// Health of this view.
    #[inline]
    pub fn status(&self) -> ViewStatus {
        self.status
    }

    /// Number of addressable values. Error views report 0.
    #[inline]
    pub fn size(&self) -> i64 {
        match &self.values {
            Some(v) => v.len() as i64,
            None => self.declared_size,
        }
    }

    /// Fixed element count of array properties; 0 for variable-size
    /// arrays and non-array properties.
    #[inline]
    pub fn array_count(&self) -> i64 {
        self.array_count
    }

    /// Whether integer values are read as normalized floats.
    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    #[inline]
    fn raw_element(&self, index: i64) -> Option<&E> {
        if index < 0 {
            return None;
        }
        self.values.as_ref()?.get(index as usize)
    }

    /// Read the value at `index` through the full pipeline.
    ///
    /// Returns `None` for out-of-range indices and for error views.
    pub fn get(&self, index: i64) -> Option<MetadataValue> {
        match self.status {
            ViewStatus::Valid => {
                let raw = self.raw_element(index)?;
                if self.no_data.as_ref() == Some(raw) {
                    return Some(
                        self.default_value
                            .clone()
                            .unwrap_or(MetadataValue::Empty),
                    );
                }
                let value = if self.normalized {
                    raw.to_normalized()
                } else {
                    raw.to_value()
                };
                Some(apply_scale_offset(
                    value,
                    self.scale.as_ref(),
                    self.offset.as_ref(),
                ))
            }
            ViewStatus::EmptyPropertyWithDefault => {
                if index >= 0 && index < self.declared_size {
                    Some(self.default_value.clone().unwrap_or(MetadataValue::Empty))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Read the stored value at `index` with no substitution or transform.
    ///
    /// Empty-with-default views have no stored values, so this yields
    /// `None` for them.
    pub fn get_raw(&self, index: i64) -> Option<MetadataValue> {
        if self.status != ViewStatus::Valid {
            return None;
        }
        self.raw_element(index).map(Element::to_value)
    }

    /// The declared offset, if any.
    #[inline]
    pub fn offset(&self) -> Option<MetadataValue> {
        self.offset.clone()
    }

    /// The declared scale, if any.
    #[inline]
    pub fn scale(&self) -> Option<MetadataValue> {
        self.scale.clone()
    }

    /// The declared minimum value, if any.
    #[inline]
    pub fn min(&self) -> Option<MetadataValue> {
        self.min.clone()
    }

    /// The declared maximum value, if any.
    #[inline]
    pub fn max(&self) -> Option<MetadataValue> {
        self.max.clone()
    }

    /// The no-data sentinel, boxed, if any.
    #[inline]
    pub fn no_data_value(&self) -> Option<MetadataValue> {
        self.no_data.as_ref().map(Element::to_value)
    }

    /// The declared default value, if any.
    #[inline]
    pub fn default_value(&self) -> Option<MetadataValue> {
        self.default_value.clone()
    }
}

impl<E: Element + Pod> PropertyView<E> {
    /// Build a valid view by reinterpreting a byte buffer as elements.
    ///
    /// The buffer length must be a whole multiple of the element size.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let element_size = std::mem::size_of::<E>();
        if element_size == 0 || bytes.len() % element_size != 0 {
            return Err(Error::BufferSizeMismatch {
                len: bytes.len(),
                element_size,
            });
        }
        let values: Vec<E> = bytes
            .chunks_exact(element_size)
            .map(bytemuck::pod_read_unaligned)
            .collect();
        Ok(Self::new(values))
    }
}

impl<T: Element> PropertyView<ElementArray<T>> {
    /// Build a view of fixed-size arrays: every feature owns `count`
    /// consecutive values from the buffer.
    pub fn fixed_size_arrays(values: impl Into<Arc<[T]>>, count: i64) -> Result<Self> {
        let buf: Arc<[T]> = values.into();
        if count <= 0 {
            return Err(Error::InvalidArrayCount { count });
        }
        let count = count as usize;
        if buf.len() % count != 0 {
            return Err(Error::ValueCountMismatch {
                len: buf.len(),
                count,
            });
        }
        let arrays: Vec<ElementArray<T>> = (0..buf.len() / count)
            .map(|i| ElementArray::slice(buf.clone(), i * count, count))
            .collect();
        let mut view = Self::new(arrays);
        view.array_count = count as i64;
        Ok(view)
    }

    /// Build a view of variable-size arrays from a value buffer and
    /// monotone offsets. Feature `i` spans `offsets[i]..offsets[i + 1]`.
    pub fn variable_size_arrays(values: impl Into<Arc<[T]>>, offsets: &[u64]) -> Result<Self> {
        let buf: Arc<[T]> = values.into();
        if offsets.len() < 2 {
            return Err(Error::InvalidArrayOffsets { index: 0 });
        }
        let mut arrays = Vec::with_capacity(offsets.len() - 1);
        for (i, pair) in offsets.windows(2).enumerate() {
            let (start, end) = (pair[0] as usize, pair[1] as usize);
            if end < start || end > buf.len() {
                return Err(Error::InvalidArrayOffsets { index: i });
            }
            arrays.push(ElementArray::slice(buf.clone(), start, end - start));
        }
        Ok(Self::new(arrays))
    }
}

/// A type-erased [`PropertyView`], recoverable by downcasting.
///
/// Cloning shares the underlying view.
#[derive(Clone)]
pub struct OpaqueView(Arc<dyn Any + Send + Sync>);

impl OpaqueView {
    /// Erase a typed view.
    pub fn new<E: Element>(view: PropertyView<E>) -> Self {
        Self(Arc::new(view))
    }

    /// Recover the typed view, if `E` matches the erased type.
    #[inline]
    pub fn downcast_ref<E: Element>(&self) -> Option<&PropertyView<E>> {
        self.0.downcast_ref::<PropertyView<E>>()
    }
}

impl Default for OpaqueView {
    fn default() -> Self {
        Self::new(PropertyView::<u8>::invalid())
    }
}

impl fmt::Debug for OpaqueView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueView").finish_non_exhaustive()
    }
}
