//! PropertyArray - the boxed "array of values" handed to consumers.

use super::MetadataValue;
use crate::util::ValueType;

/// One feature's array of metadata values.
///
/// Carries the element value type alongside the boxed values, so consumers
/// can inspect what an empty array would have held. Out-of-range access
/// yields [`MetadataValue::Empty`], never a fault.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyArray {
    element_type: ValueType,
    values: Vec<MetadataValue>,
}

impl PropertyArray {
    /// Create an array from its element type and values.
    pub fn new(element_type: ValueType, values: impl IntoIterator<Item = MetadataValue>) -> Self {
        Self {
            element_type,
            values: values.into_iter().collect(),
        }
    }

    /// The value type of one element.
    #[inline]
    pub fn element_type(&self) -> ValueType {
        self.element_type
    }

    /// Number of elements.
    #[inline]
    pub fn size(&self) -> i64 {
        self.values.len() as i64
    }

    /// Returns true when the array holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, or [`MetadataValue::Empty`] when out of range.
    pub fn get(&self, index: i64) -> MetadataValue {
        if index < 0 {
            return MetadataValue::Empty;
        }
        self.values
            .get(index as usize)
            .cloned()
            .unwrap_or(MetadataValue::Empty)
    }

    /// Iterate over the values.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataValue> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ComponentType;

    #[test]
    fn test_empty_array() {
        let a = PropertyArray::default();
        assert!(a.is_empty());
        assert_eq!(a.size(), 0);
        assert_eq!(a.element_type(), ValueType::INVALID);
        assert_eq!(a.get(0), MetadataValue::Empty);
    }

    #[test]
    fn test_array_access() {
        let a = PropertyArray::new(
            ValueType::scalar(ComponentType::Int32),
            [MetadataValue::Int64(1), MetadataValue::Int64(2)],
        );
        assert_eq!(a.size(), 2);
        assert_eq!(a.get(0), MetadataValue::Int64(1));
        assert_eq!(a.get(1), MetadataValue::Int64(2));
        assert_eq!(a.get(2), MetadataValue::Empty);
        assert_eq!(a.get(-1), MetadataValue::Empty);
    }
}
