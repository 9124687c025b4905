//! # structural-metadata
//!
//! Typed access to glTF `EXT_structural_metadata` property tables.
//!
//! A property table stores one column of values per property, typed by a
//! runtime descriptor: shape (scalar, vecN, matN, boolean, string),
//! numeric component type, array-ness, and a normalized flag. This crate
//! recovers the concrete column type from that descriptor at runtime and
//! exposes getters that always produce a value, substituting a caller
//! default whenever the property is invalid, the index is out of range,
//! or the stored value does not convert.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (components, value types, math, errors)
//! - [`value`] - Boxed metadata values and conversions
//! - [`property`] - Typed views, dispatch, and the property facade
//!
//! ## Example
//!
//! ```
//! use structural_metadata::{PropertyTableProperty, PropertyView};
//! use structural_metadata::value::MetadataValue;
//!
//! let view = PropertyView::new(vec![10u8, 255, 30])
//!     .with_no_data(255)
//!     .with_default(MetadataValue::Uint64(0));
//! let prop = PropertyTableProperty::new(view);
//!
//! assert_eq!(prop.get_integer(0, -1), 10);
//! assert_eq!(prop.get_integer(1, -1), 0); // no-data reads as the default
//! assert_eq!(prop.get_integer(9, -1), -1); // out of range
//! ```

pub mod property;
pub mod util;
pub mod value;

// Re-export commonly used types
pub use property::{
    dispatch, Element, ElementArray, OpaqueView, PropertyTableProperty, PropertyView, ViewOp,
    ViewStatus,
};
pub use util::{ComponentType, Error, MetadataType, Result, ValueType};
pub use value::{FromMetadata, MetadataValue, PropertyArray};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::property::{
        dispatch, Element, ElementArray, OpaqueView, PropertyTableProperty, PropertyView, ViewOp,
        ViewStatus,
    };
    pub use crate::util::{Component, ComponentType, Error, MatN, MetadataType, Result, ValueType};
    pub use crate::value::{FromMetadata, MetadataValue, PropertyArray};
}
