//! Property views, type-erased dispatch, and the property-table facade.
//!
//! - [`Element`] / [`ElementArray`] - Concrete types a view can store
//! - [`PropertyView`] / [`OpaqueView`] - Typed columns and their erasure
//! - [`dispatch`] / [`ViewOp`] - Descriptor-driven type recovery
//! - [`PropertyTableProperty`] - The untyped getter facade

mod dispatch;
mod element;
mod table;
mod view;

pub use dispatch::{dispatch, ViewOp};
pub use element::{Element, ElementArray};
pub use table::PropertyTableProperty;
pub use view::{OpaqueView, PropertyView, ViewStatus};
