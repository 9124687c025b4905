//! Utility types shared across the crate.
//!
//! This module contains fundamental types used throughout the library:
//! - [`ComponentType`] / [`Component`] - Numeric component kinds
//! - [`MetadataType`] / [`ValueType`] - Value shape descriptors
//! - [`Error`] / [`Result`] - Error handling for construction
//! - Math type re-exports from glam plus [`MatN`]

mod component;
mod error;
mod math;
mod value_type;

pub use component::*;
pub use error::*;
pub use math::*;
pub use value_type::*;
