//! Dispatch - recovers a typed view from a descriptor and runs an
//! operation against it.
//!
//! A descriptor is three axes: shape and component type (a [`ValueType`]),
//! array-ness, and the normalized flag. [`dispatch`] walks those axes to
//! the one concrete element type they name, downcasts the erased view to
//! it, and invokes the caller's operation. Every unknown combination and
//! every failed downcast lands on an error view instead, so the operation
//! always runs exactly once and dispatch never fails.

use super::element::{Element, ElementArray};
use super::view::{OpaqueView, PropertyView};
use crate::util::{ComponentType, MatN, MetadataType, ValueType};
use crate::util::{
    DVec2, DVec3, DVec4, I16Vec2, I16Vec3, I16Vec4, I64Vec2, I64Vec3, I64Vec4, I8Vec2, I8Vec3,
    I8Vec4, IVec2, IVec3, IVec4, U16Vec2, U16Vec3, U16Vec4, U64Vec2, U64Vec3, U64Vec4, U8Vec2,
    U8Vec3, U8Vec4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4,
};

/// An operation generic over the element type of the view it runs on.
///
/// Implemented by small op structs; [`dispatch`] supplies the concrete
/// element type once the descriptor has been resolved.
pub trait ViewOp<R> {
    fn invoke<E: Element>(self, view: &PropertyView<E>) -> R;
}

/// Downcast to `E` and run the op, falling back to an error view when the
/// stored view or its normalized flag does not match the descriptor.
fn resolve<E: Element, R, Op: ViewOp<R>>(view: &OpaqueView, normalized: bool, op: Op) -> R {
    match view.downcast_ref::<E>() {
        Some(typed) if typed.is_normalized() == normalized => op.invoke(typed),
        _ => {
            tracing::trace!(
                element = std::any::type_name::<E>(),
                normalized,
                "stored view does not match descriptor"
            );
            op.invoke(&PropertyView::<u8>::mismatched())
        }
    }
}

fn invalid<R, Op: ViewOp<R>>(op: Op) -> R {
    op.invoke(&PropertyView::<u8>::invalid())
}

/// Branch on a component type, naming the concrete type for each numeric
/// kind. `$wrap!` turns a component type into the element type to resolve.
macro_rules! numeric_components {
    ($view:expr, $component:expr, $normalized:expr, $op:expr, $wrap:ident) => {
        match $component {
            ComponentType::Int8 => resolve::<$wrap!(i8), _, _>($view, $normalized, $op),
            ComponentType::Uint8 => resolve::<$wrap!(u8), _, _>($view, $normalized, $op),
            ComponentType::Int16 => resolve::<$wrap!(i16), _, _>($view, $normalized, $op),
            ComponentType::Uint16 => resolve::<$wrap!(u16), _, _>($view, $normalized, $op),
            ComponentType::Int32 => resolve::<$wrap!(i32), _, _>($view, $normalized, $op),
            ComponentType::Uint32 => resolve::<$wrap!(u32), _, _>($view, $normalized, $op),
            ComponentType::Int64 => resolve::<$wrap!(i64), _, _>($view, $normalized, $op),
            ComponentType::Uint64 => resolve::<$wrap!(u64), _, _>($view, $normalized, $op),
            ComponentType::Float32 => resolve::<$wrap!(f32), _, _>($view, $normalized, $op),
            ComponentType::Float64 => resolve::<$wrap!(f64), _, _>($view, $normalized, $op),
            ComponentType::None => invalid($op),
        }
    };
}

macro_rules! id {
    ($t:ty) => { $t };
}
macro_rules! arr {
    ($t:ty) => { ElementArray<$t> };
}
macro_rules! mat2 {
    ($t:ty) => { MatN<$t, 2> };
}
macro_rules! mat3 {
    ($t:ty) => { MatN<$t, 3> };
}
macro_rules! mat4 {
    ($t:ty) => { MatN<$t, 4> };
}
macro_rules! arr_mat2 {
    ($t:ty) => { ElementArray<MatN<$t, 2>> };
}
macro_rules! arr_mat3 {
    ($t:ty) => { ElementArray<MatN<$t, 3>> };
}
macro_rules! arr_mat4 {
    ($t:ty) => { ElementArray<MatN<$t, 4>> };
}

/// Branch on a vector shape, mapping each component type to the matching
/// glam vector (or an array of it).
macro_rules! vector_components {
    ($view:expr, $component:expr, $normalized:expr, $op:expr, $wrap:ident,
     $v8i:ty, $v8u:ty, $v16i:ty, $v16u:ty, $v32i:ty, $v32u:ty,
     $v64i:ty, $v64u:ty, $vf:ty, $vd:ty) => {
        match $component {
            ComponentType::Int8 => resolve::<$wrap!($v8i), _, _>($view, $normalized, $op),
            ComponentType::Uint8 => resolve::<$wrap!($v8u), _, _>($view, $normalized, $op),
            ComponentType::Int16 => resolve::<$wrap!($v16i), _, _>($view, $normalized, $op),
            ComponentType::Uint16 => resolve::<$wrap!($v16u), _, _>($view, $normalized, $op),
            ComponentType::Int32 => resolve::<$wrap!($v32i), _, _>($view, $normalized, $op),
            ComponentType::Uint32 => resolve::<$wrap!($v32u), _, _>($view, $normalized, $op),
            ComponentType::Int64 => resolve::<$wrap!($v64i), _, _>($view, $normalized, $op),
            ComponentType::Uint64 => resolve::<$wrap!($v64u), _, _>($view, $normalized, $op),
            ComponentType::Float32 => resolve::<$wrap!($vf), _, _>($view, $normalized, $op),
            ComponentType::Float64 => resolve::<$wrap!($vd), _, _>($view, $normalized, $op),
            ComponentType::None => invalid($op),
        }
    };
}

macro_rules! vector_shape {
    ($view:expr, $ty:expr, $component:expr, $normalized:expr, $op:expr, $wrap:ident) => {
        match $ty {
            MetadataType::Vec2 => vector_components!(
                $view, $component, $normalized, $op, $wrap,
                I8Vec2, U8Vec2, I16Vec2, U16Vec2, IVec2, UVec2,
                I64Vec2, U64Vec2, Vec2, DVec2
            ),
            MetadataType::Vec3 => vector_components!(
                $view, $component, $normalized, $op, $wrap,
                I8Vec3, U8Vec3, I16Vec3, U16Vec3, IVec3, UVec3,
                I64Vec3, U64Vec3, Vec3, DVec3
            ),
            MetadataType::Vec4 => vector_components!(
                $view, $component, $normalized, $op, $wrap,
                I8Vec4, U8Vec4, I16Vec4, U16Vec4, IVec4, UVec4,
                I64Vec4, U64Vec4, Vec4, DVec4
            ),
            _ => invalid($op),
        }
    };
}

fn single_value<R, Op: ViewOp<R>>(
    view: &OpaqueView,
    value_type: ValueType,
    normalized: bool,
    op: Op,
) -> R {
    let component = value_type.component;
    match value_type.ty {
        MetadataType::Scalar => numeric_components!(view, component, normalized, op, id),
        MetadataType::Vec2 | MetadataType::Vec3 | MetadataType::Vec4 => {
            vector_shape!(view, value_type.ty, component, normalized, op, id)
        }
        MetadataType::Mat2 => numeric_components!(view, component, normalized, op, mat2),
        MetadataType::Mat3 => numeric_components!(view, component, normalized, op, mat3),
        MetadataType::Mat4 => numeric_components!(view, component, normalized, op, mat4),
        MetadataType::Boolean => resolve::<bool, _, _>(view, normalized, op),
        MetadataType::String => resolve::<String, _, _>(view, normalized, op),
        _ => invalid(op),
    }
}

fn array_value<R, Op: ViewOp<R>>(
    view: &OpaqueView,
    value_type: ValueType,
    normalized: bool,
    op: Op,
) -> R {
    let component = value_type.component;
    match value_type.ty {
        MetadataType::Scalar => numeric_components!(view, component, normalized, op, arr),
        MetadataType::Vec2 | MetadataType::Vec3 | MetadataType::Vec4 => {
            vector_shape!(view, value_type.ty, component, normalized, op, arr)
        }
        MetadataType::Mat2 => numeric_components!(view, component, normalized, op, arr_mat2),
        MetadataType::Mat3 => numeric_components!(view, component, normalized, op, arr_mat3),
        MetadataType::Mat4 => numeric_components!(view, component, normalized, op, arr_mat4),
        MetadataType::Boolean => resolve::<ElementArray<bool>, _, _>(view, normalized, op),
        MetadataType::String => resolve::<ElementArray<String>, _, _>(view, normalized, op),
        _ => invalid(op),
    }
}

/// Resolve `value_type` + `normalized` to a concrete element type and run
/// `op` on the recovered view.
///
/// Total over all descriptor combinations: unknown shapes, non-numeric
/// components in numeric shapes, and mismatched stored views all run the
/// op against an error view. Float components never normalize, so the
/// flag is masked before the walk.
pub fn dispatch<R, Op: ViewOp<R>>(
    view: &OpaqueView,
    value_type: ValueType,
    normalized: bool,
    op: Op,
) -> R {
    let normalized = normalized && value_type.component.is_integer();
    if value_type.is_array {
        array_value(view, value_type, normalized, op)
    } else {
        single_value(view, value_type, normalized, op)
    }
}
