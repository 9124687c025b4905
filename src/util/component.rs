//! Numeric component types - the storage kinds metadata values are built from.

use bytemuck::Pod;
use std::fmt;

/// Numeric component type of a metadata value.
///
/// Scalar, vector, and matrix values are built from one of these ten kinds.
/// Boolean and string values have no component type (`None`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ComponentType {
    /// No component type (boolean/string values, or an unset descriptor)
    #[default]
    None = 0,
    /// Signed 8-bit integer
    Int8 = 1,
    /// Unsigned 8-bit integer
    Uint8 = 2,
    /// Signed 16-bit integer
    Int16 = 3,
    /// Unsigned 16-bit integer
    Uint16 = 4,
    /// Signed 32-bit integer
    Int32 = 5,
    /// Unsigned 32-bit integer
    Uint32 = 6,
    /// Signed 64-bit integer
    Int64 = 7,
    /// Unsigned 64-bit integer
    Uint64 = 8,
    /// 32-bit floating point (IEEE 754 single precision)
    Float32 = 9,
    /// 64-bit floating point (IEEE 754 double precision)
    Float64 = 10,
}

impl ComponentType {
    /// Number of component types (excluding None)
    pub const COUNT: usize = 10;

    /// Returns the size in bytes of a single component of this type.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::None => 0,
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Uint64 | Self::Float64 => 8,
        }
    }

    /// Returns the name of this type as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Int8 => "INT8",
            Self::Uint8 => "UINT8",
            Self::Int16 => "INT16",
            Self::Uint16 => "UINT16",
            Self::Int32 => "INT32",
            Self::Uint32 => "UINT32",
            Self::Int64 => "INT64",
            Self::Uint64 => "UINT64",
            Self::Float32 => "FLOAT32",
            Self::Float64 => "FLOAT64",
        }
    }

    /// Parse a component type from its name string.
    pub fn from_name(name: &str) -> Self {
        match name {
            "INT8" => Self::Int8,
            "UINT8" => Self::Uint8,
            "INT16" => Self::Int16,
            "UINT16" => Self::Uint16,
            "INT32" => Self::Int32,
            "UINT32" => Self::Uint32,
            "INT64" => Self::Int64,
            "UINT64" => Self::Uint64,
            "FLOAT32" => Self::Float32,
            "FLOAT64" => Self::Float64,
            _ => Self::None,
        }
    }

    /// Convert from u8 value.
    pub const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Int8,
            2 => Self::Uint8,
            3 => Self::Int16,
            4 => Self::Uint16,
            5 => Self::Int32,
            6 => Self::Uint32,
            7 => Self::Int64,
            8 => Self::Uint64,
            9 => Self::Float32,
            10 => Self::Float64,
            _ => Self::None,
        }
    }

    /// Returns true if this is an integer type.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Uint8
                | Self::Int16
                | Self::Uint16
                | Self::Int32
                | Self::Uint32
                | Self::Int64
                | Self::Uint64
        )
    }

    /// Returns true if this is a floating point type.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true if this is a numeric type (int or float).
    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Returns true if values of this type may be stored normalized.
    /// Only integer types normalize; float types never do.
    #[inline]
    pub const fn is_normalizable(self) -> bool {
        self.is_integer()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// === Component trait for type-safe tag recovery ===

/// Trait for Rust primitives that can act as metadata components.
pub trait Component:
    Pod + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The corresponding ComponentType enum value.
    const COMPONENT_TYPE: ComponentType;

    /// Widen to f64.
    fn to_f64(self) -> f64;

    /// Normalized-integer read: the value as a fraction of the type's
    /// maximum, clamped to -1.0 for signed types. Floats return themselves.
    fn normalize(self) -> f64;
}

macro_rules! impl_signed_component {
    ($($t:ty => $ct:ident),+ $(,)?) => {$(
        impl Component for $t {
            const COMPONENT_TYPE: ComponentType = ComponentType::$ct;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn normalize(self) -> f64 {
                (self as f64 / <$t>::MAX as f64).max(-1.0)
            }
        }
    )+};
}

macro_rules! impl_unsigned_component {
    ($($t:ty => $ct:ident),+ $(,)?) => {$(
        impl Component for $t {
            const COMPONENT_TYPE: ComponentType = ComponentType::$ct;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn normalize(self) -> f64 {
                self as f64 / <$t>::MAX as f64
            }
        }
    )+};
}

impl_signed_component! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
}

impl_unsigned_component! {
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
}

impl Component for f32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Float32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn normalize(self) -> f64 {
        self as f64
    }
}

impl Component for f64 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Float64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn normalize(self) -> f64 {
        self
    }
}
