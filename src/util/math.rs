//! Math type re-exports and metadata-specific math utilities.
//!
//! This module re-exports the `glam` types the crate speaks and provides
//! [`MatN`], a square matrix generic over its component type. glam only
//! ships f32/f64 matrices, while metadata columns may store integer
//! matrices of any component kind.

// Re-export glam types
pub use glam::{
    // Single precision vectors
    Vec2, Vec3, Vec4,
    // Double precision vectors
    DVec2, DVec3, DVec4,
    // 32-bit integer vectors
    IVec2, IVec3, IVec4,
    UVec2, UVec3, UVec4,
    // 64-bit integer vectors
    I64Vec2, I64Vec3, I64Vec4,
    U64Vec2, U64Vec3, U64Vec4,
    // 16-bit integer vectors
    I16Vec2, I16Vec3, I16Vec4,
    U16Vec2, U16Vec3, U16Vec4,
    // 8-bit integer vectors
    I8Vec2, I8Vec3, I8Vec4,
    U8Vec2, U8Vec3, U8Vec4,
    // Single precision matrices
    Mat2, Mat3, Mat4,
    // Double precision matrices
    DMat2, DMat3, DMat4,
};

use super::Component;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Column-major square matrix generic over component type.
///
/// `MatN<T, N>` stores N columns of N components each, in the same
/// column-major order glam and glTF use. Reads widen to [`DMat2`]/[`DMat3`]/
/// [`DMat4`] for consumers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct MatN<T, const N: usize>(pub [[T; N]; N]);

// [[T; N]; N] behind repr(transparent) carries no padding when T: Pod.
unsafe impl<T: Zeroable, const N: usize> Zeroable for MatN<T, N> {}
unsafe impl<T: Pod, const N: usize> Pod for MatN<T, N> {}

impl<T, const N: usize> MatN<T, N> {
    /// Create a matrix from its columns.
    #[inline]
    pub const fn from_cols(cols: [[T; N]; N]) -> Self {
        Self(cols)
    }

    /// Borrow column `i`.
    #[inline]
    pub fn col(&self, i: usize) -> &[T; N] {
        &self.0[i]
    }
}

impl<T: Component, const N: usize> MatN<T, N> {
    /// Create a matrix from a column-major flat slice.
    /// Returns None unless exactly N*N components are given.
    pub fn from_cols_slice(components: &[T]) -> Option<Self> {
        if components.len() != N * N {
            return None;
        }
        let mut cols = [[T::zeroed(); N]; N];
        for (i, c) in components.iter().enumerate() {
            cols[i / N][i % N] = *c;
        }
        Some(Self(cols))
    }

    #[inline]
    fn flatten(&self, f: impl Fn(T) -> f64, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            *v = f(self.0[i / N][i % N]);
        }
    }
}

impl<T: Component> MatN<T, 2> {
    /// Widen to a double-precision matrix.
    pub fn as_dmat2(&self) -> DMat2 {
        let mut m = [0.0; 4];
        self.flatten(Component::to_f64, &mut m);
        DMat2::from_cols_array(&m)
    }

    /// Widen with normalized-integer semantics applied per component.
    pub fn normalized_dmat2(&self) -> DMat2 {
        let mut m = [0.0; 4];
        self.flatten(Component::normalize, &mut m);
        DMat2::from_cols_array(&m)
    }
}

impl<T: Component> MatN<T, 3> {
    /// Widen to a double-precision matrix.
    pub fn as_dmat3(&self) -> DMat3 {
        let mut m = [0.0; 9];
        self.flatten(Component::to_f64, &mut m);
        DMat3::from_cols_array(&m)
    }

    /// Widen with normalized-integer semantics applied per component.
    pub fn normalized_dmat3(&self) -> DMat3 {
        let mut m = [0.0; 9];
        self.flatten(Component::normalize, &mut m);
        DMat3::from_cols_array(&m)
    }
}

impl<T: Component> MatN<T, 4> {
    /// Widen to a double-precision matrix.
    pub fn as_dmat4(&self) -> DMat4 {
        let mut m = [0.0; 16];
        self.flatten(Component::to_f64, &mut m);
        DMat4::from_cols_array(&m)
    }

    /// Widen with normalized-integer semantics applied per component.
    pub fn normalized_dmat4(&self) -> DMat4 {
        let mut m = [0.0; 16];
        self.flatten(Component::normalize, &mut m);
        DMat4::from_cols_array(&m)
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for MatN<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, col) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, v) in col.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matn_from_slice() {
        let m = MatN::<i32, 2>::from_cols_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(m.col(0), &[1, 2]);
        assert_eq!(m.col(1), &[3, 4]);
        assert!(MatN::<i32, 2>::from_cols_slice(&[1, 2, 3]).is_none());
    }

    #[test]
    fn test_matn_widen() {
        let m = MatN::<i32, 2>::from_cols_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(m.as_dmat2(), DMat2::from_cols_array(&[1.0, 2.0, 3.0, 4.0]));

        let m = MatN::<f64, 3>::from_cols_slice(&[1.0; 9]).unwrap();
        assert_eq!(m.as_dmat3(), DMat3::from_cols_array(&[1.0; 9]));
    }

    #[test]
    fn test_matn_normalized() {
        let m = MatN::<u8, 2>::from_cols_slice(&[255, 0, 0, 255]).unwrap();
        assert_eq!(
            m.normalized_dmat2(),
            DMat2::from_cols_array(&[1.0, 0.0, 0.0, 1.0])
        );
    }

    #[test]
    fn test_matn_pod() {
        assert_eq!(std::mem::size_of::<MatN<i16, 4>>(), 32);
        let m = MatN::<u8, 2>::from_cols_slice(&[1, 2, 3, 4]).unwrap();
        let bytes: &[u8] = bytemuck::bytes_of(&m);
        assert_eq!(bytes, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_matn_display() {
        let m = MatN::<i32, 2>::from_cols_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(format!("{}", m), "[[1, 2], [3, 4]]");
    }
}
