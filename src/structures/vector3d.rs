// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of a double-precision three-dimensional vector.

use std::ops::{Add, AddAssign, Deref, DerefMut, Div, DivAssign, Sub};

use nalgebra::base::Vector3;

/// Position of a point in space or a per-axis accumulator.
/// Implemented using `nalgebra`'s Vector3 with double precision.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vector3D(pub(crate) Vector3<f64>);

impl From<[f64; 3]> for Vector3D {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector3D(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Vector3D> for [f64; 3] {
    #[inline]
    fn from(vec: Vector3D) -> Self {
        [vec.0.x, vec.0.y, vec.0.z]
    }
}

/// Allows accessing fields of `Vector3D` as `.x`, `.y`, and `.z`.
#[repr(C)]
pub struct Vector3Raw {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Deref for Vector3D {
    type Target = Vector3Raw;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.0.as_ptr() as *const Vector3Raw) }
    }
}

impl DerefMut for Vector3D {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *(self.0.as_mut_ptr() as *mut Vector3Raw) }
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Vector3D(self.0 + rhs.0)
    }
}

impl AddAssign for Vector3D {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D(self.0 - rhs.0)
    }
}

impl Div<f64> for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Vector3D(self.0 / rhs)
    }
}

impl DivAssign<f64> for Vector3D {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        self.0 /= rhs;
    }
}

impl Vector3D {
    /// Create a new `Vector3D` structure.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D(Vector3::new(x, y, z))
    }

    /// Calculate squared displacement between `self` and `earlier` separately for each axis.
    ///
    /// ## Example
    /// ```
    /// # use msdmol::prelude::*;
    /// #
    /// let earlier = Vector3D::new(1.0, 2.0, 3.0);
    /// let later = Vector3D::new(2.0, 0.0, 3.5);
    ///
    /// let sq = later.squared_displacement(&earlier);
    /// assert_eq!(sq.x, 1.0);
    /// assert_eq!(sq.y, 4.0);
    /// assert_eq!(sq.z, 0.25);
    /// ```
    #[inline]
    pub fn squared_displacement(&self, earlier: &Vector3D) -> Vector3D {
        let diff = self.0 - earlier.0;
        Vector3D(diff.component_mul(&diff))
    }

    /// Sum of all three components of the vector.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.0.x + self.0.y + self.0.z
    }

    /// Returns `true` if all the fields of the vector are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Returns `true` if all the fields of the vector are exactly zero.
    /// Otherwise, returns `false`.
    pub fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0 && self.0.z == 0.0
    }
}

impl Default for Vector3D {
    /// Create a zero vector.
    fn default() -> Self {
        Vector3D(Vector3::zeros())
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
