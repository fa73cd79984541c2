// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of the Dimension enum used to select Cartesian axes of the displacement.

use std::fmt;

use crate::structures::vector3d::Vector3D;

/// Cartesian axes (or their combination) along which the displacement is measured.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Dimension {
    X,
    Y,
    Z,
    XY,
    XZ,
    YZ,
    XYZ,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::X => write!(f, "x"),
            Dimension::Y => write!(f, "y"),
            Dimension::Z => write!(f, "z"),
            Dimension::XY => write!(f, "xy"),
            Dimension::XZ => write!(f, "xz"),
            Dimension::YZ => write!(f, "yz"),
            Dimension::XYZ => write!(f, "total"),
        }
    }
}

impl Dimension {
    /// Return `true` if Dimension contains x-dimension.
    pub fn is_x(self) -> bool {
        matches!(self, Dimension::X | Dimension::XY | Dimension::XZ | Dimension::XYZ)
    }

    /// Return `true` if Dimension contains y-dimension.
    pub fn is_y(self) -> bool {
        matches!(self, Dimension::Y | Dimension::XY | Dimension::YZ | Dimension::XYZ)
    }

    /// Return `true` if Dimension contains z-dimension.
    pub fn is_z(self) -> bool {
        matches!(self, Dimension::Z | Dimension::XZ | Dimension::YZ | Dimension::XYZ)
    }

    /// Sum the components of `vector` that belong to this Dimension.
    ///
    /// ## Example
    /// ```
    /// # use msdmol::prelude::*;
    /// #
    /// let vector = Vector3D::new(1.0, 2.0, 4.0);
    ///
    /// assert_eq!(Dimension::X.sum_components(&vector), 1.0);
    /// assert_eq!(Dimension::YZ.sum_components(&vector), 6.0);
    /// assert_eq!(Dimension::XYZ.sum_components(&vector), 7.0);
    /// ```
    #[inline]
    pub fn sum_components(self, vector: &Vector3D) -> f64 {
        let mut sum = 0.0;
        if self.is_x() {
            sum += vector.x;
        }
        if self.is_y() {
            sum += vector.y;
        }
        if self.is_z() {
            sum += vector.z;
        }

        sum
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
