// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of per-molecule atom counts and the center-of-mass time series.

use ndarray::{Array2, ArrayView1, Axis};

use crate::errors::ParseDumpError;
use crate::structures::{molecules::MoleculeSet, vector3d::Vector3D};

/// Number of atoms belonging to each tracked molecule.
/// Indexed by the local index of the molecule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomCount(Vec<usize>);

impl AtomCount {
    /// Create zeroed counts for `n_molecules` molecules.
    pub fn new(n_molecules: usize) -> Self {
        AtomCount(vec![0; n_molecules])
    }

    /// Register one more atom for the molecule with the given local index.
    ///
    /// ## Panics
    /// Panics if `local_index` is out of range.
    #[inline(always)]
    pub fn increment(&mut self, local_index: usize) {
        self.0[local_index] += 1;
    }

    /// Get the number of atoms of the molecule with the given local index.
    #[inline(always)]
    pub fn get(&self, local_index: usize) -> Option<usize> {
        self.0.get(local_index).copied()
    }

    /// Number of molecules.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no molecule is counted.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every tracked molecule has at least one atom.
    ///
    /// ## Returns
    /// `Ok` if all counts are positive. `ParseDumpError::UndefinedCenterOfMass`
    /// for the first molecule with no atoms.
    pub fn check_defined(&self, molecules: &MoleculeSet) -> Result<(), ParseDumpError> {
        match self.0.iter().position(|&count| count == 0) {
            None => Ok(()),
            Some(index) => Err(ParseDumpError::UndefinedCenterOfMass(
                molecules.id(index).expect(
                    "FATAL MSDMOL ERROR | AtomCount::check_defined | Atom counts do not match the molecule set.",
                ),
            )),
        }
    }

    /// Iterate over the counts in the order of local indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<usize>> for AtomCount {
    fn from(counts: Vec<usize>) -> Self {
        AtomCount(counts)
    }
}

/// Centers of mass of the tracked molecules in every frame of the trajectory.
///
/// Stored frame-major: row `t` contains the centers of all molecules in frame `t`,
/// column `m` is the trajectory of the molecule with local index `m`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSeries {
    positions: Array2<Vector3D>,
}

impl FrameSeries {
    /// Create an empty series for `n_molecules` molecules.
    pub fn new(n_molecules: usize) -> Self {
        FrameSeries {
            positions: Array2::default((0, n_molecules)),
        }
    }

    /// Construct the series from a vector of frames.
    ///
    /// ## Panics
    /// Panics if the frames do not all have the same number of molecules.
    ///
    /// ## Example
    /// ```
    /// # use msdmol::prelude::*;
    /// #
    /// let series = FrameSeries::from_frames(vec![
    ///     vec![Vector3D::new(0.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
    ///     vec![Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
    /// ]);
    ///
    /// assert_eq!(series.n_frames(), 2);
    /// assert_eq!(series.n_molecules(), 2);
    /// assert_eq!(series.position(1, 0), Some(&Vector3D::new(1.0, 0.0, 0.0)));
    /// ```
    pub fn from_frames(frames: Vec<Vec<Vector3D>>) -> Self {
        let n_molecules = frames.first().map(|f| f.len()).unwrap_or(0);
        let mut series = FrameSeries::new(n_molecules);
        for frame in frames.iter() {
            series.push_frame(frame);
        }

        series
    }

    /// Append centers of mass of all molecules in a single frame.
    ///
    /// ## Panics
    /// Panics if the number of centers does not match the number of molecules of the series.
    pub fn push_frame(&mut self, centers: &[Vector3D]) {
        self.positions.push_row(ArrayView1::from(centers)).expect(
            "FATAL MSDMOL ERROR | FrameSeries::push_frame | Frame does not match the number of molecules.",
        );
    }

    /// Number of frames in the series.
    #[inline(always)]
    pub fn n_frames(&self) -> usize {
        self.positions.nrows()
    }

    /// Number of molecules in each frame.
    #[inline(always)]
    pub fn n_molecules(&self) -> usize {
        self.positions.ncols()
    }

    /// Center of mass of molecule with local index `molecule` in frame `frame`.
    #[inline(always)]
    pub fn position(&self, frame: usize, molecule: usize) -> Option<&Vector3D> {
        self.positions.get((frame, molecule))
    }

    /// Centers of mass of all molecules in the given frame.
    ///
    /// ## Panics
    /// Panics if `frame` is out of range.
    pub fn frame(&self, frame: usize) -> ArrayView1<'_, Vector3D> {
        self.positions.index_axis(Axis(0), frame)
    }

    /// Centers of mass of a single molecule through all frames.
    ///
    /// ## Panics
    /// Panics if `molecule` is out of range.
    pub fn molecule(&self, molecule: usize) -> ArrayView1<'_, Vector3D> {
        self.positions.index_axis(Axis(1), molecule)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/


#[cfg(test)]
mod tests_frame_series {
    use super::*;

    fn sample() -> FrameSeries {
        FrameSeries::from_frames(vec![
            vec![Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
            vec![Vector3D::new(2.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
            vec![Vector3D::new(3.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
        ])
    }

    #[test]
    fn empty() {
        let series = FrameSeries::new(4);
        assert_eq!(series.n_frames(), 0);
        assert_eq!(series.n_molecules(), 4);
        assert_eq!(series.position(0, 0), None);
    }

    #[test]
    fn push_and_access() {
        let series = sample();

        assert_eq!(series.n_frames(), 3);
        assert_eq!(series.n_molecules(), 2);
        assert_eq!(series.position(2, 0), Some(&Vector3D::new(3.0, 0.0, 0.0)));
        assert_eq!(series.position(3, 0), None);

        let frame = series.frame(1);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0], Vector3D::new(2.0, 0.0, 0.0));

        let molecule = series.molecule(1);
        assert_eq!(molecule.len(), 3);
        assert!(molecule.iter().all(|&p| p == Vector3D::new(5.0, 5.0, 5.0)));
    }

    #[test]
    #[should_panic(expected = "FATAL MSDMOL ERROR")]
    fn push_wrong_size() {
        let mut series = sample();
        series.push_frame(&[Vector3D::default()]);
    }
}
