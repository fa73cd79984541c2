// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of the origin-averaged mean-squared displacement.

use crate::structures::{dimension::Dimension, frames::FrameSeries, vector3d::Vector3D};

/// Mean-squared displacement at a single time lag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MsdEntry {
    /// Mean-squared displacement along each axis.
    msd: Vector3D,
    /// Number of (origin, molecule) pairs averaged.
    n_pairs: usize,
}

impl MsdEntry {
    /// Mean-squared displacement along each axis.
    #[inline(always)]
    pub fn msd(&self) -> Vector3D {
        self.msd
    }

    /// Number of (origin, molecule) pairs contributing to this entry.
    #[inline(always)]
    pub fn n_pairs(&self) -> usize {
        self.n_pairs
    }

    /// Mean-squared displacement summed over the axes of `dim`.
    #[inline(always)]
    pub fn get(&self, dim: Dimension) -> f64 {
        dim.sum_components(&self.msd)
    }

    /// Mean-squared displacement summed over all three axes.
    #[inline(always)]
    pub fn total(&self) -> f64 {
        self.msd.sum()
    }
}

/// Running sums of squared displacements, one slot per time lag.
#[derive(Debug, Clone)]
struct MsdAccumulator {
    sums: Vec<Vector3D>,
    counts: Vec<usize>,
}

impl MsdAccumulator {
    fn new(n_lags: usize) -> Self {
        MsdAccumulator {
            sums: vec![Vector3D::default(); n_lags],
            counts: vec![0; n_lags],
        }
    }

    #[inline(always)]
    fn add(&mut self, lag: usize, squared: Vector3D) {
        self.sums[lag] += squared;
        self.counts[lag] += 1;
    }

    /// Divide every sum by its pair count.
    /// Lags without any contributing pair are left at zero.
    fn finalize(self) -> MsdTable {
        let entries = self
            .sums
            .into_iter()
            .zip(self.counts)
            .map(|(sum, n_pairs)| MsdEntry {
                msd: if n_pairs == 0 {
                    sum
                } else {
                    sum / n_pairs as f64
                },
                n_pairs,
            })
            .collect();

        MsdTable { entries }
    }
}

/// Mean-squared displacement of molecular centers of mass as a function of time lag.
///
/// Entry `k` holds the displacement over `k` frames, averaged over all
/// `F - k` time origins and over all molecules.
#[derive(Debug, Clone, PartialEq)]
pub struct MsdTable {
    entries: Vec<MsdEntry>,
}

impl MsdTable {
    /// Calculate the origin-averaged mean-squared displacement from the centers of mass.
    ///
    /// For every molecule, every lag `k` in `0..F` and every origin `t` in `0..F-k`,
    /// the squared per-axis displacement between frames `t + k` and `t` is accumulated
    /// into entry `k`. Each entry is then divided by the number of accumulated pairs,
    /// i.e. `M * (F - k)`.
    ///
    /// ## Example
    /// Molecule moving by 1 along x in every frame.
    /// ```
    /// # use msdmol::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let series = FrameSeries::from_frames(vec![
    ///     vec![Vector3D::new(0.0, 0.0, 0.0)],
    ///     vec![Vector3D::new(1.0, 0.0, 0.0)],
    ///     vec![Vector3D::new(2.0, 0.0, 0.0)],
    /// ]);
    ///
    /// let table = MsdTable::compute(&series);
    /// assert_eq!(table.len(), 3);
    /// assert_approx_eq!(f64, table.get(1, Dimension::X).unwrap(), 1.0);
    /// assert_approx_eq!(f64, table.get(2, Dimension::X).unwrap(), 4.0);
    /// assert_eq!(table.n_pairs(2), Some(1));
    /// ```
    pub fn compute(series: &FrameSeries) -> MsdTable {
        let n_frames = series.n_frames();
        let mut accumulator = MsdAccumulator::new(n_frames);

        for molecule in 0..series.n_molecules() {
            let trajectory = series.molecule(molecule);

            for lag in 0..n_frames {
                for origin in 0..(n_frames - lag) {
                    let squared = trajectory[origin + lag].squared_displacement(&trajectory[origin]);
                    accumulator.add(lag, squared);
                }
            }
        }

        accumulator.finalize()
    }

    /// Number of entries (time lags) in the table. Equal to the number of frames.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table contains no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry for the given lag (in frames).
    #[inline(always)]
    pub fn entry(&self, lag: usize) -> Option<&MsdEntry> {
        self.entries.get(lag)
    }

    /// Get the mean-squared displacement at the given lag summed over the axes of `dim`.
    pub fn get(&self, lag: usize, dim: Dimension) -> Option<f64> {
        self.entry(lag).map(|entry| entry.get(dim))
    }

    /// Get the mean-squared displacement at the given lag summed over all axes.
    pub fn total(&self, lag: usize) -> Option<f64> {
        self.entry(lag).map(|entry| entry.total())
    }

    /// Get the number of (origin, molecule) pairs averaged at the given lag.
    pub fn n_pairs(&self, lag: usize) -> Option<usize> {
        self.entry(lag).map(|entry| entry.n_pairs())
    }

    /// Iterate over the entries in the order of increasing lag.
    pub fn iter(&self) -> impl Iterator<Item = &MsdEntry> {
        self.entries.iter()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
