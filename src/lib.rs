// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! # msdmol: Mean-Squared Displacement of Molecules
//!
//! Rust library and command line tool for calculating the mean-squared displacement
//! of the centers of mass of selected molecules from a LAMMPS dump trajectory.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ msdmol system.param trajectory.lammpstrj 0.5
//! ```
//!
//! to calculate the mean-squared displacement of molecules listed in `system.param`
//! using trajectory `trajectory.lammpstrj` with frames separated by `0.5` time units.
//! The result is written into `o.msd.dat`.
//!
//! Or import the crate in your Rust code:
//! ```
//! use msdmol::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Running the complete calculation
//!
//! ```no_run
//! use msdmol::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let config = MsdConfig::new("system.param", "trajectory.lammpstrj", 0.5)
//!         .with_output("msd.dat")
//!         .with_verify_membership(true);
//!
//!     let table = MsdAnalysis::new(config)?.run()?;
//!     println!("Number of time lags: {}", table.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Reading the centers of mass step by step
//!
//! ```no_run
//! use msdmol::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     // molecules to track
//!     let molecules = read_molecules("system.param")?;
//!
//!     // columns of the dump file and the number of atoms in each frame
//!     let layout = detect_layout("trajectory.lammpstrj")?;
//!
//!     // number of atoms of each tracked molecule
//!     let counts = count_molecule_atoms("trajectory.lammpstrj", &layout, &molecules)?;
//!
//!     // iterate through the frames
//!     let mut series = FrameSeries::new(molecules.len());
//!     for frame in DumpReader::new("trajectory.lammpstrj", layout, &molecules, &counts)? {
//!         let frame = frame?;
//!         series.push_frame(&frame.centers);
//!     }
//!
//!     let table = MsdTable::compute(&series);
//!     for (lag, entry) in table.iter().enumerate() {
//!         println!("{} {}", lag, entry.get(Dimension::XY));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Input files
//!
//! The parameter file must contain a line declaring the number of tracked molecules
//! (`<N> number of molecules`) and a line containing `Molecules`. The IDs of the
//! tracked molecules are read from the `N` lines starting two lines below the `Molecules` line.
//!
//! The dump file must contain the columns `id`, `mol` and unwrapped (`xu`, `yu`, `zu`)
//! or scaled (`xs`, `ys`, `zs`) coordinates. All atoms are weighted equally.
//! The atoms are not unwrapped, no periodic boundary conditions are applied.
//!
//! ## License
//! This library is released under the MIT License.

/// Current version of the `msdmol` library.
pub const MSDMOL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod analysis {
    pub mod msd;
}
mod auxiliary;
pub mod config;
pub mod errors;
pub mod io {
    pub mod dump_io;
    pub mod msd_io;
    pub mod param_io;
}
pub mod pipeline;
pub mod progress;
pub mod structures {
    pub mod dimension;
    pub mod frames;
    pub mod molecules;
    pub mod vector3d;
}
mod test_utilities;

/// Reexported basic `msdmol` structures and functions.
pub mod prelude {
    pub use crate::analysis::msd::{MsdEntry, MsdTable};
    pub use crate::auxiliary::DEFAULT_OUTPUT;
    pub use crate::config::MsdConfig;
    pub use crate::errors::{
        ConfigError, MsdError, ParseDumpError, ParseParamError, WriteMsdError,
    };
    pub use crate::io::dump_io::{
        count_molecule_atoms, detect_layout, read_centers, ColumnSchema, DumpFrame, DumpLayout,
        DumpReader,
    };
    pub use crate::io::msd_io::{write_msd, write_msd_file};
    pub use crate::io::param_io::read_molecules;
    pub use crate::pipeline::MsdAnalysis;
    pub use crate::progress::{ProgressPrinter, ProgressStatus};
    pub use crate::structures::dimension::Dimension;
    pub use crate::structures::frames::{AtomCount, FrameSeries};
    pub use crate::structures::molecules::MoleculeSet;
    pub use crate::structures::vector3d::Vector3D;
}
