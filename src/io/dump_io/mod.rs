// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of functions for reading LAMMPS dump files.
//!
//! Each frame of a dump file consists of a 9-line header followed by one line per atom:
//! ```text
//! ITEM: TIMESTEP
//! 1000
//! ITEM: NUMBER OF ATOMS
//! 4
//! ITEM: BOX BOUNDS pp pp pp
//! 0.0 10.0
//! 0.0 10.0
//! 0.0 10.0
//! ITEM: ATOMS id mol xu yu zu
//! 1 10 0.0 0.0 0.0
//! ...
//! ```

pub mod schema;
pub mod trajectory;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use getset::CopyGetters;

pub use schema::ColumnSchema;
pub use trajectory::{count_molecule_atoms, read_centers, DumpFrame, DumpReader};

use crate::auxiliary::{DUMP_BOX_LINES, DUMP_TIMESTEP_MARKER};
use crate::errors::ParseDumpError;

/// Open LAMMPS dump file read line by line.
#[derive(Debug)]
pub(crate) struct DumpFile {
    buffer: BufReader<File>,
    filename: Box<Path>,
    line: String,
}

impl DumpFile {
    /// Open the dump file for reading.
    pub(crate) fn open(filename: impl AsRef<Path>) -> Result<Self, ParseDumpError> {
        let file = File::open(filename.as_ref())
            .map_err(|_| ParseDumpError::FileNotFound(Box::from(filename.as_ref())))?;

        Ok(DumpFile {
            buffer: BufReader::new(file),
            filename: Box::from(filename.as_ref()),
            line: String::new(),
        })
    }

    /// Read the next line of the file without the line terminator.
    ///
    /// ## Returns
    /// - `Ok(Some(line))` if a line has been read.
    /// - `Ok(None)` if the end of the file has been reached.
    /// - `ParseDumpError::CouldNotRead` if the line could not be read or is not valid UTF-8.
    pub(crate) fn next_line(&mut self) -> Result<Option<&str>, ParseDumpError> {
        self.line.clear();
        match self.buffer.read_line(&mut self.line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(self.line.trim_end_matches(['\n', '\r']))),
            Err(_) => Err(ParseDumpError::CouldNotRead(self.filename.clone())),
        }
    }

    /// Read the next line of the file which must exist as a part of frame `frame`.
    pub(crate) fn frame_line(&mut self, frame: usize) -> Result<&str, ParseDumpError> {
        self.next_line()?
            .ok_or(ParseDumpError::TruncatedTrajectory { frame })
    }

    /// Get the path to the file.
    pub(crate) fn filename(&self) -> &Path {
        &self.filename
    }
}

/// Information read from the 9-line header of a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    /// Simulation timestep of the frame.
    pub(crate) timestep: u64,
    /// Number of atom records following the header.
    pub(crate) n_atoms: usize,
    /// The `ITEM: ATOMS ...` line.
    pub(crate) atoms_header: String,
}

/// Read the header of the next frame.
///
/// ## Returns
/// - `None` if the trajectory has been exhausted (the timestep marker line is empty or absent).
/// - `Some(Ok(FrameHeader))` if the header has been read successfully.
/// - `Some(Err(ParseDumpError))` if the header is malformed, truncated, or could not be read.
pub(crate) fn read_header(
    dump: &mut DumpFile,
    frame: usize,
) -> Option<Result<FrameHeader, ParseDumpError>> {
    match dump.next_line() {
        Err(e) => return Some(Err(e)),
        Ok(None) => return None,
        Ok(Some(line)) if line.trim().is_empty() => return None,
        Ok(Some(line)) if !line.trim_start().starts_with(DUMP_TIMESTEP_MARKER) => {
            return Some(Err(ParseDumpError::MalformedHeader(line.to_owned())))
        }
        Ok(Some(_)) => (),
    }

    Some(read_header_body(dump, frame))
}

/// Read the part of the frame header following the timestep marker.
fn read_header_body(dump: &mut DumpFile, frame: usize) -> Result<FrameHeader, ParseDumpError> {
    let timestep = parse_header_value::<u64>(dump.frame_line(frame)?)?;

    // ITEM: NUMBER OF ATOMS
    dump.frame_line(frame)?;
    let n_atoms = parse_header_value::<usize>(dump.frame_line(frame)?)?;

    // ITEM: BOX BOUNDS and the box itself
    for _ in 0..=DUMP_BOX_LINES {
        dump.frame_line(frame)?;
    }

    let atoms_header = dump.frame_line(frame)?.to_owned();

    Ok(FrameHeader {
        timestep,
        n_atoms,
        atoms_header,
    })
}

/// Parse a header line consisting of a single value.
fn parse_header_value<T: std::str::FromStr>(line: &str) -> Result<T, ParseDumpError> {
    line.trim()
        .parse::<T>()
        .map_err(|_| ParseDumpError::MalformedHeader(line.to_owned()))
}

/// Layout of the atom records, resolved from the first frame of a dump file
/// and assumed to be identical in every later frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct DumpLayout {
    /// Positions of the required columns in an atom record.
    #[getset(get_copy = "pub")]
    schema: ColumnSchema,
    /// Number of atoms in each frame.
    #[getset(get_copy = "pub")]
    n_atoms: usize,
}

impl DumpLayout {
    /// Create a new layout from its parts.
    pub fn new(schema: ColumnSchema, n_atoms: usize) -> Self {
        DumpLayout { schema, n_atoms }
    }
}

/// Read the header of the first frame of a dump file and resolve the layout of its atom records.
///
/// ## Returns
/// - `DumpLayout` if the header could be read and all required columns were found.
/// - `ParseDumpError::EmptyTrajectory` if the file contains no frame.
/// - `ParseDumpError::UnresolvedColumn` if any of the columns `id`, `mol`, `xu|xs`, `yu|ys`, `zu|zs` is missing.
/// - Other `ParseDumpError` if the header is malformed.
///
/// ## Example
/// ```no_run
/// # use msdmol::prelude::*;
/// #
/// let layout = detect_layout("trajectory.lammpstrj").unwrap();
/// println!("Molecule column: {}", layout.schema().mol());
/// ```
pub fn detect_layout(filename: impl AsRef<Path>) -> Result<DumpLayout, ParseDumpError> {
    let mut dump = DumpFile::open(&filename)?;
    log::info!("Get the format from the lammps dump file: {}", dump.filename().display());

    let header = match read_header(&mut dump, 0) {
        None => return Err(ParseDumpError::EmptyTrajectory(Box::from(filename.as_ref()))),
        Some(header) => header?,
    };

    let schema = ColumnSchema::detect(&header.atoms_header)?;
    log::info!("id col: {}", schema.id());
    log::info!("mol col: {}", schema.mol());
    log::info!("x col: {}", schema.x());
    log::info!("y col: {}", schema.y());
    log::info!("z col: {}", schema.z());

    Ok(DumpLayout::new(schema, header.n_atoms))
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_basic() {
        let layout = detect_layout("test_files/basic.lammpstrj").unwrap();

        assert_eq!(layout.n_atoms(), 4);
        assert_eq!(layout.schema(), ColumnSchema::new(0, 1, 2, 3, 4));
    }

    #[test]
    fn detect_scaled() {
        let layout = detect_layout("test_files/scaled.lammpstrj").unwrap();

        assert_eq!(layout.n_atoms(), 6);
        assert_eq!(layout.schema(), ColumnSchema::new(0, 2, 3, 4, 5));
    }

    #[test]
    fn detect_nonexistent() {
        match detect_layout("test_files/nonexistent.lammpstrj") {
            Err(ParseDumpError::FileNotFound(e)) => {
                assert_eq!(e, Box::from(Path::new("test_files/nonexistent.lammpstrj")))
            }
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn detect_empty() {
        match detect_layout("test_files/empty.lammpstrj") {
            Err(ParseDumpError::EmptyTrajectory(e)) => {
                assert_eq!(e, Box::from(Path::new("test_files/empty.lammpstrj")))
            }
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn detect_missing_column() {
        match detect_layout("test_files/missing_mol.lammpstrj") {
            Err(ParseDumpError::UnresolvedColumn(e)) => assert_eq!(e, "mol"),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn detect_truncated_header() {
        match detect_layout("test_files/truncated_header.lammpstrj") {
            Err(ParseDumpError::TruncatedTrajectory { frame }) => assert_eq!(frame, 0),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_header_values() {
        assert_eq!(parse_header_value::<u64>(" 2500 ").unwrap(), 2500);
        assert_eq!(parse_header_value::<usize>("16").unwrap(), 16);

        match parse_header_value::<usize>("ITEM: NUMBER OF ATOMS") {
            Err(ParseDumpError::MalformedHeader(e)) => assert_eq!(e, "ITEM: NUMBER OF ATOMS"),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }
}
