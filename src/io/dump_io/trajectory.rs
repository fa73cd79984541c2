// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of functions for aggregating atoms of a LAMMPS dump trajectory
//! into centers of mass of the tracked molecules.

use std::path::Path;

use crate::errors::ParseDumpError;
use crate::progress::{ProgressPrinter, ProgressStatus};
use crate::structures::{
    frames::{AtomCount, FrameSeries},
    molecules::MoleculeSet,
    vector3d::Vector3D,
};

use super::{read_header, DumpFile, DumpLayout};

/// Count the atoms of each tracked molecule in the first frame of a dump file.
///
/// ## Returns
/// - `AtomCount` indexed by the local indices of `molecules` if every tracked molecule has at least one atom.
/// - `ParseDumpError::UndefinedCenterOfMass` if any tracked molecule has no atom in the first frame.
/// - Other `ParseDumpError` if the first frame could not be read.
///
/// ## Notes
/// - Only the molecule column of the atom records is parsed.
/// - Molecule membership of atoms is assumed to be the same in every frame.
pub fn count_molecule_atoms(
    filename: impl AsRef<Path>,
    layout: &DumpLayout,
    molecules: &MoleculeSet,
) -> Result<AtomCount, ParseDumpError> {
    let mut dump = DumpFile::open(&filename)?;

    match read_header(&mut dump, 0) {
        None => return Err(ParseDumpError::EmptyTrajectory(Box::from(filename.as_ref()))),
        Some(header) => header?,
    };

    let schema = layout.schema();
    let mut counts = AtomCount::new(molecules.len());
    for _ in 0..layout.n_atoms() {
        let line = dump.frame_line(0)?;

        if let Some(local) = molecules.local_index(schema.parse_molecule(line)?) {
            counts.increment(local);
        }
    }

    for (local, count) in counts.iter().enumerate() {
        log::debug!(
            "Molecule {} consists of {} atoms.",
            molecules.id(local).unwrap_or_default(),
            count
        );
    }

    counts.check_defined(molecules)?;
    Ok(counts)
}

/// Centers of mass of the tracked molecules in a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpFrame {
    /// Simulation timestep of the frame.
    pub timestep: u64,
    /// Centers of mass indexed by the local molecule indices.
    pub centers: Vec<Vector3D>,
}

/// Iterator over the frames of a dump file yielding centers of mass of the tracked molecules.
pub struct DumpReader<'a> {
    dump: DumpFile,
    layout: DumpLayout,
    molecules: &'a MoleculeSet,
    counts: &'a AtomCount,
    verify_membership: bool,
    progress_printer: Option<ProgressPrinter>,
    frame_number: usize,
    last_timestep: u64,
    finished: bool,
}

impl<'a> DumpReader<'a> {
    /// Open a dump file for reading the centers of mass.
    ///
    /// ## Returns
    /// - `DumpReader` if the file exists and every tracked molecule has at least one atom in `counts`.
    /// - `ParseDumpError::UndefinedCenterOfMass` if any molecule has zero atoms.
    /// - `ParseDumpError::FileNotFound` if the file does not exist.
    ///
    /// ## Example
    /// ```no_run
    /// # use msdmol::prelude::*;
    /// #
    /// let molecules = read_molecules("system.param").unwrap();
    /// let layout = detect_layout("trajectory.lammpstrj").unwrap();
    /// let counts = count_molecule_atoms("trajectory.lammpstrj", &layout, &molecules).unwrap();
    ///
    /// for frame in DumpReader::new("trajectory.lammpstrj", layout, &molecules, &counts).unwrap() {
    ///     let frame = frame.unwrap();
    ///     println!("{} {:?}", frame.timestep, frame.centers[0]);
    /// }
    /// ```
    pub fn new(
        filename: impl AsRef<Path>,
        layout: DumpLayout,
        molecules: &'a MoleculeSet,
        counts: &'a AtomCount,
    ) -> Result<Self, ParseDumpError> {
        if counts.len() != molecules.len() {
            panic!("FATAL MSDMOL ERROR | DumpReader::new | Atom counts do not match the molecule set.");
        }
        counts.check_defined(molecules)?;

        Ok(DumpReader {
            dump: DumpFile::open(filename)?,
            layout,
            molecules,
            counts,
            verify_membership: false,
            progress_printer: None,
            frame_number: 0,
            last_timestep: 0,
            finished: false,
        })
    }

    /// Check in every frame that each tracked molecule consists of the same number
    /// of atoms as in the first frame. Mismatch results in `ParseDumpError::MembershipChanged`.
    pub fn verify_membership(mut self, verify: bool) -> Self {
        self.verify_membership = verify;
        self
    }

    /// Print the progress of reading using the provided `ProgressPrinter`.
    pub fn print_progress(mut self, printer: ProgressPrinter) -> Self {
        self.progress_printer = Some(printer);
        self
    }

    /// Read the next frame and calculate the centers of mass of the tracked molecules.
    fn read_frame(&mut self) -> Option<Result<DumpFrame, ParseDumpError>> {
        let frame = self.frame_number;

        let header = match read_header(&mut self.dump, frame)? {
            Ok(header) => header,
            Err(e) => return Some(Err(e)),
        };

        if header.n_atoms != self.layout.n_atoms() {
            return Some(Err(ParseDumpError::AtomsNumberMismatch {
                frame,
                expected: self.layout.n_atoms(),
                found: header.n_atoms,
            }));
        }

        Some(
            self.read_atoms(frame)
                .map(|centers| DumpFrame {
                    timestep: header.timestep,
                    centers,
                }),
        )
    }

    /// Read atom records of a single frame and average positions of atoms of each tracked molecule.
    fn read_atoms(&mut self, frame: usize) -> Result<Vec<Vector3D>, ParseDumpError> {
        let schema = self.layout.schema();
        let mut centers = vec![Vector3D::default(); self.molecules.len()];
        let mut members = AtomCount::new(self.molecules.len());

        for _ in 0..self.layout.n_atoms() {
            let line = self.dump.frame_line(frame)?;

            let record = schema.parse_record(line)?;
            if let Some(local) = self.molecules.local_index(record.mol) {
                centers[local] += record.position;
                members.increment(local);
            }
        }

        if self.verify_membership {
            if let Some(local) = members
                .iter()
                .zip(self.counts.iter())
                .position(|(found, expected)| found != expected)
            {
                return Err(ParseDumpError::MembershipChanged {
                    frame,
                    mol_id: self.molecules.id(local).unwrap_or_default(),
                });
            }
        }

        for (center, count) in centers.iter_mut().zip(self.counts.iter()) {
            *center /= count as f64;
        }

        Ok(centers)
    }
}

impl Iterator for DumpReader<'_> {
    type Item = Result<DumpFrame, ParseDumpError>;

    /// Read the next frame of the dump file.
    ///
    /// ## Returns
    /// - `Some(Ok(DumpFrame))` if the frame has been successfully read.
    /// - `Some(Err(ParseDumpError))` if the frame could not be read. The iteration then ends.
    /// - `None` if the end of the dump file has been reached.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.read_frame();

        let status = match &result {
            None => ProgressStatus::Completed,
            Some(Err(_)) => ProgressStatus::Failed,
            Some(Ok(frame)) => {
                self.last_timestep = frame.timestep;
                ProgressStatus::Running
            }
        };

        if status != ProgressStatus::Running {
            self.finished = true;
        }

        if let Some(ref mut printer) = self.progress_printer {
            printer.set_status(status);
            printer.print(self.frame_number, self.last_timestep);
        }

        if status == ProgressStatus::Running {
            log::debug!("Read frame {} (timestep {}).", self.frame_number, self.last_timestep);
            self.frame_number += 1;
        }

        result
    }
}

/// Read the whole dump file and collect the centers of mass of the tracked molecules in every frame.
///
/// ## Returns
/// `FrameSeries` containing one row per frame, or the first `ParseDumpError` encountered.
///
/// ## Notes
/// - Reading stops at the end of the file or at the first empty line where a frame header is expected.
/// - Every frame must contain the same number of atoms as the first frame.
pub fn read_centers(
    filename: impl AsRef<Path>,
    layout: DumpLayout,
    molecules: &MoleculeSet,
    counts: &AtomCount,
    verify_membership: bool,
    progress: Option<ProgressPrinter>,
) -> Result<FrameSeries, ParseDumpError> {
    log::info!(
        "Reading the center-of-mass coordinates from the lammps dump file: {}",
        filename.as_ref().display()
    );

    let mut reader =
        DumpReader::new(&filename, layout, molecules, counts)?.verify_membership(verify_membership);
    if let Some(printer) = progress {
        reader = reader.print_progress(printer);
    }

    let mut series = FrameSeries::new(molecules.len());
    for frame in reader {
        series.push_frame(&frame?.centers);
    }

    log::info!("Number of frames read: {}", series.n_frames());
    Ok(series)
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests_count {
    use super::*;
    use crate::io::dump_io::detect_layout;

    #[test]
    fn count_basic() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let layout = detect_layout("test_files/basic.lammpstrj").unwrap();
        let counts =
            count_molecule_atoms("test_files/basic.lammpstrj", &layout, &molecules).unwrap();

        assert_eq!(counts, AtomCount::from(vec![2, 2]));
    }

    #[test]
    fn count_subset() {
        let molecules = MoleculeSet::new([3, 1]).unwrap();
        let layout = detect_layout("test_files/scaled.lammpstrj").unwrap();
        let counts =
            count_molecule_atoms("test_files/scaled.lammpstrj", &layout, &molecules).unwrap();

        assert_eq!(counts, AtomCount::from(vec![1, 3]));
    }

    #[test]
    fn count_missing_molecule() {
        let molecules = MoleculeSet::new([10, 30]).unwrap();
        let layout = detect_layout("test_files/basic.lammpstrj").unwrap();

        match count_molecule_atoms("test_files/basic.lammpstrj", &layout, &molecules) {
            Err(ParseDumpError::UndefinedCenterOfMass(id)) => assert_eq!(id, 30),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }
}

#[cfg(test)]
mod tests_read {
    use super::*;
    use crate::io::dump_io::detect_layout;
    use crate::test_utilities::utilities::compare_series;
    use float_cmp::assert_approx_eq;

    fn prepare(
        filename: &str,
        molecules: &MoleculeSet,
    ) -> Result<(DumpLayout, AtomCount), ParseDumpError> {
        let layout = detect_layout(filename)?;
        let counts = count_molecule_atoms(filename, &layout, molecules)?;
        Ok((layout, counts))
    }

    #[test]
    fn read_basic() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/basic.lammpstrj", &molecules).unwrap();

        let series = read_centers(
            "test_files/basic.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        )
        .unwrap();

        let expected = FrameSeries::from_frames(vec![
            vec![Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
            vec![Vector3D::new(2.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
            vec![Vector3D::new(3.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
        ]);

        compare_series(&series, &expected, 1e-12);
    }

    #[test]
    fn iterate_timesteps() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/basic.lammpstrj", &molecules).unwrap();

        let timesteps = DumpReader::new("test_files/basic.lammpstrj", layout, &molecules, &counts)
            .unwrap()
            .map(|frame| frame.map(|f| f.timestep))
            .collect::<Result<Vec<u64>, ParseDumpError>>()
            .unwrap();

        assert_eq!(timesteps, vec![0, 100, 200]);
    }

    #[test]
    fn read_scaled_ignores_untracked() {
        let molecules = MoleculeSet::new([1]).unwrap();
        let (layout, counts) = prepare("test_files/scaled.lammpstrj", &molecules).unwrap();

        let series = read_centers(
            "test_files/scaled.lammpstrj",
            layout,
            &molecules,
            &counts,
            true,
            None,
        )
        .unwrap();

        assert_eq!(series.n_frames(), 2);
        assert_eq!(series.n_molecules(), 1);

        let first = series.position(0, 0).unwrap();
        assert_approx_eq!(f64, first.x, 0.2, epsilon = 1e-12);
        assert_approx_eq!(f64, first.y, 0.3, epsilon = 1e-12);
        assert_approx_eq!(f64, first.z, 0.4, epsilon = 1e-12);

        let second = series.position(1, 0).unwrap();
        assert_approx_eq!(f64, second.x, 0.3, epsilon = 1e-12);
        assert_approx_eq!(f64, second.y, 0.3, epsilon = 1e-12);
        assert_approx_eq!(f64, second.z, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn read_stops_at_empty_line() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/trailing_blank.lammpstrj", &molecules).unwrap();

        let series = read_centers(
            "test_files/trailing_blank.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        )
        .unwrap();

        assert_eq!(series.n_frames(), 2);
    }

    #[test]
    fn read_truncated() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/truncated.lammpstrj", &molecules).unwrap();

        match read_centers(
            "test_files/truncated.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        ) {
            Err(ParseDumpError::TruncatedTrajectory { frame }) => assert_eq!(frame, 1),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn read_atoms_number_mismatch() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/natoms_mismatch.lammpstrj", &molecules).unwrap();

        match read_centers(
            "test_files/natoms_mismatch.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        ) {
            Err(ParseDumpError::AtomsNumberMismatch {
                frame,
                expected,
                found,
            }) => {
                assert_eq!(frame, 1);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn read_malformed_record() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/malformed.lammpstrj", &molecules).unwrap();

        match read_centers(
            "test_files/malformed.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        ) {
            Err(ParseDumpError::MalformedRecord(line)) => assert_eq!(line, "3 20 5.0 five 5.0"),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn read_malformed_header() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/misaligned.lammpstrj", &molecules).unwrap();

        match read_centers(
            "test_files/misaligned.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        ) {
            Err(ParseDumpError::MalformedHeader(line)) => assert_eq!(line, "5 20 5.0 5.0 5.0"),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn membership_changed() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/membership.lammpstrj", &molecules).unwrap();

        // without verification, the frames are read using the first-frame counts
        let series = read_centers(
            "test_files/membership.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        )
        .unwrap();
        assert_eq!(series.n_frames(), 2);

        match read_centers(
            "test_files/membership.lammpstrj",
            layout,
            &molecules,
            &counts,
            true,
            None,
        ) {
            Err(ParseDumpError::MembershipChanged { frame, mol_id }) => {
                assert_eq!(frame, 1);
                assert_eq!(mol_id, 10);
            }
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn reader_rejects_zero_counts() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let layout = detect_layout("test_files/basic.lammpstrj").unwrap();
        let counts = AtomCount::from(vec![2, 0]);

        match DumpReader::new("test_files/basic.lammpstrj", layout, &molecules, &counts) {
            Err(ParseDumpError::UndefinedCenterOfMass(id)) => assert_eq!(id, 20),
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn read_invalid_marker_line() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/invalid_marker.lammpstrj", &molecules).unwrap();

        match read_centers(
            "test_files/invalid_marker.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            None,
        ) {
            Err(ParseDumpError::CouldNotRead(e)) => {
                assert_eq!(e, Box::from(Path::new("test_files/invalid_marker.lammpstrj")))
            }
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn read_invalid_record_line() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/invalid_record.lammpstrj", &molecules).unwrap();

        let mut reader =
            DumpReader::new("test_files/invalid_record.lammpstrj", layout, &molecules, &counts)
                .unwrap();

        assert!(reader.next().unwrap().is_ok());
        match reader.next().unwrap() {
            Err(ParseDumpError::CouldNotRead(e)) => {
                assert_eq!(e, Box::from(Path::new("test_files/invalid_record.lammpstrj")))
            }
            Ok(_) => panic!("Function should have failed but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
        assert!(reader.next().is_none());
    }

    #[test]
    #[should_panic(expected = "FATAL MSDMOL ERROR | DumpReader::new")]
    fn reader_counts_longer_than_molecules() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let layout = detect_layout("test_files/basic.lammpstrj").unwrap();
        let counts = AtomCount::from(vec![2, 2, 0]);

        let _ = DumpReader::new("test_files/basic.lammpstrj", layout, &molecules, &counts);
    }

    #[test]
    fn reader_ends_after_error() {
        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/truncated.lammpstrj", &molecules).unwrap();

        let mut reader =
            DumpReader::new("test_files/truncated.lammpstrj", layout, &molecules, &counts).unwrap();

        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn progress_output() {
        use std::io::Read;
        use tempfile::NamedTempFile;

        let molecules = MoleculeSet::new([10, 20]).unwrap();
        let (layout, counts) = prepare("test_files/basic.lammpstrj", &molecules).unwrap();

        let file = NamedTempFile::new().unwrap();
        let printer = ProgressPrinter::new()
            .with_output(Box::from(file.reopen().unwrap()))
            .with_colored(false)
            .with_print_freq(1)
            .with_terminating("\n");

        read_centers(
            "test_files/basic.lammpstrj",
            layout,
            &molecules,
            &counts,
            false,
            Some(printer),
        )
        .unwrap();

        let mut output = String::new();
        std::fs::File::open(file.path())
            .unwrap()
            .read_to_string(&mut output)
            .unwrap();

        let lines = output.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("RUNNING"));
        assert!(lines[2].ends_with("200"));
        assert!(lines[3].contains("COMPLETED"));
        assert!(lines[3].ends_with("200"));
    }
}
