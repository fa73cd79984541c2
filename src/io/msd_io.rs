// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of functions for writing the mean-squared displacement table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::msd::MsdTable;
use crate::errors::WriteMsdError;

/// Width of every column of the output table.
const COLUMN_WIDTH: usize = 20;

/// Write the mean-squared displacement table into any stream.
///
/// The output starts with a header line `time x y z total` followed by one line per time lag.
/// Each line contains the physical time (`lag * time_step`), the mean-squared displacement
/// along x, y, and z, and their sum. All fields are left-justified in 20-character columns
/// separated by a single space. Numbers are written with 6 decimal places.
///
/// ## Example
/// ```
/// # use msdmol::prelude::*;
/// #
/// let series = FrameSeries::from_frames(vec![
///     vec![Vector3D::new(0.0, 0.0, 0.0)],
///     vec![Vector3D::new(1.0, 0.0, 0.0)],
/// ]);
/// let table = MsdTable::compute(&series);
///
/// let mut output = Vec::new();
/// write_msd(&table, 2.0, &mut output).unwrap();
///
/// let output = String::from_utf8(output).unwrap();
/// assert!(output.lines().nth(2).unwrap().starts_with("2.000000             1.000000"));
/// ```
pub fn write_msd(
    table: &MsdTable,
    time_step: f64,
    mut writer: impl Write,
) -> Result<(), WriteMsdError> {
    writeln!(
        writer,
        "{:<w$} {:<w$} {:<w$} {:<w$} {:<w$}",
        "time",
        "x",
        "y",
        "z",
        "total",
        w = COLUMN_WIDTH
    )
    .map_err(|_| WriteMsdError::CouldNotWrite)?;

    for (lag, entry) in table.iter().enumerate() {
        let msd = entry.msd();
        writeln!(
            writer,
            "{:<w$.6} {:<w$.6} {:<w$.6} {:<w$.6} {:<w$.6}",
            time_step * lag as f64,
            msd.x,
            msd.y,
            msd.z,
            entry.total(),
            w = COLUMN_WIDTH
        )
        .map_err(|_| WriteMsdError::CouldNotWrite)?;
    }

    writer.flush().map_err(|_| WriteMsdError::CouldNotWrite)?;
    Ok(())
}

/// Write the mean-squared displacement table into a file.
///
/// ## Returns
/// `Ok` if the file was successfully written. `WriteMsdError` otherwise.
///
/// ## Notes
/// - Any existing file with the same name is overwritten.
/// - See `write_msd` for the format of the output.
pub fn write_msd_file(
    table: &MsdTable,
    time_step: f64,
    filename: impl AsRef<Path>,
) -> Result<(), WriteMsdError> {
    let output = File::create(&filename)
        .map_err(|_| WriteMsdError::CouldNotCreate(Box::from(filename.as_ref())))?;

    write_msd(table, time_step, BufWriter::new(output))?;

    log::info!(
        "Mean-squared displacement written into file: {}",
        filename.as_ref().display()
    );
    Ok(())
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{frames::FrameSeries, vector3d::Vector3D};
    use file_diff;
    use tempfile::NamedTempFile;

    fn basic_table() -> MsdTable {
        MsdTable::compute(&FrameSeries::from_frames(vec![
            vec![Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
            vec![Vector3D::new(2.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
            vec![Vector3D::new(3.0, 0.0, 0.0), Vector3D::new(5.0, 5.0, 5.0)],
        ]))
    }

    #[test]
    fn write_file() {
        let output = NamedTempFile::new().unwrap();
        let path_to_output = output.path();

        if write_msd_file(&basic_table(), 0.5, path_to_output).is_err() {
            panic!("Writing msd file failed.");
        }

        let mut result = File::open(path_to_output).unwrap();
        let mut expected = File::open("test_files/expected.msd.dat").unwrap();

        assert!(file_diff::diff_files(&mut result, &mut expected));
    }

    #[test]
    fn write_layout() {
        let mut output = Vec::new();
        write_msd(&basic_table(), 0.5, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let lines = output.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 4);
        for line in lines.iter() {
            assert_eq!(line.len(), 5 * COLUMN_WIDTH + 4);
        }

        assert!(lines[0].starts_with("time                 x"));
        assert_eq!(
            lines[3].split_whitespace().collect::<Vec<&str>>(),
            vec!["1.000000", "2.000000", "0.000000", "0.000000", "2.000000"]
        );
    }

    #[test]
    fn write_empty_table() {
        let mut output = Vec::new();
        write_msd(&MsdTable::compute(&FrameSeries::new(2)), 1.0, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(output.lines().count(), 1);
        assert_eq!(
            output.split_whitespace().collect::<Vec<&str>>(),
            vec!["time", "x", "y", "z", "total"]
        );
    }

    #[test]
    fn write_negative_time_step() {
        let mut output = Vec::new();
        write_msd(&basic_table(), -0.25, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let times = output
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().next().unwrap())
            .collect::<Vec<&str>>();
        assert_eq!(times, vec!["-0.000000", "-0.250000", "-0.500000"]);
    }

    #[test]
    fn write_fails() {
        match write_msd_file(&basic_table(), 1.0, "Xhfguiedhqueiowhd/o.msd.dat") {
            Err(WriteMsdError::CouldNotCreate(e)) => {
                assert_eq!(e, Box::from(Path::new("Xhfguiedhqueiowhd/o.msd.dat")))
            }
            Ok(_) => panic!("Writing should have failed, but it did not."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }
}
