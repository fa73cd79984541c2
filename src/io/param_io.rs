// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of functions for reading the parameter file listing the tracked molecules.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::auxiliary::{leading_integer, MOLECULES_MARKER, MOLECULES_OFFSET, NMOLS_MARKER};
use crate::errors::ParseParamError;
use crate::structures::molecules::MoleculeSet;

/// Read a parameter file and construct the set of molecules to track.
///
/// ## Returns
/// `MoleculeSet` if parsing was successful. Otherwise `ParseParamError`.
///
/// ## Example
/// ```no_run
/// # use msdmol::prelude::*;
/// #
/// let molecules = read_molecules("system.param").unwrap();
/// println!("Tracking {} molecules.", molecules.len());
/// ```
///
/// ## Notes
/// - The number of molecules is the leading integer of the first line containing `number of molecules`.
/// - The molecule IDs are read from the lines starting two lines below the first line containing `Molecules`.
///   Each of these lines must start with an integer. Anything after the integer is ignored.
/// - Lines following the declared number of molecule lines are ignored.
/// - Bytes that are not valid UTF-8 are replaced and do not affect the parsing.
pub fn read_molecules(filename: impl AsRef<Path>) -> Result<MoleculeSet, ParseParamError> {
    let file = match File::open(filename.as_ref()) {
        Ok(x) => x,
        Err(_) => return Err(ParseParamError::FileNotFound(Box::from(filename.as_ref()))),
    };

    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => lines.push(
                String::from_utf8_lossy(&buffer)
                    .trim_end_matches(['\n', '\r'])
                    .to_owned(),
            ),
            Err(_) => return Err(ParseParamError::LineNotFound(Box::from(filename.as_ref()))),
        }
    }

    log::info!("Reading the parameters from file: {}", filename.as_ref().display());
    parse_molecules(&lines)
}

/// Construct the set of tracked molecules from the lines of a parameter file.
pub(crate) fn parse_molecules(lines: &[String]) -> Result<MoleculeSet, ParseParamError> {
    let n_mols = get_nmols(lines)?;
    log::info!("Number of molecules: {}", n_mols);

    let start = lines
        .iter()
        .position(|line| line.contains(MOLECULES_MARKER))
        .ok_or_else(|| ParseParamError::MissingMarker(MOLECULES_MARKER.to_owned()))?
        + MOLECULES_OFFSET;

    let ids = lines
        .iter()
        .skip(start)
        .take(n_mols)
        .map_while(|line| leading_integer(line))
        .collect::<Vec<i64>>();

    if ids.len() != n_mols {
        return Err(ParseParamError::InsufficientMoleculeLines {
            expected: n_mols,
            found: ids.len(),
        });
    }

    let molecules = MoleculeSet::new(ids)?;

    log::info!("List of molecules to be examined:");
    for (local, id) in molecules.iter().enumerate() {
        log::info!("{} {}", id, local);
    }

    Ok(molecules)
}

/// Find the line declaring the number of molecules and parse its leading integer.
fn get_nmols(lines: &[String]) -> Result<usize, ParseParamError> {
    let line = lines
        .iter()
        .find(|line| line.contains(NMOLS_MARKER))
        .ok_or_else(|| ParseParamError::MissingMarker(NMOLS_MARKER.to_owned()))?;

    leading_integer(line)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ParseParamError::InvalidMoleculeCount(line.trim().to_owned()))
}

/******************************/
/*         UNIT TESTS         */
/******************************/
