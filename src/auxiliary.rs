// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Simple, auxiliary functions and constants used through the `msdmol` library.

/******************************/
/*         CONSTANTS          */
/******************************/

/// Marker of the parameter-file line declaring the number of tracked molecules.
pub(crate) const NMOLS_MARKER: &str = "number of molecules";
/// Marker of the parameter-file section listing the tracked molecules.
/// The first molecule ID is located two lines below the marker.
pub(crate) const MOLECULES_MARKER: &str = "Molecules";
/// Offset of the first molecule line from the `Molecules` marker.
pub(crate) const MOLECULES_OFFSET: usize = 2;

/// Every frame of a LAMMPS dump starts with `ITEM: TIMESTEP`.
pub(crate) const DUMP_TIMESTEP_MARKER: &str = "ITEM: TIMESTEP";
/// Number of box-bounds lines following the `ITEM: BOX BOUNDS` marker.
pub(crate) const DUMP_BOX_LINES: usize = 3;
/// Number of literal tokens (`ITEM:` and `ATOMS`) preceding the column names in the atoms header.
pub(crate) const DUMP_COLUMN_PREFIX: usize = 2;

/// Name of the output file written by the command line tool.
pub const DEFAULT_OUTPUT: &str = "o.msd.dat";

/******************************/
/*          PARSING           */
/******************************/

/// Parse the integer at the very start of `line` (after leading whitespace).
/// Any characters following the integer are ignored.
///
/// Returns `None` if the line does not start with an integer.
pub(crate) fn leading_integer(line: &str) -> Option<i64> {
    let trimmed = line.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len() - sign_len);

    if digits == 0 {
        return None;
    }

    trimmed[..sign_len + digits].parse::<i64>().ok()
}

/******************************/
/*         UNIT TESTS         */
/******************************/
