// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of the detection of columns in LAMMPS dump atom records.

use getset::CopyGetters;

use crate::auxiliary::DUMP_COLUMN_PREFIX;
use crate::errors::ParseDumpError;
use crate::structures::vector3d::Vector3D;

/// Names of the required fields in the order in which they are stored in `ColumnSchema`.
const FIELD_NAMES: [&str; 5] = ["id", "mol", "x", "y", "z"];

/// Positions of the required fields in a whitespace-tokenized atom record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct ColumnSchema {
    /// Column containing the atom identifier.
    #[getset(get_copy = "pub")]
    id: usize,
    /// Column containing the molecule identifier.
    #[getset(get_copy = "pub")]
    mol: usize,
    /// Column containing the x-coordinate (`xu` or `xs`).
    #[getset(get_copy = "pub")]
    x: usize,
    /// Column containing the y-coordinate (`yu` or `ys`).
    #[getset(get_copy = "pub")]
    y: usize,
    /// Column containing the z-coordinate (`zu` or `zs`).
    #[getset(get_copy = "pub")]
    z: usize,
    /// Highest of the column indices. Records must contain at least `last + 1` fields.
    last: usize,
}

/// Single atom record parsed using `ColumnSchema`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomRecord {
    pub id: i64,
    pub mol: i64,
    pub position: Vector3D,
}

impl ColumnSchema {
    /// Create a new `ColumnSchema` from explicit column positions.
    pub fn new(id: usize, mol: usize, x: usize, y: usize, z: usize) -> Self {
        ColumnSchema {
            id,
            mol,
            x,
            y,
            z,
            last: id.max(mol).max(x).max(y).max(z),
        }
    }

    /// Resolve the column positions from the `ITEM: ATOMS ...` line of a dump file.
    ///
    /// ## Returns
    /// - `ColumnSchema` if all of the fields `id`, `mol`, `xu|xs`, `yu|ys`, `zu|zs` were found.
    /// - `ParseDumpError::UnresolvedColumn` listing the missing fields otherwise.
    ///
    /// ## Example
    /// ```
    /// # use msdmol::prelude::*;
    /// #
    /// let schema = ColumnSchema::detect("ITEM: ATOMS id type mol xs ys zs").unwrap();
    ///
    /// assert_eq!(schema.id(), 0);
    /// assert_eq!(schema.mol(), 2);
    /// assert_eq!(schema.x(), 3);
    /// assert_eq!(schema.z(), 5);
    /// ```
    ///
    /// ## Notes
    /// - The first two tokens of the line (`ITEM:` and `ATOMS`) are skipped,
    ///   i.e. the first column name has position 0.
    /// - Unrecognized column names are ignored.
    /// - Wrapped (`xu`) and scaled (`xs`) coordinates are accepted as they are.
    ///   If both are present for the same axis, the later column is used.
    pub fn detect(header: &str) -> Result<Self, ParseDumpError> {
        let mut columns: [Option<usize>; 5] = [None; 5];

        for (position, token) in header
            .split_whitespace()
            .skip(DUMP_COLUMN_PREFIX)
            .enumerate()
        {
            let field = match token {
                "id" => 0,
                "mol" => 1,
                "xu" | "xs" => 2,
                "yu" | "ys" => 3,
                "zu" | "zs" => 4,
                _ => continue,
            };

            columns[field] = Some(position);
        }

        match columns {
            [Some(id), Some(mol), Some(x), Some(y), Some(z)] => {
                Ok(ColumnSchema::new(id, mol, x, y, z))
            }
            _ => {
                let missing = columns
                    .iter()
                    .zip(FIELD_NAMES)
                    .filter(|(column, _)| column.is_none())
                    .map(|(_, name)| name)
                    .collect::<Vec<&str>>()
                    .join(", ");

                Err(ParseDumpError::UnresolvedColumn(missing))
            }
        }
    }

    /// Split an atom record into fields. Only the fields up to the last required column are returned.
    #[inline]
    fn split<'a>(&self, line: &'a str) -> Result<Vec<&'a str>, ParseDumpError> {
        let fields = line
            .split_whitespace()
            .take(self.last + 1)
            .collect::<Vec<&str>>();

        if fields.len() <= self.last {
            Err(ParseDumpError::MalformedRecord(line.to_owned()))
        } else {
            Ok(fields)
        }
    }

    /// Parse only the molecule identifier of an atom record.
    pub fn parse_molecule(&self, line: &str) -> Result<i64, ParseDumpError> {
        line.split_whitespace()
            .nth(self.mol)
            .and_then(|field| field.parse::<i64>().ok())
            .ok_or_else(|| ParseDumpError::MalformedRecord(line.to_owned()))
    }

    /// Parse an atom record into its identifier, molecule identifier, and position.
    ///
    /// ## Example
    /// ```
    /// # use msdmol::prelude::*;
    /// #
    /// let schema = ColumnSchema::detect("ITEM: ATOMS id mol xu yu zu").unwrap();
    /// let record = schema.parse_record("3 12 1.5 -2.0 0.25").unwrap();
    ///
    /// assert_eq!(record.id, 3);
    /// assert_eq!(record.mol, 12);
    /// assert_eq!(record.position, Vector3D::new(1.5, -2.0, 0.25));
    /// ```
    pub fn parse_record(&self, line: &str) -> Result<AtomRecord, ParseDumpError> {
        let fields = self.split(line)?;
        let malformed = || ParseDumpError::MalformedRecord(line.to_owned());

        let id = fields[self.id].parse::<i64>().map_err(|_| malformed())?;
        let mol = fields[self.mol].parse::<i64>().map_err(|_| malformed())?;

        let mut coordinates = [0.0f64; 3];
        for (coordinate, column) in coordinates.iter_mut().zip([self.x, self.y, self.z]) {
            *coordinate = fields[column].parse::<f64>().map_err(|_| malformed())?;
        }

        Ok(AtomRecord {
            id,
            mol,
            position: Vector3D::from(coordinates),
        })
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
