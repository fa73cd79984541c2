// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of errors that can occur while calculating the mean-squared displacement.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur when reading and parsing the parameter file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseParamError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("Could not read a line of file `{0}`.")]
    LineNotFound(Box<Path>),
    #[error("Parameter file does not contain the `{0}` marker.")]
    MissingMarker(String),
    #[error("Could not parse line `{0}` as the number of molecules.")]
    InvalidMoleculeCount(String),
    #[error("Parameter file declares {expected} molecules but only {found} molecule lines could be read.")]
    InsufficientMoleculeLines { expected: usize, found: usize },
    #[error("Molecule `{0}` is listed multiple times in the parameter file.")]
    DuplicateMolecule(i64),
    #[error("Parameter file declares no molecules to track.")]
    NoMolecules,
}

/// Errors that can occur when reading and parsing the LAMMPS dump file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseDumpError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("Could not read a line of file `{0}`.")]
    CouldNotRead(Box<Path>),
    #[error("Dump file `{0}` contains no frames.")]
    EmptyTrajectory(Box<Path>),
    #[error("Required column(s) `{0}` could not be found in the atoms header of the dump file.")]
    UnresolvedColumn(String),
    #[error("Frame {frame} of the dump file ended unexpectedly.")]
    TruncatedTrajectory { frame: usize },
    #[error("Frame {frame} declares {found} atoms but the first frame declares {expected} atoms.")]
    AtomsNumberMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("Could not parse line `{0}` as an atom record.")]
    MalformedRecord(String),
    #[error("Could not parse line `{0}` as a part of the frame header.")]
    MalformedHeader(String),
    #[error("Molecule `{0}` has no atoms in the first frame. Its center of mass is undefined.")]
    UndefinedCenterOfMass(i64),
    #[error("Number of atoms of molecule `{mol_id}` in frame {frame} does not match the first frame.")]
    MembershipChanged { frame: usize, mol_id: i64 },
}

/// Errors that can occur when writing the output msd file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteMsdError {
    #[error("File `{0}` could not be created.")]
    CouldNotCreate(Box<Path>),
    #[error("Could not write line into the output file.")]
    CouldNotWrite,
}

/// Errors that can occur when reading or validating the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("Could not parse the configuration yaml: {0}")]
    CouldNotParseYaml(serde_yaml::Error),
    #[error("Time step `{0}` is not a finite number.")]
    InvalidTimeStep(f64),
    #[error("Progress printing frequency must be larger than zero.")]
    InvalidPrintFreq,
}

/// Any error that can occur while running the full analysis.
#[derive(Error, Debug)]
pub enum MsdError {
    #[error(transparent)]
    Param(#[from] ParseParamError),
    #[error(transparent)]
    Dump(#[from] ParseDumpError),
    #[error(transparent)]
    Write(#[from] WriteMsdError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
