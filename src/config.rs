// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of the run configuration of the mean-squared displacement analysis.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auxiliary::DEFAULT_OUTPUT;
use crate::errors::ConfigError;

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_progress() -> bool {
    true
}

fn default_print_freq() -> usize {
    100
}

/// Configuration of a single mean-squared displacement calculation.
///
/// Can be constructed using `MsdConfig::new` and the `with_*` methods
/// or loaded from a yaml file using `MsdConfig::new_from_file`.
///
/// ## Example of a yaml configuration
/// ```yaml
/// param_file: system.param
/// dump_file: trajectory.lammpstrj
/// time_step: 0.5
/// output: results/msd.dat
/// verify_membership: true
/// print_freq: 10
/// ```
/// Only `param_file`, `dump_file`, and `time_step` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MsdConfig {
    /// Parameter file listing the molecules to track.
    pub param_file: PathBuf,
    /// LAMMPS dump file with the trajectory.
    pub dump_file: PathBuf,
    /// Time elapsed between two consecutive frames of the dump file.
    pub time_step: f64,
    /// Output file for the mean-squared displacement table. Default: `o.msd.dat`.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Check that the molecules have the same number of atoms in every frame. Default: false.
    #[serde(default)]
    pub verify_membership: bool,
    /// Print the progress of reading the dump file. Default: true.
    #[serde(default = "default_progress")]
    pub progress: bool,
    /// Print the progress every `print_freq` frames. Default: 100.
    #[serde(default = "default_print_freq")]
    pub print_freq: usize,
}

impl MsdConfig {
    /// Create a new configuration with default values of the optional parameters.
    ///
    /// ## Example
    /// ```
    /// # use msdmol::prelude::*;
    /// #
    /// let config = MsdConfig::new("system.param", "trajectory.lammpstrj", 0.5)
    ///     .with_output("msd.dat")
    ///     .with_progress(false);
    ///
    /// assert!(config.validate().is_ok());
    /// assert_eq!(config.output, std::path::PathBuf::from("msd.dat"));
    /// ```
    pub fn new(
        param_file: impl AsRef<Path>,
        dump_file: impl AsRef<Path>,
        time_step: f64,
    ) -> Self {
        MsdConfig {
            param_file: param_file.as_ref().to_path_buf(),
            dump_file: dump_file.as_ref().to_path_buf(),
            time_step,
            output: default_output(),
            verify_membership: false,
            progress: default_progress(),
            print_freq: default_print_freq(),
        }
    }

    /// Load the configuration from a yaml file.
    ///
    /// ## Returns
    /// Validated `MsdConfig` if the file could be read and parsed. `ConfigError` otherwise.
    pub fn new_from_file(filename: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut file = File::open(filename.as_ref())
            .map_err(|_| ConfigError::FileNotFound(Box::from(filename.as_ref())))?;

        let mut yaml = String::new();
        file.read_to_string(&mut yaml)
            .map_err(|_| ConfigError::FileNotFound(Box::from(filename.as_ref())))?;

        MsdConfig::new_from_string(&yaml)
    }

    /// Parse a yaml string into a validated `MsdConfig`.
    pub fn new_from_string(yaml: &str) -> Result<Self, ConfigError> {
        let config: MsdConfig = match serde_yaml::from_str(yaml) {
            Ok(x) => x,
            Err(e) => return Err(ConfigError::CouldNotParseYaml(e)),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create new `MsdConfig` with specific `output` file.
    pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }

    /// Create new `MsdConfig` with specific value for `verify_membership`.
    pub fn with_verify_membership(mut self, verify: bool) -> Self {
        self.verify_membership = verify;
        self
    }

    /// Create new `MsdConfig` with specific value for `progress`.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Create new `MsdConfig` with specific value for `print_freq`.
    pub fn with_print_freq(mut self, print_freq: usize) -> Self {
        self.print_freq = print_freq;
        self
    }

    /// Check that the configuration can be used for the calculation.
    ///
    /// ## Returns
    /// - `ConfigError::InvalidTimeStep` if the time step is infinite or NaN.
    /// - `ConfigError::InvalidPrintFreq` if `print_freq` is zero.
    ///
    /// ## Notes
    /// - Zero and negative time steps are accepted. They only scale the time column of the output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_step.is_finite() {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }

        if self.print_freq == 0 {
            return Err(ConfigError::InvalidPrintFreq);
        }

        Ok(())
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
