// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of the complete mean-squared displacement calculation.

use crate::analysis::msd::MsdTable;
use crate::config::MsdConfig;
use crate::errors::MsdError;
use crate::io::dump_io::{count_molecule_atoms, detect_layout, read_centers};
use crate::io::msd_io::write_msd_file;
use crate::io::param_io::read_molecules;
use crate::progress::ProgressPrinter;

/// Mean-squared displacement calculation of molecular centers of mass.
///
/// Reads the tracked molecules from the parameter file, resolves the layout of the dump file,
/// counts atoms of the tracked molecules in the first frame, collects the centers of mass
/// from all frames, and calculates the origin-averaged mean-squared displacement.
#[derive(Debug, Clone)]
pub struct MsdAnalysis {
    config: MsdConfig,
}

impl MsdAnalysis {
    /// Prepare the analysis.
    ///
    /// ## Returns
    /// `MsdAnalysis` if the configuration is valid. `MsdError::Config` otherwise.
    pub fn new(config: MsdConfig) -> Result<Self, MsdError> {
        config.validate()?;
        Ok(MsdAnalysis { config })
    }

    /// Get the configuration of the analysis.
    pub fn config(&self) -> &MsdConfig {
        &self.config
    }

    /// Calculate the mean-squared displacement without writing any output file.
    pub fn calculate(&self) -> Result<MsdTable, MsdError> {
        let molecules = read_molecules(&self.config.param_file)?;
        let layout = detect_layout(&self.config.dump_file)?;
        let counts = count_molecule_atoms(&self.config.dump_file, &layout, &molecules)?;

        let progress = if self.config.progress {
            Some(ProgressPrinter::new().with_print_freq(self.config.print_freq))
        } else {
            None
        };

        let series = read_centers(
            &self.config.dump_file,
            layout,
            &molecules,
            &counts,
            self.config.verify_membership,
            progress,
        )?;

        log::info!("Calculating the mean-squared displacement.");
        Ok(MsdTable::compute(&series))
    }

    /// Calculate the mean-squared displacement and write it into the output file.
    ///
    /// ## Example
    /// ```no_run
    /// # use msdmol::prelude::*;
    /// #
    /// let config = MsdConfig::new("system.param", "trajectory.lammpstrj", 0.5);
    /// let table = MsdAnalysis::new(config).unwrap().run().unwrap();
    ///
    /// println!("MSD after one frame: {}", table.total(1).unwrap());
    /// ```
    ///
    /// ## Notes
    /// - No output file is written if any step of the calculation fails.
    pub fn run(&self) -> Result<MsdTable, MsdError> {
        let table = self.calculate()?;
        write_msd_file(&table, self.config.time_step, &self.config.output)?;
        Ok(table)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
