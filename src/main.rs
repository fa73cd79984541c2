// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Command line interface of `msdmol`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use msdmol::prelude::*;

#[derive(Parser)]
#[command(
    name = "msdmol",
    about = "Mean-squared displacement of molecular centers of mass from a LAMMPS dump",
    version,
    allow_negative_numbers = true
)]
struct Cli {
    /// Parameter file listing the molecules to track
    #[arg(value_name = "PARAM_FILE")]
    param_file: Option<PathBuf>,

    /// LAMMPS dump file with the trajectory
    #[arg(value_name = "DUMP_FILE")]
    dump_file: Option<PathBuf>,

    /// Time elapsed between two consecutive frames
    #[arg(value_name = "TIME_STEP")]
    time_step: Option<f64>,

    #[arg(hide = true)]
    extra: Vec<String>,

    /// Output file for the mean-squared displacement table
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Load the configuration from a yaml file (positional arguments take precedence)
    #[arg(short, long, value_name = "YAML")]
    config: Option<PathBuf>,

    /// Check that every molecule keeps its number of atoms in all frames
    #[arg(long)]
    verify_membership: bool,

    /// Do not print the progress of reading the dump file
    #[arg(long)]
    no_progress: bool,

    /// Print the progress every N frames
    #[arg(long, value_name = "N")]
    print_freq: Option<usize>,
}

fn print_usage() {
    println!();
    println!("The required formats are the following:");
    println!();
    println!("msdmol \"parameter_file\" \"dump_file\" \"time_step\"");
    println!();
    println!("exiting..");
}

/// Construct the configuration from the command line arguments.
/// Returns `Ok(None)` if the positional arguments are incomplete.
fn build_config(cli: Cli) -> Result<Option<MsdConfig>, MsdError> {
    if !cli.extra.is_empty() {
        return Ok(None);
    }

    let positional = match (cli.param_file, cli.dump_file, cli.time_step) {
        (Some(param), Some(dump), Some(time_step)) => Some((param, dump, time_step)),
        (None, None, None) => None,
        _ => return Ok(None),
    };

    let mut config = match (cli.config, positional) {
        (Some(yaml), positional) => {
            let mut config = MsdConfig::new_from_file(yaml)?;
            if let Some((param, dump, time_step)) = positional {
                config.param_file = param;
                config.dump_file = dump;
                config.time_step = time_step;
            }
            config
        }
        (None, Some((param, dump, time_step))) => MsdConfig::new(param, dump, time_step),
        (None, None) => return Ok(None),
    };

    if let Some(output) = cli.output {
        config = config.with_output(output);
    }
    if cli.verify_membership {
        config = config.with_verify_membership(true);
    }
    if cli.no_progress {
        config = config.with_progress(false);
    }
    if let Some(print_freq) = cli.print_freq {
        config = config.with_print_freq(print_freq);
    }

    Ok(Some(config))
}

fn run(config: MsdConfig) -> Result<(), MsdError> {
    log::info!("msdmol {}", msdmol::MSDMOL_VERSION);
    MsdAnalysis::new(config)?.run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match build_config(cli) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
