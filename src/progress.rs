// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of ProgressPrinter structure for printing the progress of dump file reading.

use colored::{ColoredString, Colorize};
use std::io::Write;

/// Progress of dump file reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Dump file reading is in progress.
    Running,
    /// Dump file has been read completely.
    Completed,
    /// Dump file reading failed.
    Failed,
}

/// String that can be used inside `ProgressPrinter`.
#[derive(Debug, Clone, PartialEq)]
struct ProgressMessage {
    msg: ColoredString,
}

impl ProgressMessage {
    /// Create new `ProgressMessage`.
    ///
    /// ## Panics
    /// Panics if the string is longer than 9 characters.
    fn new(string: ColoredString) -> Self {
        if string.chars().count() > 9 {
            panic!("FATAL MSDMOL ERROR | ProgressMessage::new | `ProgressMessage` can not be longer than 9 characters.");
        }

        ProgressMessage { msg: string }
    }

    /// Print formatted `ProgressMessage`. Write failures are ignored, see `ProgressPrinter::print`.
    fn print(&self, out: &mut dyn Write, colored: bool) {
        let _ = if colored {
            write!(out, "[{: ^9}]   ", self.msg)
        } else {
            write!(out, "[{: ^9}]   ", self.msg.as_ref() as &str)
        };
    }
}

/// Structure handling printing of progress of reading a dump file.
/// Constructed using `ProgressPrinter::new()` and associated with the
/// dump reader using `DumpReader::print_progress()`.
pub struct ProgressPrinter {
    /// Stream to write the progress info to.
    output: Box<dyn Write>,
    /// Current status of reading. Default: ProgressStatus::Running.
    status: ProgressStatus,
    /// Frequency of printing. Print every `print_freq`th frame. Default: 100 frames.
    print_freq: usize,
    /// If true, the output will be colored. Default: true.
    colored: bool,
    /// String to be printed with the current frame number. Default: "Frame".cyan().
    frame_msg: ColoredString,
    /// String to be printed with the current timestep. Default: "Step".bright_purple().
    step_msg: ColoredString,
    /// String to be printed when the reading is in progress. Default: "RUNNING".yellow().
    running_msg: ProgressMessage,
    /// String to be printed when the reading is completed. Default: "COMPLETED".green().
    completed_msg: ProgressMessage,
    /// String to be printed when the reading failed. Default: "FAILED!".red().
    failed_msg: ProgressMessage,
    /// String terminating the progress message. Default: `\r` (carriage return).
    terminating: String,
}

impl ProgressPrinter {
    /// Create an instance of `ProgressPrinter` with default parameters.
    ///
    /// The default values of the `ProgressPrinter` parameters.
    /// - `output`: `std::io::stdout()`
    /// - `status`: `ProgressStatus::Running`
    /// - `print_freq`: `100` (progress info is printed every 100 frames)
    /// - `colored`: `true`
    /// - `frame_msg`: `"Frame".cyan()`
    /// - `step_msg`: `"Step".bright_purple()`
    /// - `running_msg`: `"RUNNING".yellow()`
    /// - `completed_msg`: `"COMPLETED".green()`
    /// - `failed_msg`: `"FAILED!".red()`
    /// - `terminating`: `\r` (useful to set to `\n` when printing to a file)
    ///
    /// ## Example
    /// ```no_run
    /// use msdmol::prelude::*;
    ///
    /// let file = std::fs::File::create("progress.log").unwrap();
    /// let printer = ProgressPrinter::new()
    ///     .with_output(Box::from(file))
    ///     .with_print_freq(10)
    ///     .with_colored(false)
    ///     .with_terminating("\n");
    /// ```
    pub fn new() -> Self {
        ProgressPrinter {
            output: Box::from(std::io::stdout()),
            status: ProgressStatus::Running,
            print_freq: 100,
            colored: true,
            frame_msg: "Frame".cyan(),
            step_msg: "Step".bright_purple(),
            running_msg: ProgressMessage::new("RUNNING".yellow()),
            completed_msg: ProgressMessage::new("COMPLETED".green()),
            failed_msg: ProgressMessage::new("FAILED!".red()),
            terminating: String::from("\r"),
        }
    }

    /// Create new `ProgressPrinter` with specific `output` stream.
    pub fn with_output(mut self, stream: Box<dyn Write>) -> Self {
        self.output = stream;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `print_freq`.
    ///
    /// ## Panics
    /// Panics if `print_freq` is zero.
    pub fn with_print_freq(mut self, print_freq: usize) -> Self {
        if print_freq == 0 {
            panic!("FATAL MSDMOL ERROR | ProgressPrinter::with_print_freq | Printing frequency must be positive.");
        }

        self.print_freq = print_freq;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `colored`.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `running_msg`.
    ///
    /// ## Panics
    /// Panics if the `running_msg` is longer than 9 characters.
    pub fn with_running_msg(mut self, running_msg: ColoredString) -> Self {
        self.running_msg = ProgressMessage::new(running_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `completed_msg`.
    ///
    /// ## Panics
    /// Panics if the `completed_msg` is longer than 9 characters.
    pub fn with_completed_msg(mut self, completed_msg: ColoredString) -> Self {
        self.completed_msg = ProgressMessage::new(completed_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `terminating`.
    pub fn with_terminating(mut self, string: &str) -> Self {
        self.terminating = string.to_string();
        self
    }

    /// Set new status to an already constructed `ProgressPrinter`.
    pub fn set_status(&mut self, status: ProgressStatus) {
        self.status = status;
    }

    /// Get the current status.
    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    /// Print progress info about dump file reading.
    /// While running, the info is only printed for every `print_freq`th frame.
    ///
    /// ## Notes
    /// - Failures to write into the output stream are ignored.
    ///   Progress info never interrupts reading of the dump file.
    pub fn print(&mut self, frame_number: usize, timestep: u64) {
        if self.status == ProgressStatus::Running && frame_number % self.print_freq != 0 {
            return;
        }

        match self.status {
            ProgressStatus::Running => self.running_msg.print(&mut self.output, self.colored),
            ProgressStatus::Completed => self.completed_msg.print(&mut self.output, self.colored),
            ProgressStatus::Failed => self.failed_msg.print(&mut self.output, self.colored),
        }

        let _ = if self.colored {
            write!(
                self.output,
                "{} {:12} | {} {:12}{}",
                self.frame_msg, frame_number, self.step_msg, timestep, self.terminating
            )
        } else {
            write!(
                self.output,
                "{} {:12} | {} {:12}{}",
                self.frame_msg.as_ref() as &str,
                frame_number,
                self.step_msg.as_ref() as &str,
                timestep,
                self.terminating
            )
        };

        if self.status != ProgressStatus::Running && self.terminating != "\n" {
            let _ = writeln!(self.output);
        }

        let _ = self.output.flush();
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
