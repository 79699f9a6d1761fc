/// Errors surfaced by the conversion shell
///
/// Every failure ends up as a single dialog plus a log line, so the
/// variants stay coarse. `title()` picks the dialog caption.
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::state::form::Direction;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Please select an input file.")]
    MissingInput,

    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Expected a .{expected} file, got {}", .path.display())]
    WrongInputType { path: PathBuf, expected: &'static str },

    #[error("Output directory is not writable: {}", .0.display())]
    OutputNotWritable(PathBuf),

    #[error("No converter found for {direction}. Install pdf2docx/docx2pdf or LibreOffice.")]
    ToolMissing { direction: Direction },

    #[error("{tool} exited with {status}\n\n{stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{tool} finished without writing {}\n\n{details}", .output.display())]
    NoOutput {
        tool: String,
        output: PathBuf,
        details: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Caption for the modal error dialog
    pub fn title(&self) -> &'static str {
        match self {
            ConvertError::MissingInput => "Missing Information",
            ConvertError::ToolMissing { .. } => "Missing Dependency",
            _ => "Error",
        }
    }
}
