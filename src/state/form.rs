/// Transient form state for the converter window
///
/// Nothing here outlives the process. The window reads these fields
/// to decide what to draw and which buttons are live.
use std::fmt;
use std::path::PathBuf;

use crate::convert::ConvertError;

/// Window size with the log panel hidden
pub const COMPACT_SIZE: (f32, f32) = (400.0, 250.0);
/// Window size with the log panel shown
pub const EXPANDED_SIZE: (f32, f32) = (400.0, 350.0);

/// Which transformation the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    PdfToDocx,
    DocxToPdf,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::PdfToDocx, Direction::DocxToPdf];

    /// Extension the input file must carry (no dot)
    pub fn input_extension(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "pdf",
            Direction::DocxToPdf => "docx",
        }
    }

    /// Extension of the produced file (no dot)
    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "docx",
            Direction::DocxToPdf => "pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "PDF → DOCX",
            Direction::DocxToPdf => "DOCX → PDF",
        }
    }

    /// Name shown next to the file picker filter
    pub fn filter_name(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "PDF files",
            Direction::DocxToPdf => "Word Documents",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the shell needs to run one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub direction: Direction,
}

/// Current contents of the form
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Input path as shown in the text field
    pub input: String,
    pub direction: Direction,
    /// Log panel visibility
    pub log_visible: bool,
    /// A conversion is in flight
    pub busy: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a path picked from the dialog or typed into the field
    pub fn select_input(&mut self, path: impl Into<String>) {
        self.input = path.into();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Convert is live once a path is present and nothing is running
    pub fn can_convert(&self) -> bool {
        !self.input.trim().is_empty() && !self.busy
    }

    /// Filter handed to the native file picker
    pub fn file_filter(&self) -> (&'static str, [&'static str; 1]) {
        (self.direction.filter_name(), [self.direction.input_extension()])
    }

    pub fn window_size(&self) -> (f32, f32) {
        if self.log_visible {
            EXPANDED_SIZE
        } else {
            COMPACT_SIZE
        }
    }

    pub fn log_button_label(&self) -> &'static str {
        if self.log_visible {
            "Hide Logs"
        } else {
            "Show Logs"
        }
    }

    /// Flip the log panel and return the window size to apply
    pub fn toggle_log(&mut self) -> (f32, f32) {
        self.log_visible = !self.log_visible;
        self.window_size()
    }

    /// Snapshot the form into a request and mark it busy
    pub fn begin_conversion(&mut self) -> Result<ConversionRequest, ConvertError> {
        let input = self.input.trim();
        if input.is_empty() {
            return Err(ConvertError::MissingInput);
        }

        let request = ConversionRequest {
            input: PathBuf::from(input),
            direction: self.direction,
        };
        self.busy = true;
        Ok(request)
    }

    pub fn finish_conversion(&mut self) {
        self.busy = false;
    }
}
