//! External conversion entry points.
//!
//! Each direction is handed to a command-line converter: `pdf2docx`,
//! `docx2pdf`, or LibreOffice running headless. The child's stdout and
//! stderr are always piped, so a converter that draws progress bars on a
//! console never touches this process's streams.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::error::ConvertError;
use crate::state::form::Direction;
use crate::state::settings::Settings;

/// Captured streams of a finished converter run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Something that can turn `input` into `output` for a direction.
pub trait ConversionTool: Send + Sync {
    /// Human-readable name for log lines
    fn name(&self, direction: Direction) -> String;

    fn convert(
        &self,
        direction: Direction,
        input: &Path,
        output: &Path,
    ) -> Result<ToolOutput, ConvertError>;
}

/// The converter programs this app knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// `pdf2docx convert <in> <out>`
    Pdf2Docx,
    /// `docx2pdf <in> <out>`
    Docx2Pdf,
    /// `soffice --headless --convert-to <ext> --outdir <dir> <in>`
    Office,
}

impl ToolKind {
    /// Executable names searched on PATH, in order
    fn executables(self) -> &'static [&'static str] {
        match self {
            ToolKind::Pdf2Docx => &["pdf2docx"],
            ToolKind::Docx2Pdf => &["docx2pdf"],
            ToolKind::Office => &["soffice", "libreoffice"],
        }
    }

    fn configured(self, settings: &Settings) -> Option<&PathBuf> {
        match self {
            ToolKind::Pdf2Docx => settings.pdf2docx_path.as_ref(),
            ToolKind::Docx2Pdf => settings.docx2pdf_path.as_ref(),
            ToolKind::Office => settings.soffice_path.as_ref(),
        }
    }

    /// Dedicated converter for a direction
    fn dedicated(direction: Direction) -> Self {
        match direction {
            Direction::PdfToDocx => ToolKind::Pdf2Docx,
            Direction::DocxToPdf => ToolKind::Docx2Pdf,
        }
    }
}

/// A resolved converter executable.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalTool {
    pub kind: ToolKind,
    pub program: PathBuf,
}

impl ExternalTool {
    pub fn new(kind: ToolKind, program: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            program: program.into(),
        }
    }

    /// Build the command line without running it.
    pub fn command(&self, direction: Direction, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        match self.kind {
            ToolKind::Pdf2Docx => {
                cmd.arg("convert").arg(input).arg(output);
            }
            ToolKind::Docx2Pdf => {
                cmd.arg(input).arg(output);
            }
            ToolKind::Office => {
                cmd.arg("--headless");
                if direction == Direction::PdfToDocx {
                    cmd.arg("--infilter=writer_pdf_import");
                }
                cmd.arg("--convert-to")
                    .arg(direction.output_extension())
                    .arg("--outdir")
                    .arg(output_dir(output))
                    .arg(input);
            }
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW: no console flashing up behind the GUI
            cmd.creation_flags(0x0800_0000);
        }

        cmd
    }

    /// Where LibreOffice drops its result: `<outdir>/<input stem>.<ext>`
    fn office_product(direction: Direction, input: &Path, output: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        output_dir(output).join(format!("{}.{}", stem, direction.output_extension()))
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Run the command line and fail on a non-zero exit
    fn run(
        &self,
        direction: Direction,
        input: &Path,
        output: &Path,
    ) -> Result<ToolOutput, ConvertError> {
        let mut cmd = self.command(direction, input, output);
        log::debug!("Running {:?}", cmd);

        let result = cmd.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConvertError::ToolMissing { direction },
            _ => ConvertError::Io(e),
        })?;

        let captured = ToolOutput {
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        };

        if !result.status.success() {
            return Err(ConvertError::ToolFailed {
                tool: self.program_name(),
                status: result.status,
                stderr: captured.diagnostics(),
            });
        }

        Ok(captured)
    }

    /// LibreOffice picks the output name itself and exits 0 even when it
    /// cannot load the source. It writes into a private directory next to
    /// the target, and only a file that actually appeared is moved into place.
    fn run_staged(
        &self,
        direction: Direction,
        input: &Path,
        output: &Path,
    ) -> Result<ToolOutput, ConvertError> {
        let staging = tempfile::Builder::new()
            .prefix(".pdf-docx-")
            .tempdir_in(output_dir(output))?;
        let staged = staging
            .path()
            .join(output.file_name().unwrap_or_default());

        let captured = self.run(direction, input, &staged)?;

        let produced = Self::office_product(direction, input, &staged);
        if !produced.is_file() {
            return Err(ConvertError::NoOutput {
                tool: self.program_name(),
                output: output.to_path_buf(),
                details: captured.diagnostics(),
            });
        }
        std::fs::rename(&produced, output)?;

        Ok(captured)
    }
}

impl ToolOutput {
    /// stderr when the tool wrote any, stdout otherwise
    pub fn diagnostics(&self) -> String {
        if self.stderr.trim().is_empty() {
            self.stdout.clone()
        } else {
            self.stderr.clone()
        }
    }
}

impl ConversionTool for ExternalTool {
    fn name(&self, _direction: Direction) -> String {
        self.program_name()
    }

    fn convert(
        &self,
        direction: Direction,
        input: &Path,
        output: &Path,
    ) -> Result<ToolOutput, ConvertError> {
        match self.kind {
            ToolKind::Office => self.run_staged(direction, input, output),
            ToolKind::Pdf2Docx | ToolKind::Docx2Pdf => self.run(direction, input, output),
        }
    }
}

/// One resolved converter per direction.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    pub pdf_to_docx: Option<ExternalTool>,
    pub docx_to_pdf: Option<ExternalTool>,
}

impl Toolchain {
    /// Resolve converters from settings and the system PATH
    pub fn resolve(settings: &Settings) -> Self {
        Self::resolve_with(settings, |name| which::which(name).ok())
    }

    /// Resolve converters with a custom executable lookup
    pub fn resolve_with(settings: &Settings, lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        let toolchain = Self {
            pdf_to_docx: Self::pick(Direction::PdfToDocx, settings, &lookup),
            docx_to_pdf: Self::pick(Direction::DocxToPdf, settings, &lookup),
        };

        for direction in Direction::ALL {
            match toolchain.tool(direction) {
                Some(tool) => log::info!("{} via {}", direction, tool.program.display()),
                None => log::warn!("No converter available for {}", direction),
            }
        }

        toolchain
    }

    fn pick(
        direction: Direction,
        settings: &Settings,
        lookup: &impl Fn(&str) -> Option<PathBuf>,
    ) -> Option<ExternalTool> {
        let mut order = [ToolKind::dedicated(direction), ToolKind::Office];
        if settings.prefer_office {
            order.reverse();
        }

        order.into_iter().find_map(|kind| {
            let program = match kind.configured(settings) {
                Some(path) => Some(path.clone()),
                None => kind.executables().iter().find_map(|&name| lookup(name)),
            };
            program.map(|program| ExternalTool::new(kind, program))
        })
    }

    pub fn tool(&self, direction: Direction) -> Option<&ExternalTool> {
        match direction {
            Direction::PdfToDocx => self.pdf_to_docx.as_ref(),
            Direction::DocxToPdf => self.docx_to_pdf.as_ref(),
        }
    }
}

impl ConversionTool for Toolchain {
    fn name(&self, direction: Direction) -> String {
        self.tool(direction)
            .map(|tool| tool.name(direction))
            .unwrap_or_else(|| "<none>".to_string())
    }

    fn convert(
        &self,
        direction: Direction,
        input: &Path,
        output: &Path,
    ) -> Result<ToolOutput, ConvertError> {
        let tool = self
            .tool(direction)
            .ok_or(ConvertError::ToolMissing { direction })?;
        tool.convert(direction, input, output)
    }
}

/// Directory the output lands in; a bare file name means the cwd
pub fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
