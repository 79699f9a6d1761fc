//! Conversion shell.
//!
//! Validates paths, derives the output name and hands the actual work to
//! an external converter. Nothing in here looks inside a PDF or DOCX.

pub mod error;
pub mod tools;

pub use error::ConvertError;
pub use tools::{ConversionTool, Toolchain};

use std::path::{Path, PathBuf};

use crate::state::form::Direction;
use crate::state::settings::Settings;

/// What the UI logs right before a conversion starts
#[derive(Debug, Clone, PartialEq)]
pub struct Preflight {
    pub output: PathBuf,
    pub input_exists: bool,
    pub output_dir_writable: bool,
}

/// `report.pdf` -> `report.docx` for PDF → DOCX, and the reverse
pub fn output_path_for(input: &Path, direction: Direction) -> PathBuf {
    input.with_extension(direction.output_extension())
}

/// Gather the facts logged before running a converter
pub fn preflight(input: &Path, direction: Direction) -> Preflight {
    let output = output_path_for(input, direction);
    let output_dir_writable = is_writable_dir(tools::output_dir(&output));
    Preflight {
        input_exists: input.is_file(),
        output_dir_writable,
        output,
    }
}

/// Convert a PDF into a DOCX using the configured toolchain
pub fn pdf_to_docx(input: &Path, output: Option<&Path>) -> Result<PathBuf, ConvertError> {
    let toolchain = Toolchain::resolve(&Settings::load());
    convert(&toolchain, Direction::PdfToDocx, input, output)
}

/// Convert a DOCX into a PDF using the configured toolchain
pub fn docx_to_pdf(input: &Path, output: Option<&Path>) -> Result<PathBuf, ConvertError> {
    let toolchain = Toolchain::resolve(&Settings::load());
    convert(&toolchain, Direction::DocxToPdf, input, output)
}

/// Validate `input`, derive the output path when none is given and run
/// `tool` for `direction`. Returns the output path.
///
/// An existing output file is overwritten.
pub fn convert(
    tool: &dyn ConversionTool,
    direction: Direction,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf, ConvertError> {
    check_input(input, direction)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => output_path_for(input, direction),
    };

    let dir = tools::output_dir(&output);
    if !is_writable_dir(dir) {
        return Err(ConvertError::OutputNotWritable(dir.to_path_buf()));
    }
    if output.exists() {
        log::debug!("Overwriting existing {}", output.display());
    }

    log::info!(
        "{}: {} -> {} via {}",
        direction,
        input.display(),
        output.display(),
        tool.name(direction)
    );
    let captured = tool.convert(direction, input, &output)?;
    for line in captured.stdout.lines().chain(captured.stderr.lines()) {
        log::debug!("[{}] {}", tool.name(direction), line);
    }

    Ok(output)
}

/// Text shown in the success dialog and the log panel
pub fn success_message(output: &Path) -> String {
    format!("Conversion successful!\nSaved as: {}", output.display())
}

fn check_input(input: &Path, direction: Direction) -> Result<(), ConvertError> {
    if input.as_os_str().is_empty() {
        return Err(ConvertError::MissingInput);
    }
    if !input.is_file() {
        return Err(ConvertError::NotFound(input.to_path_buf()));
    }

    let expected = direction.input_extension();
    let matches = input
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(expected))
        .unwrap_or(false);
    if !matches {
        return Err(ConvertError::WrongInputType {
            path: input.to_path_buf(),
            expected,
        });
    }

    Ok(())
}

/// Whether this process can create files in `dir`.
///
/// Mode bits alone lie in both directions (root ignores them, ACLs and
/// ownership are not in them), so this creates and drops an anonymous
/// temp file instead.
fn is_writable_dir(dir: &Path) -> bool {
    dir.is_dir() && tempfile::tempfile_in(dir).is_ok()
}

#[cfg(test)]
mod tests {
    use super::tools::ToolOutput;
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every call and writes a placeholder output file
    #[derive(Default)]
    struct RecordingTool {
        calls: Mutex<Vec<(Direction, PathBuf, PathBuf)>>,
    }

    impl ConversionTool for RecordingTool {
        fn name(&self, _direction: Direction) -> String {
            "recording".to_string()
        }

        fn convert(
            &self,
            direction: Direction,
            input: &Path,
            output: &Path,
        ) -> Result<ToolOutput, ConvertError> {
            self.calls
                .lock()
                .unwrap()
                .push((direction, input.to_path_buf(), output.to_path_buf()));
            std::fs::write(output, b"converted")?;
            Ok(ToolOutput::default())
        }
    }

    /// Temp dir holding a single input file
    fn with_input(name: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join(name);
        std::fs::write(&input, b"fixture").unwrap();
        (tmp, input)
    }

    #[test]
    fn test_output_path_swaps_extension() {
        assert_eq!(
            output_path_for(Path::new("/docs/report.pdf"), Direction::PdfToDocx),
            PathBuf::from("/docs/report.docx")
        );
        assert_eq!(
            output_path_for(Path::new("letter.final.docx"), Direction::DocxToPdf),
            PathBuf::from("letter.final.pdf")
        );
    }

    #[test]
    fn test_end_to_end_pdf_to_docx() {
        let (tmp, input) = with_input("report.pdf");

        let tool = RecordingTool::default();
        let output = convert(&tool, Direction::PdfToDocx, &input, None).unwrap();

        assert_eq!(output, tmp.path().join("report.docx"));
        let calls = tool.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(Direction::PdfToDocx, input.clone(), tmp.path().join("report.docx"))]
        );
        assert!(success_message(&output).contains("report.docx"));
        assert!(output.exists());
    }

    #[test]
    fn test_missing_input_file_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("ghost.pdf");

        let tool = RecordingTool::default();
        let err = convert(&tool, Direction::PdfToDocx, &input, None).unwrap_err();

        assert!(matches!(err, ConvertError::NotFound(ref p) if *p == input));
        assert!(tool.calls.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_input_is_missing_selection() {
        let tool = RecordingTool::default();
        let err = convert(&tool, Direction::DocxToPdf, Path::new(""), None).unwrap_err();
        assert!(matches!(err, ConvertError::MissingInput));
    }

    #[test]
    fn test_wrong_extension_is_rejected() {
        let (_tmp, input) = with_input("report.pdf");

        let tool = RecordingTool::default();
        let err = convert(&tool, Direction::DocxToPdf, &input, None).unwrap_err();
        assert!(matches!(err, ConvertError::WrongInputType { expected: "docx", .. }));
        assert!(tool.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_extension_check_ignores_case() {
        let (tmp, input) = with_input("SCAN.PDF");

        let tool = RecordingTool::default();
        let output = convert(&tool, Direction::PdfToDocx, &input, None).unwrap();
        assert_eq!(output, tmp.path().join("SCAN.docx"));
    }

    #[test]
    fn test_explicit_output_and_overwrite() {
        let (tmp, input) = with_input("letter.docx");
        let output = tmp.path().join("out.pdf");
        std::fs::write(&output, b"old").unwrap();

        let tool = RecordingTool::default();
        let done = convert(&tool, Direction::DocxToPdf, &input, Some(&output)).unwrap();

        assert_eq!(done, output);
        assert_eq!(std::fs::read(&output).unwrap(), b"converted");
    }

    #[test]
    fn test_missing_output_dir_is_not_writable() {
        let (tmp, input) = with_input("report.pdf");
        let output = tmp.path().join("nested").join("report.docx");

        let tool = RecordingTool::default();
        let err = convert(&tool, Direction::PdfToDocx, &input, Some(&output)).unwrap_err();
        assert!(matches!(err, ConvertError::OutputNotWritable(_)));
    }

    #[test]
    fn test_writable_dir_passes_preflight() {
        let (tmp, input) = with_input("report.pdf");

        let report = preflight(&input, Direction::PdfToDocx);
        assert!(report.input_exists);
        assert!(report.output_dir_writable);
        // The check leaves nothing behind
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    /// A 0555 directory: whether it is writable depends on who runs the
    /// test (root ignores mode bits). The shell must agree with a real write.
    #[cfg(unix)]
    #[test]
    fn test_read_only_mode_matches_real_access() {
        use std::os::unix::fs::PermissionsExt;

        let (tmp, input) = with_input("report.pdf");
        let dir = tmp.path().to_path_buf();
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();

        let canary = dir.join("canary");
        let really_writable = std::fs::write(&canary, b"x").is_ok();
        if really_writable {
            std::fs::remove_file(&canary).unwrap();
        }

        let tool = RecordingTool::default();
        let result = convert(&tool, Direction::PdfToDocx, &input, None);
        let preflight_writable = preflight(&input, Direction::PdfToDocx).output_dir_writable;

        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(preflight_writable, really_writable);
        if really_writable {
            assert_eq!(result.unwrap(), dir.join("report.docx"));
        } else {
            assert!(matches!(result, Err(ConvertError::OutputNotWritable(ref p)) if *p == dir));
            assert!(tool.calls.lock().unwrap().is_empty());
        }
    }

    #[test]
    fn test_preflight_reports_missing_input() {
        let report = preflight(Path::new("/no/such/dir/report.pdf"), Direction::PdfToDocx);
        assert_eq!(report.output, PathBuf::from("/no/such/dir/report.docx"));
        assert!(!report.input_exists);
        assert!(!report.output_dir_writable);
    }
}
