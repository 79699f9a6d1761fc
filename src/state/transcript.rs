/// In-window log transcript
///
/// Append-only, lives as long as the process. Each line is also
/// forwarded to the `log` facade so `RUST_LOG` sees the same story.
use chrono::Local;

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an informational line
    pub fn push(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        log::info!("{}", message);
        self.append(message);
    }

    /// Append an error line, prefixed the way the panel shows failures
    pub fn push_error(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        log::error!("{}", message);
        self.append(&format!("Error: {}", message));
    }

    fn append(&mut self, message: &str) {
        let stamp = Local::now().format("%H:%M:%S");
        self.lines.push(format!("[{}] {}", stamp, message));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whole transcript joined for the scrollable panel
    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }
}
