use iced::widget::scrollable;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::path::PathBuf;

mod convert;
mod state;
mod ui;

use convert::ConvertError;
use state::form::{ConversionRequest, Direction, FormState, COMPACT_SIZE};
use state::settings::Settings;
use state::transcript::Transcript;
use ui::dialogs::Notice;

/// Result of a background conversion, flattened so it can travel in a Message
#[derive(Debug, Clone)]
enum Outcome {
    Success { output: PathBuf },
    Failure { title: &'static str, message: String },
}

/// Main application state
struct ConverterApp {
    form: FormState,
    /// Lines shown in the log panel
    transcript: Transcript,
    /// Most recent dialog raised
    last_notice: Option<Notice>,
    /// Pop native dialogs; off when driven without a desktop
    interactive: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Browse..."
    Browse,
    /// User typed into the input field
    InputChanged(String),
    /// User picked a radio button
    DirectionSelected(Direction),
    /// User clicked "Convert"
    Convert,
    /// Background conversion returned
    ConversionFinished(Outcome),
    /// User clicked "Show Logs" / "Hide Logs"
    ToggleLog,
    /// Window manager asked us to close
    CloseRequested,
}

impl ConverterApp {
    fn new() -> (Self, Task<Message>) {
        let mut transcript = Transcript::new();

        let toolchain = convert::Toolchain::resolve(&Settings::load());
        for direction in Direction::ALL {
            match toolchain.tool(direction) {
                Some(tool) => transcript.push(format!(
                    "{} converter: {}",
                    direction,
                    tool.program.display()
                )),
                None => transcript.push_error(ConvertError::ToolMissing { direction }.to_string()),
            }
        }

        (
            ConverterApp {
                form: FormState::new(),
                transcript,
                last_notice: None,
                interactive: true,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Browse => {
                if let Some(path) = ui::dialogs::pick_input(&self.form) {
                    let path = path.display().to_string();
                    self.transcript.push(format!("Input file selected: {}", path));
                    self.form.select_input(path);
                    return self.scroll_log_to_end();
                }
                Task::none()
            }
            Message::InputChanged(value) => {
                self.form.select_input(value);
                Task::none()
            }
            Message::DirectionSelected(direction) => {
                self.form.set_direction(direction);
                Task::none()
            }
            Message::Convert => {
                let request = match self.form.begin_conversion() {
                    Ok(request) => request,
                    Err(e) => {
                        self.report_failure(e.title(), &e.to_string());
                        return self.scroll_log_to_end();
                    }
                };

                let report = convert::preflight(&request.input, request.direction);
                self.transcript
                    .push(format!("Output path: {}", report.output.display()));
                self.transcript
                    .push(format!("Input exists: {}", report.input_exists));
                self.transcript
                    .push(format!("Output dir writable: {}", report.output_dir_writable));
                self.transcript.push(format!(
                    "Starting conversion: {} -> {}",
                    request.input.display(),
                    report.output.display()
                ));

                Task::batch([
                    Task::perform(run_conversion(request), Message::ConversionFinished),
                    self.scroll_log_to_end(),
                ])
            }
            Message::ConversionFinished(outcome) => {
                self.form.finish_conversion();
                match outcome {
                    Outcome::Success { output } => {
                        let message = convert::success_message(&output);
                        self.transcript.push(&message);
                        self.notify(Notice::info("Success", &message));
                    }
                    Outcome::Failure { title, message } => {
                        self.report_failure(title, &message);
                    }
                }
                self.scroll_log_to_end()
            }
            Message::ToggleLog => {
                let (width, height) = self.form.toggle_log();
                let resize = window::get_latest()
                    .and_then(move |id| window::resize(id, Size::new(width, height)));
                Task::batch([resize, self.scroll_log_to_end()])
            }
            Message::CloseRequested => {
                self.transcript.push("Application closing...");
                iced::exit()
            }
        }
    }

    fn report_failure(&mut self, title: &str, message: &str) {
        self.transcript.push_error(message);
        self.notify(Notice::error(title, message));
    }

    fn notify(&mut self, notice: Notice) {
        if self.interactive {
            notice.show();
        }
        self.last_notice = Some(notice);
    }

    fn scroll_log_to_end(&self) -> Task<Message> {
        if self.form.log_visible {
            scrollable::snap_to(ui::form::log_scroll_id(), scrollable::RelativeOffset::END)
        } else {
            Task::none()
        }
    }

    fn view(&self) -> Element<Message> {
        ui::form::view(&self.form, &self.transcript)
    }

    fn subscription(&self) -> Subscription<Message> {
        window::close_requests().map(|_| Message::CloseRequested)
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("PDF/DOCX Converter", ConverterApp::update, ConverterApp::view)
        .theme(ConverterApp::theme)
        .subscription(ConverterApp::subscription)
        .window_size(COMPACT_SIZE)
        .exit_on_close_request(false)
        .centered()
        .run_with(ConverterApp::new)
}

/// Run one conversion off the UI thread
///
/// The converter blocks until the external tool exits, so it goes
/// through spawn_blocking like any other heavy call.
async fn run_conversion(request: ConversionRequest) -> Outcome {
    let ConversionRequest { input, direction } = request;

    let result = tokio::task::spawn_blocking(move || match direction {
        Direction::PdfToDocx => convert::pdf_to_docx(&input, None),
        Direction::DocxToPdf => convert::docx_to_pdf(&input, None),
    })
    .await;

    match result {
        Ok(Ok(output)) => Outcome::Success { output },
        Ok(Err(e)) => failure(direction, e),
        Err(e) => Outcome::Failure {
            title: "Error",
            message: format!("Conversion task failed: {}", e),
        },
    }
}

/// Dialog title and text for a failed conversion
fn failure(direction: Direction, error: ConvertError) -> Outcome {
    let message = match error {
        ConvertError::MissingInput | ConvertError::ToolMissing { .. } => error.to_string(),
        _ => format!("{} conversion failed: {}", direction, error),
    };
    Outcome::Failure {
        title: error.title(),
        message,
    }
}
