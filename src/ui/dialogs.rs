/// Native dialogs (file picker and modal message boxes) via rfd
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

use crate::state::form::FormState;

/// A modal message waiting to be shown
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info { title: String, message: String },
    Error { title: String, message: String },
}

impl Notice {
    pub fn info(title: &str, message: &str) -> Self {
        Notice::Info {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Notice::Error {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Block until the user dismisses the dialog
    pub fn show(&self) {
        let (level, title, message) = match self {
            Notice::Info { title, message } => (MessageLevel::Info, title, message),
            Notice::Error { title, message } => (MessageLevel::Error, title, message),
        };

        MessageDialog::new()
            .set_level(level)
            .set_title(title.as_str())
            .set_description(message.as_str())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Ask for an input file, filtered by the form's current direction
pub fn pick_input(form: &FormState) -> Option<PathBuf> {
    let (name, extensions) = form.file_filter();
    FileDialog::new()
        .set_title("Select input file")
        .add_filter(name, &extensions)
        .pick_file()
}
