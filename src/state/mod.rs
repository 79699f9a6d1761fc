/// State management module
///
/// This module handles all application state, including:
/// - Form fields and button/panel toggles (form.rs)
/// - The append-only log transcript (transcript.rs)
/// - Read-only user settings (settings.rs)

pub mod form;
pub mod settings;
pub mod transcript;
