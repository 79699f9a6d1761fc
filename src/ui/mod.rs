/// User interface module
///
/// - `form.rs` - layout of the converter window
/// - `dialogs.rs` - native file picker and message boxes

pub mod dialogs;
pub mod form;
