use thiserror::Error;

/// Error type for failures outside of field validation.
///
/// Invalid user input is never reported through this type; it is collected in
/// [`crate::form::FieldErrors`] and shown next to the offending control.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unknown form field: `{0}`")]
    UnknownField(String),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Failed to build expense from validated values: {0}")]
    Commit(String),
    #[error("Input closed before the form was completed")]
    InputClosed,
    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),
}
