//! Error types for forms, grids and views

use soform_core::BindError;
use thiserror::Error;

/// Structural errors: misuse of the API that cannot be recovered from by
/// the user of the form
#[derive(Debug, Error)]
pub enum GuiError {
    /// A view was executed without a caption
    #[error("Caption not set!")]
    CaptionNotSet,

    /// A view was executed without a component to show
    #[error("Component not set in View: {0}")]
    ComponentNotSet(String),

    /// An operation named a field that is not part of the form
    #[error("Field '{0}' does not exist")]
    FieldNotFound(String),

    /// The UI side of an access hand-off has gone away
    #[error("UI access queue is closed")]
    AccessClosed,

    /// Resolution or instance creation failed
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Result type alias for GUI operations
pub type GuiResult<T> = Result<T, GuiError>;
