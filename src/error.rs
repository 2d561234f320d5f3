//! Error types surfaced by the viewer.
//!
//! Every error is caught at the application boundary, logged and shown to
//! the user in a message dialog. None of them terminate the process.

use thiserror::Error;

/// How an error is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Error)]
pub enum ViewerError {
    /// The library file is not a JSON array of strings
    #[error("Malformed library file: {0}")]
    MalformedLibrary(String),

    /// A PDF could not be opened or one of its pages failed to render
    #[error("{0}")]
    DocumentLoad(String),

    /// The image decoder rejected the file
    #[error("Cannot display image: {0}")]
    UnsupportedOrCorruptImage(#[from] image::ImageError),

    /// Rendering at the current zoom would need a bitmap larger than the viewer allocates
    #[error("At this zoom the document needs a {width}x{height} bitmap, which is too large. Zoom out to view it.")]
    BitmapTooLarge { width: u64, height: u64 },

    /// An action that needs a selected document was invoked without one
    #[error("No file selected.")]
    EmptySelection,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ViewerError {
    /// Title of the dialog that reports this error
    pub fn title(&self) -> &'static str {
        match self {
            ViewerError::MalformedLibrary(_) => "Library Loading Error",
            ViewerError::DocumentLoad(_) => "PDF Loading Error",
            ViewerError::UnsupportedOrCorruptImage(_) => "Image Loading Error",
            ViewerError::BitmapTooLarge { .. } => "Zoom Error",
            ViewerError::EmptySelection => "Warning",
            ViewerError::Io(_) => "File Error",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ViewerError::EmptySelection | ViewerError::BitmapTooLarge { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::MalformedLibrary(err.to_string())
    }
}
