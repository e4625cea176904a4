use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DigitError>;

/// Every way the normalize → classify pipeline (and its parameter loading)
/// can fail.
#[derive(Debug, Error)]
pub enum DigitError {
    /// The mask is entirely zero, or trimming removed every row/column.
    /// Means "no digit drawn"; the caller should discard the attempt.
    #[error("empty input: nothing was drawn")]
    InputEmpty,

    /// The padded image did not come out 28×28. Indicates a normalization bug.
    #[error("padding invariant violated: padded image is {rows}x{cols}, expected 28x28")]
    PaddingInvariant { rows: usize, cols: usize },

    /// A parameter file is malformed or the six tensors do not fit together.
    #[error("malformed parameter data in {source_name}{}: {reason}", line_suffix(.line))]
    ParameterFormat {
        source_name: String,
        /// 1-based line number, when the failure is tied to one line.
        line: Option<usize>,
        reason: String,
    },

    /// A vector or matrix did not have the shape an operation requires.
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" (line {})", n),
        None => String::new(),
    }
}

impl DigitError {
    pub(crate) fn format(source_name: &str, line: Option<usize>, reason: impl Into<String>) -> Self {
        DigitError::ParameterFormat {
            source_name: source_name.to_owned(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DigitError::Io { path: path.into(), source }
    }

    /// Only an empty drawing is a per-call condition the caller can shrug off.
    /// Everything else points at bad configuration or a bug.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DigitError::InputEmpty)
    }
}
