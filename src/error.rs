use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Method;

// ---------------------------------------------------------------------------
// PlotError – everything that can abort a pipeline
// ---------------------------------------------------------------------------

/// Errors raised while discovering, parsing, aggregating or rendering.
///
/// Every variant aborts the pipeline it occurs in; there is no partial output.
#[derive(Debug, Error)]
pub enum PlotError {
    /// A discovered file does not carry a usable file-count in its name.
    #[error("{}: {reason}", path.display())]
    NamingConvention { path: PathBuf, reason: String },

    /// A line in a measurement file does not have the expected shape.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Invalid or incomplete configuration (e.g. a method without a title).
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Discovery found no input file for a selected method.
    #[error("no input files for method '{method}' matching {pattern}")]
    NoInputs { method: Method, pattern: String },

    /// The drawing backend failed while producing a chart file.
    #[error("rendering {} failed: {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("viewer failed: {0}")]
    Viewer(String),
}

impl PlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        PlotError::Parse {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
