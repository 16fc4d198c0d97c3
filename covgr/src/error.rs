use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CovgrError {
    /// The profile and the source analysis disagree about a file's
    /// contents. A partial report would misstate the total, so the whole
    /// run is aborted.
    #[error("{file}: function {function} has no coverage blocks")]
    FunctionWithoutBlocks { function: String, file: String },

    /// The failure was already surfaced on the subprocess's own streams
    /// (or the user interrupted the run). Exit 1 without a second message.
    #[error("already reported")]
    Silent,

    #[error("{path}:{line}: malformed coverage profile: {message}")]
    ProfileParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    ReportWrite(#[source] std::io::Error),

    #[error("no source file for {file}")]
    MissingFile { file: String },

    #[error("go list failed: {message}")]
    GoListFailed { message: String },

    #[error("invalid path")]
    InvalidPackages,

    #[error("go toolchain not found on PATH")]
    GoMissing,

    #[error("failed to install interrupt handler: {message}")]
    InterruptHandler { message: String },
}
