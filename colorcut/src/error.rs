//! Error type for end-to-end cuts

use thiserror::Error;

/// Error from a decode, scan, crop or encode step
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid scan options or crop geometry
    #[error(transparent)]
    Core(#[from] colorcut_core::Error),

    /// Source image could not be read, or the crop could not be encoded
    #[error(transparent)]
    Io(#[from] colorcut_io::IoError),
}

/// Result type alias for end-to-end cuts
pub type Result<T> = std::result::Result<T, Error>;
