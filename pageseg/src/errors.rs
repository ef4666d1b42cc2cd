//! Error types for this crate.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Our standard result type.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Errors which can be returned by this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// We could not create the output directory.
    #[error("could not create output directory {path:?}")]
    #[non_exhaustive]
    CreateDir {
        /// The directory we tried to create.
        path: PathBuf,

        /// The underlying error.
        source: io::Error,
    },

    /// We could not write a line crop.
    #[error("could not write line image {path:?}")]
    #[non_exhaustive]
    WriteImage {
        /// The path we tried to write.
        path: PathBuf,

        /// The underlying error.
        source: image::ImageError,
    },

    /// We could not write a label file.
    #[error("could not write label file {path:?}")]
    #[non_exhaustive]
    WriteLabel {
        /// The path we tried to write.
        path: PathBuf,

        /// The underlying error.
        source: io::Error,
    },

    /// We could not scan a dataset directory.
    #[error("could not read dataset directory {path:?}")]
    #[non_exhaustive]
    ReadDir {
        /// The directory we tried to scan.
        path: PathBuf,

        /// The underlying error.
        source: io::Error,
    },
}
