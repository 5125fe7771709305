//! The crate level error type.
//!
//! Every stage has its own error enum; [`Error`] wraps them and [`Error::kind`] sorts
//! them into the four ways a run can fail.

use crate::artifact::ArtifactError;
use crate::decoding::DecodeError;
use crate::encoding::PackError;
use crate::tree::{ReconstructError, TreeBuildError};

/// What went wrong, independent of the stage that noticed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text to compress can't be encoded, e.g. because it is empty
    InvalidInput,
    /// The serialized tree in an artifact doesn't describe a valid code tree
    MalformedTree,
    /// The bitstream of an artifact is damaged or truncated
    CorruptArtifact,
    /// Reading or writing failed
    IoFailure,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    TreeBuild(#[from] TreeBuildError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TreeBuild(_) | Error::Pack(_) => ErrorKind::InvalidInput,
            Error::Artifact(e) => e.kind(),
            Error::Reconstruct(_) => ErrorKind::MalformedTree,
            Error::Decode(_) => ErrorKind::CorruptArtifact,
            // text that isn't UTF-8 surfaces as InvalidData from read_to_string
            #[cfg(feature = "std")]
            Error::Io(e) if e.kind() == std::io::ErrorKind::InvalidData => ErrorKind::InvalidInput,
            #[cfg(feature = "std")]
            Error::Io(_) => ErrorKind::IoFailure,
        }
    }
}
