use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing OFF header")]
    MissingHeader,

    #[error("invalid UTF-8")]
    InvalidEncoding,

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid token {token:?}, expected {expected}")]
    InvalidNumber {
        token: String,
        expected: &'static str,
    },

    #[error("vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u64, vertex_count: usize },
}

#[derive(Debug, Error)]
pub enum OffError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {error}")]
    Format {
        line: usize,
        #[source]
        error: FormatError,
    },
}

impl OffError {
    /// The source could not be read, as opposed to being malformed.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Io(_))
    }
}

pub type OffResult<T> = Result<T, OffError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("triangle {triangle} references vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("{normals} normals for {vertex_count} vertices")]
    NormalCount { normals: usize, vertex_count: usize },
}
