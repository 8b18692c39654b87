/// Error types for mesh loading, saving and derivation
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while reading, writing or deriving mesh data.
#[derive(Debug, Error)]
pub enum MeshError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending record.
        line: usize,
        /// What was wrong with the record.
        message: String,
    },

    /// A face vertex bundle has no position component.
    #[error("line {line}: face vertex is missing its position index")]
    MissingPositionIndex {
        /// 1-based line number of the face record.
        line: usize,
    },

    /// A relative index points before the first element of its attribute.
    #[error("line {line}: {attribute} index {index} reaches before the first element")]
    IndexBeforeStart {
        /// 1-based line number of the face record.
        line: usize,
        /// Attribute the index refers to.
        attribute: &'static str,
        /// The raw index as written in the file.
        index: i64,
    },

    /// Some vertices of a face carry an attribute and others do not.
    #[error("line {line}: face mixes vertices with and without {attribute}")]
    InconsistentFace {
        /// 1-based line number of the face record.
        line: usize,
        /// Attribute with inconsistent presence.
        attribute: &'static str,
    },

    /// A face's attribute presence differs from the faces before it.
    #[error("line {line}: {attribute} must be given for every face or for none")]
    PartialCoverage {
        /// 1-based line number of the face record.
        line: usize,
        /// Attribute with partial coverage.
        attribute: &'static str,
    },

    /// An attribute's face list does not match the position face list.
    #[error("{attribute} has {faces} faces, expected 0 or {expected}")]
    FaceCountMismatch {
        /// Attribute whose face list is mismatched.
        attribute: &'static str,
        /// Number of faces the attribute has.
        faces: usize,
        /// Number of position faces.
        expected: usize,
    },

    /// A face refers to an element past the end of its attribute.
    #[error("face {face} refers to {attribute} {index}, but only {len} exist")]
    IndexOutOfBounds {
        /// Attribute being indexed.
        attribute: &'static str,
        /// Face number.
        face: usize,
        /// The offending index.
        index: usize,
        /// Number of elements in the attribute.
        len: usize,
    },

    /// Tangent frames need texture coordinates.
    #[error("cannot compute tangent frames without texture coordinates")]
    MissingTexcoords,

    /// A face's texture coordinates span no area.
    #[error("face {face} has degenerate texture coordinates")]
    DegenerateTexcoords {
        /// Face number.
        face: usize,
    },

    /// The linear part of a transform cannot be inverted.
    #[error("transform is singular, normals cannot be transformed")]
    SingularTransform,
}

impl MeshError {
    /// Create a `Parse` error for the given line.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
