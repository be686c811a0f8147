use std::path::PathBuf;

use flatobj_shapes::{ShapeError, ShapeKind};

use crate::Mode;

/// Errors produced while reading, writing, or translating OBJ scenes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File mode should be one of 'read', 'read-write', 'write' or 'write-truncate', not {0:?}")]
    InvalidMode(String),
    #[error("Attempted to {operation} a file opened in '{mode}' mode")]
    ModeViolation { operation: &'static str, mode: Mode },
    #[error("Material not found: {name:?}")]
    UnknownMaterial { name: String },
    #[error("Malformed directive at line {line}: {directive:?}")]
    MalformedDirective { line: usize, directive: String },
    #[error("Invalid number at line {line}: {token:?}")]
    InvalidNumber { line: usize, token: String },
    #[error("Object {object:?} can't be a {kind} with {count} vertex index(es)")]
    InvalidArity {
        object: String,
        kind: ShapeKind,
        count: usize,
    },
    #[error("Object {object:?} references vertex {index}, outside of 1 -> {len}")]
    IndexOutOfRange {
        object: String,
        index: usize,
        len: usize,
    },
    #[error("Attribute key {0:?} can't be written as a directive")]
    InvalidAttribute(String),
    #[error("Object name {0:?} can't be written as a single token")]
    InvalidName(String),
    #[error("Couldn't read material library {path:?}: {source}")]
    MaterialLibrary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
