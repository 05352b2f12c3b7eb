//! Session-level storage for the matrix calculator: a repository of named matrices and the
//! whitespace-delimited text format used to load and save them.

mod repository;
pub mod text;

pub use repository::{is_valid_name, Repository};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid matrix name {name:?}: it must not start with a digit and may contain only letters and digits")]
    InvalidName { name: String },

    #[error("A matrix named {name} already exists")]
    AlreadyExists { name: String },

    #[error("No matrix named {name}")]
    NotFound { name: String },

    #[error("Line {line}: {token:?} is not a number")]
    Parse { line: usize, token: String },

    #[error("Line {line} has {found} values, expected {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("The input contains no matrix data")]
    Empty,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Matrix(#[from] matrix::Error),
}
