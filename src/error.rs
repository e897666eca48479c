//! Error types for loading postal-code records and writing the summary.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a run.
#[derive(Error, Debug)]
pub enum ZipError {
    #[error("could not open input file {path}: {source}")]
    InputOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not open output file {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed reading input: {0}")]
    Read(#[source] csv::Error),

    #[error("failed writing summary: {0}")]
    Write(#[from] std::io::Error),
}

/// Why a single input row was skipped.
#[derive(Error, Debug, PartialEq)]
pub enum RowParseError {
    #[error("empty zip code field")]
    EmptyKeyField,

    #[error("invalid zip code: {value:?}")]
    InvalidCode { value: String },

    #[error("zip code out of range: {value:?}")]
    CodeOutOfRange { value: String },

    #[error("invalid {field} value: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
}

#[derive(Error, Debug, PartialEq)]
#[error("unrecognized sort field: {0:?}")]
pub struct UnrecognizedSortField(pub String);

pub type Result<T> = std::result::Result<T, ZipError>;
