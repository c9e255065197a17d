use core::fmt;

use polars::prelude::PolarsError;

use crate::matrix::MAX_RESIDUES;

/// Error type for contact map construction, rendering and export.
#[derive(Debug)]
pub enum ContactMapError {
    /// The structure has more residues than a map can hold
    TooManyResidues(usize),
    /// The coordinate source returned no residues
    EmptyStructure,
    /// The coordinate source failed
    Fetch(String),
    /// An operation needs a built map but the engine has none
    NotReady,
    /// A structure file could not be read
    Structure(String),
    /// A settings file could not be parsed or written
    Settings(String),
    /// Failed to read or write a file
    Io(std::io::Error),
    /// Failed to encode a raster
    Image(image::ImageError),
    /// Failed to build or write a table
    DataFrame(PolarsError),
}

impl fmt::Display for ContactMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactMapError::TooManyResidues(n) => write!(
                f,
                "Structure has {n} residues; contact maps are limited to {MAX_RESIDUES}"
            ),
            ContactMapError::EmptyStructure => write!(f, "No residue coordinates available"),
            ContactMapError::Fetch(msg) => write!(f, "Failed to fetch coordinates: {msg}"),
            ContactMapError::NotReady => write!(f, "No contact map has been computed"),
            ContactMapError::Structure(msg) => write!(f, "Failed to read structure: {msg}"),
            ContactMapError::Settings(msg) => write!(f, "Invalid settings: {msg}"),
            ContactMapError::Io(e) => write!(f, "I/O error: {e}"),
            ContactMapError::Image(e) => write!(f, "Failed to encode image: {e}"),
            ContactMapError::DataFrame(e) => write!(f, "Failed to build table: {e}"),
        }
    }
}

impl std::error::Error for ContactMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContactMapError::Io(e) => Some(e),
            ContactMapError::Image(e) => Some(e),
            ContactMapError::DataFrame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ContactMapError {
    fn from(err: std::io::Error) -> Self {
        ContactMapError::Io(err)
    }
}

impl From<image::ImageError> for ContactMapError {
    fn from(err: image::ImageError) -> Self {
        ContactMapError::Image(err)
    }
}

impl From<PolarsError> for ContactMapError {
    fn from(err: PolarsError) -> Self {
        ContactMapError::DataFrame(err)
    }
}
