//! Error types for Ruta

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RutaError {
    #[error("can't modify frozen array")]
    Frozen,

    #[error("can't modify array during sort")]
    ModifyDuringSort,

    #[error("Insecure: can't modify array")]
    Security,

    #[error("{0}")]
    Index(String),

    #[error("{0}")]
    Argument(String),

    #[error("comparison failed: {0}")]
    Comparison(String),
}

pub type Result<T> = std::result::Result<T, RutaError>;
