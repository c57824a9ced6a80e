use thiserror::Error;

use crate::contract::AxisKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error("invalid type for combination at '{key}' (path {path:?}) in {structure}: expected object or array, found {found}")]
    TypeConflict {
        key: String,
        path: Vec<String>,
        found: &'static str,
        structure: String,
    },

    #[error("scan axis at {path:?} must be a non-empty list")]
    EmptyAxisValues { path: Vec<String> },

    #[error("scan axis path must have at least one segment")]
    EmptyAxisPath,

    #[error("config path {path:?} of step '{step}' is missing segment '{segment}'")]
    MissingConfigPath {
        step: String,
        path: Vec<String>,
        segment: String,
    },

    #[error("{kind} path {path:?} crosses non-object value at segment '{segment}'")]
    PathConflict {
        kind: AxisKind,
        path: Vec<String>,
        segment: String,
    },

    #[error("expansion requires at least one scan axis")]
    EmptyAxisList,

    #[error("key '{0}' is already registered")]
    DuplicateKey(String),

    #[error("scan of step '{step}' produces {combinations} combinations, exceeding max_combinations={limit}")]
    TooManyCombinations {
        step: String,
        combinations: usize,
        limit: usize,
    },
}

pub type ScanResult<T> = Result<T, ScanError>;
