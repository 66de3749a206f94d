//! Error types shared by every graph operation.
//!
//! All failures are reported as values: mutations either apply completely or
//! return one of these variants without touching the graph.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Which kind of element an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Arc,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Arc => write!(f, "arc"),
        }
    }
}

/// The role a node plays at one end of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FractalError {
    #[error("{kind} label '{label}' is already used in '{container}'")]
    DuplicateLabel {
        kind: ElementKind,
        label: String,
        container: String,
    },

    #[error("{kind} '{label}' not found in '{container}'")]
    NotFound {
        kind: ElementKind,
        label: String,
        container: String,
    },

    #[error("arc '{arc}': {endpoint} '{label}' is not a child of '{container}'")]
    DanglingReference {
        arc: String,
        endpoint: Endpoint,
        label: String,
        container: String,
    },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FractalError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Error for a handle the arena does not (or no longer) know about.
    pub(crate) fn unknown(kind: ElementKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            label: id.to_string(),
            container: "graph".into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FractalError>;
