use std::fmt;

use regrid_layout::GridConfigError;
use regrid_widgets::GridModelError;

/// Top-level error type for regrid.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The grid configuration was rejected.
    Config(GridConfigError),
    /// The items could not form a grid.
    Model(GridModelError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid grid config: {err}"),
            Self::Model(err) => write!(f, "invalid grid items: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Model(err) => Some(err),
        }
    }
}

impl From<GridConfigError> for Error {
    fn from(err: GridConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<GridModelError> for Error {
    fn from(err: GridModelError) -> Self {
        Self::Model(err)
    }
}

/// Standard result type for regrid APIs.
pub type Result<T> = std::result::Result<T, Error>;
