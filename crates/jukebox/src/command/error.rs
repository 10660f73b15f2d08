use thiserror::Error;

use crate::ports::{CatalogError, DeviceError};

/// Why a command produced no normal reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    /// A broken invariant inside the bot itself
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    /// Short label for log fields
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "catalog",
            Self::Device(_) => "device",
            Self::Internal(_) => "internal",
        }
    }
}
