

use thiserror::Error;

use crate::client::{ClientError, ResourceClass, Variant};


#[derive(Error, Debug)]
pub enum WipeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to list {class}: {source}")]
    ListFailed {
        class: ResourceClass,
        #[source]
        source: ClientError,
    },

    #[error("Failed to delete {variant} {id}: {source}")]
    DeleteFailed {
        variant: Variant,
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("Client setup failed: {0}")]
    Client(#[from] ClientError),
}

impl WipeError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<config::ConfigError> for WipeError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}


pub type Result<T> = std::result::Result<T, WipeError>;
