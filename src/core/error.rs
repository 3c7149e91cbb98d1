// Centralized error handling for the customer console

use thiserror::Error;

/// Errors that can terminate a resource operation.
///
/// The `Display` text is what the operator sees in the flash line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Customer id is required")]
    MissingId,

    #[error("Invalid customer id: '{0}'")]
    InvalidId(String),

    #[error("{0} is already in progress")]
    Busy(&'static str),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

/// Errors from parsing a console command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("Missing field name, usage: {0} <field> [value]")]
    MissingField(&'static str),

    #[error("{0}")]
    UnknownField(String),
}

impl ClientError {
    /// Precondition errors are raised before anything goes on the wire.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ClientError::MissingId
                | ClientError::InvalidId(_)
                | ClientError::Busy(_)
                | ClientError::Encode(_)
        )
    }

    /// HTTP status of a server-side failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
