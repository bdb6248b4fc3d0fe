//! Error handling for Jogpad
//!
//! Provides error types for the layers that can actually fail:
//! - Controller errors (machine not in a state that accepts a request)
//! - Connection errors (transmitting command lines)
//!
//! Jog intents themselves never fail; guard failures are silent no-ops.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Controller error type
///
/// Represents a request the machine cannot accept in its current state.
#[derive(Error, Debug, Clone)]
pub enum ControllerError {
    /// Controller is not connected
    #[error("Controller not connected")]
    NotConnected,

    /// The active state does not allow the requested motion
    #[error("Motion not allowed while controller is {state}")]
    MotionNotAllowed {
        /// The controller state that rejected the request.
        state: String,
    },

    /// Unknown controller state
    #[error("Unknown controller state: {state}")]
    UnknownState {
        /// The unknown state identifier.
        state: String,
    },
}

/// Connection error type
///
/// Represents errors raised while handing command lines to the machine.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// The sink has been closed and accepts no more lines
    #[error("Connection closed")]
    Closed,

    /// Connection lost
    #[error("Connection lost: {reason}")]
    ConnectionLost {
        /// The reason the connection was lost.
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {reason}")]
    IoError {
        /// The reason for the I/O error.
        reason: String,
    },
}

/// Main error type for Jogpad
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Controller error
    #[error(transparent)]
    Controller(#[from] ControllerError),

    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Check if this is a controller error
    pub fn is_controller_error(&self) -> bool {
        matches!(self, Error::Controller(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(ControllerError::MotionNotAllowed {
            state: "Alarm".to_string(),
        });
        assert_eq!(err.to_string(), "Motion not allowed while controller is Alarm");
        assert!(err.is_controller_error());

        let err = Error::from(ConnectionError::Closed);
        assert_eq!(err.to_string(), "Connection closed");
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
