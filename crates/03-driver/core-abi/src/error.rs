use thiserror::Error;

/// Cartridge image could not be turned into a running core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartridgeLoadError {
    /// No bytes were supplied.
    #[error("cartridge image is empty")]
    Empty,
    /// Image is shorter than the smallest valid cartridge.
    #[error("cartridge image too small ({len} bytes, need at least {min})")]
    TooSmall {
        /// Supplied length.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },
    /// The core rejected the image for a core-specific reason.
    #[error("cartridge rejected: {0}")]
    Rejected(String),
}

/// Unrecoverable fault reported by a core while advancing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("core fault{}: {message}", .pc.map(|pc| format!(" at PC={pc:04X}")).unwrap_or_default())]
pub struct CoreFault {
    /// Human readable reason.
    pub message: String,
    /// Program counter at the time of the fault, when known.
    pub pc: Option<u16>,
}

impl CoreFault {
    /// Creates a fault without a program counter.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            pc: None,
        }
    }

    /// Creates a fault tagged with the faulting program counter.
    pub fn at(pc: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            pc: Some(pc),
        }
    }
}
