//! Client layer for the Cisco AXL administrative API.
//!
//! Split the way the protocol splits: [`transport`] builds the SOAP
//! envelope and does the HTTP exchange, [`xml`] normalizes the server's
//! structurally inconsistent responses, and one module per resource
//! (user, profile, destination, line, phone) builds request bodies and
//! extracts entities.
//!
//! Protocol faults ride inside HTTP-successful exchanges (and on bare
//! 500s), so every operation checks [`xml::fault_of`] before reading a
//! response as a success. Routine absence is `Ok(None)` or an empty
//! vec, never an error.

mod destination;
mod line;
mod phone;
mod profile;
mod transport;
mod user;
pub mod xml;

pub use transport::{AxlClient, AxlConfig};

use thiserror::Error;

/// AXL client errors.
///
/// `Configuration` is the one fatal condition: it is raised at client
/// construction and nothing else can be attempted after it. The others
/// are per-operation and leave the client usable.
#[derive(Debug, Error)]
pub enum AxlError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("server fault {code}: {message}")]
    Fault {
        code: String,
        message: String,
        /// Vendor detail message nested inside the fault's detail element.
        detail: Option<String>,
    },
}

/// Whether a fault message reports routine absence of the requested item.
/// Get operations map these to `Ok(None)`.
pub(crate) fn fault_is_not_found(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("was not found") || message.contains("item not valid")
}
