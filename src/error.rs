//! Error types shared by sources, input resolution and the scan pipeline.

use crate::sources::Marketplace;
use thiserror::Error;

/// Errors raised while resolving input or talking to a marketplace.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Transport-level failure (DNS, TLS, timeout, body read).
    #[error("request to {marketplace} failed: {reason}")]
    Fetch { marketplace: Marketplace, reason: String },

    /// The marketplace answered with a non-success status.
    #[error("{marketplace} returned status {status}")]
    Status { marketplace: Marketplace, status: u16 },

    /// Listing containers were found but none could be read.
    #[error("{marketplace} page layout not recognised: {detail}")]
    Layout { marketplace: Marketplace, detail: String },

    /// The scanned payload is not a usable barcode.
    #[error("could not read barcode '{0}'. Rescan in brighter light and try again")]
    Barcode(String),

    /// No keyword was supplied.
    #[error("search keyword is empty")]
    EmptyKeyword,
}

impl ScoutError {
    /// True for errors caused by the page markup rather than the network.
    pub fn is_layout(&self) -> bool {
        matches!(self, ScoutError::Layout { .. })
    }
}
