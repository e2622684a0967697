//! Mint request validation and submission.
//!
//! A mint carries the position fingerprint and a free-text label. Both must
//! be present: an empty board encodes to zero, which means no position was
//! entered.

use alloy_primitives::U256;

use crate::board::position::Position;
use crate::chain::{ChainClient, ChainError, TxHash};
use crate::protocol::fingerprint::Fingerprint;

/// Default price attached to `buyToken`: 0.05 ETH in wei.
pub const DEFAULT_MINT_PRICE_WEI: u64 = 50_000_000_000_000_000;

/// Errors raised while minting.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MintError {
    #[error("position label must not be empty")]
    EmptyLabel,

    #[error("no position entered: the board is empty")]
    EmptyPosition,

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// A validated mint payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    fingerprint: Fingerprint,
    label: String,
    value: U256,
}

impl MintRequest {
    /// Validates the label first, then the fingerprint. The label is kept
    /// as given; only its emptiness is judged after trimming.
    pub fn new(
        fingerprint: Fingerprint,
        label: impl Into<String>,
        value: U256,
    ) -> Result<Self, MintError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(MintError::EmptyLabel);
        }
        if fingerprint.is_zero() {
            return Err(MintError::EmptyPosition);
        }
        Ok(MintRequest {
            fingerprint,
            label,
            value,
        })
    }

    pub fn from_position(
        position: &Position,
        label: impl Into<String>,
        value: U256,
    ) -> Result<Self, MintError> {
        Self::new(position.fingerprint(), label, value)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> U256 {
        self.value
    }
}

/// Sends the `buyToken` call for a validated request.
pub fn mint<C: ChainClient + ?Sized>(
    chain: &C,
    request: &MintRequest,
) -> Result<TxHash, MintError> {
    log::info!(
        "minting position {} labelled '{}' for {} wei",
        request.fingerprint,
        request.label,
        request.value
    );
    let tx = chain.buy_token(request.fingerprint, &request.label, request.value)?;
    Ok(tx)
}
