//! Chain client seam.
//!
//! Contract calls the core needs (mint, approve, cancel, raw transaction)
//! and the collection reads behind a refresh. Broadcasting,
//! gas, and confirmation tracking are the implementation's concern.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde_json::Value;

use crate::protocol::fingerprint::Fingerprint;

pub type TxHash = B256;

/// A chain call that did not go through.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("transaction reverted: {0}")]
    Reverted(String),

    #[error("chain client error: {0}")]
    Client(String),
}

/// A raw transaction to send from the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// Write access to the token and exchange contracts.
pub trait ChainClient {
    /// `buyToken(fingerprint, label)` on the collection contract, with
    /// `value` wei attached.
    fn buy_token(
        &self,
        fingerprint: Fingerprint,
        label: &str,
        value: U256,
    ) -> Result<TxHash, ChainError>;

    /// `approve(operator, tokenId)` on the collection contract.
    fn approve(&self, operator: Address, token_id: U256) -> Result<TxHash, ChainError>;

    /// `cancel(order)` on the exchange contract, with the canonical order
    /// structure returned by the encoder endpoint.
    fn cancel(&self, order: &Value) -> Result<TxHash, ChainError>;

    fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ChainError>;
}

/// Read access to token ownership and metadata.
pub trait CollectionReader {
    /// Token ids currently held by `owner`, in enumeration order.
    fn tokens_of_owner(&self, owner: Address) -> Result<Vec<U256>, ChainError>;

    /// `tokenURI(tokenId)` on the collection contract.
    fn token_uri(&self, token_id: U256) -> Result<String, ChainError>;
}
