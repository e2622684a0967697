//! Account signing seam.
//!
//! The connected wallet owns all key material. This crate only hands it a
//! canonical message and gets a signature back; declining is a normal
//! outcome that must stop the pipeline before anything is submitted.

use alloy_primitives::{Address, Bytes};

use crate::market::client::SignMessage;

/// Failure to obtain a signature.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SignError {
    #[error("signature request was declined by the account holder")]
    Rejected,

    #[error("signer returned an empty signature")]
    EmptySignature,

    #[error("signer error: {0}")]
    Failed(String),
}

/// An account capable of EIP-712 typed-data signing.
pub trait Signer {
    /// The account address; used as the order maker.
    fn address(&self) -> Address;

    /// Signs the canonical typed-data message. May block on user
    /// confirmation.
    fn sign_typed_data(&self, message: &SignMessage) -> Result<Bytes, SignError>;
}

impl<S: Signer + ?Sized> Signer for &S {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn sign_typed_data(&self, message: &SignMessage) -> Result<Bytes, SignError> {
        (**self).sign_typed_data(message)
    }
}

/// Signs `message` with `signer`, refusing an empty result.
pub fn sign<S: Signer + ?Sized>(message: &SignMessage, signer: &S) -> Result<Bytes, SignError> {
    let signature = signer.sign_typed_data(message)?;
    if signature.is_empty() {
        return Err(SignError::EmptySignature);
    }
    Ok(signature)
}
