//! Wallet session.
//!
//! Holds the connected signer for as long as the UI keeps a wallet
//! connected. The session is an ordinary value owned by the caller; the
//! pipeline never reaches for it and instead takes a signer per call.

use alloy_primitives::Address;

use crate::signer::Signer;

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no wallet connected")]
    NotConnected,
}

/// A connect/disconnect scoped holder of the active signer.
pub struct Session<S> {
    signer: Option<S>,
}

impl<S> Default for Session<S> {
    fn default() -> Self {
        Session { signer: None }
    }
}

impl<S: Signer> Session<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects a signer, returning the one it replaces.
    pub fn connect(&mut self, signer: S) -> Option<S> {
        log::info!("wallet connected: {}", signer.address());
        self.signer.replace(signer)
    }

    /// Drops the active connection, returning its signer.
    pub fn disconnect(&mut self) -> Option<S> {
        let previous = self.signer.take();
        if let Some(s) = &previous {
            log::info!("wallet disconnected: {}", s.address());
        }
        previous
    }

    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    pub fn signer(&self) -> Result<&S, SessionError> {
        self.signer.as_ref().ok_or(SessionError::NotConnected)
    }

    pub fn address(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::client::SignMessage;
    use crate::signer::SignError;
    use alloy_primitives::{address, Bytes};

    struct Fixed(Address);

    impl Signer for Fixed {
        fn address(&self) -> Address {
            self.0
        }

        fn sign_typed_data(&self, _message: &SignMessage) -> Result<Bytes, SignError> {
            Ok(Bytes::from(vec![1u8]))
        }
    }

    const A: Address = address!("0x1111111111111111111111111111111111111111");
    const B: Address = address!("0x2222222222222222222222222222222222222222");

    #[test]
    fn starts_disconnected() {
        let session: Session<Fixed> = Session::new();
        assert!(!session.is_connected());
        assert_eq!(session.signer().err(), Some(SessionError::NotConnected));
        assert_eq!(session.address(), None);
    }

    #[test]
    fn connect_replace_disconnect() {
        let mut session = Session::new();
        assert!(session.connect(Fixed(A)).is_none());
        assert_eq!(session.address(), Some(A));

        let replaced = session.connect(Fixed(B)).unwrap();
        assert_eq!(replaced.0, A);
        assert_eq!(session.signer().unwrap().address(), B);

        assert_eq!(session.disconnect().map(|s| s.0), Some(B));
        assert!(!session.is_connected());
        assert!(session.disconnect().is_none());
    }
}
