//! Chessmint library.
//!
//! Encodes chess positions into 256-bit fingerprints for minting, and
//! drives the marketplace order pipeline (build, canonicalize, sign,
//! submit, fill, cancel) over injected transport, signer and chain seams.

pub mod board;
pub mod chain;
pub mod cli;
pub mod config;
pub mod market;
pub mod mint;
pub mod num;
pub mod protocol;
pub mod session;
pub mod signer;
