//! Position notation handling.
//!
//! This module implements FEN placement parsing and formatting, and the
//! fingerprint integer encoding used as the mint parameter.

pub mod fen;
pub mod fingerprint;

pub use fen::{encode_fen, parse_fen, FenError, EMPTY_BOARD};
pub use fingerprint::{
    decode_fingerprint, encode_piece_codes, encode_position, Fingerprint, FingerprintError,
};
