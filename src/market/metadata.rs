//! Token metadata carried in `tokenURI`.
//!
//! The collection returns each token's manifest inline as a
//! `data:application/json;base64,<payload>` URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("token URI is not a base64 data URI")]
    NotDataUri,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid manifest JSON: {0}")]
    Json(String),
}

/// Display fields of a token manifest. Other manifest members are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
}

/// Decodes the manifest embedded in a `data:` token URI.
pub fn parse_token_uri(uri: &str) -> Result<TokenMetadata, MetadataError> {
    let (header, payload) = uri.trim().split_once(',').ok_or(MetadataError::NotDataUri)?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(MetadataError::NotDataUri);
    }
    let bytes = STANDARD.decode(payload)?;
    serde_json::from_slice(&bytes).map_err(|e| MetadataError::Json(e.to_string()))
}
