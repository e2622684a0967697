//! Client configuration.
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! staging marketplace and the deployed collection.

use std::fs;
use std::path::Path;

use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

use crate::market::pipeline::{
    PipelineSettings, DEFAULT_FILL_SLIPPAGE_WEI, DEFAULT_TRANSFER_PROXY,
};
use crate::market::salt::SaltPolicy;
use crate::mint::DEFAULT_MINT_PRICE_WEI;
use crate::num::decimal;

pub const DEFAULT_API_BASE_URL: &str = "https://api-staging.rarible.com/protocol/v0.1/ethereum";
pub const DEFAULT_COLLECTION: Address = address!("0x0FAa54C764F125F9799a0062b7df062C502875F2");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// Collection contract minted tokens live in.
    pub collection: Address,
    /// Operator approved before listing a token.
    pub transfer_proxy: Address,
    #[serde(with = "decimal")]
    pub mint_price_wei: U256,
    #[serde(with = "decimal")]
    pub fill_slippage_wei: U256,
    pub salt: SaltPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION,
            transfer_proxy: DEFAULT_TRANSFER_PROXY,
            mint_price_wei: U256::from(DEFAULT_MINT_PRICE_WEI),
            fill_slippage_wei: U256::from(DEFAULT_FILL_SLIPPAGE_WEI),
            salt: SaltPolicy::default(),
        }
    }
}

impl Config {
    /// Loads the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                let data = fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.display().to_string(),
                    source,
                })?;
                Self::from_json(&data)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            salt: self.salt,
            fill_slippage_wei: self.fill_slippage_wei,
            transfer_proxy: self.transfer_proxy,
        }
    }
}
