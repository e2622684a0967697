//! Command-line interface definition.

use std::path::PathBuf;

use alloy_primitives::{Address, B256, U256};
use clap::{Parser, Subcommand};

use crate::num::parse_u256;

#[derive(Parser)]
#[command(
    name = "chessmint",
    version,
    about = "Chess-position NFT fingerprints and marketplace orders"
)]
pub struct Cli {
    /// JSON config file. Falls back to CHESSMINT_CONFIG, then built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the fingerprint of a FEN position.
    Encode {
        fen: String,
        /// Print hex instead of decimal.
        #[arg(long)]
        hex: bool,
    },

    /// Print the FEN placement a fingerprint encodes.
    Decode { fingerprint: String },

    /// Validate a mint and print its buyToken arguments.
    MintRequest {
        fen: String,
        #[arg(long)]
        label: String,
    },

    /// Build a sell order locally and print it as JSON.
    SellOrder {
        #[arg(long)]
        maker: Address,
        /// NFT contract; defaults to the configured collection.
        #[arg(long)]
        contract: Option<Address>,
        #[arg(long, value_parser = parse_amount)]
        token_id: U256,
        /// Price in wei.
        #[arg(long, value_parser = parse_amount)]
        price: U256,
        /// Fixed salt; drawn under the configured policy when omitted.
        #[arg(long, value_parser = parse_amount)]
        salt: Option<U256>,
    },

    /// Build the matching buy order for a sell order read from a JSON file.
    MatchOrder {
        #[arg(long)]
        maker: Address,
        #[arg(long)]
        sell: PathBuf,
        #[arg(long, value_parser = parse_amount)]
        salt: Option<U256>,
    },

    /// List open sell orders for a collection (requires the `http` feature).
    Orders {
        #[arg(long)]
        collection: Option<Address>,
    },

    /// Quote the transaction filling an order (requires the `http` feature).
    QuoteFill {
        #[arg(long)]
        hash: B256,
        #[arg(long)]
        filler: Address,
    },
}

/// Parses a decimal or `0x` hex integer argument.
pub fn parse_amount(s: &str) -> Result<U256, String> {
    parse_u256(s).ok_or_else(|| format!("invalid integer '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sell_order_arguments() {
        let cli = Cli::try_parse_from([
            "chessmint",
            "sell-order",
            "--maker",
            "0x1111111111111111111111111111111111111111",
            "--token-id",
            "7",
            "--price",
            "1000000000000000000",
        ])
        .unwrap();
        match cli.command {
            Commands::SellOrder { token_id, price, salt, contract, .. } => {
                assert_eq!(token_id, U256::from(7u8));
                assert_eq!(price, U256::from(1_000_000_000_000_000_000u64));
                assert!(salt.is_none());
                assert!(contract.is_none());
            }
            _ => panic!("expected sell-order"),
        }
    }

    #[test]
    fn rejects_bad_amount() {
        assert!(parse_amount("12x").is_err());
        assert_eq!(parse_amount("0x10"), Ok(U256::from(16u8)));
    }
}
