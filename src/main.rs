//! chessmint -- chess-position fingerprints and marketplace orders.
//!
//! Offline commands (encode, decode, mint-request, sell-order, match-order)
//! work in every build. Commands that talk to the marketplace need the
//! `http` feature.

use std::fs;
use std::path::PathBuf;

use alloy_primitives::U256;
use clap::Parser;
use env_logger::Env;

use chessmint::cli::{Cli, Commands};
use chessmint::config::{Config, ConfigError};
use chessmint::market::{build_matching_order, build_sell_order, Order, OrderError, PipelineError};
use chessmint::mint::{MintError, MintRequest};
use chessmint::protocol::{
    decode_fingerprint, encode_fen, parse_fen, FenError, Fingerprint, FingerprintError,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),

    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    #[error(transparent)]
    Mint(#[from] MintError),

    #[error("invalid order: {0}")]
    Order(#[from] OrderError),

    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg_attr(feature = "http", allow(dead_code))]
    #[error("this build has no HTTP support; rebuild with --features http")]
    HttpDisabled,
}

fn main() {
    let env = Env::default().filter_or("CHESSMINT_LOG", "info");
    env_logger::Builder::from_env(env).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cfg_path = cli
        .config
        .or_else(|| std::env::var_os("CHESSMINT_CONFIG").map(PathBuf::from));
    let cfg = Config::load(cfg_path.as_deref())?;

    match cli.command {
        Commands::Encode { fen, hex } => {
            let fp = parse_fen(&fen)?.fingerprint();
            if hex {
                println!("{}", fp.to_hex());
            } else {
                println!("{}", fp);
            }
        }
        Commands::Decode { fingerprint } => {
            let fp: Fingerprint = fingerprint.parse()?;
            println!("{}", encode_fen(&decode_fingerprint(fp)?));
        }
        Commands::MintRequest { fen, label } => {
            let position = parse_fen(&fen)?;
            let request = MintRequest::from_position(&position, label, cfg.mint_price_wei)?;
            let out = serde_json::json!({
                "fingerprint": request.fingerprint().to_string(),
                "label": request.label(),
                "value": request.value().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::SellOrder { maker, contract, token_id, price, salt } => {
            let salt = salt.unwrap_or_else(|| cfg.salt.fresh());
            let contract = contract.unwrap_or(cfg.collection);
            let order = build_sell_order(maker, contract, token_id, price, salt)?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        }
        Commands::MatchOrder { maker, sell, salt } => {
            let data = fs::read_to_string(&sell).map_err(|source| CliError::Read {
                path: sell.display().to_string(),
                source,
            })?;
            let sell_order: Order = serde_json::from_str(&data)?;
            let salt = salt.unwrap_or(U256::ZERO);
            let matching = build_matching_order(&sell_order, maker, salt)?;
            println!("{}", serde_json::to_string_pretty(&matching)?);
        }
        Commands::Orders { collection } => {
            remote::orders(&cfg, collection.unwrap_or(cfg.collection))?;
        }
        Commands::QuoteFill { hash, filler } => {
            remote::quote_fill(&cfg, hash, filler)?;
        }
    }

    Ok(())
}

#[cfg(feature = "http")]
mod remote {
    use alloy_primitives::{Address, B256};

    use chessmint::config::Config;
    use chessmint::market::{HttpTransport, OrderPipeline};

    use super::CliError;

    fn pipeline(cfg: &Config) -> OrderPipeline<HttpTransport> {
        OrderPipeline::new(HttpTransport::new(cfg.api_base_url.clone()), cfg.pipeline_settings())
    }

    pub fn orders(cfg: &Config, collection: Address) -> Result<(), CliError> {
        for listed in pipeline(cfg).sell_orders(collection)? {
            let token = listed
                .order
                .nft()
                .map(|(_, id)| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let price = listed.order.price().map(|p| p.to_string()).unwrap_or_default();
            println!(
                "{} token {} price {} maker {}",
                listed.hash, token, price, listed.order.maker
            );
        }
        Ok(())
    }

    pub fn quote_fill(cfg: &Config, hash: B256, filler: Address) -> Result<(), CliError> {
        let fill = pipeline(cfg).prepare_fill(hash, filler)?;
        let out = serde_json::json!({
            "from": fill.request.from,
            "to": fill.request.to,
            "data": fill.request.data,
            "value": fill.request.value.to_string(),
            "quoted": fill.quoted_value.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        Ok(())
    }
}

#[cfg(not(feature = "http"))]
mod remote {
    use alloy_primitives::{Address, B256};

    use chessmint::config::Config;

    use super::CliError;

    pub fn orders(_cfg: &Config, _collection: Address) -> Result<(), CliError> {
        Err(CliError::HttpDisabled)
    }

    pub fn quote_fill(_cfg: &Config, _hash: B256, _filler: Address) -> Result<(), CliError> {
        Err(CliError::HttpDisabled)
    }
}
