//! Collection snapshot produced by an explicit refresh.
//!
//! Joins the owner's tokens with the collection's open sell orders, so a UI
//! can show which of its tokens are listed (and therefore cancellable) and
//! what is for sale. Tokens of the collection carry their decoded manifest
//! when it could be read.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use super::metadata::{parse_token_uri, TokenMetadata};
use super::order::ListedOrder;
use crate::chain::CollectionReader;

/// A token held by the snapshot owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedToken {
    pub token_id: U256,
    /// The owner's own open sell order for this token, if any.
    pub listing: Option<ListedOrder>,
    pub metadata: Option<TokenMetadata>,
}

impl OwnedToken {
    pub fn can_cancel(&self) -> bool {
        self.listing.is_some()
    }
}

/// An open order together with the listed token's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketListing {
    pub listed: ListedOrder,
    pub metadata: Option<TokenMetadata>,
}

/// Point-in-time view of a collection from one account's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub owner: Address,
    pub collection: Address,
    pub owned: Vec<OwnedToken>,
    pub market: Vec<MarketListing>,
}

impl Snapshot {
    /// Pairs each owned token with the owner's listing for it. The first
    /// matching order wins; listings arrive most recent first.
    ///
    /// `metadata` is asked at most once per token id, and only for tokens
    /// of `collection`.
    pub fn build<F>(
        owner: Address,
        collection: Address,
        tokens: Vec<U256>,
        market: Vec<ListedOrder>,
        mut metadata: F,
    ) -> Self
    where
        F: FnMut(U256) -> Option<TokenMetadata>,
    {
        let mut seen: HashMap<U256, Option<TokenMetadata>> = HashMap::new();
        let mut lookup = |token_id: U256| {
            seen.entry(token_id)
                .or_insert_with(|| metadata(token_id))
                .clone()
        };

        let owned = tokens
            .into_iter()
            .map(|token_id| {
                let listing = market
                    .iter()
                    .find(|o| {
                        o.is_made_by(owner) && o.order.nft() == Some((collection, token_id))
                    })
                    .cloned();
                OwnedToken {
                    token_id,
                    listing,
                    metadata: lookup(token_id),
                }
            })
            .collect();

        let market = market
            .into_iter()
            .map(|listed| {
                let metadata = match listed.order.nft() {
                    Some((contract, token_id)) if contract == collection => lookup(token_id),
                    _ => None,
                };
                MarketListing { listed, metadata }
            })
            .collect();

        Snapshot {
            owner,
            collection,
            owned,
            market,
        }
    }

    /// Market orders the owner did not make, i.e. the ones it may fill.
    pub fn fillable(&self) -> impl Iterator<Item = &MarketListing> {
        self.market
            .iter()
            .filter(move |m| !m.listed.is_made_by(self.owner))
    }
}

/// Reads and decodes a token's manifest. A token whose URI cannot be read
/// or decoded is reported and yields `None`; it does not fail the refresh.
pub fn read_metadata<R: CollectionReader + ?Sized>(
    reader: &R,
    token_id: U256,
) -> Option<TokenMetadata> {
    let uri = match reader.token_uri(token_id) {
        Ok(uri) => uri,
        Err(e) => {
            log::warn!("token {}: tokenURI unavailable: {}", token_id, e);
            return None;
        }
    };
    match parse_token_uri(&uri) {
        Ok(meta) => Some(meta),
        Err(e) => {
            log::warn!("token {}: skipping metadata: {}", token_id, e);
            None
        }
    }
}
