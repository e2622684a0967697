//! Order pipeline: build, canonicalize, sign, submit, fill and cancel.
//!
//! Each operation is a short sequential chain of remote calls with no
//! state carried between invocations. The signer and chain client are
//! passed in on every call. Nothing is retried or deduplicated here;
//! marketplace writes are not idempotent.

use alloy_primitives::{address, Address, Bytes, B256, U256};

use super::client::{MarketplaceClient, RemoteError, SignMessage};
use super::order::{
    build_matching_order, build_sell_order, ListedOrder, Order, OrderError, SignedOrder,
};
use super::salt::SaltPolicy;
use super::snapshot::{read_metadata, Snapshot};
use super::transport::Transport;
use crate::chain::{ChainClient, ChainError, CollectionReader, TransactionRequest, TxHash};
use crate::signer::{self, SignError, Signer};

/// Default amount added to a quoted fill value, in wei.
pub const DEFAULT_FILL_SLIPPAGE_WEI: u64 = 100;

/// Marketplace transfer proxy approved before a token is listed.
pub const DEFAULT_TRANSFER_PROXY: Address = address!("0x7d47126a2600E22eab9eD6CF0e515678727779A6");

/// Any failure of a pipeline operation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid order: {0}")]
    Invalid(#[from] OrderError),

    #[error("remote order service failure: {0}")]
    Remote(#[from] RemoteError),

    #[error("signing failed: {0}")]
    Signing(#[from] SignError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Tunables for order construction and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub salt: SaltPolicy,
    pub fill_slippage_wei: U256,
    /// Operator approved to move a token before it is listed.
    pub transfer_proxy: Address,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            salt: SaltPolicy::default(),
            fill_slippage_wei: U256::from(DEFAULT_FILL_SLIPPAGE_WEI),
            transfer_proxy: DEFAULT_TRANSFER_PROXY,
        }
    }
}

/// Terms of a new sell listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellListing {
    pub nft_contract: Address,
    pub token_id: U256,
    pub price_wei: U256,
}

/// Both sides of a match, canonicalized and ready for signing.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPreparation {
    pub matching: Order,
    pub matching_message: SignMessage,
    pub sell_message: SignMessage,
}

/// A fill transaction ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillTransaction {
    pub request: TransactionRequest,
    /// Value quoted by the marketplace, before the slippage buffer.
    pub quoted_value: U256,
}

/// Marketplace order operations over a transport.
pub struct OrderPipeline<T> {
    client: MarketplaceClient<T>,
    settings: PipelineSettings,
}

impl<T: Transport> OrderPipeline<T> {
    pub fn new(transport: T, settings: PipelineSettings) -> Self {
        OrderPipeline {
            client: MarketplaceClient::new(transport),
            settings,
        }
    }

    pub fn client(&self) -> &MarketplaceClient<T> {
        &self.client
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Draws a fresh salt under the configured policy.
    pub fn fresh_salt(&self) -> U256 {
        self.settings.salt.fresh()
    }

    /// Obtains the canonical signable form of an order.
    pub fn canonicalize(&self, order: &Order) -> Result<SignMessage, PipelineError> {
        Ok(self.client.encode_order(order)?)
    }

    /// Publishes a signed sell order.
    pub fn submit_sell_order(
        &self,
        order: &Order,
        signature: Bytes,
    ) -> Result<SignedOrder, PipelineError> {
        if signature.is_empty() {
            return Err(SignError::EmptySignature.into());
        }
        let signed = SignedOrder {
            order: order.clone(),
            signature,
        };
        self.client.create_order(&signed)?;
        log::info!(
            "submitted sell order by {} for {} wei (salt {})",
            order.maker,
            order.take.value,
            order.salt
        );
        Ok(signed)
    }

    /// Builds, canonicalizes, signs and submits a sell order made by the
    /// signer's account. A failure at any step submits nothing.
    pub fn create_sell_order<S: Signer + ?Sized>(
        &self,
        signer: &S,
        listing: &SellListing,
    ) -> Result<SignedOrder, PipelineError> {
        let order = build_sell_order(
            signer.address(),
            listing.nft_contract,
            listing.token_id,
            listing.price_wei,
            self.fresh_salt(),
        )?;
        let message = self.canonicalize(&order)?;
        let signature = signer::sign(&message, signer)?;
        self.submit_sell_order(&order, signature)
    }

    /// Approves the transfer proxy for the token, then creates the sell
    /// order. A zero proxy is refused before any chain call.
    pub fn list_for_sale<C, S>(
        &self,
        chain: &C,
        signer: &S,
        listing: &SellListing,
    ) -> Result<SignedOrder, PipelineError>
    where
        C: ChainClient + ?Sized,
        S: Signer + ?Sized,
    {
        let proxy = self.settings.transfer_proxy;
        if proxy == Address::ZERO {
            return Err(OrderError::MissingOperator.into());
        }
        let tx = chain.approve(proxy, listing.token_id)?;
        log::debug!("approved {} for token {} in {}", proxy, listing.token_id, tx);
        self.create_sell_order(signer, listing)
    }

    /// Builds the matching buy order for `sell` and canonicalizes both the
    /// matching order and the sell order as listed.
    pub fn prepare_match(
        &self,
        sell: &Order,
        filler: Address,
    ) -> Result<MatchPreparation, PipelineError> {
        let matching = build_matching_order(sell, filler, self.fresh_salt())?;
        let matching_message = self.canonicalize(&matching)?;
        let sell_message = self.canonicalize(sell)?;
        Ok(MatchPreparation {
            matching,
            matching_message,
            sell_message,
        })
    }

    /// Asks the marketplace for the transaction filling `sell_hash` and adds
    /// the slippage buffer to the quoted value.
    pub fn prepare_fill(
        &self,
        sell_hash: B256,
        filler: Address,
    ) -> Result<FillTransaction, PipelineError> {
        let prepared = self.client.prepare_fill(sell_hash, filler)?;
        let quoted_value = prepared.asset.value;
        let value = quoted_value.saturating_add(self.settings.fill_slippage_wei);
        Ok(FillTransaction {
            request: TransactionRequest {
                from: filler,
                to: prepared.transaction.to,
                data: prepared.transaction.data,
                value,
            },
            quoted_value,
        })
    }

    /// Prepares and sends the fill transaction.
    pub fn fill_order<C: ChainClient + ?Sized>(
        &self,
        chain: &C,
        sell_hash: B256,
        filler: Address,
    ) -> Result<TxHash, PipelineError> {
        let fill = self.prepare_fill(sell_hash, filler)?;
        log::info!(
            "filling order {} for {} wei (quoted {})",
            sell_hash,
            fill.request.value,
            fill.quoted_value
        );
        Ok(chain.send_transaction(&fill.request)?)
    }

    /// Re-canonicalizes the original order; the result's `structure` is the
    /// argument of the on-chain cancel.
    pub fn prepare_cancel(&self, order: &Order) -> Result<SignMessage, PipelineError> {
        self.canonicalize(order)
    }

    /// Cancels an open order on chain. Only the maker's cancel succeeds;
    /// that is enforced by the contract.
    pub fn cancel_order<C: ChainClient + ?Sized>(
        &self,
        chain: &C,
        order: &Order,
    ) -> Result<TxHash, PipelineError> {
        let message = self.prepare_cancel(order)?;
        log::info!("cancelling order by {} (salt {})", order.maker, order.salt);
        Ok(chain.cancel(&message.structure)?)
    }

    /// Open sell orders for a collection.
    pub fn sell_orders(&self, collection: Address) -> Result<Vec<ListedOrder>, PipelineError> {
        Ok(self.client.sell_orders_by_collection(collection)?)
    }

    /// Re-reads the collection's listings, the owner's tokens and their
    /// manifests. A token whose manifest cannot be read is kept without
    /// metadata.
    pub fn refresh<R: CollectionReader + ?Sized>(
        &self,
        reader: &R,
        collection: Address,
        owner: Address,
    ) -> Result<Snapshot, PipelineError> {
        let market = self.sell_orders(collection)?;
        let tokens = reader.tokens_of_owner(owner)?;
        log::debug!("refresh: {} owned tokens, {} open orders", tokens.len(), market.len());
        Ok(Snapshot::build(owner, collection, tokens, market, |id| {
            read_metadata(reader, id)
        }))
    }
}
