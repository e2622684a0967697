//! Marketplace order handling.
//!
//! Order types and builders, the REST client for the marketplace order
//! API, and the pipeline that chains build, canonicalize, sign and submit.

pub mod client;
pub mod metadata;
pub mod order;
pub mod pipeline;
pub mod salt;
pub mod snapshot;
pub mod transport;

pub use client::{MarketplaceClient, Operation, PreparedFill, RemoteError, SignMessage};
pub use order::{
    build_matching_order, build_sell_order, Asset, AssetType, ListedOrder, Order, OrderError,
    OrderSide, SignedOrder,
};
pub use metadata::{parse_token_uri, MetadataError, TokenMetadata};
pub use pipeline::{
    FillTransaction, MatchPreparation, OrderPipeline, PipelineError, PipelineSettings, SellListing,
    DEFAULT_TRANSFER_PROXY,
};
pub use salt::SaltPolicy;
pub use snapshot::{read_metadata, MarketListing, OwnedToken, Snapshot};
pub use transport::{Transport, TransportError};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
