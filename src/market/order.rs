//! Marketplace order types.
//!
//! The data model mirrors the marketplace's JSON order format field for
//! field, so orders serialize straight into request bodies. Integer fields
//! travel as decimal strings.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::num::decimal;

/// Errors raised while constructing an order locally, before any network
/// call is made.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("order maker address is missing")]
    MissingMaker,

    #[error("NFT contract address is missing")]
    MissingContract,

    #[error("transfer proxy address is missing")]
    MissingOperator,

    #[error("order price must be greater than zero")]
    ZeroPrice,

    #[error("order is not an ERC721-for-ETH sell order")]
    NotASellOrder,
}

/// Marketplace order protocol tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "RARIBLE_V2")]
    RaribleV2,
}

/// What an asset is: native currency or a specific ERC-721 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "assetClass")]
pub enum AssetType {
    #[serde(rename = "ETH")]
    Eth,

    #[serde(rename = "ERC721")]
    Erc721 {
        contract: Address,
        #[serde(rename = "tokenId", with = "decimal")]
        token_id: U256,
    },
}

/// An asset and the amount of it offered or requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "assetType")]
    pub asset_type: AssetType,
    #[serde(with = "decimal")]
    pub value: U256,
}

impl Asset {
    /// One unit of an ERC-721 token.
    pub fn erc721(contract: Address, token_id: U256) -> Self {
        Asset {
            asset_type: AssetType::Erc721 { contract, token_id },
            value: U256::from(1u8),
        }
    }

    /// An amount of native currency in wei.
    pub fn eth(value: U256) -> Self {
        Asset {
            asset_type: AssetType::Eth,
            value,
        }
    }
}

/// Auxiliary data layout tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "RARIBLE_V2_DATA_V1")]
    RaribleV2DataV1,
}

/// A payout or fee share: recipient and basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    pub account: Address,
    pub value: u64,
}

/// Payout and fee lists attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderData {
    #[serde(rename = "dataType")]
    pub data_type: DataType,
    #[serde(default)]
    pub payouts: Vec<Part>,
    #[serde(rename = "originFees", default)]
    pub origin_fees: Vec<Part>,
}

impl Default for OrderData {
    /// Empty payouts and fees; the only form this client constructs.
    fn default() -> Self {
        OrderData {
            data_type: DataType::RaribleV2DataV1,
            payouts: Vec::new(),
            origin_fees: Vec::new(),
        }
    }
}

/// Which way an order trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSide {
    /// Offers an NFT, asks for currency.
    MakeErc721TakeEth,
    /// Offers currency, asks for an NFT.
    MakeEthTakeErc721,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderSide::MakeErc721TakeEth => "MAKE_ERC721_TAKE_ETH",
            OrderSide::MakeEthTakeErc721 => "MAKE_ETH_TAKE_ERC721",
        }
    }
}

/// A marketplace order. Immutable once built; a new salt makes a distinct
/// order even with identical terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub maker: Address,
    pub make: Asset,
    pub take: Asset,
    pub data: OrderData,
    #[serde(with = "decimal")]
    pub salt: U256,
}

impl Order {
    /// Derives the trade direction from the make/take asset classes.
    pub fn side(&self) -> Option<OrderSide> {
        match (self.make.asset_type, self.take.asset_type) {
            (AssetType::Erc721 { .. }, AssetType::Eth) => Some(OrderSide::MakeErc721TakeEth),
            (AssetType::Eth, AssetType::Erc721 { .. }) => Some(OrderSide::MakeEthTakeErc721),
            _ => None,
        }
    }

    /// The NFT side of the order as (contract, token id).
    pub fn nft(&self) -> Option<(Address, U256)> {
        [self.make.asset_type, self.take.asset_type]
            .into_iter()
            .find_map(|t| match t {
                AssetType::Erc721 { contract, token_id } => Some((contract, token_id)),
                AssetType::Eth => None,
            })
    }

    /// The currency amount of the order, in wei.
    pub fn price(&self) -> Option<U256> {
        match self.side()? {
            OrderSide::MakeErc721TakeEth => Some(self.take.value),
            OrderSide::MakeEthTakeErc721 => Some(self.make.value),
        }
    }
}

/// An order plus the maker's signature over its canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub signature: Bytes,
}

/// An open order as returned by the marketplace listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub hash: B256,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl ListedOrder {
    /// True if `account` made this order and may therefore cancel it.
    pub fn is_made_by(&self, account: Address) -> bool {
        self.order.maker == account
    }
}

/// Builds an order offering one ERC-721 token for `price_wei` of currency.
pub fn build_sell_order(
    maker: Address,
    nft_contract: Address,
    token_id: U256,
    price_wei: U256,
    salt: U256,
) -> Result<Order, OrderError> {
    if maker == Address::ZERO {
        return Err(OrderError::MissingMaker);
    }
    if nft_contract == Address::ZERO {
        return Err(OrderError::MissingContract);
    }
    if price_wei.is_zero() {
        return Err(OrderError::ZeroPrice);
    }
    Ok(Order {
        order_type: OrderType::RaribleV2,
        maker,
        make: Asset::erc721(nft_contract, token_id),
        take: Asset::eth(price_wei),
        data: OrderData::default(),
        salt,
    })
}

/// Builds the complementary order that offers the sell order's price for
/// its token.
pub fn build_matching_order(sell: &Order, maker: Address, salt: U256) -> Result<Order, OrderError> {
    if sell.side() != Some(OrderSide::MakeErc721TakeEth) {
        return Err(OrderError::NotASellOrder);
    }
    if maker == Address::ZERO {
        return Err(OrderError::MissingMaker);
    }
    let (contract, token_id) = sell.nft().ok_or(OrderError::NotASellOrder)?;
    Ok(Order {
        order_type: OrderType::RaribleV2,
        maker,
        make: Asset::eth(sell.take.value),
        take: Asset::erc721(contract, token_id),
        data: OrderData::default(),
        salt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use serde_json::json;

    const MAKER: Address = address!("0x1111111111111111111111111111111111111111");
    const BUYER: Address = address!("0x2222222222222222222222222222222222222222");
    const NFT: Address = address!("0x0FAa54C764F125F9799a0062b7df062C502875F2");

    fn one_eth() -> U256 {
        U256::from(1_000_000_000_000_000_000u64)
    }

    #[test]
    fn sell_order_shape() {
        let order =
            build_sell_order(MAKER, NFT, U256::from(7u8), one_eth(), U256::from(42u8)).unwrap();
        assert_eq!(order.side(), Some(OrderSide::MakeErc721TakeEth));
        assert_eq!(order.nft(), Some((NFT, U256::from(7u8))));
        assert_eq!(order.price(), Some(one_eth()));
        assert_eq!(order.make.value, U256::from(1u8));
        assert!(order.data.payouts.is_empty());
        assert!(order.data.origin_fees.is_empty());
    }

    #[test]
    fn sell_order_json_matches_wire_format() {
        let order =
            build_sell_order(MAKER, NFT, U256::from(7u8), one_eth(), U256::from(42u8)).unwrap();
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "RARIBLE_V2",
                "maker": serde_json::to_value(MAKER).unwrap(),
                "make": {
                    "assetType": {
                        "assetClass": "ERC721",
                        "contract": serde_json::to_value(NFT).unwrap(),
                        "tokenId": "7"
                    },
                    "value": "1"
                },
                "take": {
                    "assetType": { "assetClass": "ETH" },
                    "value": "1000000000000000000"
                },
                "data": {
                    "dataType": "RARIBLE_V2_DATA_V1",
                    "payouts": [],
                    "originFees": []
                },
                "salt": "42"
            })
        );
    }

    #[test]
    fn sell_order_validation() {
        assert_eq!(
            build_sell_order(MAKER, NFT, U256::from(1u8), U256::ZERO, U256::ZERO),
            Err(OrderError::ZeroPrice)
        );
        assert_eq!(
            build_sell_order(Address::ZERO, NFT, U256::from(1u8), one_eth(), U256::ZERO),
            Err(OrderError::MissingMaker)
        );
        assert_eq!(
            build_sell_order(MAKER, Address::ZERO, U256::from(1u8), one_eth(), U256::ZERO),
            Err(OrderError::MissingContract)
        );
    }

    #[test]
    fn matching_order_mirrors_sell_terms() {
        let sell =
            build_sell_order(MAKER, NFT, U256::from(99u8), one_eth(), U256::from(5u8)).unwrap();
        let buy = build_matching_order(&sell, BUYER, U256::ZERO).unwrap();
        assert_eq!(buy.side(), Some(OrderSide::MakeEthTakeErc721));
        assert_eq!(buy.maker, BUYER);
        assert_eq!(buy.nft(), sell.nft());
        assert_eq!(buy.price(), sell.price());
        assert_eq!(buy.make, Asset::eth(one_eth()));
        assert_eq!(buy.take, Asset::erc721(NFT, U256::from(99u8)));
    }

    #[test]
    fn matching_order_rejects_buy_side() {
        let sell = build_sell_order(MAKER, NFT, U256::from(1u8), one_eth(), U256::ZERO).unwrap();
        let buy = build_matching_order(&sell, BUYER, U256::ZERO).unwrap();
        assert_eq!(build_matching_order(&buy, MAKER, U256::ZERO), Err(OrderError::NotASellOrder));
    }

    #[test]
    fn listed_order_from_service_json() {
        let raw = json!({
            "type": "RARIBLE_V2",
            "maker": "0x1111111111111111111111111111111111111111",
            "make": {
                "assetType": {
                    "assetClass": "ERC721",
                    "contract": "0x0faa54c764f125f9799a0062b7df062c502875f2",
                    "tokenId": "3"
                },
                "value": "1"
            },
            "take": { "assetType": { "assetClass": "ETH" }, "value": "250000000000000000" },
            "data": { "dataType": "RARIBLE_V2_DATA_V1", "payouts": [], "originFees": [] },
            "salt": "0x0000000000000000000000000000000000000000000000000000000000000313",
            "hash": "0x6b6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f6f",
            "createdAt": "2021-07-01T10:00:00Z",
            "makeStock": "1"
        });
        let listed: ListedOrder = serde_json::from_value(raw).unwrap();
        assert_eq!(listed.order.salt, U256::from(0x313u64));
        assert_eq!(listed.order.nft(), Some((NFT, U256::from(3u8))));
        assert_eq!(listed.created_at.as_deref(), Some("2021-07-01T10:00:00Z"));
        assert!(listed.is_made_by(MAKER));
        assert!(!listed.is_made_by(BUYER));
    }

    #[test]
    fn signed_order_flattens_order_fields() {
        let order = build_sell_order(MAKER, NFT, U256::from(1u8), one_eth(), U256::ZERO).unwrap();
        let signed = SignedOrder {
            order,
            signature: Bytes::from(vec![0xab, 0xcd]),
        };
        let value = serde_json::to_value(&signed).unwrap();
        assert_eq!(value["signature"], "0xabcd");
        assert_eq!(value["type"], "RARIBLE_V2");
        assert_eq!(value["take"]["value"], "1000000000000000000");
    }
}
