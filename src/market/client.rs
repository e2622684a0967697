//! Marketplace REST client.
//!
//! Thin typed wrapper over the order endpoints: encode (canonicalize),
//! create, list by collection, and prepare a fill transaction. Every call
//! is a single request; nothing is retried, because re-sending an order
//! request can create a duplicate order.

use std::fmt;

use alloy_primitives::{hex, Address, Bytes, B256, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::order::{ListedOrder, Order, SignedOrder};
use super::transport::{Transport, TransportError};
use crate::num::decimal;

pub const ENCODE_ORDER_PATH: &str = "/order/encoder/order";
pub const ORDERS_PATH: &str = "/order/orders";
pub const SELL_BY_COLLECTION_PATH: &str = "/order/orders/sell/byCollection";

/// The remote operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    EncodeOrder,
    CreateOrder,
    ListSellOrders,
    PrepareFill,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Operation::EncodeOrder => "encode order",
            Operation::CreateOrder => "create order",
            Operation::ListSellOrders => "list sell orders",
            Operation::PrepareFill => "prepare fill",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed marketplace call.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    #[error("{operation} returned a malformed body: {detail}")]
    Malformed { operation: Operation, detail: String },
}

impl RemoteError {
    pub fn operation(&self) -> Operation {
        match self {
            RemoteError::Transport { operation, .. } | RemoteError::Malformed { operation, .. } => {
                *operation
            }
        }
    }
}

/// The canonical EIP-712 payload the maker must sign.
///
/// `structure` is the canonical order as the exchange contract sees it; it
/// is also the argument of the on-chain `cancel` call. Members this client
/// does not interpret are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignMessage {
    #[serde(default)]
    pub domain: Value,
    #[serde(rename = "structType", default)]
    pub struct_type: String,
    #[serde(default)]
    pub types: Value,
    #[serde(rename = "struct")]
    pub structure: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct EncodeResponse {
    #[serde(rename = "signMessage")]
    sign_message: SignMessage,
}

#[derive(Debug, Deserialize)]
struct OrdersPage {
    #[serde(default)]
    orders: Vec<Value>,
}

/// Quoted asset of a prepared fill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuotedAsset {
    #[serde(with = "decimal")]
    pub value: U256,
}

/// Contract call that executes a fill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreparedCall {
    pub to: Address,
    pub data: Bytes,
}

/// Transaction descriptor returned by the fill-preparation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreparedFill {
    pub asset: QuotedAsset,
    pub transaction: PreparedCall,
}

/// Client for the marketplace order API.
pub struct MarketplaceClient<T> {
    transport: T,
}

impl<T: Transport> MarketplaceClient<T> {
    pub fn new(transport: T) -> Self {
        MarketplaceClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Asks the encoder endpoint for the canonical signable form of `order`.
    pub fn encode_order(&self, order: &Order) -> Result<SignMessage, RemoteError> {
        let body = to_body(Operation::EncodeOrder, order)?;
        let raw = self.post(Operation::EncodeOrder, ENCODE_ORDER_PATH, &body)?;
        let response: EncodeResponse = decode(Operation::EncodeOrder, &raw)?;
        Ok(response.sign_message)
    }

    /// Publishes a signed order. The response body is not interpreted.
    pub fn create_order(&self, signed: &SignedOrder) -> Result<(), RemoteError> {
        let body = to_body(Operation::CreateOrder, signed)?;
        self.post(Operation::CreateOrder, ORDERS_PATH, &body)?;
        Ok(())
    }

    /// Open sell orders for a collection, most recently updated first.
    ///
    /// Entries that do not decode as supported orders (other protocols or
    /// asset classes) are skipped.
    pub fn sell_orders_by_collection(
        &self,
        collection: Address,
    ) -> Result<Vec<ListedOrder>, RemoteError> {
        let op = Operation::ListSellOrders;
        let collection = collection.to_checksum(None);
        let query = [("collection", collection.as_str()), ("sort", "LAST_UPDATE")];
        let raw = self
            .transport
            .get(SELL_BY_COLLECTION_PATH, &query)
            .map_err(|source| RemoteError::Transport {
                operation: op,
                source,
            })?;
        let page: OrdersPage = decode(op, &raw)?;

        let mut orders = Vec::with_capacity(page.orders.len());
        for entry in page.orders {
            match serde_json::from_value::<ListedOrder>(entry) {
                Ok(order) => orders.push(order),
                Err(e) => log::warn!("skipping unsupported listed order: {}", e),
            }
        }
        Ok(orders)
    }

    /// Asks the marketplace to prepare the transaction that fills the order
    /// with `hash` on behalf of `filler`.
    pub fn prepare_fill(&self, hash: B256, filler: Address) -> Result<PreparedFill, RemoteError> {
        let op = Operation::PrepareFill;
        let path = format!("{}/{}/prepareTx", ORDERS_PATH, hex::encode_prefixed(hash));
        let body = json!({
            "maker": filler,
            "amount": 1,
            "payouts": [],
            "originFees": [],
        });
        let raw = self.post(op, &path, &body)?;
        decode(op, &raw)
    }

    fn post(&self, operation: Operation, path: &str, body: &Value) -> Result<String, RemoteError> {
        log::debug!("{}: POST {}", operation, path);
        self.transport
            .post(path, body)
            .map_err(|source| RemoteError::Transport { operation, source })
    }
}

fn to_body<S: Serialize>(operation: Operation, payload: &S) -> Result<Value, RemoteError> {
    serde_json::to_value(payload).map_err(|e| RemoteError::Malformed {
        operation,
        detail: e.to_string(),
    })
}

fn decode<D: DeserializeOwned>(operation: Operation, raw: &str) -> Result<D, RemoteError> {
    serde_json::from_str(raw).map_err(|e| RemoteError::Malformed {
        operation,
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::order::build_sell_order;
    use alloy_primitives::address;
    use std::cell::RefCell;

    const MAKER: Address = address!("0x1111111111111111111111111111111111111111");
    const NFT: Address = address!("0x0FAa54C764F125F9799a0062b7df062C502875F2");

    /// Replies with a fixed body and records every request.
    struct Canned {
        reply: Result<String, TransportError>,
        requests: RefCell<Vec<(String, Value)>>,
    }

    impl Canned {
        fn ok(body: &str) -> Self {
            Canned {
                reply: Ok(body.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn err(e: TransportError) -> Self {
            Canned {
                reply: Err(e),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
            let q: Map<String, Value> = query
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            self.requests.borrow_mut().push((path.to_string(), Value::Object(q)));
            self.reply.clone()
        }

        fn post(&self, path: &str, body: &Value) -> Result<String, TransportError> {
            self.requests.borrow_mut().push((path.to_string(), body.clone()));
            self.reply.clone()
        }
    }

    fn order() -> Order {
        build_sell_order(MAKER, NFT, U256::from(4u8), U256::from(1000u64), U256::from(9u8)).unwrap()
    }

    #[test]
    fn encode_order_posts_order_and_reads_sign_message() {
        let body = json!({
            "signMessage": {
                "@type": "EIP712",
                "domain": { "name": "Exchange" },
                "structType": "Order",
                "types": {},
                "struct": { "salt": "9" }
            }
        });
        let client = MarketplaceClient::new(Canned::ok(&body.to_string()));
        let msg = client.encode_order(&order()).unwrap();
        assert_eq!(msg.struct_type, "Order");
        assert_eq!(msg.structure, json!({"salt": "9"}));
        assert_eq!(msg.extra.get("@type"), Some(&json!("EIP712")));

        let requests = client.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, ENCODE_ORDER_PATH);
        assert_eq!(requests[0].1, serde_json::to_value(order()).unwrap());
    }

    #[test]
    fn encode_order_without_struct_is_malformed() {
        let client = MarketplaceClient::new(Canned::ok(r#"{"signMessage":{"domain":{}}}"#));
        let err = client.encode_order(&order()).unwrap_err();
        assert!(matches!(err, RemoteError::Malformed { operation: Operation::EncodeOrder, .. }));
    }

    #[test]
    fn status_failure_carries_operation() {
        let client = MarketplaceClient::new(Canned::err(TransportError::Status {
            status: 400,
            body: "bad salt".into(),
        }));
        let signed = SignedOrder {
            order: order(),
            signature: Bytes::from(vec![1u8; 65]),
        };
        let err = client.create_order(&signed).unwrap_err();
        assert_eq!(err.operation(), Operation::CreateOrder);
        assert!(err.to_string().contains("create order failed"));
    }

    #[test]
    fn create_order_ignores_response_body() {
        let client = MarketplaceClient::new(Canned::ok(""));
        let signed = SignedOrder {
            order: order(),
            signature: Bytes::from(vec![1u8; 65]),
        };
        client.create_order(&signed).unwrap();
        let requests = client.transport().requests.borrow();
        assert_eq!(requests[0].0, ORDERS_PATH);
        assert!(requests[0].1.get("signature").is_some());
        assert_eq!(requests[0].1["salt"], "9");
    }

    #[test]
    fn listing_skips_unsupported_entries() {
        let listed = json!({
            "type": "RARIBLE_V2",
            "maker": MAKER,
            "make": {
                "assetType": { "assetClass": "ERC721", "contract": NFT, "tokenId": "4" },
                "value": "1"
            },
            "take": { "assetType": { "assetClass": "ETH" }, "value": "1000" },
            "data": { "dataType": "RARIBLE_V2_DATA_V1", "payouts": [], "originFees": [] },
            "salt": "9",
            "hash": format!("0x{}", "ab".repeat(32)),
            "createdAt": "2021-07-01T10:00:00Z"
        });
        let foreign = json!({ "type": "OPEN_SEA_V1", "hash": "0x00" });
        let body = json!({ "orders": [listed, foreign] }).to_string();
        let client = MarketplaceClient::new(Canned::ok(&body));

        let orders = client.sell_orders_by_collection(NFT).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order, order());

        let requests = client.transport().requests.borrow();
        assert_eq!(requests[0].0, SELL_BY_COLLECTION_PATH);
        assert_eq!(requests[0].1["sort"], "LAST_UPDATE");
        assert_eq!(requests[0].1["collection"], NFT.to_checksum(None));
    }

    #[test]
    fn prepare_fill_request_and_response() {
        let body = json!({
            "asset": { "assetType": { "assetClass": "ETH" }, "value": "1000000000000000000" },
            "transaction": { "to": NFT, "data": "0xe99a3f80" }
        })
        .to_string();
        let client = MarketplaceClient::new(Canned::ok(&body));
        let hash = B256::repeat_byte(0xcd);
        let fill = client.prepare_fill(hash, MAKER).unwrap();
        assert_eq!(fill.asset.value, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(fill.transaction.to, NFT);
        assert_eq!(fill.transaction.data, Bytes::from(vec![0xe9, 0x9a, 0x3f, 0x80]));

        let requests = client.transport().requests.borrow();
        assert_eq!(requests[0].0, format!("/order/orders/0x{}/prepareTx", "cd".repeat(32)));
        assert_eq!(requests[0].1["amount"], 1);
        assert_eq!(requests[0].1["maker"], serde_json::to_value(MAKER).unwrap());
        assert_eq!(requests[0].1["payouts"], json!([]));
        assert_eq!(requests[0].1["originFees"], json!([]));
    }

    #[test]
    fn prepare_fill_malformed_json() {
        let client = MarketplaceClient::new(Canned::ok("<html>oops</html>"));
        let err = client.prepare_fill(B256::ZERO, MAKER).unwrap_err();
        assert_eq!(err.operation(), Operation::PrepareFill);
        assert!(matches!(err, RemoteError::Malformed { .. }));
    }
}
