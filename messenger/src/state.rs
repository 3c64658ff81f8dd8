use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, HexBinary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:reference-messenger";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Admin who relays inbound messages and may halt the messenger
    pub admin: Addr,
    /// Chain id of the chain this messenger runs on
    pub chain_id: [u8; 4],
    /// Denomination of the messaging fee
    pub native_denom: String,
    /// Minimum fee per send
    pub min_fee: Uint128,
    /// Largest gas limit a sender may request
    pub max_gas_limit: u64,
    /// While halted every send is rejected
    pub halted: bool,
}

#[cw_serde]
pub struct OutboxMessage {
    pub sender: Addr,
    pub nonce: u64,
    pub destination_chain: Binary,
    pub destination_address: HexBinary,
    pub message: Binary,
    pub gas_limit: u64,
    pub fee_paid: Uint128,
    pub sent_at: Timestamp,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Next outbound nonce
pub const NONCE: Item<u64> = Item::new("nonce");

/// message_id => outbound message
pub const OUTBOX: Map<&[u8], OutboxMessage> = Map::new("outbox");
