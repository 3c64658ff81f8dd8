use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, HexBinary, Timestamp, Uint128};

use common::Delivery;

#[cw_serde]
pub struct InstantiateMsg {
    /// Admin who relays inbound messages
    pub admin: String,
    /// Chain id of this chain (4 bytes)
    pub chain_id: Binary,
    /// Denomination of the messaging fee
    pub native_denom: String,
    /// Minimum fee per send
    pub min_fee: Uint128,
    /// Largest gas limit a sender may request
    pub max_gas_limit: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Record an outbound message and emit its id.
    /// Wire-compatible with `common::TransportExecuteMsg`.
    SendCrossChainMessage {
        destination_chain: Binary,
        destination_address: HexBinary,
        message: Binary,
        required_gas_limit: u64,
    },
    /// Admin: deliver inbound messages to their target contracts
    Relay { deliveries: Vec<Delivery> },
    /// Admin: stop or resume accepting sends
    SetHalted { halted: bool },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the messenger configuration
    #[returns(ConfigResponse)]
    Config {},
    /// Returns a recorded outbound message
    #[returns(Option<OutboxMessageResponse>)]
    OutboxMessage { message_id: HexBinary },
    /// Returns the next outbound nonce
    #[returns(NonceResponse)]
    Nonce {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub chain_id: Binary,
    pub native_denom: String,
    pub min_fee: Uint128,
    pub max_gas_limit: u64,
    pub halted: bool,
}

#[cw_serde]
pub struct OutboxMessageResponse {
    pub message_id: HexBinary,
    pub sender: Addr,
    pub nonce: u64,
    pub destination_chain: Binary,
    pub destination_address: HexBinary,
    pub message: Binary,
    pub gas_limit: u64,
    pub fee_paid: Uint128,
    pub sent_at: Timestamp,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}
