//! Message types for the participation dispatch contract
//!
//! This module defines all messages for instantiation, execution, and queries,
//! plus the payload formats exchanged with the counterpart.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Decimal256, HexBinary, Timestamp, Uint128, Uint256};

use crate::conversion::CostBreakdown;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for contract management
    pub owner: String,
    /// Interchain transport contract
    pub messenger: String,
    /// Counterpart chain (4-byte chain ID)
    pub counterpart_chain: Binary,
    /// Counterpart bridge contract (20-byte EVM or 32-byte universal address)
    pub counterpart_bridge: HexBinary,
    /// Denomination accepted as deposit (e.g. "uluna")
    pub native_denom: String,
    /// Minimum deposit (in smallest unit)
    pub minimum_deposit: Uint128,
    /// Native to internal-currency conversion rate
    pub conversion_rate: Decimal256,
    /// Fee attached to each transport send
    pub messaging_fee: Uint128,
    /// Gas limit requested for the destination execution
    pub messaging_gas_limit: u64,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Participation
    // ========================================================================
    /// Join a competition on the counterpart chain.
    ///
    /// The deposit is sent as funds in the configured native denom.
    DispatchParticipation {
        /// Competition on the counterpart
        competition_id: Uint256,
        /// Confidence, 0-100 inclusive
        confidence: Uint256,
    },

    /// Inbound delivery from the transport.
    ///
    /// Authorization: configured messenger, carrying the counterpart chain
    /// and counterpart bridge as origin.
    ReceiveMessage {
        origin_chain: Binary,
        origin_address: HexBinary,
        payload: Binary,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Point dispatches and inbound authorization at a new counterpart
    ///
    /// Authorization: Owner only
    UpdateCounterpartBridge { new_address: HexBinary },

    /// Hand the contract to a new owner (takes effect immediately)
    ///
    /// Authorization: Owner only
    TransferOwnership { new_owner: String },

    /// Update transport parameters
    ///
    /// Authorization: Owner only
    UpdateMessagingParams {
        gas_limit: Option<u64>,
        fee: Option<Uint128>,
    },

    /// Update conversion parameters
    ///
    /// Authorization: Owner only
    UpdateConversionParams {
        minimum_deposit: Option<Uint128>,
        conversion_rate: Option<Decimal256>,
    },

    /// Send the whole native balance to the owner
    ///
    /// Authorization: Owner only
    EmergencyWithdraw {},
}

// ============================================================================
// Payloads
// ============================================================================

/// Outbound payload delivered to the counterpart bridge
#[cw_serde]
pub struct ParticipationInstruction {
    pub participant: String,
    pub competition_id: Uint256,
    pub confidence: Uint256,
    pub converted_amount: Uint256,
    /// Mirrored so the counterpart can verify the conversion
    pub cost: CostBreakdown,
}

/// Inbound payload sent by the counterpart bridge
#[cw_serde]
pub struct CounterpartEnvelope {
    /// 32-byte message id; derived from the delivery when absent
    pub message_id: Option<HexBinary>,
    pub instruction: CounterpartInstruction,
}

#[cw_serde]
pub enum CounterpartInstruction {
    /// The counterpart accepted a forwarded participation
    ParticipationAccepted { outbound_message_id: HexBinary },
    /// A competition settled; credit internal currency to the participant
    Settlement {
        participant: String,
        competition_id: Uint256,
        amount: Uint256,
    },
}

/// Returned as response data of a successful dispatch
#[cw_serde]
pub struct OutboundMessage {
    pub message_id: HexBinary,
    pub participant: Addr,
    pub competition_id: Uint256,
    pub converted_amount: Uint256,
    pub confidence: Uint256,
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Fee split and converted amount for a deposit
    #[returns(ParticipationCostResponse)]
    ParticipationCost { native_amount: Uint128 },

    /// Returns participation statistics and the current balance
    #[returns(StatsResponse)]
    Stats {},

    /// Returns the counterpart bridge address
    #[returns(BridgeAddressResponse)]
    BridgeAddress {},

    /// Returns the native balance held by the contract
    #[returns(ContractBalanceResponse)]
    ContractBalance {},

    /// Returns the participation record of an address
    #[returns(ParticipationResponse)]
    Participation { participant: String },

    /// Returns all participation records
    #[returns(ParticipationsResponse)]
    Participations {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Whether an inbound message id has been processed
    #[returns(ProcessedMessageResponse)]
    ProcessedMessage { message_id: HexBinary },

    /// Outbound dispatch by transport message id
    #[returns(Option<DispatchResponse>)]
    Dispatch { message_id: HexBinary },

    /// Accepted inbound message by id
    #[returns(Option<ReceiptResponse>)]
    Receipt { message_id: HexBinary },

    /// Internal currency credited to a participant by settlements
    #[returns(SettlementCreditResponse)]
    SettlementCredit { participant: String },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub messenger: Addr,
    pub counterpart_chain: Binary,
    pub counterpart_bridge: HexBinary,
    pub native_denom: String,
    pub minimum_deposit: Uint128,
    pub conversion_rate: Decimal256,
    pub messaging_fee: Uint128,
    pub messaging_gas_limit: u64,
}

#[cw_serde]
pub struct ParticipationCostResponse {
    pub total_cost: Uint128,
    pub messaging_fee: Uint128,
    pub net_participation: Uint128,
    pub converted_amount: Uint256,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_participations: u64,
    pub total_native_received: Uint128,
    pub total_messages_received: u64,
    pub contract_balance: Uint128,
}

#[cw_serde]
pub struct BridgeAddressResponse {
    pub chain: Binary,
    pub address: HexBinary,
}

#[cw_serde]
pub struct ContractBalanceResponse {
    pub denom: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct ParticipationResponse {
    pub participant: Addr,
    pub participations: u64,
    pub native_deposited: Uint128,
}

#[cw_serde]
pub struct ParticipationsResponse {
    pub participations: Vec<ParticipationResponse>,
}

#[cw_serde]
pub struct ProcessedMessageResponse {
    pub message_id: HexBinary,
    pub processed: bool,
}

#[cw_serde]
pub struct DispatchResponse {
    pub message_id: HexBinary,
    pub participant: Addr,
    pub competition_id: Uint256,
    pub confidence: Uint256,
    pub native_amount: Uint128,
    pub converted_amount: Uint256,
    pub dispatched_at: Timestamp,
    pub acknowledged: bool,
}

#[cw_serde]
pub struct ReceiptResponse {
    pub message_id: HexBinary,
    pub origin_address: HexBinary,
    pub payload_summary: String,
    pub received_at: Timestamp,
}

#[cw_serde]
pub struct SettlementCreditResponse {
    pub participant: Addr,
    pub amount: Uint256,
}
