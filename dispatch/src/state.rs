//! State definitions for the participation dispatch contract
//!
//! Everything here lives in contract storage and survives restarts. The
//! processed-message ledger has its own module (`ledger`) because it carries
//! the exactly-once logic alongside its storage.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal256, Timestamp, Uint128, Uint256};
use cw_storage_plus::{Item, Map};

use crate::conversion::CostBreakdown;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration. Only the owner-gated admin handlers write it.
#[cw_serde]
pub struct Config {
    /// Owner address for contract management (never empty)
    pub owner: Addr,
    /// Interchain transport contract; the only caller allowed to deliver messages
    pub messenger: Addr,
    /// Chain hosting the counterpart; destination of dispatches and the only
    /// accepted origin of inbound messages
    pub counterpart_chain: [u8; 4],
    /// Counterpart bridge contract on that chain (32-byte universal address, never zero)
    pub counterpart_bridge: [u8; 32],
    /// Native denomination accepted as deposit
    pub native_denom: String,
    /// Minimum deposit (in smallest unit)
    pub minimum_deposit: Uint128,
    /// Native to internal-currency rate (18 fractional digits)
    pub conversion_rate: Decimal256,
    /// Fee budget attached to every transport send
    pub messaging_fee: Uint128,
    /// Gas limit requested for the destination execution
    pub messaging_gas_limit: u64,
}

/// Global statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Number of accepted dispatches
    pub total_participations: u64,
    /// Sum of all accepted deposits (gross, before messaging fee)
    pub total_native_received: Uint128,
    /// Number of accepted inbound messages
    pub total_messages_received: u64,
}

/// Per-participant cumulative record. There is no decrement path.
#[cw_serde]
#[derive(Default)]
pub struct ParticipationRecord {
    pub participations: u64,
    pub native_deposited: Uint128,
}

/// Dispatch waiting for the transport reply within the same transaction
#[cw_serde]
pub struct PendingDispatch {
    pub participant: Addr,
    pub competition_id: Uint256,
    pub confidence: Uint256,
    pub cost: CostBreakdown,
    pub converted_amount: Uint256,
}

/// Outbound participation, keyed by the transport message id
#[cw_serde]
pub struct DispatchRecord {
    pub participant: Addr,
    pub competition_id: Uint256,
    pub confidence: Uint256,
    pub native_amount: Uint128,
    pub converted_amount: Uint256,
    pub dispatched_at: Timestamp,
    /// Set once the counterpart confirms it accepted the participation
    pub acknowledged: bool,
}

/// Accepted inbound message
#[cw_serde]
pub struct ReceiptRecord {
    pub origin_address: [u8; 32],
    pub payload_summary: String,
    pub received_at: Timestamp,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:participation-dispatch";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of the confidence range (inclusive)
pub const MAX_CONFIDENCE: u64 = 100;

/// Reply id of the transport send submessage
pub const DISPATCH_REPLY_ID: u64 = 1;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Global statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Participation records
/// Key: participant address, Value: ParticipationRecord
pub const PARTICIPATIONS: Map<&Addr, ParticipationRecord> = Map::new("participations");

/// Dispatch in flight between execute and reply (removed in the reply)
pub const PENDING_DISPATCH: Item<PendingDispatch> = Item::new("pending_dispatch");

/// Outbound dispatches
/// Key: 32-byte transport message id, Value: DispatchRecord
pub const DISPATCHES: Map<&[u8], DispatchRecord> = Map::new("dispatches");

/// Accepted inbound messages
/// Key: 32-byte message id, Value: ReceiptRecord
pub const RECEIPTS: Map<&[u8], ReceiptRecord> = Map::new("receipts");

/// Internal currency credited by counterpart settlements
/// Key: participant address, Value: cumulative credit
pub const SETTLEMENT_CREDITS: Map<&Addr, Uint256> = Map::new("settlement_credits");
