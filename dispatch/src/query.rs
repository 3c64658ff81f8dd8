//! Query handlers for the participation dispatch contract.
//!
//! Queries never fail on a missing record where an empty answer is meaningful:
//! unknown participants report zero, unknown message ids report `None`.

use cosmwasm_std::{Addr, Binary, Deps, Env, HexBinary, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::conversion::quote;
use crate::ledger::is_processed;
use crate::msg::{
    BridgeAddressResponse, ConfigResponse, ContractBalanceResponse, DispatchResponse,
    ParticipationCostResponse, ParticipationResponse, ParticipationsResponse,
    ProcessedMessageResponse, ReceiptResponse, SettlementCreditResponse, StatsResponse,
};
use crate::state::{
    ParticipationRecord, CONFIG, DISPATCHES, PARTICIPATIONS, RECEIPTS, SETTLEMENT_CREDITS, STATS,
};

const DEFAULT_PAGE_LIMIT: u32 = 10;
const MAX_PAGE_LIMIT: u32 = 50;

// ============================================================================
// Config Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        messenger: config.messenger,
        counterpart_chain: Binary::from(config.counterpart_chain.to_vec()),
        counterpart_bridge: HexBinary::from(config.counterpart_bridge.to_vec()),
        native_denom: config.native_denom,
        minimum_deposit: config.minimum_deposit,
        conversion_rate: config.conversion_rate,
        messaging_fee: config.messaging_fee,
        messaging_gas_limit: config.messaging_gas_limit,
    })
}

/// Query the counterpart chain and bridge address.
pub fn query_bridge_address(deps: Deps) -> StdResult<BridgeAddressResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(BridgeAddressResponse {
        chain: Binary::from(config.counterpart_chain.to_vec()),
        address: HexBinary::from(config.counterpart_bridge.to_vec()),
    })
}

/// Quote the fee split and converted amount for a deposit.
pub fn query_participation_cost(
    deps: Deps,
    native_amount: Uint128,
) -> StdResult<ParticipationCostResponse> {
    let config = CONFIG.load(deps.storage)?;
    let (cost, converted_amount) =
        quote(&config, native_amount).map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(ParticipationCostResponse {
        total_cost: cost.total_cost,
        messaging_fee: cost.messaging_fee,
        net_participation: cost.net_participation,
        converted_amount,
    })
}

// ============================================================================
// Accounting Queries
// ============================================================================

/// Query aggregate statistics together with the live native balance.
pub fn query_stats(deps: Deps, env: Env) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    let balance = query_contract_balance(deps, env)?;
    Ok(StatsResponse {
        total_participations: stats.total_participations,
        total_native_received: stats.total_native_received,
        total_messages_received: stats.total_messages_received,
        contract_balance: balance.amount,
    })
}

/// Query the native balance held by this contract.
pub fn query_contract_balance(deps: Deps, env: Env) -> StdResult<ContractBalanceResponse> {
    let config = CONFIG.load(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(env.contract.address, &config.native_denom)?;
    Ok(ContractBalanceResponse {
        denom: balance.denom,
        amount: balance.amount,
    })
}

fn participation_response(participant: Addr, record: ParticipationRecord) -> ParticipationResponse {
    ParticipationResponse {
        participant,
        participations: record.participations,
        native_deposited: record.native_deposited,
    }
}

/// Query one participant. Unknown participants report zero.
pub fn query_participation(deps: Deps, participant: String) -> StdResult<ParticipationResponse> {
    let participant = deps.api.addr_validate(&participant)?;
    let record = PARTICIPATIONS
        .may_load(deps.storage, &participant)?
        .unwrap_or_default();
    Ok(participation_response(participant, record))
}

/// List participation records in address order.
pub fn query_participations(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ParticipationsResponse> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start: Option<Bound<&Addr>> = start_addr.as_ref().map(Bound::exclusive);

    let participations = PARTICIPATIONS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (participant, record) = item?;
            Ok(participation_response(participant, record))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ParticipationsResponse { participations })
}

/// Query settlement credit accumulated by a participant.
pub fn query_settlement_credit(
    deps: Deps,
    participant: String,
) -> StdResult<SettlementCreditResponse> {
    let participant = deps.api.addr_validate(&participant)?;
    let amount = SETTLEMENT_CREDITS
        .may_load(deps.storage, &participant)?
        .unwrap_or_default();
    Ok(SettlementCreditResponse {
        participant,
        amount,
    })
}

// ============================================================================
// Message Queries
// ============================================================================

fn message_key(message_id: &HexBinary) -> StdResult<[u8; 32]> {
    message_id
        .as_slice()
        .try_into()
        .map_err(|_| StdError::generic_err("message id must be 32 bytes"))
}

/// Whether an inbound message id has already been applied.
pub fn query_processed_message(
    deps: Deps,
    message_id: HexBinary,
) -> StdResult<ProcessedMessageResponse> {
    let key = message_key(&message_id)?;
    Ok(ProcessedMessageResponse {
        processed: is_processed(deps.storage, &key)?,
        message_id,
    })
}

/// Query an outbound dispatch by the transport's message id.
pub fn query_dispatch(deps: Deps, message_id: HexBinary) -> StdResult<Option<DispatchResponse>> {
    let key = message_key(&message_id)?;
    let record = DISPATCHES.may_load(deps.storage, &key)?;
    Ok(record.map(|record| DispatchResponse {
        message_id,
        participant: record.participant,
        competition_id: record.competition_id,
        confidence: record.confidence,
        native_amount: record.native_amount,
        converted_amount: record.converted_amount,
        dispatched_at: record.dispatched_at,
        acknowledged: record.acknowledged,
    }))
}

/// Query an accepted inbound message.
pub fn query_receipt(deps: Deps, message_id: HexBinary) -> StdResult<Option<ReceiptResponse>> {
    let key = message_key(&message_id)?;
    let record = RECEIPTS.may_load(deps.storage, &key)?;
    Ok(record.map(|record| ReceiptResponse {
        message_id,
        origin_address: HexBinary::from(record.origin_address.to_vec()),
        payload_summary: record.payload_summary,
        received_at: record.received_at,
    }))
}
