//! Outbound participation handlers.
//!
//! A dispatch is one transaction: the participation is credited, the
//! instruction is submitted to the transport as a submessage, and the reply
//! records the transport-assigned message id. A failed send fails the reply,
//! which reverts the credit together with everything else.

use cosmwasm_std::{
    to_json_binary, Binary, Coin, DepsMut, Env, Event, HexBinary, MessageInfo, Response, StdResult,
    SubMsg, SubMsgResult, Uint128, Uint256,
};

use common::hash::hex_to_bytes32;
use common::{bytes32_to_hex, find_message_id, TransportExecuteMsg};

use crate::conversion::quote;
use crate::error::ContractError;
use crate::msg::{OutboundMessage, ParticipationInstruction};
use crate::state::{
    DispatchRecord, PendingDispatch, CONFIG, DISPATCHES, DISPATCH_REPLY_ID, MAX_CONFIDENCE,
    PARTICIPATIONS, PENDING_DISPATCH, STATS,
};

// ============================================================================
// DispatchParticipation
// ============================================================================

/// Convert the attached deposit and forward it to the counterpart.
pub fn execute_dispatch_participation(
    deps: DepsMut,
    info: MessageInfo,
    competition_id: Uint256,
    confidence: Uint256,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if confidence > Uint256::from(MAX_CONFIDENCE) {
        return Err(ContractError::InvalidConfidence {
            confidence: confidence.to_string(),
        });
    }

    let native_amount = deposited_amount(&info, &config.native_denom)?;
    let (cost, converted_amount) = quote(&config, native_amount)?;

    if config.counterpart_bridge == [0u8; 32] {
        return Err(ContractError::InvalidBridgeContract);
    }

    // Participation record and global stats move together
    PARTICIPATIONS.update(deps.storage, &info.sender, |record| -> StdResult<_> {
        let mut record = record.unwrap_or_default();
        record.participations += 1;
        record.native_deposited = record.native_deposited.checked_add(native_amount)?;
        Ok(record)
    })?;
    let mut stats = STATS.load(deps.storage)?;
    stats.total_participations += 1;
    stats.total_native_received = stats.total_native_received.checked_add(native_amount)?;
    STATS.save(deps.storage, &stats)?;

    let instruction = ParticipationInstruction {
        participant: info.sender.to_string(),
        competition_id,
        confidence,
        converted_amount,
        cost: cost.clone(),
    };
    let fee_funds = if cost.messaging_fee.is_zero() {
        vec![]
    } else {
        vec![Coin {
            denom: config.native_denom.clone(),
            amount: cost.messaging_fee,
        }]
    };
    let send = TransportExecuteMsg::SendCrossChainMessage {
        destination_chain: Binary::from(config.counterpart_chain.to_vec()),
        destination_address: HexBinary::from(config.counterpart_bridge.to_vec()),
        message: to_json_binary(&instruction)?,
        required_gas_limit: config.messaging_gas_limit,
    }
    .into_cosmos_msg(config.messenger.to_string(), fee_funds)?;

    PENDING_DISPATCH.save(
        deps.storage,
        &PendingDispatch {
            participant: info.sender.clone(),
            competition_id,
            confidence,
            cost: cost.clone(),
            converted_amount,
        },
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(send, DISPATCH_REPLY_ID))
        .add_attribute("action", "dispatch_participation")
        .add_attribute("participant", info.sender)
        .add_attribute("competition_id", competition_id.to_string())
        .add_attribute("total_cost", cost.total_cost.to_string())
        .add_attribute("messaging_fee", cost.messaging_fee.to_string())
        .add_attribute("net_participation", cost.net_participation.to_string()))
}

/// The deposit attached to the call. No funds means a zero deposit.
fn deposited_amount(info: &MessageInfo, native_denom: &str) -> Result<Uint128, ContractError> {
    match info.funds.as_slice() {
        [] => Ok(Uint128::zero()),
        [coin] if coin.denom == native_denom => Ok(coin.amount),
        [coin] => Err(ContractError::InvalidFunds {
            reason: format!("expected {}, got {}", native_denom, coin.denom),
        }),
        _ => Err(ContractError::InvalidFunds {
            reason: "Only one token type allowed per participation".to_string(),
        }),
    }
}

// ============================================================================
// Transport reply
// ============================================================================

/// Finish a dispatch once the transport has answered.
pub fn reply_dispatch(
    deps: DepsMut,
    env: Env,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let pending = PENDING_DISPATCH.load(deps.storage)?;
    PENDING_DISPATCH.remove(deps.storage);

    let response = match result {
        SubMsgResult::Ok(response) => response,
        SubMsgResult::Err(reason) => return Err(ContractError::MessageSendFailed { reason }),
    };

    let message_id_hex =
        find_message_id(&response.events).ok_or_else(|| ContractError::MessageSendFailed {
            reason: "transport did not report a message id".to_string(),
        })?;
    let message_id =
        hex_to_bytes32(&message_id_hex).map_err(|e| ContractError::MessageSendFailed {
            reason: format!("transport reported malformed message id: {}", e),
        })?;

    let record = DispatchRecord {
        participant: pending.participant.clone(),
        competition_id: pending.competition_id,
        confidence: pending.confidence,
        native_amount: pending.cost.total_cost,
        converted_amount: pending.converted_amount,
        dispatched_at: env.block.time,
        acknowledged: false,
    };
    DISPATCHES.save(deps.storage, &message_id, &record)?;

    let outbound = OutboundMessage {
        message_id: HexBinary::from(message_id.to_vec()),
        participant: pending.participant.clone(),
        competition_id: pending.competition_id,
        converted_amount: pending.converted_amount,
        confidence: pending.confidence,
    };

    let event = Event::new("cross_chain_participation_sent")
        .add_attribute("participant", pending.participant)
        .add_attribute("competition_id", pending.competition_id.to_string())
        .add_attribute("native_amount", pending.cost.total_cost.to_string())
        .add_attribute("converted_amount", pending.converted_amount.to_string())
        .add_attribute("confidence", pending.confidence.to_string())
        .add_attribute("message_id", bytes32_to_hex(&message_id));

    Ok(Response::new()
        .add_event(event)
        .set_data(to_json_binary(&outbound)?))
}
