//! Inbound message handler.
//!
//! Order of work for every delivery:
//! 1. authenticate caller, origin chain and origin address
//! 2. decode and validate the payload
//! 3. admit the message id into the processed-message ledger
//! 4. apply the instruction
//!
//! Steps 3 and 4 run in the same transaction, so a delivery is either fully
//! applied and marked, or leaves no trace.

use cosmwasm_std::{
    from_json, Addr, Api, Binary, DepsMut, Env, Event, HexBinary, MessageInfo, Response,
    StdResult, Storage, Uint256,
};

use common::{bytes32_to_hex, parse_chain_id, universal_address};

use crate::error::ContractError;
use crate::ledger::{admit, derive_message_id};
use crate::msg::{CounterpartEnvelope, CounterpartInstruction};
use crate::state::{
    Config, ReceiptRecord, CONFIG, DISPATCHES, RECEIPTS, SETTLEMENT_CREDITS, STATS,
};

/// Validated instruction, ready to apply
enum Effect {
    ParticipationAccepted {
        outbound_message_id: [u8; 32],
    },
    Settlement {
        participant: Addr,
        competition_id: Uint256,
        amount: Uint256,
    },
}

/// Handle a message delivered by the transport.
pub fn execute_receive_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    origin_chain: Binary,
    origin_address: HexBinary,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let (origin_chain, origin_address) =
        match authorize_origin(&config, &info.sender, &origin_chain, &origin_address) {
            Ok(origin) => origin,
            Err(reason) => {
                deps.api.debug(&format!(
                    "rejected inbound message: caller={} reason={}",
                    info.sender, reason
                ));
                return Err(ContractError::UnauthorizedOrigin { reason });
            }
        };

    let envelope: CounterpartEnvelope =
        from_json(&payload).map_err(|e| ContractError::InvalidPayload {
            reason: e.to_string(),
        })?;

    let message_id = match &envelope.message_id {
        Some(id) => to_bytes32(id, "message_id")?,
        None => derive_message_id(&origin_chain, &origin_address, payload.as_slice()),
    };

    let effect = validate_instruction(deps.api, envelope.instruction)?;

    admit(deps.storage, &message_id)?;

    let (summary, extra_attributes) = apply_effect(deps.storage, effect)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_messages_received += 1;
    STATS.save(deps.storage, &stats)?;

    RECEIPTS.save(
        deps.storage,
        &message_id,
        &ReceiptRecord {
            origin_address,
            payload_summary: summary.clone(),
            received_at: env.block.time,
        },
    )?;

    let event = Event::new("counterpart_message_received")
        .add_attribute("message_id", bytes32_to_hex(&message_id))
        .add_attribute("origin_address", bytes32_to_hex(&origin_address))
        .add_attribute("payload_summary", summary)
        .add_attributes(extra_attributes);

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "receive_message")
        .add_attribute("message_id", bytes32_to_hex(&message_id)))
}

/// Check caller and claimed origin against the configuration.
///
/// Returns the normalised origin, or the rejection reason.
fn authorize_origin(
    config: &Config,
    sender: &Addr,
    origin_chain: &Binary,
    origin_address: &HexBinary,
) -> Result<([u8; 4], [u8; 32]), String> {
    if *sender != config.messenger {
        return Err(format!("caller {} is not the messenger", sender));
    }

    let chain = parse_chain_id(origin_chain).map_err(|e| e.to_string())?;
    if chain != config.counterpart_chain {
        return Err(format!(
            "origin chain 0x{} is not the counterpart chain",
            hex::encode(chain)
        ));
    }

    let address = universal_address(origin_address.as_slice()).map_err(|e| e.to_string())?;
    if address != config.counterpart_bridge {
        return Err(format!(
            "origin address {} is not the counterpart bridge",
            bytes32_to_hex(&address)
        ));
    }

    Ok((chain, address))
}

fn validate_instruction(
    api: &dyn Api,
    instruction: CounterpartInstruction,
) -> Result<Effect, ContractError> {
    match instruction {
        CounterpartInstruction::ParticipationAccepted {
            outbound_message_id,
        } => Ok(Effect::ParticipationAccepted {
            outbound_message_id: to_bytes32(&outbound_message_id, "outbound_message_id")?,
        }),
        CounterpartInstruction::Settlement {
            participant,
            competition_id,
            amount,
        } => {
            let participant = api
                .addr_validate(&participant)
                .map_err(|e| ContractError::InvalidPayload {
                    reason: format!("participant: {}", e),
                })?;
            Ok(Effect::Settlement {
                participant,
                competition_id,
                amount,
            })
        }
    }
}

/// Apply a validated instruction. Returns the payload summary and extra event attributes.
fn apply_effect(
    storage: &mut dyn Storage,
    effect: Effect,
) -> Result<(String, Vec<(String, String)>), ContractError> {
    match effect {
        Effect::ParticipationAccepted {
            outbound_message_id,
        } => {
            let known = match DISPATCHES.may_load(storage, &outbound_message_id)? {
                Some(mut record) => {
                    record.acknowledged = true;
                    DISPATCHES.save(storage, &outbound_message_id, &record)?;
                    true
                }
                None => false,
            };
            let hex_id = bytes32_to_hex(&outbound_message_id);
            Ok((
                format!("participation_accepted:{}", hex_id),
                vec![
                    ("outbound_message_id".to_string(), hex_id),
                    ("known_dispatch".to_string(), known.to_string()),
                ],
            ))
        }
        Effect::Settlement {
            participant,
            competition_id,
            amount,
        } => {
            let credit = SETTLEMENT_CREDITS.update(storage, &participant, |credit| -> StdResult<_> {
                Ok(credit.unwrap_or_default().checked_add(amount)?)
            })?;
            Ok((
                format!("settlement:{}:{}:{}", participant, competition_id, amount),
                vec![
                    ("participant".to_string(), participant.to_string()),
                    ("credited".to_string(), amount.to_string()),
                    ("total_credit".to_string(), credit.to_string()),
                ],
            ))
        }
    }
}

fn to_bytes32(value: &HexBinary, field: &str) -> Result<[u8; 32], ContractError> {
    value
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidPayload {
            reason: format!("{} must be 32 bytes, got {}", field, value.len()),
        })
}
