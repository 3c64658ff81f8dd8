//! Processed-message ledger (exactly-once admission).
//!
//! The transport delivers at-least-once. A message id is admitted the first
//! time it is seen and rejected forever after. Entries are write-once: nothing
//! in the contract clears them.

use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

use common::{bytes32_to_hex, keccak256};

use crate::error::ContractError;

/// Processed inbound message ids
/// Key: 32-byte message id, Value: always true
pub const PROCESSED_MESSAGES: Map<&[u8], bool> = Map::new("processed_messages");

/// Whether `message_id` has already been admitted.
pub fn is_processed(storage: &dyn Storage, message_id: &[u8; 32]) -> StdResult<bool> {
    Ok(PROCESSED_MESSAGES
        .may_load(storage, message_id)?
        .unwrap_or(false))
}

/// Check-and-set. Marks `message_id` as processed, or fails with
/// `MessageAlreadyProcessed` if it already was.
pub fn admit(storage: &mut dyn Storage, message_id: &[u8; 32]) -> Result<(), ContractError> {
    if is_processed(storage, message_id)? {
        return Err(ContractError::MessageAlreadyProcessed {
            message_id: bytes32_to_hex(message_id),
        });
    }
    PROCESSED_MESSAGES.save(storage, message_id, &true)?;
    Ok(())
}

/// Message id for payloads that do not carry one.
///
/// `keccak256(origin_chain[4] || origin_address[32] || payload)`. Both prefixes
/// are fixed width, so the encoding is unambiguous.
pub fn derive_message_id(
    origin_chain: &[u8; 4],
    origin_address: &[u8; 32],
    payload: &[u8],
) -> [u8; 32] {
    let mut data = Vec::with_capacity(4 + 32 + payload.len());
    data.extend_from_slice(origin_chain);
    data.extend_from_slice(origin_address);
    data.extend_from_slice(payload);
    keccak256(&data)
}
