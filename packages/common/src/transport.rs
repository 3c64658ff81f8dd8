//! Interchain transport interface.
//!
//! The dispatch contract never talks to a concrete bridge protocol. It sends
//! [`TransportExecuteMsg`] to whatever transport contract is configured and
//! exposes [`ReceiverExecuteMsg`] for inbound delivery. Delivery is
//! at-least-once and may be reordered or duplicated.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, Event, HexBinary, StdResult, WasmMsg};

/// Wasm attribute carrying the transport-assigned message id (0x-prefixed hex)
pub const MESSAGE_ID_ATTRIBUTE: &str = "message_id";

/// Messages a sender contract submits to the transport.
///
/// The messaging fee is attached as funds.
#[cw_serde]
pub enum TransportExecuteMsg {
    SendCrossChainMessage {
        /// Destination chain (4-byte chain id)
        destination_chain: Binary,
        /// Destination contract on the remote chain (20 or 32 bytes)
        destination_address: HexBinary,
        /// Opaque payload
        message: Binary,
        /// Gas the destination execution may consume
        required_gas_limit: u64,
    },
}

impl TransportExecuteMsg {
    pub fn into_cosmos_msg<T: Into<String>>(
        self,
        transport: T,
        funds: Vec<cosmwasm_std::Coin>,
    ) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: transport.into(),
            msg: to_json_binary(&self)?,
            funds,
        }
        .into())
    }
}

/// Callback a receiving contract exposes to the transport.
#[cw_serde]
pub enum ReceiverExecuteMsg {
    ReceiveMessage {
        /// Chain the message originated from (4-byte chain id)
        origin_chain: Binary,
        /// Sender contract on the origin chain
        origin_address: HexBinary,
        /// Opaque payload
        payload: Binary,
    },
}

impl ReceiverExecuteMsg {
    pub fn into_cosmos_msg<T: Into<String>>(self, contract_addr: T) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: to_json_binary(&self)?,
            funds: vec![],
        }
        .into())
    }
}

/// One inbound message handed to the transport's relayer for delivery.
#[cw_serde]
pub struct Delivery {
    /// Receiving contract on this chain
    pub target: String,
    pub origin_chain: Binary,
    pub origin_address: HexBinary,
    pub payload: Binary,
}

/// Find the transport-assigned message id in the events of a send.
pub fn find_message_id(events: &[Event]) -> Option<String> {
    events
        .iter()
        .filter(|event| event.ty == "wasm")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == MESSAGE_ID_ATTRIBUTE)
        .map(|attr| attr.value.clone())
}
