//! Participation Dispatch Contract - Cross-Chain Competition Entries
//!
//! This contract accepts native-currency deposits from participants, converts
//! them into the internal currency of a counterpart chain and forwards a
//! participation instruction through an interchain transport contract.
//!
//! # Outgoing Flow (Dispatch)
//! 1. Participant calls `DispatchParticipation` with the deposit attached
//! 2. The messaging fee is split off and the remainder converted
//! 3. The instruction is sent to the transport as a submessage
//! 4. The transport's message id is recorded in the reply
//!
//! A transport failure reverts the whole dispatch, including the counters.
//!
//! # Incoming Flow (Receive)
//! 1. The transport calls `ReceiveMessage` with the origin and payload
//! 2. Origin chain and address must match the counterpart bridge
//! 3. The message id is admitted at most once
//! 4. The instruction is applied and a receipt stored

pub mod contract;
pub mod conversion;
pub mod error;
mod execute;
pub mod ledger;
pub mod msg;
mod query;
pub mod state;

pub use crate::conversion::{compute_cost, convert, CostBreakdown};
pub use crate::error::{ContractError, ErrorKind};
pub use crate::ledger::derive_message_id;
