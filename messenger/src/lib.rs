//! Reference interchain messenger.
//!
//! A single-chain stand-in for a real interchain transport, used on devnets
//! and in integration tests. Outbound sends are recorded in an outbox and
//! assigned a message id. An admin relayer hands inbound messages to their
//! target contracts; each delivery runs as its own submessage, so one failing
//! delivery does not abort the rest of the batch.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
