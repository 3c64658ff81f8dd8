//! Common - Shared Types and Utilities for the Participation Dispatch Contracts
//!
//! This package provides the interchain transport interface that the dispatch
//! contract and the reference messenger both speak, plus the hashing helpers
//! used to derive message identifiers.

pub mod hash;
pub mod transport;

pub use hash::{bytes32_to_hex, keccak256, parse_chain_id, universal_address};
pub use transport::{find_message_id, Delivery, ReceiverExecuteMsg, TransportExecuteMsg};
