//! Execute handlers for the participation dispatch contract.
//!
//! - `dispatch` - outbound participation and the transport reply
//! - `receive` - inbound messages from the transport
//! - `admin` - owner-gated configuration and emergency withdrawal

mod admin;
mod dispatch;
mod receive;

pub use admin::*;
pub use dispatch::*;
pub use receive::*;
