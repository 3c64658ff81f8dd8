//! Error types for the participation dispatch contract
//!
//! Every variant belongs to one class of the error taxonomy (see [`ErrorKind`]).
//! Any error returned from an entry point aborts the transaction, so no
//! partial write ever survives.

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    OnlyOwner,

    #[error("Unauthorized origin: {reason}")]
    UnauthorizedOrigin { reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid confidence {confidence}: must be between 0 and 100")]
    InvalidConfidence { confidence: String },

    #[error("Insufficient amount: minimum deposit is {minimum}, got {got}")]
    InsufficientAmount { minimum: Uint128, got: Uint128 },

    #[error("Messaging fee {fee} exceeds deposit {deposit}")]
    FeeExceedsDeposit { fee: Uint128, deposit: Uint128 },

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("Counterpart bridge contract is not configured")]
    InvalidBridgeContract,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid chain id: {reason}")]
    InvalidChainId { reason: String },

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    // ========================================================================
    // Idempotency Errors
    // ========================================================================

    #[error("Message already processed: {message_id}")]
    MessageAlreadyProcessed { message_id: String },

    // ========================================================================
    // Transport Errors
    // ========================================================================

    #[error("Message send failed: {reason}")]
    MessageSendFailed { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}

/// Error classes, used by callers to decide how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; safe to retry after correcting it
    Validation,
    /// Caller is not allowed; logged as potential misuse
    Authorization,
    /// Duplicate delivery; benign under at-least-once transport
    Idempotency,
    /// Transport rejected the send; caller may retry
    Transport,
    /// Host or storage failure
    Storage,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) | ContractError::Overflow(_) => ErrorKind::Storage,
            ContractError::OnlyOwner | ContractError::UnauthorizedOrigin { .. } => {
                ErrorKind::Authorization
            }
            ContractError::MessageAlreadyProcessed { .. } => ErrorKind::Idempotency,
            ContractError::MessageSendFailed { .. } | ContractError::UnknownReplyId { .. } => {
                ErrorKind::Transport
            }
            ContractError::InvalidConfidence { .. }
            | ContractError::InsufficientAmount { .. }
            | ContractError::FeeExceedsDeposit { .. }
            | ContractError::InvalidFunds { .. }
            | ContractError::ZeroAddress
            | ContractError::InvalidBridgeContract
            | ContractError::InvalidAddress { .. }
            | ContractError::InvalidChainId { .. }
            | ContractError::InvalidPayload { .. }
            | ContractError::InvalidConfig { .. } => ErrorKind::Validation,
        }
    }

    /// Whether the failure is an expected no-op rather than an operational fault.
    pub fn is_benign(&self) -> bool {
        self.kind() == ErrorKind::Idempotency
    }
}
