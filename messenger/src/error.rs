use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Messenger is halted")]
    Halted,

    #[error("Gas limit {requested} exceeds maximum {max}")]
    GasLimitExceeded { requested: u64, max: u64 },

    #[error("Insufficient messaging fee: required {required}, got {got}")]
    InsufficientFee { required: Uint128, got: Uint128 },

    #[error("Invalid destination: {reason}")]
    InvalidDestination { reason: String },

    #[error("Relay batch is empty")]
    EmptyBatch,
}
