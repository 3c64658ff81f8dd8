//! Admin operations handlers.
//!
//! This module handles:
//! - Counterpart bridge updates
//! - Ownership transfer
//! - Messaging and conversion parameters
//! - Emergency withdrawal of the native balance
//!
//! Every handler is owner-gated and validates all input before writing.

use cosmwasm_std::{
    BankMsg, Coin, Decimal256, Deps, DepsMut, Env, Event, HexBinary, MessageInfo, Response,
    Uint128,
};

use common::{bytes32_to_hex, universal_address};

use crate::error::ContractError;
use crate::state::{Config, CONFIG};

/// Load config and reject anyone but the owner.
fn load_config_as_owner(deps: Deps, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        deps.api.debug(&format!(
            "rejected admin call from non-owner {}",
            info.sender
        ));
        return Err(ContractError::OnlyOwner);
    }
    Ok(config)
}

/// Parse a counterpart address; empty or all-zero is `ZeroAddress`.
pub fn parse_counterpart_address(address: &HexBinary) -> Result<[u8; 32], ContractError> {
    if address.is_empty() {
        return Err(ContractError::ZeroAddress);
    }
    let bytes = universal_address(address.as_slice()).map_err(|e| ContractError::InvalidAddress {
        reason: e.to_string(),
    })?;
    if bytes == [0u8; 32] {
        return Err(ContractError::ZeroAddress);
    }
    Ok(bytes)
}

// ============================================================================
// Counterpart Bridge
// ============================================================================

/// Point dispatches and inbound authorization at a new counterpart bridge.
pub fn execute_update_counterpart_bridge(
    deps: DepsMut,
    info: MessageInfo,
    new_address: HexBinary,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.as_ref(), &info)?;
    let new_bridge = parse_counterpart_address(&new_address)?;

    let previous = config.counterpart_bridge;
    config.counterpart_bridge = new_bridge;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(
            Event::new("counterpart_bridge_updated")
                .add_attribute("previous_bridge", bytes32_to_hex(&previous))
                .add_attribute("new_bridge", bytes32_to_hex(&new_bridge)),
        )
        .add_attribute("action", "update_counterpart_bridge"))
}

// ============================================================================
// Ownership
// ============================================================================

/// Replace the owner. The previous owner loses all rights in the same write.
pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.as_ref(), &info)?;

    if new_owner.trim().is_empty() {
        return Err(ContractError::ZeroAddress);
    }
    let new_owner = deps.api.addr_validate(&new_owner)?;

    let previous = std::mem::replace(&mut config.owner, new_owner.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(
            Event::new("ownership_transferred")
                .add_attribute("previous_owner", previous)
                .add_attribute("new_owner", new_owner),
        )
        .add_attribute("action", "transfer_ownership"))
}

// ============================================================================
// Parameters
// ============================================================================

/// Update the gas limit and fee budget used for transport sends.
pub fn execute_update_messaging_params(
    deps: DepsMut,
    info: MessageInfo,
    gas_limit: Option<u64>,
    fee: Option<Uint128>,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.as_ref(), &info)?;

    if let Some(gas_limit) = gas_limit {
        if gas_limit == 0 {
            return Err(ContractError::InvalidConfig {
                reason: "messaging gas limit must be greater than zero".to_string(),
            });
        }
        config.messaging_gas_limit = gas_limit;
    }
    if let Some(fee) = fee {
        config.messaging_fee = fee;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(
            Event::new("messaging_params_updated")
                .add_attribute("gas_limit", config.messaging_gas_limit.to_string())
                .add_attribute("fee", config.messaging_fee.to_string()),
        )
        .add_attribute("action", "update_messaging_params"))
}

/// Update the minimum deposit and conversion rate.
pub fn execute_update_conversion_params(
    deps: DepsMut,
    info: MessageInfo,
    minimum_deposit: Option<Uint128>,
    conversion_rate: Option<Decimal256>,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.as_ref(), &info)?;

    if let Some(rate) = conversion_rate {
        if rate.is_zero() {
            return Err(ContractError::InvalidConfig {
                reason: "conversion rate must be greater than zero".to_string(),
            });
        }
        config.conversion_rate = rate;
    }
    if let Some(minimum_deposit) = minimum_deposit {
        config.minimum_deposit = minimum_deposit;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(
            Event::new("conversion_params_updated")
                .add_attribute("minimum_deposit", config.minimum_deposit.to_string())
                .add_attribute("conversion_rate", config.conversion_rate.to_string()),
        )
        .add_attribute("action", "update_conversion_params"))
}

// ============================================================================
// Emergency Withdraw
// ============================================================================

/// Send the whole native balance to the owner. A zero balance is a no-op.
pub fn execute_emergency_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = load_config_as_owner(deps.as_ref(), &info)?;

    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.native_denom)?;

    let mut response = Response::new().add_attribute("action", "emergency_withdraw");
    if !balance.amount.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: config.owner.to_string(),
            amount: vec![Coin {
                denom: config.native_denom.clone(),
                amount: balance.amount,
            }],
        });
    }

    Ok(response.add_event(
        Event::new("emergency_withdraw")
            .add_attribute("recipient", config.owner)
            .add_attribute("denom", config.native_denom)
            .add_attribute("amount", balance.amount.to_string()),
    ))
}
