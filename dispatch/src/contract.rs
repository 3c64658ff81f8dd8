//! Participation Dispatch Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `conversion` - Fee split and currency conversion
//! - `ledger` - Exactly-once bookkeeping for inbound messages

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use common::{bytes32_to_hex, parse_chain_id};

use crate::error::ContractError;
use crate::execute::{
    execute_dispatch_participation, execute_emergency_withdraw, execute_receive_message,
    execute_transfer_ownership, execute_update_conversion_params,
    execute_update_counterpart_bridge, execute_update_messaging_params,
    parse_counterpart_address, reply_dispatch,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_bridge_address, query_config, query_contract_balance, query_dispatch,
    query_participation, query_participation_cost, query_participations,
    query_processed_message, query_receipt, query_settlement_credit, query_stats,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DISPATCH_REPLY_ID, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.owner.trim().is_empty() || msg.messenger.trim().is_empty() {
        return Err(ContractError::ZeroAddress);
    }
    let owner = deps.api.addr_validate(&msg.owner)?;
    let messenger = deps.api.addr_validate(&msg.messenger)?;

    let counterpart_chain = parse_chain_id(&msg.counterpart_chain).map_err(|e| {
        ContractError::InvalidChainId {
            reason: e.to_string(),
        }
    })?;
    let counterpart_bridge = parse_counterpart_address(&msg.counterpart_bridge)?;

    if msg.native_denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "native denom must not be empty".to_string(),
        });
    }
    if msg.conversion_rate.is_zero() {
        return Err(ContractError::InvalidConfig {
            reason: "conversion rate must be greater than zero".to_string(),
        });
    }
    if msg.messaging_gas_limit == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "messaging gas limit must be greater than zero".to_string(),
        });
    }

    let config = Config {
        owner,
        messenger,
        counterpart_chain,
        counterpart_bridge,
        native_denom: msg.native_denom,
        minimum_deposit: msg.minimum_deposit,
        conversion_rate: msg.conversion_rate,
        messaging_fee: msg.messaging_fee,
        messaging_gas_limit: msg.messaging_gas_limit,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("messenger", config.messenger)
        .add_attribute(
            "counterpart_chain",
            format!("0x{}", hex::encode(counterpart_chain)),
        )
        .add_attribute("counterpart_bridge", bytes32_to_hex(&counterpart_bridge))
        .add_attribute("native_denom", config.native_denom))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Participation flow
        ExecuteMsg::DispatchParticipation {
            competition_id,
            confidence,
        } => execute_dispatch_participation(deps, info, competition_id, confidence),
        ExecuteMsg::ReceiveMessage {
            origin_chain,
            origin_address,
            payload,
        } => execute_receive_message(deps, env, info, origin_chain, origin_address, payload),

        // Admin
        ExecuteMsg::UpdateCounterpartBridge { new_address } => {
            execute_update_counterpart_bridge(deps, info, new_address)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::UpdateMessagingParams { gas_limit, fee } => {
            execute_update_messaging_params(deps, info, gas_limit, fee)
        }
        ExecuteMsg::UpdateConversionParams {
            minimum_deposit,
            conversion_rate,
        } => execute_update_conversion_params(deps, info, minimum_deposit, conversion_rate),
        ExecuteMsg::EmergencyWithdraw {} => execute_emergency_withdraw(deps, env, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DISPATCH_REPLY_ID => reply_dispatch(deps, env, msg.result),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::ParticipationCost { native_amount } => {
            to_json_binary(&query_participation_cost(deps, native_amount)?)
        }
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps, env)?),
        QueryMsg::BridgeAddress {} => to_json_binary(&query_bridge_address(deps)?),
        QueryMsg::ContractBalance {} => to_json_binary(&query_contract_balance(deps, env)?),
        QueryMsg::Participation { participant } => {
            to_json_binary(&query_participation(deps, participant)?)
        }
        QueryMsg::Participations { start_after, limit } => {
            to_json_binary(&query_participations(deps, start_after, limit)?)
        }
        QueryMsg::ProcessedMessage { message_id } => {
            to_json_binary(&query_processed_message(deps, message_id)?)
        }
        QueryMsg::Dispatch { message_id } => to_json_binary(&query_dispatch(deps, message_id)?),
        QueryMsg::Receipt { message_id } => to_json_binary(&query_receipt(deps, message_id)?),
        QueryMsg::SettlementCredit { participant } => {
            to_json_binary(&query_settlement_credit(deps, participant)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if STATS.may_load(deps.storage)?.is_none() {
        STATS.save(deps.storage, &Stats::default())?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{Decimal256, HexBinary, Uint128};

    fn instantiate_msg() -> InstantiateMsg {
        InstantiateMsg {
            owner: "owner".to_string(),
            messenger: "messenger".to_string(),
            counterpart_chain: Binary::from(vec![0, 0, 0, 1]),
            counterpart_bridge: HexBinary::from(vec![0x42u8; 20]),
            native_denom: "uluna".to_string(),
            minimum_deposit: Uint128::new(1_000),
            conversion_rate: Decimal256::percent(150),
            messaging_fee: Uint128::new(100),
            messaging_gas_limit: 300_000,
        }
    }

    #[test]
    fn test_instantiate_stores_config() {
        let mut deps = mock_dependencies();
        let res = instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("creator", &[]),
            instantiate_msg(),
        )
        .unwrap();
        assert!(res
            .attributes
            .iter()
            .any(|a| a.key == "counterpart_chain" && a.value == "0x00000001"));

        let config = CONFIG.load(&deps.storage).unwrap();
        assert_eq!(config.owner.as_str(), "owner");
        assert_eq!(config.counterpart_chain, [0, 0, 0, 1]);
        assert_eq!(&config.counterpart_bridge[..12], &[0u8; 12]);
        assert_eq!(&config.counterpart_bridge[12..], &[0x42u8; 20]);
        assert_eq!(STATS.load(&deps.storage).unwrap(), Stats::default());
    }

    fn instantiate_with(mutate: impl FnOnce(&mut InstantiateMsg)) -> ContractError {
        let mut deps = mock_dependencies();
        let mut msg = instantiate_msg();
        mutate(&mut msg);
        instantiate(deps.as_mut(), mock_env(), mock_info("creator", &[]), msg).unwrap_err()
    }

    #[test]
    fn test_instantiate_rejects_bad_config() {
        assert_eq!(
            instantiate_with(|m| m.owner = String::new()),
            ContractError::ZeroAddress
        );
        assert_eq!(
            instantiate_with(|m| m.counterpart_bridge = HexBinary::from(vec![0u8; 32])),
            ContractError::ZeroAddress
        );
        assert!(matches!(
            instantiate_with(|m| m.counterpart_bridge = HexBinary::from(vec![1u8; 31])),
            ContractError::InvalidAddress { .. }
        ));
        assert!(matches!(
            instantiate_with(|m| m.counterpart_chain = Binary::from(vec![0, 0, 0, 0])),
            ContractError::InvalidChainId { .. }
        ));
        assert_eq!(
            instantiate_with(|m| m.conversion_rate = Decimal256::zero()),
            ContractError::InvalidConfig {
                reason: "conversion rate must be greater than zero".to_string(),
            }
        );
        assert_eq!(
            instantiate_with(|m| m.messaging_gas_limit = 0),
            ContractError::InvalidConfig {
                reason: "messaging gas limit must be greater than zero".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_reply_id() {
        let mut deps = mock_dependencies();
        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: 99,
                result: cosmwasm_std::SubMsgResult::Err("boom".to_string()),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::UnknownReplyId { id: 99 });
    }
}
