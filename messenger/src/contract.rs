use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo, Reply,
    Response, StdError, StdResult, SubMsg, SubMsgResult, Uint128,
};
use cw2::set_contract_version;

use common::{
    bytes32_to_hex, keccak256, parse_chain_id, universal_address, Delivery, ReceiverExecuteMsg,
};

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, NonceResponse, OutboxMessageResponse, QueryMsg,
};
use crate::state::{Config, OutboxMessage, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, NONCE, OUTBOX};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let chain_id = parse_chain_id(&msg.chain_id).map_err(StdError::generic_err)?;

    let config = Config {
        admin,
        chain_id,
        native_denom: msg.native_denom,
        min_fee: msg.min_fee,
        max_gas_limit: msg.max_gas_limit,
        halted: false,
    };
    CONFIG.save(deps.storage, &config)?;
    NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("min_fee", config.min_fee))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SendCrossChainMessage {
            destination_chain,
            destination_address,
            message,
            required_gas_limit,
        } => execute_send(
            deps,
            env,
            info,
            destination_chain,
            destination_address,
            message,
            required_gas_limit,
        ),
        ExecuteMsg::Relay { deliveries } => execute_relay(deps, info, deliveries),
        ExecuteMsg::SetHalted { halted } => execute_set_halted(deps, info, halted),
    }
}

/// `keccak256(chain_id || nonce || sender || destination_chain || destination_address || message)`
fn compute_message_id(
    chain_id: &[u8; 4],
    nonce: u64,
    sender: &str,
    destination_chain: &[u8; 4],
    destination_address: &[u8; 32],
    message: &[u8],
) -> [u8; 32] {
    let mut data = Vec::with_capacity(4 + 8 + sender.len() + 4 + 32 + message.len());
    data.extend_from_slice(chain_id);
    data.extend_from_slice(&nonce.to_be_bytes());
    data.extend_from_slice(sender.as_bytes());
    data.extend_from_slice(destination_chain);
    data.extend_from_slice(destination_address);
    data.extend_from_slice(message);
    keccak256(&data)
}

fn execute_send(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    destination_chain: Binary,
    destination_address: HexBinary,
    message: Binary,
    required_gas_limit: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.halted {
        return Err(ContractError::Halted);
    }
    if required_gas_limit > config.max_gas_limit {
        return Err(ContractError::GasLimitExceeded {
            requested: required_gas_limit,
            max: config.max_gas_limit,
        });
    }

    let fee_paid = info
        .funds
        .iter()
        .filter(|coin| coin.denom == config.native_denom)
        .fold(Uint128::zero(), |acc, coin| acc + coin.amount);
    if fee_paid < config.min_fee {
        return Err(ContractError::InsufficientFee {
            required: config.min_fee,
            got: fee_paid,
        });
    }

    let dest_chain = parse_chain_id(&destination_chain).map_err(|e| {
        ContractError::InvalidDestination {
            reason: e.to_string(),
        }
    })?;
    let dest_address = universal_address(destination_address.as_slice()).map_err(|e| {
        ContractError::InvalidDestination {
            reason: e.to_string(),
        }
    })?;

    let nonce = NONCE.load(deps.storage)?;
    NONCE.save(deps.storage, &(nonce + 1))?;

    let message_id = compute_message_id(
        &config.chain_id,
        nonce,
        info.sender.as_str(),
        &dest_chain,
        &dest_address,
        message.as_slice(),
    );
    OUTBOX.save(
        deps.storage,
        &message_id,
        &OutboxMessage {
            sender: info.sender.clone(),
            nonce,
            destination_chain,
            destination_address,
            message,
            gas_limit: required_gas_limit,
            fee_paid,
            sent_at: env.block.time,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "send_cross_chain_message")
        .add_attribute("sender", info.sender)
        .add_attribute("nonce", nonce.to_string())
        .add_attribute(common::transport::MESSAGE_ID_ATTRIBUTE, bytes32_to_hex(&message_id)))
}

fn execute_relay(
    deps: DepsMut,
    info: MessageInfo,
    deliveries: Vec<Delivery>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    if deliveries.is_empty() {
        return Err(ContractError::EmptyBatch);
    }

    let count = deliveries.len();
    let mut submsgs = Vec::with_capacity(count);
    for (index, delivery) in deliveries.into_iter().enumerate() {
        let target = deps.api.addr_validate(&delivery.target)?;
        let msg = ReceiverExecuteMsg::ReceiveMessage {
            origin_chain: delivery.origin_chain,
            origin_address: delivery.origin_address,
            payload: delivery.payload,
        }
        .into_cosmos_msg(target)?;
        // Reply id is the position in the batch
        submsgs.push(SubMsg::reply_on_error(msg, index as u64));
    }

    Ok(Response::new()
        .add_submessages(submsgs)
        .add_attribute("action", "relay")
        .add_attribute("delivery_count", count.to_string()))
}

fn execute_set_halted(
    deps: DepsMut,
    info: MessageInfo,
    halted: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    config.halted = halted;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_halted")
        .add_attribute("halted", halted.to_string()))
}

/// A failed delivery is recorded and the rest of the batch carries on.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.result {
        SubMsgResult::Err(error) => Ok(Response::new()
            .add_attribute("delivery_failed", msg.id.to_string())
            .add_attribute("error", error)),
        SubMsgResult::Ok(_) => {
            Ok(Response::new().add_attribute("delivery_succeeded", msg.id.to_string()))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::OutboxMessage { message_id } => {
            to_json_binary(&query_outbox_message(deps, message_id)?)
        }
        QueryMsg::Nonce {} => to_json_binary(&NonceResponse {
            nonce: NONCE.load(deps.storage)?,
        }),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        chain_id: Binary::from(config.chain_id.to_vec()),
        native_denom: config.native_denom,
        min_fee: config.min_fee,
        max_gas_limit: config.max_gas_limit,
        halted: config.halted,
    })
}

fn query_outbox_message(
    deps: Deps,
    message_id: HexBinary,
) -> StdResult<Option<OutboxMessageResponse>> {
    let message = OUTBOX.may_load(deps.storage, message_id.as_slice())?;
    Ok(message.map(|m| OutboxMessageResponse {
        message_id,
        sender: m.sender,
        nonce: m.nonce,
        destination_chain: m.destination_chain,
        destination_address: m.destination_address,
        message: m.message,
        gas_limit: m.gas_limit,
        fee_paid: m.fee_paid,
        sent_at: m.sent_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{coins, from_json};

    fn setup(deps: DepsMut) {
        instantiate(
            deps,
            mock_env(),
            mock_info("creator", &[]),
            InstantiateMsg {
                admin: "admin".to_string(),
                chain_id: Binary::from(vec![0, 0, 0, 1]),
                native_denom: "uluna".to_string(),
                min_fee: Uint128::new(100),
                max_gas_limit: 1_000_000,
            },
        )
        .unwrap();
    }

    fn send_msg(gas: u64) -> ExecuteMsg {
        ExecuteMsg::SendCrossChainMessage {
            destination_chain: Binary::from(vec![0, 0, 0, 2]),
            destination_address: HexBinary::from(vec![0x42u8; 20]),
            message: Binary::from(b"hello".to_vec()),
            required_gas_limit: gas,
        }
    }

    fn message_id_of(res: &Response) -> String {
        res.attributes
            .iter()
            .find(|a| a.key == "message_id")
            .map(|a| a.value.clone())
            .unwrap()
    }

    #[test]
    fn test_send_assigns_unique_ids() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let info = mock_info("sender", &coins(100, "uluna"));
        let first = execute(deps.as_mut(), mock_env(), info.clone(), send_msg(200_000)).unwrap();
        let second = execute(deps.as_mut(), mock_env(), info, send_msg(200_000)).unwrap();
        assert_ne!(message_id_of(&first), message_id_of(&second));

        let nonce: NonceResponse =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::Nonce {}).unwrap()).unwrap();
        assert_eq!(nonce.nonce, 2);

        let id = common::hash::hex_to_bytes32(&message_id_of(&first)).unwrap();
        let stored: Option<OutboxMessageResponse> = from_json(
            query(
                deps.as_ref(),
                mock_env(),
                QueryMsg::OutboxMessage {
                    message_id: HexBinary::from(id.to_vec()),
                },
            )
            .unwrap(),
        )
        .unwrap();
        let stored = stored.unwrap();
        assert_eq!(stored.nonce, 0);
        assert_eq!(stored.fee_paid, Uint128::new(100));
        assert_eq!(stored.message, Binary::from(b"hello".to_vec()));
    }

    #[test]
    fn test_send_rejections() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sender", &coins(99, "uluna")),
            send_msg(200_000),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientFee {
                required: Uint128::new(100),
                got: Uint128::new(99)
            }
        );

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sender", &coins(100, "uluna")),
            send_msg(2_000_000),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::GasLimitExceeded { .. }));

        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("admin", &[]),
            ExecuteMsg::SetHalted { halted: true },
        )
        .unwrap();
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sender", &coins(100, "uluna")),
            send_msg(200_000),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Halted);
    }

    #[test]
    fn test_relay_is_admin_only() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let delivery = Delivery {
            target: "receiver".to_string(),
            origin_chain: Binary::from(vec![0, 0, 0, 2]),
            origin_address: HexBinary::from(vec![0x42u8; 20]),
            payload: Binary::from(b"{}".to_vec()),
        };
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("stranger", &[]),
            ExecuteMsg::Relay {
                deliveries: vec![delivery.clone()],
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized);

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("admin", &[]),
            ExecuteMsg::Relay {
                deliveries: vec![delivery.clone(), delivery],
            },
        )
        .unwrap();
        assert_eq!(res.messages.len(), 2);
        assert_eq!(res.messages[1].id, 1);
    }
}
