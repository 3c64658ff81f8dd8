//! Conversion Engine
//!
//! Pure arithmetic turning a native deposit into the amount forwarded to the
//! counterpart. The counterpart recomputes or reconciles these numbers, so
//! every rule here is part of the wire contract:
//!
//! | Quantity            | Rule                                              |
//! |---------------------|---------------------------------------------------|
//! | `total_cost`        | the deposit itself                                |
//! | `messaging_fee`     | the configured fee budget (must not exceed deposit) |
//! | `net_participation` | `total_cost - messaging_fee`                      |
//! | `converted_amount`  | `floor(net_participation * rate)`                 |
//!
//! The rate is a `Decimal256` with 18 fractional digits. Conversion multiplies
//! by the rate's atomics in 256-bit integers and divides by 10^18, truncating
//! toward zero. Overflow is reported, never wrapped.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal256, Uint128, Uint256};

use crate::error::ContractError;
use crate::state::Config;

/// Fee split of a single deposit
#[cw_serde]
pub struct CostBreakdown {
    pub total_cost: Uint128,
    pub messaging_fee: Uint128,
    pub net_participation: Uint128,
}

/// Split a deposit into messaging fee and net participation.
pub fn compute_cost(
    native_amount: Uint128,
    minimum_deposit: Uint128,
    fee_budget: Uint128,
) -> Result<CostBreakdown, ContractError> {
    if native_amount.is_zero() || native_amount < minimum_deposit {
        return Err(ContractError::InsufficientAmount {
            minimum: minimum_deposit,
            got: native_amount,
        });
    }

    if fee_budget > native_amount {
        return Err(ContractError::FeeExceedsDeposit {
            fee: fee_budget,
            deposit: native_amount,
        });
    }

    let net_participation = native_amount.checked_sub(fee_budget)?;

    Ok(CostBreakdown {
        total_cost: native_amount,
        messaging_fee: fee_budget,
        net_participation,
    })
}

/// Convert a net participation into internal currency, truncating toward zero.
pub fn convert(net_participation: Uint128, rate: Decimal256) -> Result<Uint256, ContractError> {
    let scaled = Uint256::from(net_participation).checked_mul(rate.atomics())?;
    Ok(scaled / Decimal256::one().atomics())
}

/// Cost breakdown and converted amount under the current configuration.
pub fn quote(
    config: &Config,
    native_amount: Uint128,
) -> Result<(CostBreakdown, Uint256), ContractError> {
    let cost = compute_cost(native_amount, config.minimum_deposit, config.messaging_fee)?;
    let converted = convert(cost.net_participation, config.conversion_rate)?;
    Ok((cost, converted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_fee_plus_net_equals_total() {
        let cases: [(u128, u128, u128); 6] = [
            (1, 1, 0),
            (10, 1, 0),
            (10, 1, 10),
            (1_000, 500, 7),
            (1_000_000_000, 1, 250_000),
            (u128::MAX, 1, u128::MAX - 1),
        ];

        for (amount, minimum, fee) in cases {
            let cost = compute_cost(amount.into(), minimum.into(), fee.into()).unwrap();
            assert_eq!(cost.total_cost, Uint128::from(amount));
            assert_eq!(cost.messaging_fee + cost.net_participation, cost.total_cost);
        }
    }

    #[test]
    fn test_below_minimum_rejected() {
        let err = compute_cost(Uint128::new(9), Uint128::new(10), Uint128::zero()).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientAmount {
                minimum: Uint128::new(10),
                got: Uint128::new(9),
            }
        );
    }

    #[test]
    fn test_zero_amount_rejected_even_with_zero_minimum() {
        let err = compute_cost(Uint128::zero(), Uint128::zero(), Uint128::zero()).unwrap_err();
        assert!(matches!(err, ContractError::InsufficientAmount { .. }));
    }

    #[test]
    fn test_fee_exceeding_deposit_rejected() {
        let err = compute_cost(Uint128::new(10), Uint128::new(1), Uint128::new(11)).unwrap_err();
        assert_eq!(
            err,
            ContractError::FeeExceedsDeposit {
                fee: Uint128::new(11),
                deposit: Uint128::new(10),
            }
        );
    }

    #[test]
    fn test_fee_equal_to_deposit_leaves_nothing() {
        let cost = compute_cost(Uint128::new(10), Uint128::new(1), Uint128::new(10)).unwrap();
        assert!(cost.net_participation.is_zero());
        assert_eq!(
            convert(cost.net_participation, Decimal256::percent(200)).unwrap(),
            Uint256::zero()
        );
    }

    #[test]
    fn test_integer_rate() {
        let converted = convert(Uint128::new(10), Decimal256::from_ratio(2u128, 1u128)).unwrap();
        assert_eq!(converted, Uint256::from(20u128));
    }

    #[test]
    fn test_fractional_rate_truncates() {
        // 3 * 1.5 = 4.5 -> 4
        let converted = convert(Uint128::new(3), Decimal256::from_str("1.5").unwrap()).unwrap();
        assert_eq!(converted, Uint256::from(4u128));

        // 3 * 0.333333333333333333 = 0.999999999999999999 -> 0
        let third = Decimal256::from_str("0.333333333333333333").unwrap();
        assert_eq!(convert(Uint128::new(3), third).unwrap(), Uint256::zero());
    }

    #[test]
    fn test_large_amounts_do_not_wrap() {
        let converted = convert(Uint128::MAX, Decimal256::from_ratio(1000u128, 1u128)).unwrap();
        assert_eq!(
            converted,
            Uint256::from(Uint128::MAX) * Uint256::from(1000u128)
        );

        let err = convert(Uint128::new(2), Decimal256::MAX).unwrap_err();
        assert!(matches!(err, ContractError::Overflow(_)));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let rate = Decimal256::from_str("123.456789").unwrap();
        let first = convert(Uint128::new(987_654_321), rate).unwrap();
        let second = convert(Uint128::new(987_654_321), rate).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Uint256::from(121_932_631_112u128));
    }
}
