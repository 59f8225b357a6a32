use super::fees::FeeSchedule;
use crate::error::SwapError;
use crate::math::CheckedCeilDiv;

pub const CURVE_PARAMETERS_LEN: usize = 32;

const CURVE_TYPE_CONSTANT_PRODUCT: u8 = 0;
const CURVE_TYPE_CONSTANT_PRICE: u8 = 1;

/// Pricing function family of a pool. Fixed at creation; the numeric type
/// byte and its 32-byte parameter block exist only at the wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveVariant {
    ConstantProduct,
    /// Fixed exchange rate: one source token buys `token_b_price` destination
    /// tokens. Used for pegged setup pools.
    ConstantPrice { token_b_price: u64 },
}

impl CurveVariant {
    pub fn curve_type(&self) -> u8 {
        match self {
            CurveVariant::ConstantProduct => CURVE_TYPE_CONSTANT_PRODUCT,
            CurveVariant::ConstantPrice { .. } => CURVE_TYPE_CONSTANT_PRICE,
        }
    }

    pub fn parameters(&self) -> [u8; CURVE_PARAMETERS_LEN] {
        let mut bytes = [0u8; CURVE_PARAMETERS_LEN];
        if let CurveVariant::ConstantPrice { token_b_price } = self {
            bytes[..8].copy_from_slice(&token_b_price.to_le_bytes());
        }
        bytes
    }

    pub fn from_parts(
        curve_type: u8,
        parameters: &[u8; CURVE_PARAMETERS_LEN],
    ) -> Result<Self, SwapError> {
        match curve_type {
            CURVE_TYPE_CONSTANT_PRODUCT => Ok(CurveVariant::ConstantProduct),
            CURVE_TYPE_CONSTANT_PRICE => {
                let token_b_price = u64::from_le_bytes(parameters[..8].try_into().unwrap());
                Ok(CurveVariant::ConstantPrice { token_b_price })
            }
            _ => Err(SwapError::InvalidCurveParameters("unknown curve type")),
        }
    }

    pub fn validate(&self) -> Result<(), SwapError> {
        match self {
            CurveVariant::ConstantProduct => Ok(()),
            CurveVariant::ConstantPrice { token_b_price: 0 } => Err(
                SwapError::InvalidCurveParameters("constant price scale is zero"),
            ),
            CurveVariant::ConstantPrice { .. } => Ok(()),
        }
    }
}

/// Client-side reproduction of one swap step. Mirrors what the program is
/// expected to compute so the caller can check slippage before submission and
/// verify balances afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub destination_amount: u64,
    pub trade_fee: u64,
    pub owner_fee: u64,
    pub host_fee: u64,
}

/// Quotes a swap of `source_amount` against the given vault balances. Fees
/// are debited from the input side before the curve computation; the host fee
/// is a sub-portion of the owner fee, reported only when routed.
pub fn quote(
    variant: &CurveVariant,
    fees: &FeeSchedule,
    source_amount: u64,
    swap_source_amount: u64,
    swap_destination_amount: u64,
    host_fee_routed: bool,
) -> Result<Quote, SwapError> {
    variant.validate()?;
    fees.validate()?;

    let source_amount = source_amount as u128;
    let trade_fee = fees
        .trading_fee(source_amount)
        .ok_or(SwapError::CalculationFailure)?;
    let owner_fee = fees
        .owner_trading_fee(source_amount)
        .ok_or(SwapError::CalculationFailure)?;
    let host_fee = if host_fee_routed {
        fees.host_fee(owner_fee).ok_or(SwapError::CalculationFailure)?
    } else {
        0
    };

    let source_less_fees = source_amount
        .checked_sub(trade_fee)
        .and_then(|x| x.checked_sub(owner_fee))
        .ok_or(SwapError::CalculationFailure)?;

    let destination_amount = match variant {
        CurveVariant::ConstantProduct => constant_product_out(
            source_less_fees,
            swap_source_amount as u128,
            swap_destination_amount as u128,
        )?,
        CurveVariant::ConstantPrice { token_b_price } => source_less_fees
            .checked_mul(*token_b_price as u128)
            .ok_or(SwapError::CalculationFailure)?,
    };

    let destination_amount =
        u64::try_from(destination_amount).map_err(|_| SwapError::CalculationFailure)?;
    if destination_amount > swap_destination_amount {
        return Err(SwapError::InsufficientLiquidity {
            needed: destination_amount,
            available: swap_destination_amount,
        });
    }

    Ok(Quote {
        destination_amount,
        trade_fee: u64::try_from(trade_fee).map_err(|_| SwapError::CalculationFailure)?,
        owner_fee: u64::try_from(owner_fee).map_err(|_| SwapError::CalculationFailure)?,
        host_fee: u64::try_from(host_fee).map_err(|_| SwapError::CalculationFailure)?,
    })
}

/// Constant-product step: hold `source * destination` invariant, ceiling the
/// post-trade destination balance so rounding always favors the pool.
fn constant_product_out(
    source_amount: u128,
    swap_source_amount: u128,
    swap_destination_amount: u128,
) -> Result<u128, SwapError> {
    let invariant = swap_source_amount
        .checked_mul(swap_destination_amount)
        .ok_or(SwapError::CalculationFailure)?;
    let new_source_amount = swap_source_amount
        .checked_add(source_amount)
        .ok_or(SwapError::CalculationFailure)?;
    let (new_destination_amount, _) = invariant
        .checked_ceil_div(new_source_amount)
        .ok_or(SwapError::CalculationFailure)?;
    swap_destination_amount
        .checked_sub(new_destination_amount)
        .ok_or(SwapError::CalculationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_fees() -> FeeSchedule {
        FeeSchedule::standard(false)
    }

    #[test]
    fn reference_constant_product_swap() {
        let result = quote(
            &CurveVariant::ConstantProduct,
            &reference_fees(),
            100_000,
            1_000_000,
            1_000_000,
            false,
        )
        .unwrap();
        assert_eq!(result.destination_amount, 90_661);
        assert_eq!(result.trade_fee, 250);
        assert_eq!(result.owner_fee, 50);
        assert_eq!(result.host_fee, 0);
    }

    #[test]
    fn host_fee_is_owner_fee_portion() {
        let result = quote(
            &CurveVariant::ConstantProduct,
            &reference_fees(),
            100_000,
            1_000_000,
            1_000_000,
            true,
        )
        .unwrap();
        // 20/100 of the 50-token owner fee.
        assert_eq!(result.host_fee, 10);
        assert_eq!(result.destination_amount, 90_661);
    }

    #[test]
    fn constant_price_is_linear_after_fees() {
        let variant = CurveVariant::ConstantPrice { token_b_price: 3 };
        let result = quote(&variant, &reference_fees(), 10_000, 1, 1_000_000, false).unwrap();
        // 10_000 - 25 trade - 5 owner = 9_970 net, times the price.
        assert_eq!(result.destination_amount, 9_970 * 3);
    }

    #[test]
    fn zero_price_scale_is_rejected() {
        let variant = CurveVariant::ConstantPrice { token_b_price: 0 };
        let err = quote(&variant, &reference_fees(), 10, 1, 1_000_000, false).unwrap_err();
        assert!(matches!(err, SwapError::InvalidCurveParameters(_)));
    }

    #[test]
    fn constant_price_cannot_exceed_vault() {
        let variant = CurveVariant::ConstantPrice { token_b_price: 10 };
        let err = quote(&variant, &reference_fees(), 100_000, 1, 1_000, false).unwrap_err();
        assert!(matches!(err, SwapError::InsufficientLiquidity { .. }));
    }

    #[test]
    fn wire_round_trip_of_variants() {
        for variant in [
            CurveVariant::ConstantProduct,
            CurveVariant::ConstantPrice { token_b_price: 42 },
        ] {
            let decoded =
                CurveVariant::from_parts(variant.curve_type(), &variant.parameters()).unwrap();
            assert_eq!(decoded, variant);
        }
        let err = CurveVariant::from_parts(9, &[0u8; CURVE_PARAMETERS_LEN]).unwrap_err();
        assert!(matches!(err, SwapError::InvalidCurveParameters(_)));
    }

    proptest! {
        /// Fees retained in the pool can only grow the invariant.
        #[test]
        fn constant_product_invariant_never_decreases(
            source in 1u64..1_000_000,
            vault_a in 1_000u64..1_000_000_000,
            vault_b in 1_000u64..1_000_000_000,
        ) {
            let result = quote(
                &CurveVariant::ConstantProduct,
                &reference_fees(),
                source,
                vault_a,
                vault_b,
                false,
            );
            prop_assume!(result.is_ok());
            let result = result.unwrap();
            // The whole source amount lands in the vault; only the quoted
            // destination leaves it.
            let post_a = vault_a as u128 + source as u128;
            let post_b = vault_b as u128 - result.destination_amount as u128;
            prop_assert!(post_a * post_b >= vault_a as u128 * vault_b as u128);
        }

        #[test]
        fn quote_is_deterministic(
            source in 1u64..1_000_000,
            vault_a in 1_000u64..1_000_000_000,
            vault_b in 1_000u64..1_000_000_000,
        ) {
            let fees = reference_fees();
            let first = quote(&CurveVariant::ConstantProduct, &fees, source, vault_a, vault_b, true);
            let second = quote(&CurveVariant::ConstantProduct, &fees, source, vault_a, vault_b, true);
            prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
        }
    }
}
