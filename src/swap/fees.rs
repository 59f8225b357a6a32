use crate::error::SwapError;

/// The four fee pairs baked into a pool at creation. All fees are taken from
/// the source side of a trade; the host portion is carved out of the owner
/// trade fee when a host account is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub trade_fee_numerator: u64,
    pub trade_fee_denominator: u64,
    pub owner_trade_fee_numerator: u64,
    pub owner_trade_fee_denominator: u64,
    pub owner_withdraw_fee_numerator: u64,
    pub owner_withdraw_fee_denominator: u64,
    pub host_fee_numerator: u64,
    pub host_fee_denominator: u64,
}

impl FeeSchedule {
    /// The reference schedule used by the setup pools. An external
    /// fee-collection owner zeroes the owner-withdraw pair.
    pub fn standard(external_fee_owner: bool) -> Self {
        Self {
            trade_fee_numerator: 25,
            trade_fee_denominator: 10000,
            owner_trade_fee_numerator: 5,
            owner_trade_fee_denominator: 10000,
            owner_withdraw_fee_numerator: if external_fee_owner { 0 } else { 1 },
            owner_withdraw_fee_denominator: if external_fee_owner { 0 } else { 6 },
            host_fee_numerator: 20,
            host_fee_denominator: 100,
        }
    }

    /// A fee pair with a used numerator must carry a non-zero denominator.
    pub fn validate(&self) -> Result<(), SwapError> {
        let pairs = [
            (self.trade_fee_numerator, self.trade_fee_denominator),
            (self.owner_trade_fee_numerator, self.owner_trade_fee_denominator),
            (
                self.owner_withdraw_fee_numerator,
                self.owner_withdraw_fee_denominator,
            ),
            (self.host_fee_numerator, self.host_fee_denominator),
        ];
        for (numerator, denominator) in pairs {
            if numerator > 0 && denominator == 0 {
                return Err(SwapError::InvalidCurveParameters(
                    "fee numerator with zero denominator",
                ));
            }
        }
        Ok(())
    }

    pub fn trading_fee(&self, amount: u128) -> Option<u128> {
        floor_fee(
            amount,
            self.trade_fee_numerator as u128,
            self.trade_fee_denominator as u128,
        )
    }

    pub fn owner_trading_fee(&self, amount: u128) -> Option<u128> {
        floor_fee(
            amount,
            self.owner_trade_fee_numerator as u128,
            self.owner_trade_fee_denominator as u128,
        )
    }

    /// Host portion of an already-computed owner fee.
    pub fn host_fee(&self, owner_fee: u128) -> Option<u128> {
        floor_fee(
            owner_fee,
            self.host_fee_numerator as u128,
            self.host_fee_denominator as u128,
        )
    }
}

/// Floored ratio with the engine's minimum-fee rule: a non-zero trade with a
/// non-zero fee numerator always pays at least one token.
fn floor_fee(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    if numerator == 0 || amount == 0 {
        return Some(0);
    }
    let fee = amount.checked_mul(numerator)?.checked_div(denominator)?;
    if fee == 0 { Some(1) } else { Some(fee) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_schedule_fees() {
        let fees = FeeSchedule::standard(false);
        assert_eq!(fees.trading_fee(100_000).unwrap(), 250);
        assert_eq!(fees.owner_trading_fee(100_000).unwrap(), 50);
        assert_eq!(fees.host_fee(50).unwrap(), 10);
    }

    #[test]
    fn external_fee_owner_zeroes_withdraw_pair() {
        let fees = FeeSchedule::standard(true);
        assert_eq!(fees.owner_withdraw_fee_numerator, 0);
        assert_eq!(fees.owner_withdraw_fee_denominator, 0);
        assert!(fees.validate().is_ok());
    }

    #[test]
    fn minimum_fee_of_one() {
        let fees = FeeSchedule::standard(false);
        // 100 * 25 / 10000 floors to zero, so the minimum applies.
        assert_eq!(fees.trading_fee(100).unwrap(), 1);
        assert_eq!(fees.trading_fee(0).unwrap(), 0);
    }

    #[test]
    fn zero_denominator_with_numerator_is_invalid() {
        let mut fees = FeeSchedule::standard(false);
        fees.trade_fee_denominator = 0;
        assert!(matches!(
            fees.validate(),
            Err(SwapError::InvalidCurveParameters(_))
        ));
    }
}
