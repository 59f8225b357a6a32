use anyhow::{Result, anyhow};
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Account as TokenAccount;

const AMOUNT_OFFSET: usize = 64;
const TEN_THOUSAND: u128 = 10000;

pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    // Try normal deserialization first (SPL Token v1)
    match TokenAccount::unpack(data) {
        Ok(token) => Ok(token.amount),
        Err(_) => {
            // Fallback: read amount manually from raw data
            if data.len() < AMOUNT_OFFSET + 8 {
                return Err(anyhow!("Invalid Account Data"));
            }

            let amount_bytes = &data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8];
            let amount = u64::from_le_bytes(amount_bytes.try_into().unwrap());
            Ok(amount)
        }
    }
}

pub fn amount_with_slippage(amount: u64, slippage_bps: u64, up_towards: bool) -> Result<u64> {
    let amount = amount as u128;
    let slippage_bps = slippage_bps as u128;
    let factor = if up_towards {
        slippage_bps
            .checked_add(TEN_THOUSAND)
            .ok_or_else(|| anyhow!("slippage overflow"))?
    } else {
        TEN_THOUSAND
            .checked_sub(slippage_bps)
            .ok_or_else(|| anyhow!("slippage {} bps exceeds 100%", slippage_bps))?
    };
    let amount_with_slippage = amount
        .checked_mul(factor)
        .and_then(|scaled| scaled.checked_div(TEN_THOUSAND))
        .ok_or_else(|| anyhow!("Math overflow"))?;
    u64::try_from(amount_with_slippage)
        .map_err(|_| anyhow!("failed to cast u128 -> u64 from {}", amount_with_slippage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_amount_from_raw_layout() {
        let mut data = vec![0u8; TokenAccount::LEN];
        data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8].copy_from_slice(&42u64.to_le_bytes());
        assert_eq!(parse_token_amount(&data).unwrap(), 42);
    }

    #[test]
    fn short_data_is_rejected() {
        assert!(parse_token_amount(&[0u8; 10]).is_err());
    }

    #[test]
    fn slippage_floor_rounds_down() {
        assert_eq!(amount_with_slippage(90_661, 100, false).unwrap(), 89_754);
        assert_eq!(amount_with_slippage(10_000, 0, false).unwrap(), 10_000);
    }

    #[test]
    fn slippage_above_full_range_is_an_error() {
        assert!(amount_with_slippage(1_000, 10_001, false).is_err());
        assert_eq!(amount_with_slippage(1_000, 10_000, false).unwrap(), 0);
        // Upward adjustment has no upper bound short of overflow.
        assert_eq!(amount_with_slippage(1_000, 10_001, true).unwrap(), 2_000);
    }
}
