use crate::error::SwapError;
use anchor_client::solana_sdk::pubkey::Pubkey;

/// Derives the pool authority, the sole signer over the pool's vaults.
/// Bumps are tried from 255 downward until an off-curve address appears, so
/// the result always matches `Pubkey::find_program_address` byte for byte.
pub fn derive_pool_authority(
    pool: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), SwapError> {
    derive_with_bumps(pool, program_id, (0..=u8::MAX).rev())
}

fn derive_with_bumps(
    pool: &Pubkey,
    program_id: &Pubkey,
    bumps: impl IntoIterator<Item = u8>,
) -> Result<(Pubkey, u8), SwapError> {
    for bump in bumps {
        if let Ok(address) =
            Pubkey::create_program_address(&[pool.as_ref(), &[bump]], program_id)
        {
            return Ok((address, bump));
        }
    }
    Err(SwapError::AddressDerivationExhausted(*pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::program_id;

    #[test]
    fn derivation_is_deterministic() {
        let pool = Pubkey::new_unique();
        let first = derive_pool_authority(&pool, &program_id()).unwrap();
        let second = derive_pool_authority(&pool, &program_id()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn matches_find_program_address() {
        let pool = Pubkey::new_unique();
        let (address, bump) = derive_pool_authority(&pool, &program_id()).unwrap();
        let expected = Pubkey::find_program_address(&[pool.as_ref()], &program_id());
        assert_eq!((address, bump), expected);
    }

    #[test]
    fn exhausted_bump_space_errors() {
        let pool = Pubkey::new_unique();
        let program = program_id();
        // Restrict the candidate set to bumps that are known to land
        // on-curve for this pool, so every attempt collides.
        let on_curve: Vec<u8> = (0..=u8::MAX)
            .filter(|&bump| {
                Pubkey::create_program_address(&[pool.as_ref(), &[bump]], &program).is_err()
            })
            .collect();
        assert!(!on_curve.is_empty());
        let err = derive_with_bumps(&pool, &program, on_curve).unwrap_err();
        assert!(matches!(err, SwapError::AddressDerivationExhausted(p) if p == pool));
    }
}
