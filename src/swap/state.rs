use super::curve::{CURVE_PARAMETERS_LEN, CurveVariant};
use super::fees::FeeSchedule;
use crate::byte_reader::ByteReader;
use crate::error::SwapError;
use anchor_client::solana_sdk::pubkey::Pubkey;

/// Only layout version the client understands.
pub const POOL_VERSION: u8 = 1;

/// Pool account layout, fixed offsets:
/// version: u8 (1 byte)
/// is_initialized: u8 (1 byte)
/// bump_seed: u8 (1 byte)
/// token_program_id: Pubkey (32 bytes)
/// token_a: Pubkey (32 bytes)
/// token_b: Pubkey (32 bytes)
/// pool_mint: Pubkey (32 bytes)
/// token_a_mint: Pubkey (32 bytes)
/// token_b_mint: Pubkey (32 bytes)
/// pool_fee_account: Pubkey (32 bytes)
/// fees: 8 x u64 (64 bytes)
/// curve_type: u8 (1 byte)
/// curve_parameters: [u8; 32]
/// Total: 3 + 32*7 + 64 + 1 + 32 = 324 bytes
pub const POOL_ACCOUNT_LEN: usize = 324;

/// Canonical description of a pool's immutable parameters. Built once at
/// creation time and re-built from on-chain bytes on every load; the two
/// copies must compare equal field for field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub bump_seed: u8,
    pub token_program_id: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub pool_mint: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub pool_fee_account: Pubkey,
    pub fees: FeeSchedule,
    pub curve: CurveVariant,
}

impl PoolConfig {
    /// Structural comparison that names the first mismatching field, so a
    /// creation/encoding bug surfaces with a usable message.
    pub fn assert_matches(&self, loaded: &PoolConfig) -> Result<(), SwapError> {
        if self.bump_seed != loaded.bump_seed {
            return Err(SwapError::ConfigMismatch("bump_seed"));
        }
        if self.token_program_id != loaded.token_program_id {
            return Err(SwapError::ConfigMismatch("token_program_id"));
        }
        if self.token_a != loaded.token_a {
            return Err(SwapError::ConfigMismatch("token_a"));
        }
        if self.token_b != loaded.token_b {
            return Err(SwapError::ConfigMismatch("token_b"));
        }
        if self.pool_mint != loaded.pool_mint {
            return Err(SwapError::ConfigMismatch("pool_mint"));
        }
        if self.token_a_mint != loaded.token_a_mint {
            return Err(SwapError::ConfigMismatch("token_a_mint"));
        }
        if self.token_b_mint != loaded.token_b_mint {
            return Err(SwapError::ConfigMismatch("token_b_mint"));
        }
        if self.pool_fee_account != loaded.pool_fee_account {
            return Err(SwapError::ConfigMismatch("pool_fee_account"));
        }
        if self.fees != loaded.fees {
            return Err(SwapError::ConfigMismatch("fees"));
        }
        if self.curve != loaded.curve {
            return Err(SwapError::ConfigMismatch("curve"));
        }
        Ok(())
    }
}

pub fn unpack_pool(data: &[u8]) -> Result<PoolConfig, SwapError> {
    if data.len() < POOL_ACCOUNT_LEN {
        return Err(SwapError::MalformedPoolAccount(format!(
            "account data too short: {} bytes, expected {}",
            data.len(),
            POOL_ACCOUNT_LEN
        )));
    }

    let mut reader = ByteReader::new(data);
    let read_err = |_| SwapError::MalformedPoolAccount("truncated pool account".to_string());

    let version = reader.read_u8().map_err(read_err)?;
    if version != POOL_VERSION {
        return Err(SwapError::UnsupportedPoolVersion(version));
    }

    let is_initialized = reader.read_u8().map_err(read_err)?;
    if is_initialized != 1 {
        return Err(SwapError::MalformedPoolAccount(
            "pool account is not initialized".to_string(),
        ));
    }

    let bump_seed = reader.read_u8().map_err(read_err)?;
    let token_program_id = reader.read_pubkey().map_err(read_err)?;
    let token_a = reader.read_pubkey().map_err(read_err)?;
    let token_b = reader.read_pubkey().map_err(read_err)?;
    let pool_mint = reader.read_pubkey().map_err(read_err)?;
    let token_a_mint = reader.read_pubkey().map_err(read_err)?;
    let token_b_mint = reader.read_pubkey().map_err(read_err)?;
    let pool_fee_account = reader.read_pubkey().map_err(read_err)?;

    let fees = FeeSchedule {
        trade_fee_numerator: reader.read_u64().map_err(read_err)?,
        trade_fee_denominator: reader.read_u64().map_err(read_err)?,
        owner_trade_fee_numerator: reader.read_u64().map_err(read_err)?,
        owner_trade_fee_denominator: reader.read_u64().map_err(read_err)?,
        owner_withdraw_fee_numerator: reader.read_u64().map_err(read_err)?,
        owner_withdraw_fee_denominator: reader.read_u64().map_err(read_err)?,
        host_fee_numerator: reader.read_u64().map_err(read_err)?,
        host_fee_denominator: reader.read_u64().map_err(read_err)?,
    };

    let curve_type = reader.read_u8().map_err(read_err)?;
    let curve_parameters: [u8; CURVE_PARAMETERS_LEN] =
        reader.read_bytes_array().map_err(read_err)?;
    let curve = CurveVariant::from_parts(curve_type, &curve_parameters)?;

    Ok(PoolConfig {
        bump_seed,
        token_program_id,
        token_a,
        token_b,
        pool_mint,
        token_a_mint,
        token_b_mint,
        pool_fee_account,
        fees,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::token_program;

    fn sample_config() -> PoolConfig {
        PoolConfig {
            bump_seed: 253,
            token_program_id: token_program(),
            token_a: Pubkey::new_unique(),
            token_b: Pubkey::new_unique(),
            pool_mint: Pubkey::new_unique(),
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: Pubkey::new_unique(),
            pool_fee_account: Pubkey::new_unique(),
            fees: FeeSchedule::standard(false),
            curve: CurveVariant::ConstantPrice { token_b_price: 7 },
        }
    }

    fn pack_pool(config: &PoolConfig) -> Vec<u8> {
        let mut data = Vec::with_capacity(POOL_ACCOUNT_LEN);
        data.push(POOL_VERSION);
        data.push(1);
        data.push(config.bump_seed);
        for key in [
            &config.token_program_id,
            &config.token_a,
            &config.token_b,
            &config.pool_mint,
            &config.token_a_mint,
            &config.token_b_mint,
            &config.pool_fee_account,
        ] {
            data.extend_from_slice(key.as_ref());
        }
        for value in [
            config.fees.trade_fee_numerator,
            config.fees.trade_fee_denominator,
            config.fees.owner_trade_fee_numerator,
            config.fees.owner_trade_fee_denominator,
            config.fees.owner_withdraw_fee_numerator,
            config.fees.owner_withdraw_fee_denominator,
            config.fees.host_fee_numerator,
            config.fees.host_fee_denominator,
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.push(config.curve.curve_type());
        data.extend_from_slice(&config.curve.parameters());
        assert_eq!(data.len(), POOL_ACCOUNT_LEN);
        data
    }

    #[test]
    fn unpacks_fixed_layout() {
        let config = sample_config();
        let unpacked = unpack_pool(&pack_pool(&config)).unwrap();
        assert_eq!(unpacked, config);
        assert!(config.assert_matches(&unpacked).is_ok());
    }

    #[test]
    fn wrong_version_is_unsupported() {
        let mut data = pack_pool(&sample_config());
        data[0] = 2;
        let err = unpack_pool(&data).unwrap_err();
        assert!(matches!(err, SwapError::UnsupportedPoolVersion(2)));
    }

    #[test]
    fn uninitialized_pool_is_rejected() {
        let mut data = pack_pool(&sample_config());
        data[1] = 0;
        assert!(matches!(
            unpack_pool(&data),
            Err(SwapError::MalformedPoolAccount(_))
        ));
    }

    #[test]
    fn short_account_is_rejected() {
        assert!(matches!(
            unpack_pool(&[0u8; 100]),
            Err(SwapError::MalformedPoolAccount(_))
        ));
    }

    #[test]
    fn mismatch_names_the_field() {
        let config = sample_config();
        let mut other = config.clone();
        other.pool_fee_account = Pubkey::new_unique();
        assert!(matches!(
            config.assert_matches(&other),
            Err(SwapError::ConfigMismatch("pool_fee_account"))
        ));

        let mut other = config.clone();
        other.fees.host_fee_numerator = 1;
        assert!(matches!(
            config.assert_matches(&other),
            Err(SwapError::ConfigMismatch("fees"))
        ));
    }
}
