use anchor_client::solana_sdk::signature::{Keypair, read_keypair_file};
use anyhow::{Context, Result, bail};
use bs58;
use std::fs;

/// Loads a signing key from either the standard JSON keypair layout or a
/// bs58-encoded secret, naming the wallet role on failure so a misconfigured
/// payer and a misconfigured owner are distinguishable.
pub fn load_wallet_keypair(role: &str, path: &str) -> Result<Keypair> {
    if let Ok(keypair) = read_keypair_file(String::from(path)) {
        return Ok(keypair);
    }
    load_bs58_keypair(path).with_context(|| format!("failed to load {} keypair from {}", role, path))
}

fn load_bs58_keypair(path: &str) -> Result<Keypair> {
    let b58_str = fs::read_to_string(path)?.trim().to_string();

    let bytes = bs58::decode(b58_str).into_vec()?;
    if bytes.len() != 64 {
        bail!("secret key must decode to 64 bytes, got {}", bytes.len());
    }

    Ok(Keypair::from_bytes(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_client::solana_sdk::signer::Signer;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("token-swap-{}-{}", name, std::process::id()))
    }

    #[test]
    fn loads_bs58_encoded_secret() {
        let keypair = Keypair::new();
        let path = temp_path("bs58");
        fs::write(&path, bs58::encode(keypair.to_bytes()).into_string()).unwrap();

        let loaded = load_wallet_keypair("payer", path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn failure_names_the_wallet_role() {
        let err = load_wallet_keypair("owner", "/nonexistent/owner.json").unwrap_err();
        assert!(format!("{:#}", err).contains("owner"));
    }

    #[test]
    fn truncated_secret_is_rejected() {
        let path = temp_path("short");
        fs::write(&path, bs58::encode([1u8; 10]).into_string()).unwrap();

        assert!(load_wallet_keypair("payer", path.to_str().unwrap()).is_err());
        fs::remove_file(&path).ok();
    }
}
