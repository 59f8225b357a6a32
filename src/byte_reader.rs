use anchor_client::solana_sdk::pubkey::Pubkey;
use anyhow::{Result, anyhow};

pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        if self.offset >= self.data.len() {
            return Err(anyhow!("Read past end of buffer"));
        }
        let val = self.data[self.offset];
        self.offset += 1;
        Ok(val)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        if self.offset + 8 > self.data.len() {
            return Err(anyhow!("Read past end of buffer"));
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[self.offset..self.offset + 8]);
        let val = u64::from_le_bytes(bytes);
        self.offset += 8;
        Ok(val)
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey> {
        if self.offset + 32 > self.data.len() {
            return Err(anyhow!("Read past end of buffer"));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.data[self.offset..self.offset + 32]);
        let pubkey = Pubkey::new_from_array(bytes);
        self.offset += 32;
        Ok(pubkey)
    }

    pub fn read_bytes_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        if self.offset + N > self.data.len() {
            return Err(anyhow!("Read past end of buffer"));
        }
        let mut array = [0u8; N];
        array.copy_from_slice(&self.data[self.offset..self.offset + N]);
        self.offset += N;
        Ok(array)
    }
}
