use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Result, WrapError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    Evm,
    Solana,
}

impl AddressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressKind::Evm => "evm",
            AddressKind::Solana => "solana",
        }
    }
}

/// A wallet address that passed format validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAddress {
    address: String,
    kind: AddressKind,
}

impl WalletAddress {
    /// Validate a user-supplied address. Surrounding whitespace is ignored.
    ///
    /// EVM addresses are `0x` followed by 40 hex characters. Solana addresses
    /// are 32-44 base58 characters that decode to a 32-byte public key.
    pub fn parse(input: &str) -> Result<Self> {
        let address = input.trim();
        if address.is_empty() {
            return Err(WrapError::InvalidAddress("empty address".to_string()));
        }

        if let Some(hex_part) = address.strip_prefix("0x") {
            if hex_part.len() != 40 {
                return Err(WrapError::InvalidAddress(
                    format!("Invalid EVM address format: {}", address)
                ));
            }
            hex::decode(hex_part)
                .map_err(|_| WrapError::InvalidAddress(
                    format!("Invalid hex in address: {}", address)
                ))?;
            return Ok(Self {
                address: address.to_string(),
                kind: AddressKind::Evm,
            });
        }

        if address.len() < 32 || address.len() > 44 {
            return Err(WrapError::InvalidAddress(
                format!("Invalid Solana address length: {}", address)
            ));
        }
        let bytes = bs58::decode(address)
            .into_vec()
            .map_err(|_| WrapError::InvalidAddress(
                format!("Invalid base58 in address: {}", address)
            ))?;
        if bytes.len() != 32 {
            return Err(WrapError::InvalidAddress(
                format!("Solana address must decode to 32 bytes: {}", address)
            ));
        }

        Ok(Self {
            address: address.to_string(),
            kind: AddressKind::Solana,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Key for caches and fixture lookups. EVM hex is case-insensitive,
    /// base58 is not.
    pub fn normalized(&self) -> String {
        normalize_address(&self.address)
    }

    /// Abbreviated form for the card, e.g. `0x74...e842`.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= 8 {
            return self.address.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if address.starts_with("0x") || address.starts_with("0X") {
        address.to_lowercase()
    } else {
        address.to_string()
    }
}
