//! Hashing and byte-layout helpers shared by the dispatch and messenger contracts.
//!
//! Counterpart chains are EVM-style, so identifiers are 32-byte keccak256
//! digests and addresses are carried as 32-byte universal addresses
//! (20-byte EVM addresses are left-padded with zeros, like `abi.encode(address)`).

use cosmwasm_std::Binary;
use tiny_keccak::{Hasher, Keccak};

/// Length of a registered chain identifier
pub const CHAIN_ID_LEN: usize = 4;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    let mut hex = String::with_capacity(66);
    hex.push_str("0x");
    for byte in bytes {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(hex: &str) -> Result<[u8; 32], &'static str> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }

    let mut result = [0u8; 32];
    for (i, byte) in result.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| "Invalid hex character")?;
    }
    Ok(result)
}

/// Normalise a counterpart address to 32 bytes.
///
/// Accepts a 20-byte EVM address (left-padded) or an already universal
/// 32-byte address. The all-zero address is returned as-is; callers decide
/// whether it is acceptable.
pub fn universal_address(bytes: &[u8]) -> Result<[u8; 32], &'static str> {
    match bytes.len() {
        20 => {
            let mut result = [0u8; 32];
            result[12..].copy_from_slice(bytes);
            Ok(result)
        }
        32 => {
            let mut result = [0u8; 32];
            result.copy_from_slice(bytes);
            Ok(result)
        }
        _ => Err("Invalid address length: expected 20 or 32 bytes"),
    }
}

/// Parse a 4-byte chain id. `0x00000000` is reserved and rejected.
pub fn parse_chain_id(chain_id: &Binary) -> Result<[u8; CHAIN_ID_LEN], &'static str> {
    let bytes: [u8; CHAIN_ID_LEN] = chain_id
        .as_slice()
        .try_into()
        .map_err(|_| "chain id must be exactly 4 bytes")?;
    if bytes == [0u8; CHAIN_ID_LEN] {
        return Err("chain id 0x00000000 is reserved");
    }
    Ok(bytes)
}
