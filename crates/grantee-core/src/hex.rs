//! # Hex Codec
//!
//! Strict fixed-width hex shared by digests, addresses and wallet material.
//! Only `[0-9a-fA-F]` is accepted; signs, whitespace and other characters
//! that `u8::from_str_radix` tolerates are rejected before decoding.

/// Lowercase hex rendering without a prefix.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode exactly `N` bytes from `2 * N` hex digits. The caller strips any
/// `0x` prefix first.
pub fn decode_fixed<const N: usize>(hex: &str) -> Result<[u8; N], String> {
    let digits = hex.as_bytes();
    if digits.len() != 2 * N {
        return Err(format!("expected {} hex chars, got {}", 2 * N, digits.len()));
    }
    let mut out = [0u8; N];
    for (i, pair) in digits.chunks_exact(2).enumerate() {
        out[i] = (nibble(pair[0], 2 * i)? << 4) | nibble(pair[1], 2 * i + 1)?;
    }
    Ok(out)
}

fn nibble(c: u8, pos: usize) -> Result<u8, String> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(format!("invalid hex digit {:?} at position {pos}", c as char)),
    }
}
