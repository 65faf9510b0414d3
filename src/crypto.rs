//! Hex codec, single-shot SHA-256, and the auth-token derivation the
//! handshake needs. `hex`/`sha2` do the actual work; this module only
//! wires them to the shapes the client uses (fixed-width handle hex,
//! the two-pass commitment hash).

use sha2::{Digest, Sha256};

/// Lowercase hex of a SHA-256 digest over `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// `hex(sha256(password ++ ascii_decimal(cookie)))`, the commitment
/// value `calculateAuth` inserts into the `hash` field before
/// serializing, and again (over the serialized frame) after.
pub fn password_cookie_hash(password: &[u8], cookie: u64) -> String {
    let mut preimage = Vec::with_capacity(password.len() + 20);
    preimage.extend_from_slice(password);
    preimage.extend_from_slice(cookie.to_string().as_bytes());
    hex::encode(sha256(&preimage))
}

/// Parses a cookie string as unsigned base-10, defaulting to 0 when
/// absent or malformed — matching the original's `strtoll(..., 10)`
/// which silently yields 0 on a non-numeric prefix.
pub fn parse_cookie(cookie: Option<&[u8]>) -> u64 {
    cookie
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .and_then(|text| text.parse::<u64>().ok())
        .unwrap_or(0)
}

/// Renders a 32-bit handle as 8 lowercase hex characters, using the raw
/// bytes of the handle in host (little-endian on common hardware) byte
/// order — see spec's "Handle byte order" design note.
pub fn encode_handle(handle: u32) -> String {
    hex::encode(handle.to_ne_bytes())
}

/// Parses an 8-character lowercase-hex `txid` back into a handle,
/// requiring exact length and valid hex — the original rejects a
/// malformed txid outright rather than attempting a lenient parse.
pub fn decode_handle(txid: &[u8]) -> Option<u32> {
    if txid.len() != 8 {
        return None;
    }
    let mut bytes = [0u8; 4];
    hex::decode_to_slice(txid, &mut bytes).ok()?;
    Some(u32::from_ne_bytes(bytes))
}
