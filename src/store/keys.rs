/// Record-key codec for store partitions
///
/// Record keys are signed 64-bit values (the metadata record lives at -1,
/// entries at their entry id). Fjall orders keys lexicographically by bytes,
/// so keys are encoded big-endian with the sign bit flipped: -1 sorts before
/// 0, which sorts before 1, and so on.

/// Reserved key holding the serialized ledger metadata
pub const METADATA_KEY: i64 = -1;

/// Encode a record key as 8 order-preserving bytes
pub fn encode_record_key(key: i64) -> [u8; 8] {
    ((key as u64) ^ (1 << 63)).to_be_bytes()
}

/// Decode a record key produced by [`encode_record_key`]
pub fn decode_record_key(bytes: &[u8]) -> Option<i64> {
    let raw: [u8; 8] = bytes.try_into().ok()?;
    Some((u64::from_be_bytes(raw) ^ (1 << 63)) as i64)
}
