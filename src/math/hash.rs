/// FNV-1a 32-bit offset basis
pub const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime, `2^24 + 2^8 + 0x93`
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Hash a byte sequence with 32-bit FNV-1a
///
/// Tiles are identified by this hash of their raw pixel bytes, so identical
/// pixel content always maps to the same identifier. Multiplying by the prime
/// is the same as the shift-accumulate form
/// `h += (h << 1) + (h << 4) + (h << 7) + (h << 8) + (h << 24)` under
/// wrapping arithmetic.
pub fn fnv1a_hash(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}
