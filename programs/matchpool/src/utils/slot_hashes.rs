/// Raw SlotHashes sysvar layout: an 8-byte little-endian entry count followed
/// by `(u64 slot, [u8; 32] hash)` pairs, newest first. The full sysvar is too
/// large to deserialize on-chain, so it is walked manually.
const ENTRY_LEN: usize = 40;
const MAX_ENTRIES: usize = 512;

/// Looks up the hash recorded for `target_slot`. Returns `None` when the slot
/// has fallen out of the sysvar's trailing window or was never recorded; a
/// missing hash must never be substituted with zeroes or a neighbouring slot.
pub fn seed_for_slot(data: &[u8], target_slot: u64) -> Option<[u8; 32]> {
    let count_bytes: [u8; 8] = data.get(0..8)?.try_into().ok()?;
    let count = (u64::from_le_bytes(count_bytes) as usize).min(MAX_ENTRIES);

    for i in 0..count {
        let off = 8 + i * ENTRY_LEN;
        let slot_bytes: [u8; 8] = data.get(off..off + 8)?.try_into().ok()?;
        if u64::from_le_bytes(slot_bytes) == target_slot {
            let hash: [u8; 32] = data.get(off + 8..off + ENTRY_LEN)?.try_into().ok()?;
            return Some(hash);
        }
    }
    None
}
