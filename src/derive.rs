//! Deterministic derivation of raw values from legacy keys.
//!
//! A key is first reduced to a 64-bit hash, whose upper 34 bits are folded into
//! `[0, max_offset]` by a modulo and whose lower 30 bits are kept as randomness.
//! The result is a pure function of key and maximum timestamp.
//!
//! # UUID byte order
//!
//! UUIDs are hashed from their Microsoft GUID byte layout (first three fields
//! little-endian, see [`Uuid::to_bytes_le()`]), each 8-byte half read as a
//! little-endian integer. Other implementations must use the same layout to derive
//! identical identifiers.

use std::time::SystemTime;

use sha2::{Digest as _, Sha256};
use uuid::Uuid;

use crate::{epoch, util, Error, TIMESTAMP_MAX};

pub fn uuid_hash(uuid: &Uuid) -> u64 {
    let bytes = uuid.to_bytes_le();
    let (low, high) = bytes.split_at(8);
    read_u64_le(low) ^ read_u64_le(high)
}

pub fn bytes_hash(key: &[u8]) -> Result<u64, Error> {
    if key.is_empty() {
        return Err(Error::EmptyKey);
    }

    let digest = Sha256::digest(key);
    Ok(read_u64_le(&digest[..8]))
}

/// Converts the maximum timestamp into whole seconds after the epoch.
pub fn max_offset(max_timestamp: SystemTime) -> Result<u64, Error> {
    let span = max_timestamp.duration_since(epoch()).map_err(|_| Error::TimestampBeforeEpoch)?;
    let seconds = span.as_secs();

    if seconds > TIMESTAMP_MAX {
        Err(Error::TimestampExceedsCapacity)
    } else {
        Ok(seconds)
    }
}

pub fn constrain(hash: u64, max_offset: u64) -> u64 {
    let (hashed_timestamp, hashed_random) = util::unpack(hash);
    let timestamp = hashed_timestamp % (max_offset + 1);

    tracing::trace!(hash, max_offset, timestamp, "constrained derived timestamp");

    util::pack(timestamp, hashed_random)
}

fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut buffer = [0; 8];
    buffer.copy_from_slice(bytes);
    u64::from_le_bytes(buffer)
}
