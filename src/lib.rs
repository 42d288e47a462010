//! # Compact, Case-Insensitive 64-bit Identifiers
//!
//! This crate provides `FastId`s: 64-bit identifiers made of a coarse timestamp (seconds since
//! 2025-01-01) and 30 random bits, written as short base-32 tokens which are easy to read,
//! type and say out loud.
//!
//! ## Generating FastIds
//!
//! `FastId`s are generated using the [`FastId::generate()`] method:
//!
//! ```
//! use fastid::FastId;
//!
//! let id = FastId::generate();
//! ```
//!
//! Generation needs no coordination between threads. Identifiers created within the same second
//! share their timestamp and differ in their random part. Uniqueness is probabilistic: 30 random
//! bits per second keep collisions unlikely, not impossible.
//!
//! ## Printing and Parsing
//!
//! `FastId`s implement [`std::fmt::Display`] and [`std::str::FromStr`]:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use fastid::FastId;
//!
//! let id: FastId = "C5JP9XCHP4J1".parse()?;
//!
//! assert_eq!(id.to_string(), "C5JP9XCHP4J1");
//! # Ok(()) }
//! ```
//!
//! The text uses the alphabet `0123456789ABCDEFGHJKMNPQRSTVWXYZ`. Parsing ignores case and reads
//! the letters `O` as `0` and `I`/`L` as `1`. A decimal `i64` literal such as `"123"` is accepted
//! as well and taken as the raw value.
//!
//! Before encoding, the bits of the raw value are transposed, so identifiers created one after
//! another do not look alike. The raw value, as returned by [`FastId::to_i64()`], keeps the
//! creation order; the text does not.
//!
//! ## Deriving FastIds from Legacy Keys
//!
//! Existing UUIDs or string keys map deterministically onto `FastId`s whose timestamp never
//! lies after a given maximum:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use std::time::SystemTime;
//! use fastid::FastId;
//!
//! let cutoff = SystemTime::now();
//!
//! let a = FastId::from_str_within("customer-4711", cutoff)?;
//! let b = FastId::from_str_within("customer-4711", cutoff)?;
//!
//! assert_eq!(a, b);
//! assert!(a.datetime() <= cutoff);
//! # Ok(()) }
//! ```
//!
//! ## Serializing and Deserializing using `Serde` (JSON)
//!
//! With the feature flag `serde` enabled, `FastId`s implement the `Serialize` and `Deserialize`
//! traits and are written as their text:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! # #[cfg(feature = "serde")]
//! # {
//! use fastid::FastId;
//! # use serde_derive as serde;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Example {
//!     id: FastId,
//!     data: String,
//! }
//!
//! let e1 = Example {
//!     id: FastId::generate(),
//!     data: "Hello, World!".to_string(),
//! };
//!
//! let s = serde_json::to_string(&e1)?;
//! let e2: Example = serde_json::from_str(&s)?;
//!
//! assert_eq!(e1, e2);
//! # }
//! # Ok(()) }
//! ```
//!
//! ## Feature Flags
//!
//! - **`rand`**: Utilizes the `rand` crate as the source for random numbers, enabled by default.
//! - **`serde`**: Provides support for serialization and deserialization via `Serde`, optional.
//!

mod base32;
mod derive;
mod error;
mod generator;
mod identifier;
#[cfg(feature = "serde")]
mod serde;
mod shuffle;
mod util;

use std::{
    borrow::Cow,
    time::{Duration, SystemTime},
};

pub use error::Error;
pub use generator::EntropySource;
#[cfg(feature = "rand")]
pub use generator::StandardEntropySource;
pub use identifier::FastId;

/// The epoch of all `FastId` timestamps (2025-01-01T00:00:00Z) in seconds since the Unix epoch.
pub const EPOCH_UNIX_SECONDS: u64 = 1_735_689_600;

/// Longest text of a 64-bit value in base-32.
pub const MAX_TEXT_LEN: usize = 13;

const RANDOM_BITS: u32 = 30;
const RANDOM_MASK: u64 = (1 << RANDOM_BITS) - 1;

const TIMESTAMP_BITS: u32 = 34;
const TIMESTAMP_MAX: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Returns the epoch of all `FastId` timestamps as a [`SystemTime`].
#[must_use]
pub fn epoch() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(EPOCH_UNIX_SECONDS)
}

/// Canonicalizes a `FastId` string.
///
/// Parses the string and returns the canonical text of the resulting `FastId`:
/// uppercase, look-alike letters replaced by digits and without leading zeros.
/// A decimal literal is replaced by the base-32 text of its value.
///
/// If the input is already in canonical form, it returns a borrowed version of the input string
/// without allocating a new `String`.
///
/// # Errors
///
/// The string must be a valid `FastId`, otherwise the parse error is returned.
///
/// # Example
///
/// ```
/// assert_eq!(fastid::canonicalize("c5jp9xchp4j1"), Ok("C5JP9XCHP4J1".into()));
/// assert_eq!(fastid::canonicalize("1o4og2o8o24o1"), Ok("1040G20802401".into()));
/// assert_eq!(fastid::canonicalize("123"), Ok("81040G0081".into()));
/// ```
pub fn canonicalize(s: &str) -> Result<Cow<str>, Error> {
    let canonical = s.parse::<FastId>()?.to_canonical_string();

    if canonical == s {
        Ok(s.into())
    } else {
        Ok(canonical.into())
    }
}

/// Checks a `FastId` string for validity.
///
/// # Errors
///
/// If the string is not valid, an appropriate error is returned.
///
/// # Example
///
/// ```
/// assert!(fastid::validate("C5JP9XCHP4J1").is_ok());
/// assert!(fastid::validate("c5jp9xchp4j1").is_ok());
/// assert!(fastid::validate("-42").is_ok());
///
/// assert_eq!(fastid::validate("C5JP9XCHP4JU"), Err(fastid::Error::InvalidChar));
/// assert_eq!(fastid::validate("GZZZZZZZZZZZZ"), Err(fastid::Error::Overflow));
/// assert_eq!(fastid::validate(" "), Err(fastid::Error::Malformed));
/// ```
pub fn validate(s: &str) -> Result<(), Error> {
    s.parse::<FastId>().map(drop)
}

#[cfg(test)]
mod tests;
