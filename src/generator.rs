#[cfg(feature = "rand")]
use std::time::SystemTime;

#[cfg(feature = "rand")]
use rand::RngCore as _;

use crate::{util, EPOCH_UNIX_SECONDS, RANDOM_MASK, TIMESTAMP_MAX};

/// Trait for entropy sources.
///
/// An entropy source supplies the clock reading and the random bits for newly generated
/// [`FastId`](crate::FastId)s. Implement it to generate `FastId`s from a custom clock or
/// random number generator and pass it to [`FastId::generate_with()`](crate::FastId::generate_with).
///
/// # Example
///
/// ```
/// use fastid::{EntropySource, FastId, EPOCH_UNIX_SECONDS};
///
/// struct FixedSource;
///
/// impl EntropySource for FixedSource {
///     fn timestamp(&mut self) -> Option<u64> {
///         Some(EPOCH_UNIX_SECONDS + 60)
///     }
///     fn random(&mut self) -> Option<u32> {
///         Some(42)
///     }
/// }
///
/// let id = FastId::generate_with(&mut FixedSource).unwrap();
///
/// assert_eq!(id.timestamp(), 60);
/// assert_eq!(id.randomness(), 42);
/// ```
pub trait EntropySource {
    /// Returns the current time in whole seconds since the Unix epoch.
    fn timestamp(&mut self) -> Option<u64>;

    /// Returns 32 random bits. Only the lower 30 bits are used.
    fn random(&mut self) -> Option<u32>;
}

/// Standard entropy source.
///
/// Reads the system clock and draws random bits from the thread-local
/// cryptographically secure generator of the `rand` crate. It holds no state,
/// so every thread can use its own instance without coordination.
///
/// This entropy source is only available with the `rand` feature.
///
/// # Example
///
/// ```
/// use fastid::{FastId, StandardEntropySource};
///
/// assert!(FastId::generate_with(&mut StandardEntropySource).is_some());
/// ```
#[cfg(feature = "rand")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardEntropySource;

#[cfg(feature = "rand")]
impl EntropySource for StandardEntropySource {
    fn timestamp(&mut self) -> Option<u64> {
        let since_epoch = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).ok()?;
        Some(since_epoch.as_secs())
    }

    fn random(&mut self) -> Option<u32> {
        Some(rand::thread_rng().next_u32())
    }
}

pub fn generate<S: EntropySource + ?Sized>(source: &mut S) -> Option<u64> {
    let Some(now) = source.timestamp() else {
        tracing::debug!("entropy source returned no timestamp");
        return None;
    };

    let Some(offset) = now.checked_sub(EPOCH_UNIX_SECONDS).filter(|&offset| offset <= TIMESTAMP_MAX) else {
        tracing::debug!(now, "clock reading outside of the FastId timestamp range");
        return None;
    };

    let Some(random) = source.random() else {
        tracing::debug!("entropy source returned no randomness");
        return None;
    };

    Some(util::pack(offset, u64::from(random) & RANDOM_MASK))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEntropySource {
        timestamp: Option<u64>,
        random: Option<u32>,
    }

    impl FixedEntropySource {
        #[must_use]
        const fn new(timestamp: Option<u64>, random: Option<u32>) -> Self {
            Self { timestamp, random }
        }
    }

    impl EntropySource for FixedEntropySource {
        fn timestamp(&mut self) -> Option<u64> {
            self.timestamp
        }
        fn random(&mut self) -> Option<u32> {
            self.random
        }
    }

    #[test]
    fn test_generate_packs_fields() {
        let mut source = FixedEntropySource::new(Some(EPOCH_UNIX_SECONDS + 1000), Some(5));
        assert_eq!(generate(&mut source), Some(1_073_741_824_005));
    }

    #[test]
    fn test_generate_masks_randomness() {
        let mut source = FixedEntropySource::new(Some(EPOCH_UNIX_SECONDS), Some(u32::MAX));
        assert_eq!(generate(&mut source), Some(RANDOM_MASK));
    }

    #[test]
    fn test_generate_rejects_out_of_range_clock() {
        let mut before = FixedEntropySource::new(Some(EPOCH_UNIX_SECONDS - 1), Some(1));
        assert_eq!(generate(&mut before), None);

        let mut last = FixedEntropySource::new(Some(EPOCH_UNIX_SECONDS + TIMESTAMP_MAX), Some(0));
        assert_eq!(generate(&mut last), Some(TIMESTAMP_MAX << 30));

        let mut after = FixedEntropySource::new(Some(EPOCH_UNIX_SECONDS + TIMESTAMP_MAX + 1), Some(0));
        assert_eq!(generate(&mut after), None);
    }

    #[test]
    fn test_generate_without_entropy() {
        let mut no_clock = FixedEntropySource::new(None, Some(1));
        assert_eq!(generate(&mut no_clock), None);

        let mut no_random = FixedEntropySource::new(Some(EPOCH_UNIX_SECONDS), None);
        assert_eq!(generate(&mut no_random), None);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_standard_source() {
        let mut source = StandardEntropySource;
        let now = source.timestamp().unwrap();
        assert!(now > EPOCH_UNIX_SECONDS);

        let a = generate(&mut source).unwrap();
        let b = generate(&mut source).unwrap();
        assert_ne!(a, 0);
        assert!(b >> 30 >= a >> 30);
    }
}
