use std::{
    cmp::Ordering,
    fmt,
    io::Write as _,
    hash::{Hash, Hasher},
    str::{from_utf8_unchecked, FromStr},
    time::{Duration, SystemTime},
};

use uuid::Uuid;

use crate::{base32, derive, epoch, generator, shuffle, util, EntropySource, Error, MAX_TEXT_LEN};

/// Longest text kept from parsing: the decimal literal `-9223372036854775808`.
///
/// Longer decimal literals (leading zeros or a `+` sign) are kept in their plain decimal form.
const CACHE_CAPACITY: usize = 20;

#[derive(Clone, Copy)]
struct CachedText {
    len: u8,
    bytes: [u8; CACHE_CAPACITY],
}

impl CachedText {
    fn new(s: &str) -> Option<Self> {
        let mut bytes = [0; CACHE_CAPACITY];
        bytes.get_mut(..s.len())?.copy_from_slice(s.as_bytes());

        Some(Self {
            len: u8::try_from(s.len()).ok()?,
            bytes,
        })
    }

    /// Plain decimal form of `n`, used when a decimal literal is too long to keep verbatim.
    fn decimal(n: i64) -> Option<Self> {
        let mut bytes = [0; CACHE_CAPACITY];

        let mut cursor = &mut bytes[..];
        write!(cursor, "{n}").ok()?;
        let len = CACHE_CAPACITY - cursor.len();

        Some(Self {
            len: u8::try_from(len).ok()?,
            bytes,
        })
    }

    fn as_str(&self) -> &str {
        // Safety: The bytes are a complete copy of a `&str`
        unsafe { from_utf8_unchecked(&self.bytes[..usize::from(self.len)]) }
    }
}

/// A compact 64-bit identifier made of a timestamp and random bits.
///
/// The upper 34 bits hold the seconds since the [epoch](crate::epoch) (2025-01-01T00:00:00Z),
/// the lower 30 bits are random. The raw value is ordered by creation time; the text form is
/// a bit-permuted base-32 token of up to 13 characters and intentionally not.
///
/// Equality, ordering and hashing consider only the raw value.
///
/// # Text representation
///
/// A `FastId` created by [`FastId::parse`](str::parse) remembers the exact text it was parsed from
/// and displays that text again, even when it was lowercase or used look-alike letters.
/// Two equal `FastId`s can therefore display differently. Use [`FastId::to_canonical_string()`]
/// or [`canonicalize()`](crate::canonicalize) for the canonical text.
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use fastid::FastId;
///
/// let canonical: FastId = "1040G20802401".parse()?;
/// let sloppy: FastId = "1o4og2o8o24o1".parse()?;
///
/// assert_eq!(canonical, sloppy);
/// assert_eq!(sloppy.to_string(), "1o4og2o8o24o1");
/// assert_eq!(sloppy.to_canonical_string(), "1040G20802401");
/// # Ok(()) }
/// ```
///
/// # Empty value
///
/// The zero value is the empty `FastId`. It is the [`Default`] and displays as `"0"`.
///
/// ```
/// use fastid::FastId;
///
/// let id = FastId::default();
///
/// assert!(id.is_empty());
/// assert_eq!(id.to_string(), "0");
/// ```
#[derive(Default, Clone, Copy)]
pub struct FastId {
    raw: i64,
    text: Option<CachedText>,
}

impl FastId {
    /// The empty `FastId` with value zero.
    pub const EMPTY: Self = Self::from_i64(0);

    /// Creates a new empty `FastId`.
    ///
    /// Chances are high, you're looking for method [`FastId::generate()`].
    ///
    /// # Example
    ///
    /// ```
    /// use fastid::FastId;
    ///
    /// assert_eq!(FastId::new(), FastId::EMPTY);
    /// assert!(FastId::new().is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Generates a new `FastId` from the current time and fresh random bits.
    ///
    /// Two `FastId`s generated within the same second share the timestamp and differ in
    /// their random part with overwhelming probability.
    ///
    /// # Panics
    ///
    /// Panics if the system clock lies before the epoch (2025) or more than
    /// 2<sup>34</sup> seconds after it (year 2569).
    ///
    /// # Example
    ///
    /// ```
    /// use fastid::FastId;
    ///
    /// let id = FastId::generate();
    ///
    /// assert!(!id.is_empty());
    /// assert_ne!(id.to_string(), "0");
    /// ```
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn generate() -> Self {
        match Self::try_generate() {
            Some(id) => id,
            None => panic!("system clock is outside of the FastId timestamp range"),
        }
    }

    /// Generates a new `FastId` and never panics.
    ///
    /// This is a variant of [`FastId::generate()`] which returns `None`
    /// when the system clock is outside of the representable range.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn try_generate() -> Option<Self> {
        Self::generate_with(&mut generator::StandardEntropySource)
    }

    /// Generates a new `FastId` from the given entropy source.
    ///
    /// Returns `None` if the source fails or reports a time outside of the representable range.
    #[must_use]
    pub fn generate_with<S: EntropySource + ?Sized>(source: &mut S) -> Option<Self> {
        Some(Self::from_u64(generator::generate(source)?))
    }

    /// Derives a `FastId` from a UUID, with its timestamp no later than `max_timestamp`.
    ///
    /// The same UUID and maximum always produce the same `FastId`. This is meant for migrating
    /// records keyed by UUIDs while keeping the new identifiers roughly placed in time.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TimestampBeforeEpoch`] if `max_timestamp` lies before the epoch, and with
    /// [`Error::TimestampExceedsCapacity`] if it lies more than 2<sup>34</sup>-1 seconds after it.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use std::time::Duration;
    /// use fastid::FastId;
    /// use uuid::uuid;
    ///
    /// let uuid = uuid!("1a721394-6a63-4a55-89e5-8246c63749d2");
    /// let max_timestamp = fastid::epoch() + Duration::from_secs(16_848_000); // 2025-07-15
    ///
    /// let id = FastId::from_uuid_within(uuid, max_timestamp)?;
    ///
    /// assert_eq!(id.to_i64(), 16_044_546_604_463_645);
    /// assert_eq!(id.to_string(), "C5JP9XCHP4J1");
    /// assert!(id.datetime() <= max_timestamp);
    ///
    /// assert_eq!(FastId::from_uuid_within(uuid, fastid::epoch())?.timestamp(), 0);
    /// # Ok(()) }
    /// ```
    pub fn from_uuid_within(uuid: Uuid, max_timestamp: impl Into<SystemTime>) -> Result<Self, Error> {
        let max_offset = derive::max_offset(max_timestamp.into())?;
        Ok(Self::from_u64(derive::constrain(derive::uuid_hash(&uuid), max_offset)))
    }

    /// Derives a `FastId` from a string key, with its timestamp no later than `max_timestamp`.
    ///
    /// The key is hashed as UTF-8 with SHA-256. The same key and maximum always produce the same `FastId`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyKey`] if `key` is empty, and with the same range errors as
    /// [`FastId::from_uuid_within()`].
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use std::time::Duration;
    /// use fastid::FastId;
    ///
    /// let max_timestamp = fastid::epoch() + Duration::from_secs(16_848_000);
    ///
    /// let id = FastId::from_str_within("test-string-123", max_timestamp)?;
    ///
    /// assert_eq!(id.to_string(), "3WC9WB514E5T2");
    /// assert_eq!(id, FastId::from_str_within("test-string-123", max_timestamp)?);
    ///
    /// assert_eq!(FastId::from_str_within("", max_timestamp), Err(fastid::Error::EmptyKey));
    /// # Ok(()) }
    /// ```
    pub fn from_str_within(key: &str, max_timestamp: impl Into<SystemTime>) -> Result<Self, Error> {
        Self::from_bytes_within(key.as_bytes(), max_timestamp)
    }

    /// Derives a `FastId` from an opaque byte key, with its timestamp no later than `max_timestamp`.
    ///
    /// The key is hashed with SHA-256, so a string key and its UTF-8 bytes derive the same `FastId`.
    ///
    /// # Errors
    ///
    /// Same as [`FastId::from_str_within()`].
    pub fn from_bytes_within(key: &[u8], max_timestamp: impl Into<SystemTime>) -> Result<Self, Error> {
        let hash = derive::bytes_hash(key)?;
        let max_offset = derive::max_offset(max_timestamp.into())?;
        Ok(Self::from_u64(derive::constrain(hash, max_offset)))
    }

    /// Parses a `FastId` and returns `None` instead of an error.
    ///
    /// # Example
    ///
    /// ```
    /// use fastid::FastId;
    ///
    /// assert_eq!(FastId::try_parse("123").map(FastId::to_i64), Some(123));
    /// assert_eq!(FastId::try_parse("*"), None);
    /// ```
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Tests if a `FastId` is empty (zero).
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.raw == 0
    }

    /// Returns the timestamp part: seconds since the epoch, limited to 34 bits.
    #[must_use]
    pub const fn timestamp(self) -> u64 {
        util::unpack(self.to_u64()).0
    }

    /// Returns the random part, limited to 30 bits.
    #[must_use]
    pub const fn randomness(self) -> u32 {
        util::unpack(self.to_u64()).1 as u32
    }

    /// Returns the timestamp and randomness parts as a pair.
    #[must_use]
    pub const fn to_parts(self) -> (u64, u32) {
        (self.timestamp(), self.randomness())
    }

    /// Creates a `FastId` from timestamp and randomness parts.
    ///
    /// # Errors
    ///
    /// Will fail if the timestamp (34 bits) or randomness (30 bits) are out of range.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fastid::FastId;
    ///
    /// let id = FastId::from_parts(1000, 5)?;
    ///
    /// assert_eq!(id.to_parts(), (1000, 5));
    /// assert_eq!(id.to_string(), "1040G20802401");
    ///
    /// assert_eq!(FastId::from_parts(0, 1 << 30), Err(fastid::Error::RandomnessOutOfRange));
    /// # Ok(()) }
    /// ```
    pub const fn from_parts(timestamp: u64, randomness: u32) -> Result<Self, Error> {
        match util::from_parts(timestamp, randomness as u64) {
            Ok(n) => Ok(Self::from_u64(n)),
            Err(err) => Err(err),
        }
    }

    /// Returns the timestamp part as a [`SystemTime`].
    #[must_use]
    pub fn datetime(self) -> SystemTime {
        epoch() + Duration::from_secs(self.timestamp())
    }

    /// Converts a `FastId` into its raw `i64` value.
    #[must_use]
    pub const fn to_i64(self) -> i64 {
        self.raw
    }

    /// Creates a `FastId` from a raw `i64` value.
    ///
    /// Every value is accepted; it is up to the caller what the bits mean.
    ///
    /// # Example
    ///
    /// ```
    /// use fastid::FastId;
    ///
    /// assert_eq!(FastId::from_i64(123).to_string(), "81040G0081");
    /// assert_eq!(FastId::from_i64(-1).to_string(), "FZZZZZZZZZZZZ");
    /// ```
    #[must_use]
    pub const fn from_i64(n: i64) -> Self {
        Self { raw: n, text: None }
    }

    /// Converts a `FastId` into the bit pattern of its raw value.
    #[must_use]
    pub const fn to_u64(self) -> u64 {
        self.raw as u64
    }

    /// Creates a `FastId` from the bit pattern of a raw value.
    #[must_use]
    pub const fn from_u64(n: u64) -> Self {
        Self::from_i64(n as i64)
    }

    /// Returns the text this `FastId` was parsed from, if any.
    #[must_use]
    pub fn cached_text(&self) -> Option<&str> {
        self.text.as_ref().map(CachedText::as_str)
    }

    /// Returns the canonical text, ignoring any text remembered from parsing.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use fastid::FastId;
    ///
    /// let id: FastId = "123".parse()?;
    ///
    /// assert_eq!(id.to_string(), "123");
    /// assert_eq!(id.to_canonical_string(), "81040G0081");
    /// # Ok(()) }
    /// ```
    #[must_use]
    pub fn to_canonical_string(self) -> String {
        let mut buffer = [0; MAX_TEXT_LEN];
        base32::encode(shuffle::shuffle(self.to_u64()), &mut buffer).to_string()
    }

    /// Return the string representation of a `FastId` and never panics.
    ///
    /// Returns `None` if the memory for the string cannot be allocated.
    #[must_use]
    pub fn try_to_string(&self) -> Option<String> {
        let mut buffer = [0; MAX_TEXT_LEN];
        let text = self.text(&mut buffer);

        let mut s = String::new();
        s.try_reserve_exact(text.len()).ok()?;
        s.push_str(text);

        Some(s)
    }

    pub(crate) fn text<'a>(&'a self, buffer: &'a mut [u8; MAX_TEXT_LEN]) -> &'a str {
        match &self.text {
            Some(cached) => cached.as_str(),
            None => base32::encode(shuffle::shuffle(self.to_u64()), buffer),
        }
    }

    fn parsed(raw: i64, s: &str) -> Self {
        Self {
            raw,
            text: CachedText::new(s),
        }
    }
}

impl PartialEq for FastId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for FastId {}

impl PartialOrd for FastId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FastId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Hash for FastId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Debug for FastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut buffer = [0; MAX_TEXT_LEN];
        util::debug_fastid("FastId", self.text(&mut buffer), self.to_u64(), f)
    }
}

impl fmt::Display for FastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0; MAX_TEXT_LEN];
        f.write_str(self.text(&mut buffer))
    }
}

impl FromStr for FastId {
    type Err = Error;

    /// Parses a decimal `i64` literal as the raw value, or else a base-32 token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(raw) = s.parse::<i64>() {
            tracing::trace!(raw, "parsed FastId from decimal literal");
            return Ok(Self {
                raw,
                text: CachedText::new(s).or_else(|| CachedText::decimal(raw)),
            });
        }

        if s.len() > MAX_TEXT_LEN || s.chars().all(char::is_whitespace) {
            return Err(Error::Malformed);
        }

        let raw = shuffle::unshuffle(base32::decode(s.as_bytes())?);
        tracing::trace!(raw, "parsed FastId from base-32 token");

        Ok(Self::parsed(raw as i64, s))
    }
}

impl TryFrom<&str> for FastId {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<i64> for FastId {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<FastId> for i64 {
    fn from(id: FastId) -> Self {
        id.to_i64()
    }
}

impl From<u64> for FastId {
    fn from(n: u64) -> Self {
        Self::from_u64(n)
    }
}

impl From<FastId> for u64 {
    fn from(id: FastId) -> Self {
        id.to_u64()
    }
}
