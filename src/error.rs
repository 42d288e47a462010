use thiserror::Error;

/// Errors that can occur when creating `FastId`s out of foreign data.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Error)]
pub enum Error {
    /// The string to decode is empty or contains only whitespace.
    #[error("string is empty or whitespace")]
    EmptyInput,
    /// The string contains a character outside of the base-32 alphabet.
    #[error("string contains an invalid character")]
    InvalidChar,
    /// The string decodes to a value which does not fit into 64 bits.
    #[error("string decodes to a value larger than 64 bits")]
    Overflow,
    /// The string is neither a decimal integer nor a base-32 token.
    #[error("string is not a valid FastId")]
    Malformed,
    /// The maximum timestamp for a derived `FastId` lies before the epoch.
    #[error("max_timestamp cannot be before the FastId epoch")]
    TimestampBeforeEpoch,
    /// The maximum timestamp for a derived `FastId` lies beyond the 34-bit timestamp capacity.
    #[error("max_timestamp exceeds the 34-bit timestamp capacity")]
    TimestampExceedsCapacity,
    /// The key to derive a `FastId` from is empty.
    #[error("key cannot be empty")]
    EmptyKey,
    /// The given timestamp for the `FastId` is too large.
    #[error("timestamp is too large")]
    TimestampOutOfRange,
    /// The given randomness for the `FastId` is too large.
    #[error("randomness is too large")]
    RandomnessOutOfRange,
}

impl Error {
    /// Returns the name of the argument which caused the error, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use fastid::Error;
    ///
    /// assert_eq!(Error::TimestampBeforeEpoch.parameter(), Some("max_timestamp"));
    /// assert_eq!(Error::EmptyKey.parameter(), Some("key"));
    /// assert_eq!(Error::InvalidChar.parameter(), None);
    /// ```
    #[must_use]
    pub const fn parameter(self) -> Option<&'static str> {
        match self {
            Self::TimestampBeforeEpoch | Self::TimestampExceedsCapacity => Some("max_timestamp"),
            Self::EmptyKey => Some("key"),
            Self::TimestampOutOfRange => Some("timestamp"),
            Self::RandomnessOutOfRange => Some("randomness"),
            Self::EmptyInput | Self::InvalidChar | Self::Overflow | Self::Malformed => None,
        }
    }
}
