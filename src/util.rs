use std::fmt::Formatter;

use crate::{EPOCH_UNIX_SECONDS, Error, RANDOM_BITS, RANDOM_MASK, TIMESTAMP_MAX};

/// Packs timestamp offset and randomness into the raw bit pattern.
///
/// The caller guarantees `timestamp <= TIMESTAMP_MAX` and `random <= RANDOM_MASK`.
pub const fn pack(timestamp: u64, random: u64) -> u64 {
    (timestamp << RANDOM_BITS) | random
}

pub const fn unpack(raw: u64) -> (u64, u64) {
    (raw >> RANDOM_BITS, raw & RANDOM_MASK)
}

pub const fn from_parts(timestamp: u64, randomness: u64) -> Result<u64, Error> {
    if timestamp > TIMESTAMP_MAX {
        Err(Error::TimestampOutOfRange)
    } else if randomness > RANDOM_MASK {
        Err(Error::RandomnessOutOfRange)
    } else {
        Ok(pack(timestamp, randomness))
    }
}

pub fn debug_fastid(name: &str, text: &str, raw: u64, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
    struct Timestamp(u64);
    impl std::fmt::Debug for Timestamp {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
            write!(f, "\"{ts}\"", ts = timestamp_to_string(self.0))
        }
    }

    struct Randomness(u64);
    impl std::fmt::Debug for Randomness {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
            write!(f, "\"{:08X}\"", self.0)
        }
    }

    let (timestamp, randomness) = unpack(raw);

    f.debug_struct(name)
        .field("text", &text)
        .field("timestamp", &Timestamp(timestamp))
        .field("randomness", &Randomness(randomness))
        .finish()
}

/// Renders a timestamp offset (seconds since the `FastId` epoch) as an RFC 3339 string.
fn timestamp_to_string(offset: u64) -> String {
    const DAYS_PER_YEAR: u64 = 365;
    const DAYS_PER_LEAP_YEAR: u64 = DAYS_PER_YEAR + 1;

    const DAYS_PER_QUAD_YEAR: u64 = 4 * DAYS_PER_YEAR + 1; // leap year: every 4 years,
    const DAYS_PER_CENTURY: u64 = 25 * DAYS_PER_QUAD_YEAR - 1; // but not every 100 years,
    const DAYS_PER_QUADRICENTENNIAL: u64 = 4 * DAYS_PER_CENTURY + 1; // but again every 400 years.

    const BASE: u64 = 1600;
    const DAYS_BASE_TO_1970: u64 = 3 * DAYS_PER_CENTURY + 1 + 70 * DAYS_PER_YEAR + 70 / 4;

    let seconds = EPOCH_UNIX_SECONDS + offset;

    let (minutes, seconds) = (seconds / 60, (seconds % 60) as u32);
    let (hours, minutes) = (minutes / 60, (minutes % 60) as u32);
    let (days, hours) = (hours / 24, (hours % 24) as u32);

    // days relative to year 1600
    let days = days + DAYS_BASE_TO_1970;

    let (quadricentennials, days) = (days / DAYS_PER_QUADRICENTENNIAL, days % DAYS_PER_QUADRICENTENNIAL);
    let (centuries, days) = (days / DAYS_PER_CENTURY, days % DAYS_PER_CENTURY);
    let (quad_years, days) = (days / DAYS_PER_QUAD_YEAR, days % DAYS_PER_QUAD_YEAR);

    let is_leap_year = days < DAYS_PER_LEAP_YEAR;

    let (years, days) = if is_leap_year {
        (0, days)
    } else {
        let days = days - DAYS_PER_LEAP_YEAR;
        let (normal_years, days) = (days / DAYS_PER_YEAR, days % DAYS_PER_YEAR);
        (normal_years + 1, days)
    };

    let year = BASE + quadricentennials * 400 + centuries * 100 + quad_years * 4 + years;

    #[rustfmt::skip]
    let days_in_month = [
        31,
        if is_leap_year { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ];

    let mut days = days;
    let mut month = 0;
    while days >= days_in_month[month] {
        days -= days_in_month[month];
        month += 1;
    }

    let month = month + 1;
    let day = days + 1;

    format!("{year:04}-{month:02}-{day:02}T{hours:02}:{minutes:02}:{seconds:02}Z")
}
