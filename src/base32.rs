use std::str::from_utf8_unchecked;

use crate::{Error, MAX_TEXT_LEN};

// cspell:disable-next-line
const ALPHABET: [u8; 32] = *b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

// Letters I, L and O decode as their look-alike digits, U stays invalid.
#[rustfmt::skip]
const DECODE: [i8; 256] = [
    /* 0x00 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x10 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x20 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x30 */   0,  1,  2,  3,  4,  5,  6,  7,  8,  9, -1, -1, -1, -1, -1, -1,
    /* 0x40 */  -1, 10, 11, 12, 13, 14, 15, 16, 17,  1, 18, 19,  1, 20, 21,  0,
    /* 0x50 */  22, 23, 24, 25, 26, -1, 27, 28, 29, 30, 31, -1, -1, -1, -1, -1,
    /* 0x60 */  -1, 10, 11, 12, 13, 14, 15, 16, 17,  1, 18, 19,  1, 20, 21,  0,
    /* 0x70 */  22, 23, 24, 25, 26, -1, 27, 28, 29, 30, 31, -1, -1, -1, -1, -1,
    /* 0x80 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x90 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xA0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xB0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xC0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xD0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xE0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xF0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// Encodes `n` most significant symbol first, without leading zeros.
///
/// The result borrows the tail of `buffer`; zero encodes as `"0"`.
pub fn encode(mut n: u64, buffer: &mut [u8; MAX_TEXT_LEN]) -> &str {
    let mut start = MAX_TEXT_LEN;

    loop {
        start -= 1;
        buffer[start] = ALPHABET[(n & 0x1F) as usize];
        n >>= 5;
        if n == 0 {
            break;
        }
    }

    // Safety: Encoding above guarantees valid UTF-8
    unsafe { from_utf8_unchecked(&buffer[start..]) }
}

pub fn decode(ascii_bytes: &[u8]) -> Result<u64, Error> {
    if ascii_bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::EmptyInput);
    }

    let mut n: u64 = 0;

    for &byte in ascii_bytes {
        let value = decode_char(byte)?;

        if n > (u64::MAX - value) / 32 {
            return Err(Error::Overflow);
        }

        n = n * 32 + value;
    }

    Ok(n)
}

fn decode_char(char: u8) -> Result<u64, Error> {
    u64::try_from(DECODE[usize::from(char)]).or(Err(Error::InvalidChar))
}
