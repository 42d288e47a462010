//! Fixed bit permutation applied at the text boundary.
//!
//! The 64 bits are read as an 8x8 matrix (eight bytes of eight bits) and transposed:
//! bit `k * 8 + j` moves to position `j * 8 + k`. Neighbouring identifiers differ mostly in
//! their low random bits and a few timestamp bits; after the transpose those differences are
//! spread over the whole token, so the text does not give away creation order.
//!
//! This is obfuscation only. It offers no cryptographic protection.

const fn permutation() -> ([u8; 64], [u8; 64]) {
    let mut forward = [0; 64];
    let mut inverse = [0; 64];

    let mut chunk = 0;
    while chunk < 8 {
        let mut bit = 0;
        while bit < 8 {
            let original = chunk * 8 + bit;
            let shuffled = bit * 8 + chunk;
            forward[original] = shuffled as u8;
            inverse[shuffled] = original as u8;
            bit += 1;
        }
        chunk += 1;
    }

    (forward, inverse)
}

const SHUFFLE: [u8; 64] = permutation().0;
const UNSHUFFLE: [u8; 64] = permutation().1;

const fn permute(value: u64, table: &[u8; 64]) -> u64 {
    let mut permuted = 0;

    let mut i = 0;
    while i < 64 {
        if (value >> i) & 1 == 1 {
            permuted |= 1 << table[i];
        }
        i += 1;
    }

    permuted
}

pub const fn shuffle(value: u64) -> u64 {
    permute(value, &SHUFFLE)
}

pub const fn unshuffle(value: u64) -> u64 {
    permute(value, &UNSHUFFLE)
}
