//! Nano flavoured base32.
//!
//! Values are encoded most significant bit first. When the character count
//! holds more bits than the input, the leading bits are zero padding.

use super::AddressError;

/// The 32 symbols an address is written in, ordered by value.
pub const ALPHABET: &str = "13456789abcdefghijkmnopqrstuwxyz";

const SYMBOLS: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Encodes `bytes` into exactly `chars` symbols.
///
/// `chars * 5` must be at least `bytes.len() * 8`.
pub(crate) fn encode(bytes: &[u8], chars: usize) -> String {
    let data_bits = bytes.len() * 8;
    let pad = chars * 5 - data_bits;

    (0..chars)
        .map(|i| {
            let mut value = 0usize;
            for b in 0..5 {
                let pos = i * 5 + b;
                let bit = if pos < pad {
                    0
                } else {
                    let k = pos - pad;
                    (bytes[k / 8] >> (7 - k % 8)) & 1
                };
                value = (value << 1) | bit as usize;
            }
            SYMBOLS[value] as char
        })
        .collect()
}

/// Decodes symbols back into `N` bytes. Padding bits must be zero.
pub(crate) fn decode<const N: usize>(s: &str) -> Result<[u8; N], AddressError> {
    let total_bits = s.len() * 5;
    let data_bits = N * 8;
    if total_bits < data_bits || total_bits - data_bits >= 5 {
        return Err(AddressError::InvalidLength(s.len()));
    }
    let pad = total_bits - data_bits;

    let mut out = [0u8; N];
    for (i, c) in s.chars().enumerate() {
        let value = symbol_value(c).ok_or(AddressError::InvalidCharacter(c))?;
        for b in 0..5 {
            let pos = i * 5 + b;
            let bit = (value >> (4 - b)) & 1;
            if pos < pad {
                if bit != 0 {
                    return Err(AddressError::NonZeroPadding);
                }
            } else {
                let k = pos - pad;
                out[k / 8] |= bit << (7 - k % 8);
            }
        }
    }
    Ok(out)
}

#[inline]
pub(crate) fn is_symbol(c: char) -> bool {
    symbol_value(c).is_some()
}

fn symbol_value(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    SYMBOLS.iter().position(|&s| s == c as u8).map(|p| p as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_32_unique_symbols() {
        let mut symbols: Vec<char> = ALPHABET.chars().collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 32);
        for excluded in ['0', '2', 'l', 'v'] {
            assert!(!is_symbol(excluded));
        }
    }

    #[test]
    fn test_encode_with_padding() {
        // 8 bits in 2 symbols: 2 padding bits, then 0b11111111
        assert_eq!(encode(&[0xff], 2), "9z");
        assert_eq!(encode(&[0x00], 2), "11");
    }

    #[test]
    fn test_decode_inverts_encode() {
        let bytes = [0xde, 0xad, 0xbe, 0xef, 0x42];
        let text = encode(&bytes, 8);
        assert_eq!(decode::<5>(&text).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert_eq!(decode::<1>("0z"), Err(AddressError::InvalidCharacter('0')));
        assert_eq!(decode::<1>("zz"), Err(AddressError::NonZeroPadding));
        assert_eq!(decode::<1>("zzz"), Err(AddressError::InvalidLength(3)));
    }
}
