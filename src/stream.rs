//! Codeword streams as text (`0`/`1` characters) and as packed bytes.

use {
    crate::{
        code::Codeword,
        error::{Error, Result},
    },
    bitvec::prelude::*,
    std::convert::TryFrom,
};

/// Writes each bit as a literal `0` or `1`.
pub fn render(bits: &BitSlice<Local, u8>) -> String {
    (0..bits.len())
        .map(|i| if bits[i] { '1' } else { '0' })
        .collect()
}

/// Reads a literal `0`/`1` stream. One trailing line break is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidSymbol`] on any other character.
pub fn parse(text: &str) -> Result<Codeword> {
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);

    let mut bits = Codeword::new();
    for (position, found) in text.chars().enumerate() {
        match found {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(Error::InvalidSymbol { found, position }),
        }
    }
    Ok(bits)
}

/// Packs `bits` eight to a byte.
///
/// The last byte may be partially used, so a little-endian `u32` saying how
/// many bits are meaningful is appended.
pub fn pack_bits(bits: &BitSlice<Local, u8>) -> Result<Vec<u8>> {
    let bit_count = u32::try_from(bits.len()).map_err(|_| Error::MalformedContainer {
        reason: "stream is longer than u32::MAX bits",
    })?;

    let mut packed = Codeword::new();
    packed.extend_from_slice(bits);
    let mut bytes = packed.into_vec();
    bytes.extend_from_slice(&bit_count.to_le_bytes());
    Ok(bytes)
}

/// Reverses [`pack_bits`].
pub fn unpack_bits(bytes: &[u8]) -> Result<Codeword> {
    let (body, trailer) = split_u32_suffix(bytes).ok_or(Error::MalformedContainer {
        reason: "missing bit count",
    })?;
    let bit_count = trailer as usize;
    if bit_count > body.len() * 8 || body.len() > (bit_count + 7) / 8 {
        return Err(Error::MalformedContainer {
            reason: "bit count does not match the packed length",
        });
    }

    let mut bits = Codeword::new();
    bits.extend_from_slice(&BitSlice::<Local, u8>::from_slice(body)[..bit_count]);
    Ok(bits)
}

fn split_u32_suffix(bytes: &[u8]) -> Option<(&[u8], u32)> {
    let split = bytes.len().checked_sub(4)?;
    let (body, suffix) = bytes.split_at(split);
    let mut word = [0; 4];
    word.copy_from_slice(suffix);
    Some((body, u32::from_le_bytes(word)))
}

/// Splits off a little-endian `u32` length prefix and the `len` bytes after it.
pub(crate) fn split_prefixed(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    if bytes.len() < 4 {
        return None;
    }
    let (prefix, rest) = bytes.split_at(4);
    let mut word = [0; 4];
    word.copy_from_slice(prefix);
    let len = u32::from_le_bytes(word) as usize;
    if rest.len() < len {
        return None;
    }
    Some(rest.split_at(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form() {
        let bits = parse("0110\n").unwrap();
        assert_eq!(bits.len(), 4);
        assert_eq!(render(&bits), "0110");
        assert_eq!(render(&parse("").unwrap()), "");
    }

    #[test]
    fn text_form_rejects_other_characters() {
        assert!(matches!(
            parse("01 1"),
            Err(Error::InvalidSymbol {
                found: ' ',
                position: 2
            })
        ));
        assert!(matches!(parse("01\n\n"), Err(Error::InvalidSymbol { .. })));
    }

    #[test]
    fn packing_keeps_partial_bytes() {
        let bits = parse("1011001110").unwrap();
        let packed = pack_bits(&bits).unwrap();
        assert_eq!(packed.len(), 2 + 4);
        assert_eq!(&packed[2..], &10u32.to_le_bytes());
        assert_eq!(unpack_bits(&packed).unwrap(), bits);
    }

    #[test]
    fn packing_nothing() {
        let packed = pack_bits(&Codeword::new()).unwrap();
        assert_eq!(packed, vec![0, 0, 0, 0]);
        assert!(unpack_bits(&packed).unwrap().is_empty());
    }

    #[test]
    fn bad_bit_counts_are_rejected() {
        assert!(matches!(
            unpack_bits(&[0xff, 9, 0, 0, 0]),
            Err(Error::MalformedContainer { .. })
        ));
        assert!(matches!(
            unpack_bits(&[1, 2]),
            Err(Error::MalformedContainer { .. })
        ));
    }

    #[test]
    fn length_prefixes() {
        let bytes = [2, 0, 0, 0, b'h', b'i', b'!'];
        assert_eq!(split_prefixed(&bytes), Some((&b"hi"[..], &b"!"[..])));
        assert_eq!(split_prefixed(&bytes[..5]), None);
    }
}
