//! Huffman coding of text.
//!
//! Characters are counted into a [`FrequencyTable`], a [`HuffmanTree`] is
//! built by merging the two lightest nodes until one is left, and the paths
//! to its leaves become the codewords of a [`CodeTable`]. [`encode`] and
//! [`decode`] translate between text and codeword streams with that table.
//!
//! ```
//! use text_huffman::{decode, encode, stream, CodeTable, HuffmanTree};
//!
//! let tree = HuffmanTree::of("aabbbcccc")?;
//! let table = CodeTable::of(&tree);
//! assert!(table.get('c').unwrap().len() <= table.get('a').unwrap().len());
//!
//! let bits = encode("aabbbcccc", &table)?;
//! println!("{}", stream::render(&bits));
//! assert_eq!(decode(&bits, &table)?, "aabbbcccc");
//! # Ok::<(), text_huffman::Error>(())
//! ```

pub mod code;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod stream;
pub mod tree;

pub use {
    code::{CodeTable, Codeword},
    codec::{decode, encode, Decoder},
    error::{Error, Result},
    frequency::FrequencyTable,
    tree::{HuffmanTree, Node},
};

use std::{convert::TryFrom, str};

/// Counts `text`, builds its code and encodes it.
///
/// Returns the code table together with the codeword stream; the table is
/// needed to decode the stream again.
pub fn encode_text(text: &str) -> Result<(CodeTable, Codeword)> {
    let frequencies = FrequencyTable::of(text);
    log::debug!(
        "Counted {} characters over an alphabet of {}",
        frequencies.total(),
        frequencies.len()
    );
    let tree = HuffmanTree::build(&frequencies)?;
    let table = CodeTable::of(&tree);
    log::debug!(
        "Code of {} codewords needs {} symbols",
        table.len(),
        table.encoded_len(&frequencies)
    );
    let bits = encode(text, &table)?;
    Ok((table, bits))
}

/// Compresses `text` into a self-contained container: the length-prefixed
/// codeword listing followed by the packed codeword stream.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] for an empty text.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    let (table, bits) = encode_text(text)?;

    let listing = table.to_string();
    let listing_len = u32::try_from(listing.len()).map_err(|_| Error::MalformedContainer {
        reason: "codeword listing is longer than u32::MAX bytes",
    })?;

    let mut out = Vec::with_capacity(4 + listing.len() + bits.len() / 8 + 5);
    out.extend_from_slice(&listing_len.to_le_bytes());
    out.extend_from_slice(listing.as_bytes());
    out.extend_from_slice(&stream::pack_bits(&bits)?);
    log::debug!("Compressed {} bytes into {}", text.len(), out.len());
    Ok(out)
}

/// Reverses [`compress`].
pub fn decompress(bytes: &[u8]) -> Result<String> {
    let (listing, body) = stream::split_prefixed(bytes).ok_or(Error::MalformedContainer {
        reason: "truncated codeword listing",
    })?;
    let listing = str::from_utf8(listing).map_err(|_| Error::MalformedContainer {
        reason: "codeword listing is not valid UTF-8",
    })?;
    let table = CodeTable::read_listing(listing)?;
    let bits = stream::unpack_bits(body)?;
    decode(&bits, &table)
}
