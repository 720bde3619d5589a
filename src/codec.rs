use {
    crate::{
        code::{CodeTable, Codeword},
        error::{Error, Result},
    },
    bitvec::prelude::*,
};

/// Replaces every character of `input` with its codeword.
///
/// # Errors
///
/// Returns [`Error::UnknownSymbol`] for the first character that has no
/// codeword in `table`.
pub fn encode(input: &str, table: &CodeTable) -> Result<Codeword> {
    let mut bits = Codeword::new();
    for (position, symbol) in input.chars().enumerate() {
        match table.get(symbol) {
            Some(code) => bits.extend_from_slice(code),
            None => return Err(Error::UnknownSymbol { symbol, position }),
        }
    }
    log::debug!(
        "Encoded {} characters into {} symbols",
        input.chars().count(),
        bits.len()
    );
    Ok(bits)
}

/// Decodes `bits` with `table`. See [`Decoder::decode`].
pub fn decode(bits: &BitSlice<Local, u8>, table: &CodeTable) -> Result<String> {
    Decoder::new(table)?.decode(bits)
}

const ROOT: usize = 0;

#[derive(Debug)]
enum Step {
    Leaf(char),
    Branch {
        zero: Option<usize>,
        one: Option<usize>,
    },
}

/// A binary trie over the codewords of a [`CodeTable`].
///
/// Decoding walks one edge per input symbol and emits a character whenever
/// it lands on a leaf, then starts over at the root.
#[derive(Debug)]
pub struct Decoder {
    arena: Vec<Step>,
}

impl Decoder {
    /// # Errors
    ///
    /// Returns [`Error::NotPrefixFree`] if two codewords of `table` collide.
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut this = Decoder {
            arena: vec![Step::Branch {
                zero: None,
                one: None,
            }],
        };
        for (symbol, code) in table.iter() {
            this.insert(symbol, code)?;
        }
        Ok(this)
    }

    fn insert(&mut self, symbol: char, code: &BitSlice<Local, u8>) -> Result<()> {
        let mut node = ROOT;
        for position in 0..code.len() {
            let bit = code[position];
            let last = position + 1 == code.len();
            let child = match self.arena[node] {
                Step::Leaf(other) => {
                    return Err(Error::NotPrefixFree {
                        symbol: other,
                        other: symbol,
                    })
                }
                Step::Branch { zero, one } => {
                    if bit {
                        one
                    } else {
                        zero
                    }
                }
            };
            match child {
                Some(existing) if last => {
                    return Err(Error::NotPrefixFree {
                        symbol,
                        other: self.any_symbol(existing).unwrap_or(symbol),
                    })
                }
                Some(existing) => node = existing,
                None => {
                    let next = self.arena.len();
                    self.arena.push(if last {
                        Step::Leaf(symbol)
                    } else {
                        Step::Branch {
                            zero: None,
                            one: None,
                        }
                    });
                    if let Step::Branch { zero, one } = &mut self.arena[node] {
                        *(if bit { one } else { zero }) = Some(next);
                    }
                    node = next;
                }
            }
        }
        if code.is_empty() {
            return Err(Error::NotPrefixFree {
                symbol,
                other: self.any_symbol(ROOT).unwrap_or(symbol),
            });
        }
        Ok(())
    }

    fn any_symbol(&self, mut node: usize) -> Option<char> {
        loop {
            match self.arena[node] {
                Step::Leaf(symbol) => return Some(symbol),
                Step::Branch { zero, one } => node = zero.or(one)?,
            }
        }
    }

    /// Turns a concatenation of codewords back into text.
    ///
    /// # Errors
    ///
    /// - [`Error::CorruptStream`] if a symbol leads off the trie, which can
    ///   only happen with a table that does not cover every path (such as
    ///   the one-character table).
    /// - [`Error::TruncatedStream`] if `bits` stops inside a codeword.
    pub fn decode(&self, bits: &BitSlice<Local, u8>) -> Result<String> {
        let mut out = String::new();
        let mut node = ROOT;
        let mut pending = 0;

        for position in 0..bits.len() {
            let next = match self.arena[node] {
                Step::Branch { zero, one } => {
                    if bits[position] {
                        one
                    } else {
                        zero
                    }
                }
                Step::Leaf(_) => None,
            };
            let next = next.ok_or(Error::CorruptStream { position })?;

            match self.arena[next] {
                Step::Leaf(symbol) => {
                    out.push(symbol);
                    node = ROOT;
                    pending = 0;
                }
                Step::Branch { .. } => {
                    node = next;
                    pending += 1;
                }
            }
        }

        if pending > 0 {
            return Err(Error::TruncatedStream { pending });
        }
        log::debug!("Decoded {} symbols", bits.len());
        Ok(out)
    }
}
