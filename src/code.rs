use {
    crate::{
        codec::Decoder,
        error::{Error, Result},
        frequency::FrequencyTable,
        stream,
        tree::{HuffmanTree, Node},
    },
    bitvec::prelude::*,
    std::{collections::BTreeMap, fmt, io, iter::FromIterator},
};

/// A codeword: the root-to-leaf path of a character, `false` for a left
/// branch ("0") and `true` for a right branch ("1").
pub type Codeword = BitVec<Local, u8>;

/// Maps every character of the alphabet to its codeword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeTable {
    codes: BTreeMap<char, Codeword>,
}

impl CodeTable {
    /// Walks `tree` depth-first and records the path to every leaf.
    ///
    /// A tree that is a single leaf (only one distinct character) has no
    /// path to record, so that character gets the one-symbol codeword `0`.
    pub fn of(tree: &HuffmanTree) -> Self {
        let mut this = CodeTable::default();
        let mut path = Codeword::new();
        if tree.root().is_leaf() {
            path.push(false);
        }
        this.apply(tree.root(), &mut path);
        log::trace!("Code table: {:?}", this);
        this
    }

    fn apply(&mut self, node: &Node, path: &mut Codeword) {
        match node {
            &Node::Leaf { symbol, .. } => {
                self.codes.insert(symbol, path.clone());
            }
            Node::Branch { left, right, .. } => {
                path.push(false);
                self.apply(left, path);
                path.pop();
                path.push(true);
                self.apply(right, path);
                path.pop();
            }
        }
    }

    pub fn get(&self, symbol: char) -> Option<&BitSlice<Local, u8>> {
        self.codes.get(&symbol).map(|code| &**code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &BitSlice<Local, u8>)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, &**code))
    }

    /// Number of symbols needed to encode a text with these frequencies.
    ///
    /// Characters without a codeword are not counted. Saturates at
    /// `usize::MAX`.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> usize {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| {
                self.get(symbol)
                    .map(|code| code.len().saturating_mul(count))
            })
            .fold(0, |acc: usize, len| acc.saturating_add(len))
    }

    /// Fails with [`Error::NotPrefixFree`] if some codeword is a prefix of
    /// another one.
    pub fn validate(&self) -> Result<()> {
        Decoder::new(self).map(drop)
    }

    /// Writes the `<character>: <codeword>` listing.
    pub fn write_listing<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)
    }

    /// Reads a listing produced by [`write_listing`](Self::write_listing).
    ///
    /// The character in front of `": "` is taken verbatim, so `:` and line
    /// breaks can be listed too (a line break shows up as an empty line
    /// followed by `": <codeword>"`).
    pub fn read_listing(listing: &str) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut chars = listing.chars();
        let mut line = 1;

        while let Some(symbol) = chars.next() {
            let entry_line = line;
            if symbol == '\n' {
                line += 1;
            }
            let malformed = |reason| Error::MalformedListing {
                line: entry_line,
                reason,
            };

            if chars.next() != Some(':') || chars.next() != Some(' ') {
                return Err(malformed("expected `: ` after the character"));
            }

            let mut code = Codeword::new();
            loop {
                match chars.next() {
                    Some('0') => code.push(false),
                    Some('1') => code.push(true),
                    Some('\n') => {
                        line += 1;
                        break;
                    }
                    None => break,
                    Some(_) => return Err(malformed("codewords consist of `0` and `1` only")),
                }
            }

            if code.is_empty() {
                return Err(malformed("empty codeword"));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(malformed("character listed twice"));
            }
        }

        let table = CodeTable { codes };
        table.validate()?;
        log::debug!("Read {} codewords from listing", table.len());
        Ok(table)
    }
}

impl FromIterator<(char, Codeword)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (char, Codeword)>>(iter: I) -> Self {
        CodeTable {
            codes: iter.into_iter().collect(),
        }
    }
}

/// The `<character>: <codeword>` listing, one line per character.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "{}: {}", symbol, stream::render(code))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(text: &str) -> Codeword {
        stream::parse(text).unwrap()
    }

    #[test]
    fn paths_become_codewords() {
        let table = CodeTable::of(&HuffmanTree::of("aabbbcccc").unwrap());
        assert_eq!(table.get('c'), Some(&*code("0")));
        assert_eq!(table.get('a'), Some(&*code("10")));
        assert_eq!(table.get('b'), Some(&*code("11")));
        assert_eq!(table.get('d'), None);
        assert_eq!(table.encoded_len(&FrequencyTable::of("aabbbcccc")), 14);
    }

    #[test]
    fn encoded_len_saturates() {
        let frequencies: FrequencyTable = vec![('a', usize::MAX), ('b', 1)].into_iter().collect();
        let table = CodeTable::of(&HuffmanTree::build(&frequencies).unwrap());
        assert_eq!(table.encoded_len(&frequencies), usize::MAX);
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let table = CodeTable::of(&HuffmanTree::of("aaaa").unwrap());
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert!(CodeTable::default().is_empty());
        assert_eq!(table.get('a'), Some(&*code("0")));
    }

    #[test]
    fn listing_format() {
        let table = CodeTable::of(&HuffmanTree::of("aabbbcccc").unwrap());
        assert_eq!(table.to_string(), "a: 10\nb: 11\nc: 0\n");

        let mut out = Vec::new();
        table.write_listing(&mut out).unwrap();
        assert_eq!(out, b"a: 10\nb: 11\nc: 0\n");
    }

    #[test]
    fn listing_reads_back_awkward_characters() {
        let text = "a: b\nc\n::: \n";
        let table = CodeTable::of(&HuffmanTree::of(text).unwrap());
        let listing = table.to_string();
        assert_eq!(CodeTable::read_listing(&listing).unwrap(), table);
    }

    #[test]
    fn listing_without_trailing_newline() {
        let table = CodeTable::read_listing("x: 0\ny: 1").unwrap();
        assert_eq!(table.get('y'), Some(&*code("1")));
    }

    #[test]
    fn malformed_listings_are_rejected() {
        for (listing, bad_line) in &[
            ("a 0\n", 1),
            ("a: 0\nb: 2\n", 2),
            ("a: 0\nb: \n", 2),
            ("a: 0\na: 1\n", 2),
        ] {
            match CodeTable::read_listing(listing) {
                Err(Error::MalformedListing { line, .. }) => assert_eq!(line, *bad_line),
                other => panic!("{:?} parsed as {:?}", listing, other),
            }
        }
    }

    #[test]
    fn listing_must_be_prefix_free() {
        assert!(matches!(
            CodeTable::read_listing("a: 0\nb: 01\n"),
            Err(Error::NotPrefixFree { .. })
        ));
    }
}
