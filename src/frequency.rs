use std::{
    collections::BTreeMap,
    fmt,
    iter::FromIterator,
};

/// How often each character occurs in a text.
///
/// Entries are kept in ascending character order, which is also the order
/// leaves are handed to the tree builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every character of `text` in a single pass.
    pub fn of(text: &str) -> Self {
        let mut this = FrequencyTable::new();
        for ch in text.chars() {
            this.add(ch, 1);
        }
        this
    }

    /// Adds `count` occurrences of `ch`.
    pub fn add(&mut self, ch: char, count: usize) {
        let entry = self.counts.entry(ch).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Replaces the count of `ch`, returning the previous one.
    pub fn insert(&mut self, ch: char, count: usize) -> Option<usize> {
        self.counts.insert(ch, count)
    }

    pub fn get(&self, ch: char) -> usize {
        self.counts.get(&ch).copied().unwrap_or(0)
    }

    /// Folds the counts of another table (e.g. of another chunk of the same
    /// text) into this one.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (ch, count) in other.iter() {
            self.add(ch, count);
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts, i.e. the length in characters of the counted text.
    pub fn total(&self) -> usize {
        self.counts
            .values()
            .fold(0, |acc, &count| acc.saturating_add(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&ch, &count)| (ch, count))
    }
}

impl FromIterator<(char, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (char, usize)>>(iter: I) -> Self {
        let mut this = FrequencyTable::new();
        for (ch, count) in iter {
            this.add(ch, count);
        }
        this
    }
}

/// One `<character>: <count>` line per entry.
impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ch, count) in self.iter() {
            writeln!(f, "{}: {}", ch, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_character() {
        let table = FrequencyTable::of("aabbbcccc");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get('a'), 2);
        assert_eq!(table.get('b'), 3);
        assert_eq!(table.get('c'), 4);
        assert_eq!(table.get('d'), 0);
        assert_eq!(table.total(), 9);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let table = FrequencyTable::of("héé");
        assert_eq!(table.get('é'), 2);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn merged_chunks_match_whole_text() {
        let text = "the quick brown fox jumps over the lazy dog";
        let (head, tail) = text.split_at(17);
        let mut merged = FrequencyTable::of(head);
        merged.merge(&FrequencyTable::of(tail));
        assert_eq!(merged, FrequencyTable::of(text));
    }

    #[test]
    fn listing_is_ordered_by_character() {
        let table: FrequencyTable = vec![('b', 1), ('a', 5)].into_iter().collect();
        assert_eq!(table.to_string(), "a: 5\nb: 1\n");
    }
}
