//! Words, groups and the shuffle-then-chunk step

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::options::GroupSize;

/// A trimmed, non-empty piece of text taken from the word column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(String);

impl Word {
    /// Trim `text`; returns `None` if nothing is left
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Word(trimmed.to_string()))
        }
    }

    /// The word text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One position in a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A real word
    Word(Word),
    /// Padding at the end of a short final group
    Absent,
}

impl Slot {
    /// The word in this slot, if any
    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Slot::Word(word) => Some(word),
            Slot::Absent => None,
        }
    }

    /// Check whether this slot is padding
    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }
}

/// A fixed-length run of slots. Absent slots only ever trail the words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    slots: Vec<Slot>,
}

impl Group {
    /// All slots, padding included
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of slots; always the group size
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false for groups built by [`chunk_words`]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The real words, in slot order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.slots.iter().filter_map(Slot::as_word)
    }

    /// Number of real words
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// Number of absent slots
    pub fn padding(&self) -> usize {
        self.len() - self.word_count()
    }
}

/// Every group produced from one word list, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCollection {
    group_size: GroupSize,
    groups: Vec<Group>,
}

impl GroupCollection {
    /// Slots per group
    pub fn group_size(&self) -> GroupSize {
        self.group_size
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the word list was empty
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Iterate over groups in order
    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// All real words, group by group
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.groups.iter().flat_map(|group| group.words())
    }

    /// Total number of real words
    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

impl<'a> IntoIterator for &'a GroupCollection {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Uniformly permute `words` in place (Fisher-Yates)
pub fn shuffle_words<R: Rng + ?Sized>(words: &mut [Word], rng: &mut R) {
    words.shuffle(rng);
}

/// Split `words` into consecutive groups of `group_size`, keeping order.
/// The last group is padded with [`Slot::Absent`]; an empty list gives no
/// groups.
pub fn chunk_words(words: Vec<Word>, group_size: GroupSize) -> GroupCollection {
    let size = group_size.get();
    let mut groups = Vec::with_capacity((words.len() + size - 1) / size);

    let mut remaining = words.into_iter().peekable();
    while remaining.peek().is_some() {
        let mut slots: Vec<Slot> = remaining.by_ref().take(size).map(Slot::Word).collect();
        slots.resize(size, Slot::Absent);
        groups.push(Group { slots });
    }

    GroupCollection { group_size, groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts.iter().filter_map(Word::new).collect()
    }

    fn size(n: i64) -> GroupSize {
        GroupSize::new(n).unwrap()
    }

    fn texts(group: &Group) -> Vec<&str> {
        group.words().map(Word::as_str).collect()
    }

    #[test]
    fn test_word_trims_and_rejects_blank() {
        assert_eq!(Word::new("  cat\t").unwrap().as_str(), "cat");
        assert_eq!(Word::new("   "), None);
        assert_eq!(Word::new(""), None);
        assert_eq!(Word::new("ice cream").unwrap().to_string(), "ice cream");
    }

    #[test]
    fn test_chunk_pads_last_group() {
        let groups = chunk_words(words(&["cat", "dog", "bird", "fish", "lion"]), size(2));

        assert_eq!(groups.len(), 3);
        assert_eq!(texts(&groups.groups()[0]), vec!["cat", "dog"]);
        assert_eq!(texts(&groups.groups()[1]), vec!["bird", "fish"]);
        assert_eq!(
            groups.groups()[2].slots(),
            &[Slot::Word(Word::new("lion").unwrap()), Slot::Absent]
        );
        assert!(groups.iter().all(|g| g.len() == 2));
    }

    #[test]
    fn test_chunk_exact_multiple_has_no_padding() {
        let groups = chunk_words(words(&["a", "b", "c", "d", "e", "f"]), size(3));
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.padding() == 0));
    }

    #[test]
    fn test_chunk_one_past_multiple() {
        let groups = chunk_words(words(&["a", "b", "c", "d", "e"]), size(4));
        let last = groups.groups().last().unwrap();
        assert_eq!(last.word_count(), 1);
        assert_eq!(last.padding(), 3);
        assert!(last.slots()[1..].iter().all(Slot::is_absent));
    }

    #[test]
    fn test_chunk_empty() {
        let groups = chunk_words(Vec::new(), size(8));
        assert!(groups.is_empty());
        assert_eq!(groups.group_size().get(), 8);
    }

    #[test]
    fn test_group_larger_than_list() {
        let groups = chunk_words(words(&["solo"]), size(8));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.groups()[0].len(), 8);
        assert_eq!(groups.groups()[0].padding(), 7);
    }

    #[test]
    fn test_chunk_preserves_order() {
        let input = words(&["1", "2", "3", "4", "5", "6", "7"]);
        let groups = chunk_words(input.clone(), size(3));
        let flat: Vec<Word> = groups.words().cloned().collect();
        assert_eq!(flat, input);
        assert_eq!(groups.word_count(), 7);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let original = words(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let mut shuffled = original.clone();
        shuffle_words(&mut shuffled, &mut StdRng::seed_from_u64(7));

        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn test_shuffle_same_seed_same_order() {
        let original = words(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let mut first = original.clone();
        let mut second = original.clone();
        shuffle_words(&mut first, &mut StdRng::seed_from_u64(42));
        shuffle_words(&mut second, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
