use bytes::Bytes;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Members with a score, unique by member, iterated by ascending score. Members sharing a score
/// are ordered by their bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortedSet {
    scores: HashMap<Bytes, f64>,
    ordered: BTreeSet<Entry>,
}

#[derive(Clone, Debug)]
struct Entry {
    score: f64,
    member: Bytes,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.member.cmp(&other.member))
    }
}

impl SortedSet {
    pub fn new() -> SortedSet {
        SortedSet::default()
    }

    /// Inserts `member` with `score`, replacing the previous score of an existing member.
    /// Returns whether the member is new.
    pub fn add(&mut self, score: f64, member: Bytes) -> bool {
        let previous = self.scores.insert(member.clone(), score);

        if let Some(previous) = previous {
            self.ordered.remove(&Entry {
                score: previous,
                member: member.clone(),
            });
        }

        self.ordered.insert(Entry { score, member });

        previous.is_none()
    }

    pub fn remove(&mut self, member: &[u8]) -> bool {
        match self.scores.remove(member) {
            Some(score) => {
                self.ordered.remove(&Entry {
                    score,
                    member: Bytes::copy_from_slice(member),
                });
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn score(&self, member: &[u8]) -> Option<f64> {
        self.scores.get(member).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Members by rank, lowest score first.
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, f64)> {
        self.ordered.iter().map(|entry| (&entry.member, entry.score))
    }
}
