use bit_set::BitSet;
use serde::{Serialize, Serializer};
use std::{fmt, hash::Hash, iter};

/// A set of column bit indices, used as a field mask.
///
/// Comparison, union, intersection and subset checks run over the backing
/// words, never over individual bits.
#[derive(Clone, Default)]
pub struct FieldSet {
    container: BitSet,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set of `len` bits, all set.
    pub fn filled(len: usize) -> Self {
        let mut container = BitSet::with_capacity(len);
        for i in 0..len {
            container.insert(i);
        }
        Self { container }
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.container.insert(index)
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.container.remove(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.container.contains(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.container.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().all(|block| block == 0)
    }

    /// Number of set bits.
    pub fn len(&self) -> usize {
        self.blocks().map(|block| block.count_ones() as usize).sum()
    }

    pub fn union(&self, other: &FieldSet) -> FieldSet {
        let mut ret = self.clone();
        ret.container.union_with(&other.container);
        ret
    }

    pub fn intersection(&self, other: &FieldSet) -> FieldSet {
        let mut ret = self.clone();
        ret.container.intersect_with(&other.container);
        ret
    }

    pub fn difference(&self, other: &FieldSet) -> FieldSet {
        let mut ret = self.clone();
        ret.container.difference_with(&other.container);
        ret
    }

    pub fn is_subset(&self, other: &FieldSet) -> bool {
        self.zip_blocks(other).all(|(a, b)| a & !b == 0)
    }

    fn blocks(&self) -> impl Iterator<Item = u32> + '_ {
        self.container.get_ref().blocks()
    }

    /// Pairs up the blocks of both sets, padding the shorter with zeros.
    fn zip_blocks<'a>(&'a self, other: &'a FieldSet) -> impl Iterator<Item = (u32, u32)> + 'a {
        let mut a = self.blocks();
        let mut b = other.blocks();
        iter::from_fn(move || match (a.next(), b.next()) {
            (None, None) => None,
            (a, b) => Some((a.unwrap_or(0), b.unwrap_or(0))),
        })
    }
}

impl PartialEq for FieldSet {
    fn eq(&self, other: &FieldSet) -> bool {
        self.zip_blocks(other).all(|(a, b)| a == b)
    }
}

impl Eq for FieldSet {}

impl Hash for FieldSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // trailing zero words must not affect the hash, matching `eq`
        let blocks: Vec<u32> = self.blocks().collect();
        let end = blocks.iter().rposition(|block| *block != 0).map_or(0, |i| i + 1);
        blocks[..end].hash(state);
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for FieldSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            container: BitSet::from_iter(iter),
        }
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
