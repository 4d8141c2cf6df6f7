use std::collections::{BTreeMap, BTreeSet};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets whose iteration order is the order of the elements. These are
/// used whenever a set of states has to serve as a canonical key.
pub type OrderedSet<S> = BTreeSet<S>;
/// Type alias for maps whose iteration order is the order of the keys.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes (or blocks) under the relation. The blocks are
/// kept in order, so the position of a block in the partition can be used as its index.
///
/// The map from elements to the index of their block is not stored, it is always derived
/// from the blocks through [`Partition::class_map`] and thus cannot disagree with them.
#[derive(Debug, Clone)]
pub struct Partition<I: Ord>(Vec<OrderedSet<I>>);

impl<I: Ord> std::ops::Deref for Partition<I> {
    type Target = Vec<OrderedSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Ord> IntoIterator for &'a Partition<I> {
    type Item = &'a OrderedSet<I>;
    type IntoIter = std::slice::Iter<'a, OrderedSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Ord> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Ord> Eq for Partition<I> {}

impl<I: Ord + Copy + std::hash::Hash> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements
    /// of type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<OrderedSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Computes the map that sends every element to the index of the class it belongs to.
    pub fn class_map(&self) -> Map<I, usize> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, class)| class.iter().map(move |q| (*q, i)))
            .collect()
    }

    /// Returns the index of the class containing `element`, if it exists.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(element))
    }

    /// Replaces the class at position `index` by `kept` and appends `split_off` as a new class
    /// at the end. Returns the index of the newly created class.
    pub(crate) fn split(
        &mut self,
        index: usize,
        kept: OrderedSet<I>,
        split_off: OrderedSet<I>,
    ) -> usize {
        debug_assert!(!kept.is_empty() && !split_off.is_empty());
        self.0[index] = kept;
        self.0.push(split_off);
        self.0.len() - 1
    }

    /// Consumes the partition and gives back its classes.
    pub fn into_classes(self) -> Vec<OrderedSet<I>> {
        self.0
    }
}

impl<I: Ord> From<Vec<OrderedSet<I>>> for Partition<I> {
    fn from(value: Vec<OrderedSet<I>>) -> Self {
        Self(value)
    }
}
