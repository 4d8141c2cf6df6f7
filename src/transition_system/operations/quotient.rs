use tracing::trace;

use crate::{automaton::DfaState, math::Partition, prelude::*};

impl DFA {
    /// Builds the quotient of `self` with respect to the given [`Partition`], merging all
    /// states that belong to the same class. We assume that the [`Partition`] is a congruence,
    /// meaning for two states `p`, `q` in the same class and every symbol `a`, the `a`-successors
    /// of `p` and `q` are again in the same class (or both undefined). Consequently the
    /// transitions of a class can be read off any of its members, we use the smallest one.
    ///
    /// A class is accepting if it contains an accepting state. Classes that cannot be reached
    /// from the class of the initial state are dropped and the remaining classes are named
    /// `B0`, `B1`, ... in the order in which a breadth-first search discovers them.
    ///
    /// The partition has to cover every state of `self`, which holds for the partitions
    /// computed during minimization.
    pub(crate) fn quotient(&self, partition: &Partition<StateIndex>) -> DFA {
        self.quotient_without(partition, None)
    }

    /// Works like [`DFA::quotient`], but the class containing `dropped` is removed together
    /// with all transitions leading into it, unless it is the class of the initial state.
    pub(crate) fn quotient_without(
        &self,
        partition: &Partition<StateIndex>,
        dropped: Option<StateIndex>,
    ) -> DFA {
        let class_map = partition.class_map();
        let initial = class_map
            .get(&self.initial())
            .cloned()
            .expect("Initial class must exist");
        let dropped = dropped
            .and_then(|q| class_map.get(&q).cloned())
            .filter(|class| *class != initial);

        let states = partition
            .iter()
            .enumerate()
            .map(|(i, class)| {
                let mut state = DfaState::new(
                    format!("B{i}"),
                    class.iter().any(|q| self.is_accepting(*q)),
                );
                if let Some(representative) = class.first().and_then(|q| self.state(*q)) {
                    for (sym, target) in representative.edges() {
                        match class_map.get(&target) {
                            Some(target) if Some(*target) != dropped => {
                                state.add_edge(sym, *target)
                            }
                            _ => {}
                        }
                    }
                }
                state
            })
            .collect();

        let quotient = DFA::from_parts(self.alphabet().clone(), states, initial)
            .trim()
            .renamed(|i| format!("B{i}"));
        trace!(
            "quotient by partition with {} classes has {} reachable classes",
            partition.size(),
            quotient.size()
        );
        quotient
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::Partition, tests::wiki_dfa};

    #[test]
    fn quotient_merges_classes() {
        let dfa = wiki_dfa();
        let partition = Partition::new([vec![0, 1], vec![2, 3, 4], vec![5]]);
        let quotient = dfa.quotient(&partition);
        assert_eq!(quotient.size(), 3);
        assert_eq!(quotient.state_name(0), Some("B0"));
        assert_eq!(quotient.successor(0, 'a'), Some(0));
        assert_eq!(quotient.successor(0, 'b'), Some(1));
        assert!(quotient.is_accepting(1));
        assert!(quotient.is_sink(2));
        for word in dfa.alphabet().words_up_to(5) {
            assert_eq!(dfa.accepts(&word), quotient.accepts(&word));
        }
    }

    #[test]
    fn quotient_names_follow_discovery_order() {
        let dfa = wiki_dfa();
        // the sink class comes first in the partition, but is discovered last
        let partition = Partition::new([vec![5], vec![2, 3, 4], vec![0, 1]]);
        let quotient = dfa.quotient(&partition);
        assert_eq!(quotient.initial(), 0);
        assert!(!quotient.is_accepting(0));
        assert!(quotient.is_accepting(1));
        assert!(quotient.is_sink(2));
        assert_eq!(quotient.state_name(2), Some("B2"));
    }

    #[test]
    fn dropping_a_class() {
        let dfa = wiki_dfa();
        let partition = Partition::new([vec![0, 1], vec![2, 3, 4], vec![5]]);
        let quotient = dfa.quotient_without(&partition, Some(5));
        assert_eq!(quotient.size(), 2);
        assert!(!quotient.is_complete());
        assert!(quotient.accepts("b"));
        assert!(!quotient.accepts("bb"));

        // the initial class is never dropped
        let quotient = dfa.quotient_without(&partition, Some(1));
        assert_eq!(quotient.size(), 3);
    }
}
