pub(crate) mod partition_refinement;

pub(crate) mod hopcroft;

use std::fmt::Display;

use itertools::Itertools;
use tracing::debug;

use crate::{alphabet::Symbol, math::OrderedSet, prelude::*};

/// The algorithms that can be used for minimizing a [`DFA`]. Both produce the same automaton,
/// they only differ in how the partition of language equivalent states is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MinimizationAlgorithm {
    /// Repeatedly splits every block of the partition according to the blocks its states
    /// move into, until a pass over all blocks changes nothing.
    TableFilling,
    /// Hopcroft's worklist algorithm, which splits blocks with respect to the predecessors of
    /// a splitter block and always keeps the smaller half for later processing.
    #[default]
    Hopcroft,
}

/// Records a single refinement step, in which `block` was split into `parts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    /// The symbol with respect to which the block was split, table filling splits with
    /// respect to all symbols at once and leaves this empty.
    pub symbol: Option<Symbol>,
    /// The block that was split.
    pub block: OrderedSet<StateIndex>,
    /// The blocks that replaced `block`.
    pub parts: Vec<OrderedSet<StateIndex>>,
}

impl Display for Refinement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "split {} into {}",
            self.block.show(),
            self.parts.iter().map(|part| part.show()).join(" and ")
        )?;
        if let Some(symbol) = self.symbol {
            write!(f, " on {symbol}")?;
        }
        Ok(())
    }
}

/// The result of [`DFA::minimize_logged`].
#[derive(Debug, Clone)]
pub struct Minimized {
    /// The minimal automaton.
    pub dfa: DFA,
    /// The refinement steps in the order in which they were performed.
    pub steps: Vec<Refinement>,
    /// The final partition of the states of the completed input into language equivalent
    /// classes. If the input was partial, the trap state added by [`DFA::complete`] is part
    /// of it.
    pub partition: Partition<StateIndex>,
}

/// Both algorithms start by separating accepting from rejecting states.
pub(crate) fn initial_partition(dfa: &DFA) -> Partition<StateIndex> {
    Partition::new([
        dfa.accepting_states().collect_vec(),
        dfa.rejecting_states().collect_vec(),
    ])
}

impl DFA {
    /// Computes the minimal automaton accepting the same language as `self` with the default
    /// algorithm, see [`DFA::minimize_with`].
    pub fn minimize(&self) -> DFA {
        self.minimize_with(MinimizationAlgorithm::default())
    }

    /// Computes the minimal automaton accepting the same language as `self` using the given
    /// algorithm.
    ///
    /// The input is first completed, then the states are partitioned into classes of language
    /// equivalent states and the quotient with respect to this partition is built. States that
    /// cannot be reached from the initial state are removed and the remaining ones are named
    /// `B0`, `B1`, ... in breadth-first discovery order, so both algorithms produce identical
    /// automata. If a trap state had to be added for completion, its class is removed again
    /// (unless it is the initial one), so the result is partial precisely when the input is.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let dfa = NFA::from_regex("a(b|c)d").unwrap().determinize();
    /// assert_eq!(dfa.size(), 5);
    /// let minimal = dfa.minimize_with(MinimizationAlgorithm::TableFilling);
    /// assert_eq!(minimal.size(), 4);
    /// assert_eq!(minimal, dfa.minimize_with(MinimizationAlgorithm::Hopcroft));
    /// ```
    pub fn minimize_with(&self, algorithm: MinimizationAlgorithm) -> DFA {
        self.minimize_logged(algorithm).dfa
    }

    /// Works like [`DFA::minimize_with`], but additionally returns the refinement steps that
    /// were performed along with the final partition.
    pub fn minimize_logged(&self, algorithm: MinimizationAlgorithm) -> Minimized {
        let (complete, trap) = self.completion();
        let mut steps = vec![];
        let partition = match algorithm {
            MinimizationAlgorithm::TableFilling => {
                partition_refinement::table_filling(&complete, &mut steps)
            }
            MinimizationAlgorithm::Hopcroft => hopcroft::hopcroft(&complete, &mut steps),
        };
        let dfa = complete.quotient_without(&partition, trap);
        debug!(
            "{:?} minimized {} states into {} states in {} steps",
            algorithm,
            self.size(),
            dfa.size(),
            steps.len()
        );
        Minimized {
            dfa,
            steps,
            partition,
        }
    }
}
