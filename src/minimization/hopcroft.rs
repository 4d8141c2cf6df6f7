use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::debug;

use crate::{math::OrderedSet, prelude::*};

use super::{initial_partition, Refinement};

/// For every symbol (by position in the alphabet) and every state, lists the states that
/// move into it on that symbol.
fn predecessors(dfa: &DFA) -> Vec<Vec<Vec<StateIndex>>> {
    let mut predecessors = vec![vec![vec![]; dfa.size()]; dfa.alphabet().size()];
    for q in dfa.state_indices() {
        for (position, sym) in dfa.alphabet().universe().enumerate() {
            if let Some(p) = dfa.successor(q, sym) {
                predecessors[position][p].push(q);
            }
        }
    }
    predecessors
}

/// Computes the partition of the states of `dfa` into classes of language equivalent states
/// with Hopcroft's algorithm.
///
/// Blocks are identified by their position in the partition. When a block is split, it keeps
/// its position for the part that moves into the splitter and the other part is appended. If
/// the block was waiting in the worklist, both parts end up there, otherwise only the smaller
/// one is added (the part moving into the splitter on ties).
pub(crate) fn hopcroft(dfa: &DFA, steps: &mut Vec<Refinement>) -> Partition<StateIndex> {
    let predecessors = predecessors(dfa);
    let mut partition = initial_partition(dfa);
    let mut worklist: VecDeque<usize> = (0..partition.size()).collect();
    let mut waiting: BitSet = (0..partition.size()).collect();

    while let Some(splitter_id) = worklist.pop_front() {
        waiting.remove(splitter_id);
        let splitter = partition[splitter_id].clone();

        for (position, sym) in dfa.alphabet().universe().enumerate() {
            let movers: BitSet = splitter
                .iter()
                .flat_map(|q| predecessors[position][*q].iter().cloned())
                .collect();
            if movers.is_empty() {
                continue;
            }

            // blocks created while processing this symbol need not be revisited for it
            for id in 0..partition.size() {
                let (inside, outside): (OrderedSet<StateIndex>, OrderedSet<StateIndex>) =
                    partition[id].iter().partition(|q| movers.contains(**q));
                if inside.is_empty() || outside.is_empty() {
                    continue;
                }

                let step = Refinement {
                    symbol: Some(sym),
                    block: partition[id].clone(),
                    parts: vec![inside.clone(), outside.clone()],
                };
                debug!("{step} with respect to {}", splitter.show());
                steps.push(step);

                let inside_is_smaller = inside.len() <= outside.len();
                let created = partition.split(id, inside, outside);
                if waiting.contains(id) || !inside_is_smaller {
                    worklist.push_back(created);
                    waiting.insert(created);
                } else {
                    worklist.push_back(id);
                    waiting.insert(id);
                }
            }
        }
    }

    partition
}
