use tracing::{debug, trace};

use crate::{
    math::{OrderedMap, OrderedSet},
    prelude::*,
};

use super::{initial_partition, Refinement};

/// Computes the partition of the states of `dfa` into classes of language equivalent states
/// by iterated refinement. In each pass, every state is assigned the signature consisting of
/// the classes (with respect to the partition at the start of the pass) that its successors
/// belong to, and each class is split according to these signatures. The procedure stops once
/// a pass does not split any class.
///
/// Every split is recorded in `steps`. The parts of a split are ordered by their signature.
pub(crate) fn table_filling(dfa: &DFA, steps: &mut Vec<Refinement>) -> Partition<StateIndex> {
    let mut partition = initial_partition(dfa);
    let mut pass = 0;

    loop {
        pass += 1;
        let class_map = partition.class_map();
        let signature = |q: StateIndex| -> Vec<Option<usize>> {
            dfa.alphabet()
                .universe()
                .map(|sym| dfa.successor(q, sym).map(|p| class_map[&p]))
                .collect()
        };

        let mut changed = false;
        let mut refined = Vec::with_capacity(partition.size());
        for block in partition.iter() {
            if block.len() == 1 {
                refined.push(block.clone());
                continue;
            }

            let mut groups: OrderedMap<Vec<Option<usize>>, OrderedSet<StateIndex>> =
                OrderedMap::new();
            for q in block {
                groups.entry(signature(*q)).or_default().insert(*q);
            }

            if groups.len() > 1 {
                changed = true;
                let parts: Vec<_> = groups.into_values().collect();
                let step = Refinement {
                    symbol: None,
                    block: block.clone(),
                    parts: parts.clone(),
                };
                debug!("pass {pass}: {step}");
                steps.push(step);
                refined.extend(parts);
            } else {
                refined.push(block.clone());
            }
        }

        partition = Partition::from(refined);
        if !changed {
            trace!("table filling stabilized after {pass} passes");
            return partition;
        }
    }
}
