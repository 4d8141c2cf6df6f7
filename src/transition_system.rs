/// Type of the indices that identify states. An index is only meaningful with respect to the
/// automaton that produced it, it is simply the position of the state in that automaton.
pub type StateIndex = usize;

mod builder;
pub use builder::TSBuilder;

/// Breadth-first traversal of deterministic automata.
pub mod reachable;

/// Runs of automata on finite words.
pub mod run;

/// Operations that produce new automata from existing ones.
pub mod operations;
