mod nfa;
pub use nfa::{NfaState, NFA};

mod dfa;
pub use dfa::{DfaState, DFA};

/// Normalized transition tables, the form in which externally loaded automata (for example
/// from a CSV file) enter the crate.
mod table;
pub use table::{NfaTableRow, NfaTransitionTable, TableRow, TransitionTable};

/// The name given to the state that is added by [`DFA::complete`]. If a state with this name
/// already exists, primes are appended until the name is unique.
pub const TRAP_STATE_NAME: &str = "trap";
