use tracing::trace;

use crate::{
    alphabet::Symbol,
    math::{Map, Set},
    prelude::*,
};

use super::DfaState;

fn check_symbols(alphabet: &[Symbol]) -> Result<(), TableError> {
    let mut seen = Set::default();
    for sym in alphabet {
        if !seen.insert(*sym) {
            return Err(TableError::DuplicateSymbol(*sym));
        }
    }
    Ok(())
}

/// Maps every state name to the position of its row.
fn index_names<'a, I>(names: I) -> Result<Map<&'a str, StateIndex>, TableError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index = Map::default();
    for (i, name) in names.into_iter().enumerate() {
        if index.insert(name, i).is_some() {
            return Err(TableError::DuplicateState(name.to_string()));
        }
    }
    Ok(index)
}

/// Splits a cell listing several state names, separated by commas or whitespace.
fn split_cell(cell: &str) -> Vec<String> {
    cell.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// One row of a [`TransitionTable`], describing a single state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// The name of the state.
    pub name: String,
    /// For each symbol of the table's alphabet (in the order of the header), the name of the
    /// target state or `None` if the transition is undefined.
    pub targets: Vec<Option<String>>,
    /// Whether the state is accepting.
    pub accepting: bool,
}

impl TableRow {
    /// Creates a new row from a name, the targets and the accepting flag. Empty target names
    /// are treated as undefined transitions.
    pub fn new<S, I, T>(name: S, targets: I, accepting: bool) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            name: name.into(),
            targets: targets
                .into_iter()
                .map(|t| {
                    let t = t.as_ref().trim();
                    (!t.is_empty()).then(|| t.to_string())
                })
                .collect(),
            accepting,
        }
    }
}

/// A transition table is the normalized form in which an externally described automaton is
/// handed to this crate. It consists of a header listing the alphabet symbols and one row per
/// state, where the first row describes the initial state.
///
/// This is deliberately format agnostic, reading the table from a file (for example a CSV file
/// where the last column marks accepting states) is left to the caller.
///
/// # Example
/// ```
/// use regular_automata::prelude::*;
///
/// let table = TransitionTable::new(
///     ['a', 'b'],
///     [
///         TableRow::new("even", ["odd", "even"], true),
///         TableRow::new("odd", ["even", ""], false),
///     ],
/// );
/// let dfa = DFA::from_table(&table).unwrap();
/// // the missing transition is redirected into a trap state
/// assert_eq!(dfa.size(), 3);
/// assert!(dfa.accepts("aab"));
/// assert!(!dfa.accepts("ab"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    /// The symbols labelling the columns of the table.
    pub alphabet: Vec<Symbol>,
    /// The rows of the table, the first one describes the initial state.
    pub rows: Vec<TableRow>,
}

impl TransitionTable {
    /// Creates a new table from the given header and rows.
    pub fn new<A, R>(alphabet: A, rows: R) -> Self
    where
        A: IntoIterator<Item = Symbol>,
        R: IntoIterator<Item = TableRow>,
    {
        Self {
            alphabet: alphabet.into_iter().collect(),
            rows: rows.into_iter().collect(),
        }
    }

    /// Returns the number of states described by the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DFA {
    /// Turns a [`TransitionTable`] into a total [`DFA`]. The first row becomes the initial
    /// state, names are kept. If any transition is undefined, a trap state is added through
    /// [`DFA::complete`]. Fails if the table is empty, names a state twice, lists a symbol
    /// twice, has a row of the wrong width or refers to a state that has no row.
    pub fn from_table(table: &TransitionTable) -> Result<DFA, TableError> {
        if table.is_empty() {
            return Err(TableError::Empty);
        }

        check_symbols(&table.alphabet)?;
        let index = index_names(table.rows.iter().map(|row| row.name.as_str()))?;

        let mut states = Vec::with_capacity(table.len());
        for row in &table.rows {
            if row.targets.len() != table.alphabet.len() {
                return Err(TableError::RowWidth {
                    state: row.name.clone(),
                    expected: table.alphabet.len(),
                    found: row.targets.len(),
                });
            }

            let mut state = DfaState::new(row.name.clone(), row.accepting);
            for (sym, target) in table.alphabet.iter().zip(&row.targets) {
                let Some(target) = target else {
                    continue;
                };
                let Some(q) = index.get(target.as_str()) else {
                    return Err(TableError::UnknownTarget {
                        state: row.name.clone(),
                        symbol: *sym,
                        target: target.clone(),
                    });
                };
                state.add_edge(*sym, *q);
            }
            states.push(state);
        }

        trace!(
            "read transition table with {} states over {} symbols",
            states.len(),
            table.alphabet.len()
        );
        let alphabet = table.alphabet.iter().cloned().collect();
        Ok(DFA::from_parts(alphabet, states, 0).complete())
    }

    /// Produces the transition table of `self`. The initial state comes first, the remaining
    /// states follow in the order of their indices. Undefined transitions become `None`.
    pub fn to_table(&self) -> TransitionTable {
        let order = std::iter::once(self.initial())
            .chain(self.state_indices().filter(|q| *q != self.initial()));
        let rows: Vec<TableRow> = order
            .map(|q| {
                let state = &self.states[q];
                TableRow {
                    name: state.name().to_string(),
                    targets: self
                        .alphabet()
                        .universe()
                        .map(|sym| {
                            state
                                .successor(sym)
                                .map(|p| self.states[p].name().to_string())
                        })
                        .collect(),
                    accepting: state.is_accepting(),
                }
            })
            .collect();
        TransitionTable::new(self.alphabet().universe(), rows)
    }
}

/// One row of an [`NfaTransitionTable`]. In contrast to a [`TableRow`], every cell may list
/// any number of targets, and there is an additional column for the epsilon moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfaTableRow {
    /// The name of the state.
    pub name: String,
    /// For each symbol of the table's alphabet, the names of all targets.
    pub targets: Vec<Vec<String>>,
    /// The names of the states reachable through a single epsilon move.
    pub epsilon: Vec<String>,
    /// Whether the state is final.
    pub accepting: bool,
}

impl NfaTableRow {
    /// Creates a row from textual cells. A cell may hold several state names separated by
    /// commas or whitespace, an empty cell means there is no transition.
    pub fn new<S, I, T, E>(name: S, cells: I, epsilon: E, accepting: bool) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
        E: AsRef<str>,
    {
        Self {
            name: name.into(),
            targets: cells
                .into_iter()
                .map(|cell| split_cell(cell.as_ref()))
                .collect(),
            epsilon: split_cell(epsilon.as_ref()),
            accepting,
        }
    }
}

/// The nondeterministic counterpart of [`TransitionTable`]. States are referred to by name,
/// the first row describes the initial state.
///
/// # Example
/// ```
/// use regular_automata::prelude::*;
///
/// let table = NfaTransitionTable::new(
///     ['a', 'b'],
///     [
///         NfaTableRow::new("s", ["s, m", "s"], "", false),
///         NfaTableRow::new("m", ["", "f"], "", false),
///         NfaTableRow::new("f", ["", ""], "", true),
///     ],
/// );
/// let nfa = NFA::from_table(&table).unwrap();
/// assert!(nfa.accepts("bab"));
/// assert!(!nfa.accepts("aba"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfaTransitionTable {
    /// The symbols labelling the columns of the table, the epsilon column is not among them.
    pub alphabet: Vec<Symbol>,
    /// The rows of the table, the first one describes the initial state.
    pub rows: Vec<NfaTableRow>,
}

impl NfaTransitionTable {
    /// Creates a new table from the given header and rows.
    pub fn new<A, R>(alphabet: A, rows: R) -> Self
    where
        A: IntoIterator<Item = Symbol>,
        R: IntoIterator<Item = NfaTableRow>,
    {
        Self {
            alphabet: alphabet.into_iter().collect(),
            rows: rows.into_iter().collect(),
        }
    }

    /// Returns the number of states described by the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl NFA {
    /// Builds an [`NFA`] from an [`NfaTransitionTable`]. Row `i` becomes the state with index
    /// `i`, the first row is the initial state. The same validation as in [`DFA::from_table`]
    /// applies, additionally every name in an epsilon column must have a row.
    pub fn from_table(table: &NfaTransitionTable) -> Result<NFA, TableError> {
        if table.is_empty() {
            return Err(TableError::Empty);
        }
        check_symbols(&table.alphabet)?;
        let index = index_names(table.rows.iter().map(|row| row.name.as_str()))?;

        let mut nfa = NFA::empty();
        for row in &table.rows {
            nfa.add_state(row.accepting);
        }

        for (from, row) in table.rows.iter().enumerate() {
            if row.targets.len() != table.alphabet.len() {
                return Err(TableError::RowWidth {
                    state: row.name.clone(),
                    expected: table.alphabet.len(),
                    found: row.targets.len(),
                });
            }

            for (sym, cell) in table.alphabet.iter().zip(&row.targets) {
                for target in cell {
                    let Some(to) = index.get(target.as_str()) else {
                        return Err(TableError::UnknownTarget {
                            state: row.name.clone(),
                            symbol: *sym,
                            target: target.clone(),
                        });
                    };
                    nfa.add_transition(from, *sym, *to);
                }
            }

            for target in &row.epsilon {
                let Some(to) = index.get(target.as_str()) else {
                    return Err(TableError::UnknownEpsilonTarget {
                        state: row.name.clone(),
                        target: target.clone(),
                    });
                };
                nfa.add_epsilon(from, *to);
            }
        }
        nfa.set_initial(0);

        trace!(
            "read nondeterministic transition table with {} states over {} symbols",
            nfa.size(),
            table.alphabet.len()
        );
        Ok(nfa)
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::contains_ab};

    fn scenario_table() -> TransitionTable {
        TransitionTable::new(
            ['a', 'b'],
            [
                TableRow::new("q0", ["q1", "q0"], false),
                TableRow::new("q1", ["q1", "q2"], false),
                TableRow::new("q2", ["", ""], true),
            ],
        )
    }

    #[test]
    fn table_round_trip_keeps_names() {
        let dfa = DFA::from_table(&scenario_table()).unwrap();
        assert_eq!(dfa.size(), 4);
        assert_eq!(dfa.initial(), 0);
        assert_eq!(dfa.find_state("trap"), Some(3));
        assert!(dfa.accepts("bab"));
        assert!(!dfa.accepts("aba"));

        let table = dfa.to_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows[2].targets, vec![Some("trap".to_string()); 2]);
        assert_eq!(DFA::from_table(&table).unwrap(), dfa);
    }

    #[test]
    fn partial_automata_produce_undefined_entries() {
        let dfa = TSBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 'a', 1), (0, 'b', 0)])
            .into_dfa(0);
        let table = dfa.to_table();
        assert_eq!(table.rows[1].targets, vec![None, None]);
        assert_eq!(table.rows[0].targets[0].as_deref(), Some("q1"));

        assert_eq!(contains_ab().to_table().rows.len(), 3);
    }

    #[test]
    fn table_validation() {
        let empty = TransitionTable::new(['a'], []);
        assert_eq!(DFA::from_table(&empty), Err(TableError::Empty));

        let duplicate = TransitionTable::new(
            ['a'],
            [TableRow::new("p", ["p"], false), TableRow::new("p", ["p"], true)],
        );
        assert_eq!(
            DFA::from_table(&duplicate),
            Err(TableError::DuplicateState("p".to_string()))
        );

        let unknown = TransitionTable::new(['a'], [TableRow::new("p", ["r"], false)]);
        assert!(matches!(
            DFA::from_table(&unknown),
            Err(TableError::UnknownTarget { symbol: 'a', .. })
        ));

        let narrow = TransitionTable::new(['a', 'b'], [TableRow::new("p", ["p"], false)]);
        assert_eq!(
            DFA::from_table(&narrow),
            Err(TableError::RowWidth {
                state: "p".to_string(),
                expected: 2,
                found: 1
            })
        );

        let symbols = TransitionTable::new(['a', 'a'], [TableRow::new("p", ["p", "p"], false)]);
        assert_eq!(
            DFA::from_table(&symbols),
            Err(TableError::DuplicateSymbol('a'))
        );
    }

    fn ends_in_ab_table() -> NfaTransitionTable {
        NfaTransitionTable::new(
            ['a', 'b'],
            [
                NfaTableRow::new("s", ["s,m", "s"], "", false),
                NfaTableRow::new("m", ["", "f"], "", false),
                NfaTableRow::new("f", ["", ""], "", true),
            ],
        )
    }

    #[test]
    fn nfa_table_with_several_targets() {
        let table = ends_in_ab_table();
        assert_eq!(table.rows[0].targets[0], vec!["s", "m"]);
        assert!(table.rows[1].targets[0].is_empty());

        let nfa = NFA::from_table(&table).unwrap();
        assert_eq!(nfa.size(), 3);
        assert_eq!(nfa.initial(), 0);
        assert_eq!(
            nfa.state(0).unwrap().successors('a').collect::<Vec<_>>(),
            vec![0, 1]
        );
        for word in ["ab", "bab", "aab", "abab"] {
            assert!(nfa.accepts(word), "{word}");
        }
        for word in ["", "a", "ba", "aba"] {
            assert!(!nfa.accepts(word), "{word}");
        }

        let dfa = nfa.determinize();
        assert!(dfa.accepts("bbab"));
        assert!(!dfa.accepts("abb"));
    }

    #[test_log::test]
    fn nfa_table_with_epsilon_cycle() {
        // p -ε-> r -ε-> p, only r is final
        let table = NfaTransitionTable::new(
            ['a'],
            [
                NfaTableRow::new("p", ["p"], "r", false),
                NfaTableRow::new("r", [""], "p", true),
            ],
        );
        let nfa = NFA::from_table(&table).unwrap();
        assert_eq!(
            nfa.initial_closure(),
            OrderedSet::<StateIndex>::from_iter([0, 1])
        );
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("aaa"));
        assert!(!nfa.accepts("b"));
    }

    #[test]
    fn nfa_table_validation() {
        let empty = NfaTransitionTable::new(['a'], []);
        assert_eq!(NFA::from_table(&empty), Err(TableError::Empty));

        let unknown = NfaTransitionTable::new(['a'], [NfaTableRow::new("p", ["p r"], "", false)]);
        assert_eq!(
            NFA::from_table(&unknown),
            Err(TableError::UnknownTarget {
                state: "p".to_string(),
                symbol: 'a',
                target: "r".to_string()
            })
        );

        let unknown_epsilon =
            NfaTransitionTable::new(['a'], [NfaTableRow::new("p", ["p"], "x", true)]);
        assert_eq!(
            NFA::from_table(&unknown_epsilon),
            Err(TableError::UnknownEpsilonTarget {
                state: "p".to_string(),
                target: "x".to_string()
            })
        );

        let narrow = NfaTransitionTable::new(['a', 'b'], [NfaTableRow::new("p", ["p"], "", false)]);
        assert!(matches!(
            NFA::from_table(&narrow),
            Err(TableError::RowWidth { expected: 2, found: 1, .. })
        ));

        let duplicate = NfaTransitionTable::new(
            ['a'],
            [
                NfaTableRow::new("p", ["p"], "", false),
                NfaTableRow::new("p", [""], "", true),
            ],
        );
        assert_eq!(
            NFA::from_table(&duplicate),
            Err(TableError::DuplicateState("p".to_string()))
        );
    }
}
