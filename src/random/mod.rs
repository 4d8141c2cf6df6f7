use tracing::debug;

use crate::{automaton::DfaState, prelude::*};

/// Generates a random total [`DFA`] with `size` states over an alphabet of `symbols`
/// symbols (see [`CharAlphabet::of_size`]) by drawing every transition target and the
/// acceptance of every state uniformly at random. State 0 is initial, depending on the drawn
/// transitions some states may be unreachable.
///
/// # Panics
/// Panics if `size` is zero or `symbols` exceeds 26.
pub fn generate_random_dfa(symbols: usize, size: usize) -> DFA {
    generate_random_partial_dfa(symbols, size, 0.0)
}

/// Works as [`generate_random_dfa`], but every transition is left undefined with probability
/// `missing`.
pub fn generate_random_partial_dfa(symbols: usize, size: usize, missing: f64) -> DFA {
    assert!(size > 0, "A DFA needs at least one state");
    let alphabet = CharAlphabet::of_size(symbols);
    let states = (0..size)
        .map(|i| {
            let mut state = DfaState::new(format!("q{i}"), fastrand::bool());
            for sym in alphabet.universe() {
                if fastrand::f64() >= missing {
                    state.add_edge(sym, fastrand::usize(..size));
                }
            }
            state
        })
        .collect::<Vec<_>>();
    debug!("generated random dfa with {size} states over {symbols} symbols");
    DFA::from_parts(alphabet, states, 0)
}

/// Generates a random word over the given alphabet whose length is drawn uniformly from
/// `min_length..=max_length`. If the alphabet is empty, the result is the empty word.
pub fn generate_random_word(
    alphabet: &CharAlphabet,
    min_length: usize,
    max_length: usize,
) -> String {
    if alphabet.is_empty() {
        return String::new();
    }
    let length = fastrand::usize(min_length..=max_length.max(min_length));
    (0..length)
        .map(|_| alphabet[fastrand::usize(..alphabet.size())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dfas() {
        fastrand::seed(7);
        for size in 1..12 {
            let dfa = generate_random_dfa(2, size);
            assert_eq!(dfa.size(), size);
            assert!(dfa.is_complete());
            assert!(dfa.trim().size() <= size);
        }
        let partial = generate_random_partial_dfa(3, 8, 1.0);
        assert_eq!(partial.transition_count(), 0);
    }

    #[test]
    fn random_words() {
        fastrand::seed(11);
        let alphabet = CharAlphabet::of_size(3);
        for _ in 0..50 {
            let word = generate_random_word(&alphabet, 2, 6);
            assert!((2..=6).contains(&word.chars().count()));
            assert!(word.chars().all(|sym| alphabet.contains(sym)));
        }
        assert!(generate_random_word(&CharAlphabet::default(), 1, 3).is_empty());
    }

    #[cfg(feature = "minimize")]
    #[test_log::test]
    fn minimization_preserves_random_languages() {
        fastrand::seed(1234);
        for _ in 0..40 {
            let dfa = generate_random_partial_dfa(2, fastrand::usize(1..10), 0.2);
            let table = dfa.minimize_with(MinimizationAlgorithm::TableFilling);
            let hopcroft = dfa.minimize_with(MinimizationAlgorithm::Hopcroft);
            assert_eq!(table, hopcroft);
            assert!(hopcroft.size() <= dfa.trim().size());
            assert_eq!(dfa.equivalent(&hopcroft), Ok(Verdict::Equivalent));
            for _ in 0..20 {
                let word = generate_random_word(dfa.alphabet(), 0, 8);
                assert_eq!(dfa.accepts(&word), hopcroft.accepts(&word));
            }
        }
    }

    #[cfg(feature = "minimize")]
    #[test]
    fn determinization_matches_regex_on_random_words() {
        fastrand::seed(99);
        let nfa = NFA::from_regex("(a|b)*a(a|b)(a|b)").unwrap();
        let dfa = nfa.determinize();
        let minimal = dfa.minimize();
        assert_eq!(minimal.size(), 8);
        for _ in 0..200 {
            let word = generate_random_word(&nfa.alphabet(), 0, 12);
            let expected = word.chars().rev().nth(2) == Some('a');
            assert_eq!(nfa.accepts(&word), expected, "{word}");
            assert_eq!(dfa.accepts(&word), expected, "{word}");
            assert_eq!(minimal.accepts(&word), expected, "{word}");
        }
    }
}
