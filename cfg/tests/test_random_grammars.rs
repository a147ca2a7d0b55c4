use std::collections::BTreeSet;

use cfg::normalize::{eliminate_nulling, eliminate_units, remove_useless, to_cnf, Normalized};
use cfg::{Cfg, CykParser, Symbol};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use test_case::test_case;

mod support;

const MAX_LEN: usize = 5;

/// A grammar over the variables `S`, `A`, `B`, `C` and the terminals `a`, `b`, with up to
/// three alternatives per variable and up to three symbols per alternative.
fn random_grammar(rng: &mut SmallRng) -> Cfg {
    let mut cfg = Cfg::new();
    let vars = ["S", "A", "B", "C"].map(|name| cfg.variable(name));
    let terminals = ["a", "b"].map(|name| cfg.terminal(name));
    let all: Vec<Symbol> = vars.iter().chain(terminals.iter()).copied().collect();
    for &lhs in &vars {
        for _ in 0..rng.gen_range(1..=3) {
            let len = rng.gen_range(0..=3);
            let rhs: Vec<Symbol> = (0..len).map(|_| all[rng.gen_range(0..all.len())]).collect();
            cfg.rule(lhs).rhs(rhs);
        }
    }
    cfg.set_start(vars[0]);
    cfg
}

fn without_empty(mut language: BTreeSet<Vec<Symbol>>) -> BTreeSet<Vec<Symbol>> {
    language.remove(&vec![]);
    language
}

#[test_case(1)]
#[test_case(7)]
#[test_case(42)]
#[test_case(1234)]
#[test_case(98765)]
fn test_stages_preserve_language(seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..40 {
        let cfg = random_grammar(&mut rng);
        let expected = support::language(&cfg, MAX_LEN);

        let useful = remove_useless(&cfg).unwrap();
        assert_eq!(support::language(&useful, MAX_LEN), expected);

        let (without_nulling, _) = eliminate_nulling(&useful);
        assert!(without_nulling.rules().all(|rule| !rule.is_nulling()));
        let expected = without_empty(expected);
        assert_eq!(support::language(&without_nulling, MAX_LEN), expected);

        let (without_units, _) = eliminate_units(&without_nulling);
        assert!(without_units
            .rules()
            .all(|rule| !without_units.is_unit_rule(rule)));
        assert_eq!(support::language(&without_units, MAX_LEN), expected);

        match to_cnf(&without_units) {
            Ok((cnf, _)) => {
                assert!(cnf.is_cnf());
                assert_eq!(support::language(&cnf, MAX_LEN), expected);
            }
            Err(_) => assert!(expected.is_empty()),
        }
    }
}

#[test_case(3)]
#[test_case(11)]
#[test_case(2024)]
fn test_parser_agrees_with_brute_force(seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..25 {
        let cfg = random_grammar(&mut rng);
        let language = support::language(&cfg, MAX_LEN);
        let parser = match CykParser::new(&cfg) {
            Ok(parser) => parser,
            Err(_) => {
                assert!(without_empty(language).is_empty());
                continue;
            }
        };
        assert_eq!(parser.recognize(&[]).unwrap(), language.contains(&vec![]));
        let terminals: Vec<Symbol> = cfg.terminal_set().iter().collect();
        for input in support::strings(&terminals, MAX_LEN) {
            let accepted = parser.recognize(&input).unwrap();
            assert_eq!(accepted, language.contains(&input));
            let derivation = parser.parse(&input).unwrap();
            assert_eq!(derivation.is_some(), accepted);
            if let Some(derivation) = derivation {
                assert!(derivation.iter().all(|rule| cfg.contains(rule)));
                assert_eq!(support::replay(&cfg, &derivation), Some(input));
            }
        }
    }
}

#[test]
fn test_cnf_short_circuit_on_random_cnf() {
    let mut rng = SmallRng::seed_from_u64(5);
    for _ in 0..20 {
        let cfg = random_grammar(&mut rng);
        if let Ok(normalized) = Normalized::new(&cfg) {
            let again = Normalized::new(normalized.grammar()).unwrap();
            assert!(again.is_short_circuited());
            assert!(again.history().is_empty());
            support::assert_eq_rules(again.grammar().rules(), normalized.grammar().rules());
        }
    }
}
