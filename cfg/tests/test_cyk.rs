use std::thread;

use cfg::cyk::{CykError, CykRecognizer, Rejection, Span};
use cfg::load::CfgLoadExt;
use cfg::Cfg;

mod support;

const CNF_GRAMMAR: &str = "
    S -> AD | CB | SS | b
    D -> SC
    A -> a
    C -> b
    B -> CE | CC
    E -> CB
";

fn grammar() -> Cfg {
    Cfg::load(CNF_GRAMMAR).unwrap()
}

#[test]
fn test_accepts_abbbb() {
    support::init_logging();
    let cfg = grammar();
    assert!(cfg.is_cnf());
    let recognizer = CykRecognizer::new(&cfg).unwrap();
    let input = support::tokens(&cfg, "abbbb");
    let chart = recognizer.recognize(&input).unwrap();
    assert!(chart.accepted());
    let trace = chart.trace().unwrap();
    assert_eq!(trace[0], support::rule(&cfg, "S -> AD"));
    assert_eq!(support::replay(&cfg, &trace), Some(input));
}

#[test]
fn test_rejects_ba() {
    let cfg = grammar();
    let recognizer = CykRecognizer::new(&cfg).unwrap();
    let chart = recognizer.recognize(&support::tokens(&cfg, "ba")).unwrap();
    assert!(!chart.accepted());
    assert_eq!(chart.rejection(), Some(Rejection::NotDerived));
    assert!(chart.cell(Span::new(0, 1)).unwrap().is_empty());
    assert_eq!(chart.trace(), None);
}

#[test]
fn test_unrecognized_symbol() {
    let mut cfg = grammar();
    let z = cfg.terminal("z");
    let recognizer = CykRecognizer::new(&cfg).unwrap();
    let mut input = support::tokens(&cfg, "abb");
    input.insert(1, z);
    let chart = recognizer.recognize(&input).unwrap();
    assert_eq!(
        chart.rejection(),
        Some(Rejection::UnrecognizedSymbol { position: 1 })
    );
    assert!(chart.cell(Span::new(2, 3)).unwrap().is_empty());
    assert_eq!(recognizer.recognize(&[]).err(), Some(CykError::EmptyInput));
}

#[test]
fn test_chart_keeps_every_justification() {
    let cfg = grammar();
    let recognizer = CykRecognizer::new(&cfg).unwrap();
    let chart = recognizer.recognize(&support::tokens(&cfg, "bbb")).unwrap();
    let s = support::sym(&cfg, "S");
    let justifications = chart.justifications(Span::new(0, 2), s);
    // `S -> SS` at both split points, and `S -> CB` with `B -> CC`.
    assert_eq!(justifications.len(), 3);
    assert!(justifications
        .iter()
        .any(|j| j.rule == support::rule(&cfg, "S -> CB")));
    let trace = chart.trace().unwrap();
    assert_eq!(trace[0], support::rule(&cfg, "S -> CB"));
    assert_eq!(support::replay(&cfg, &trace), Some(support::tokens(&cfg, "bbb")));
}

#[test]
fn test_agrees_with_brute_force() {
    let cfg = grammar();
    let recognizer = CykRecognizer::new(&cfg).unwrap();
    let language = support::language(&cfg, 6);
    let terminals: Vec<_> = cfg.terminal_set().iter().collect();
    for input in support::strings(&terminals, 6) {
        let chart = recognizer.recognize(&input).unwrap();
        assert_eq!(chart.accepted(), language.contains(&input), "{:?}", input);
        if let Some(trace) = chart.trace() {
            assert_eq!(support::replay(&cfg, &trace), Some(input));
        }
    }
}

#[test]
fn test_concurrent_recognition() {
    let cfg = grammar();
    let recognizer = CykRecognizer::new(&cfg).unwrap();
    let inputs = ["abbbb", "ba", "bbb", "abbbbbb", "b"];
    let results: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|text| {
                let input = support::tokens(&cfg, text);
                let recognizer = &recognizer;
                scope.spawn(move || recognizer.recognize(&input).unwrap().accepted())
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    let sequential: Vec<bool> = inputs
        .iter()
        .map(|text| {
            recognizer
                .recognize(&support::tokens(&cfg, text))
                .unwrap()
                .accepted()
        })
        .collect();
    assert_eq!(results, sequential);
    assert_eq!(results, vec![true, false, true, true, true]);
}
