use super::{exact, literally, StrRule};
use crate::rule::{PartialQuery, Rule};

fn engine<'q>() -> PartialQuery<'q, &'static str, &'static str> {
    PartialQuery::new(&exact, &literally, 16)
}

fn branching_rule() -> StrRule {
    Rule::from_edges(vec![vec!["a", "b"], vec!["a", "c"]], Rule::value)
}

#[test]
fn a_prefix_reports_its_continuations() {
    let partial = engine().run(&branching_rule(), (), vec!["a"]);

    assert_eq!(
        partial.predictions.paths(),
        vec![vec!["b"], vec!["c"]]
    );
    assert!(partial.results.is_empty());
    assert!(!partial.branches.is_empty());
    assert!(partial.can_extend());
    assert!(!partial.is_complete());
}

#[test]
fn a_full_match_is_complete() {
    let partial = engine().run(&branching_rule(), (), vec!["a", "b"]);
    assert!(partial.is_complete());
    assert_eq!(partial.results.len(), 1);
    assert_eq!(partial.results[0].0.clone().ok().unwrap(), vec!["a", "b"]);
}

#[test]
fn nonsense_is_a_dead_end() {
    let partial = engine().run(&branching_rule(), (), vec!["z"]);
    assert!(partial.is_dead_end());
}

#[test]
fn a_match_that_can_extend_reports_both() {
    let rule: StrRule =
        Rule::from_edges(vec![vec!["a"], vec!["a", "b"]], Rule::value);
    let partial = engine().run(&rule, (), vec!["a"]);

    assert_eq!(partial.results.len(), 1);
    assert_eq!(partial.predictions.paths(), vec![vec!["b"]]);
    assert!(!partial.branches.is_empty());
}

#[test]
fn resuming_equals_running_on_the_whole_input() {
    let engine = engine();
    let rule = branching_rule();

    let resumed = engine.resume(engine.run(&rule, (), vec!["a"]), vec!["b"]);
    let direct = engine.run(&rule, (), vec!["a", "b"]);

    assert_eq!(resumed.results.len(), direct.results.len());
    assert_eq!(
        resumed.results[0].0.clone().ok(),
        direct.results[0].0.clone().ok()
    );
    assert_eq!(resumed.results[0].1.index, direct.results[0].1.index);
    assert_eq!(
        resumed.predictions.paths(),
        direct.predictions.paths()
    );

    // associativity across an empty step
    let stepped = engine.resume(engine.resume(engine.run(&rule, (), Vec::new()), vec!["a"]), vec!["b"]);
    assert_eq!(stepped.results.len(), direct.results.len());
    assert_eq!(
        stepped.results[0].0.clone().ok(),
        direct.results[0].0.clone().ok()
    );
}

#[test]
fn extending_a_prediction_moves_the_query_forward() {
    let engine = engine();
    let rule = branching_rule();

    let before = engine.run(&rule, (), vec!["a"]);
    assert!(before.results.is_empty());

    for path in before.predictions.paths() {
        let mut extended = vec!["a"];
        extended.extend(path);
        let after = engine.run(&rule, (), extended);
        // one token from the prediction tree strictly approaches success
        assert!(!after.results.is_empty());
        assert!(after.branches.len() < before.branches.len() + 1 || after.predictions.is_empty());
    }
}

#[test]
fn the_depth_limit_bounds_recursive_rules() {
    fn forever() -> StrRule {
        Rule::lift(forever)
    }

    let partial = PartialQuery::new(&exact, &literally, 8).run(&forever(), (), Vec::new());
    assert!(partial.is_dead_end());
}

#[test]
fn recursive_rules_predict_through_their_leaves() {
    fn chain() -> StrRule {
        Rule::from_edges(vec![vec!["go"]], |tokens| {
            Rule::value(tokens).or(Rule::lift(chain))
        })
    }

    let engine = engine();
    let partial = engine.run(&chain(), (), vec!["go"]);
    // "go" matches, and another "go" could follow
    assert!(!partial.results.is_empty());
    assert_eq!(partial.predictions.paths(), vec![vec!["go"]]);

    let resumed = engine.resume(partial, vec!["go"]);
    assert!(!resumed.results.is_empty());
    assert_eq!(resumed.predictions.paths(), vec![vec!["go"]]);
}

#[test]
fn trailing_token_guessing_filters_by_prefix() {
    let rule: StrRule = Rule::from_edges(
        vec![vec!["show", "status"], vec!["show", "log"], vec!["quit"]],
        Rule::value,
    );
    let engine = engine();
    let begins = |typed: &&'static str, predicted: &&'static str| predicted.starts_with(typed);

    let guesses = engine.guess_trailing(&rule, (), vec!["show", "st"], &begins);
    assert_eq!(guesses, vec![vec!["status"]]);

    let guesses = engine.guess_trailing(&rule, (), vec!["q"], &begins);
    assert_eq!(guesses, vec![vec!["quit"]]);

    let guesses = engine.guess_trailing(&rule, (), vec!["show", "zz"], &begins);
    assert!(guesses.is_empty());
}

#[test]
fn depth_first_and_breadth_first_branches_keep_their_traversal() {
    let depth: StrRule = Rule::from_edges(vec![vec!["a", "b"]], Rule::value);
    let partial = engine().run(&depth, (), vec!["a"]);
    let (df, bf, _) = &partial.branches[0];
    assert!(!df.is_empty());
    assert!(bf.is_empty());

    let breadth: StrRule = Rule::from_edges_breadth(vec![vec!["a", "b"]], Rule::value);
    let partial = engine().run(&breadth, (), vec!["a"]);
    let (df, bf, _) = &partial.branches[0];
    assert!(df.is_empty());
    assert!(!bf.is_empty());
}
