//! A command-language knowledge base built on the rule engine: fixed
//! command words matched through a fused pattern trie, free-form arguments
//! consumed with the primitive rules, fuzzy word matching ranked by
//! weight, and completion through partial queries.

use crate::rule::{query_first, PartialQuery, Rule, Similarity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowStatus,
    ShowLog,
    Help,
    Quit,
    Connect(String),
}

type CommandRule = Rule<&'static str, String, (), Action, String>;

/// Exact word equality; abbreviations do not count.
pub fn exact_word(pattern: &&'static str, token: &String) -> Similarity {
    if *pattern == token.as_str() {
        Similarity::ExactlyEqual
    } else {
        Similarity::Dissimilar
    }
}

/// Prefix-tolerant matching: `sho` is similar to `show`, scored by how
/// much of the word was typed. A full word is an exact match and masks
/// every abbreviation.
pub fn fuzzy_word(pattern: &&'static str, token: &String) -> Similarity {
    if *pattern == token.as_str() {
        Similarity::ExactlyEqual
    } else if !token.is_empty() && pattern.starts_with(token.as_str()) {
        Similarity::Similar(token.len() as f64 / pattern.len() as f64)
    } else {
        Similarity::Dissimilar
    }
}

/// Render a pattern path as the token sequence it spells.
pub fn spell_out(path: &[&'static str]) -> Vec<Vec<String>> {
    vec![path.iter().map(|word| word.to_string()).collect()]
}

/// The whole command vocabulary as one fused trie.
pub fn command_rule() -> CommandRule {
    Rule::from_edges(vec![vec!["show", "status"]], |_| {
        Rule::value(Action::ShowStatus)
    })
    .or(Rule::from_edges(vec![vec!["show", "log"]], |_| {
        Rule::value(Action::ShowLog)
    }))
    .or(Rule::from_edges(vec![vec!["help"]], |_| {
        Rule::value(Action::Help)
    }))
    .or(Rule::from_edges(vec![vec!["quit"]], |_| {
        Rule::value(Action::Quit)
    }))
    .or(Rule::from_edges(vec![vec!["connect"]], |_| {
        Rule::next().and_then(|host| Rule::value(Action::Connect(host)))
    }))
}

fn whole_line() -> CommandRule {
    command_rule().and_then(|action| Rule::done().map(move |_| action.clone()))
}

fn words(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

/// Interpret a line of exactly-spelled command words.
pub fn interpret(line: &str) -> Option<Action> {
    query_first(&whole_line(), &exact_word, (), words(line)).map(|(action, _)| action)
}

/// Interpret a line tolerating abbreviated words; of several readings the
/// highest-scored wins.
pub fn suggest(line: &str) -> Option<Action> {
    let ranked = whole_line().best_match(1);
    query_first(&ranked, &fuzzy_word, (), words(line)).map(|(action, _)| action)
}

/// Complete the next word of a partially typed line.
pub fn complete(line: &str) -> Vec<String> {
    let matcher = fuzzy_word;
    let predictor = spell_out;
    let engine = PartialQuery::new(&matcher, &predictor, 8);
    let rule = command_rule();

    let tokens = words(line);
    let paths = if line.is_empty() || line.ends_with(char::is_whitespace) {
        engine.guesses(&rule, (), tokens)
    } else {
        let begins =
            |typed: &String, predicted: &String| predicted.starts_with(typed.as_str());
        engine.guess_trailing(&rule, (), tokens, &begins)
    };

    let mut next_words: Vec<String> = paths
        .into_iter()
        .filter_map(|path| path.into_iter().next())
        .collect();
    next_words.dedup();
    next_words
}
