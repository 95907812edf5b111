use super::{
    Certainty, Outcome, PatternTree, QueryState, Rule, RuleOp, Similarity, Traversal,
};
use crate::PValue;
use std::rc::Rc;

impl<K, S> QueryState<K, S> {
    pub fn new(user: S, input: Vec<K>) -> Self {
        Self {
            user,
            weight: Certainty::full(),
            index: 0,
            input: Rc::new(input),
        }
    }

    pub fn peek(&self) -> Option<&K> {
        self.input.get(self.index)
    }

    pub fn remaining(&self) -> &[K] {
        &self.input[self.index.min(self.input.len())..]
    }

    pub fn exhausted(&self) -> bool {
        self.index >= self.input.len()
    }
}

impl<K, S: Clone> Clone for QueryState<K, S> {
    fn clone(&self) -> Self {
        Self {
            user: self.user.clone(),
            weight: self.weight,
            index: self.index,
            input: self.input.clone(),
        }
    }
}

impl<K: Clone, S> QueryState<K, S> {
    /// Grow the input array in place; the read position is untouched, so
    /// a state saved at exhaustion sees the new tokens next.
    pub(crate) fn extend_input(&mut self, more: &[K]) {
        let mut grown = (*self.input).clone();
        grown.extend_from_slice(more);
        self.input = Rc::new(grown);
    }
}

impl<K: Clone, S: Clone> QueryState<K, S> {
    /// The state after consuming one token under a match with the given
    /// weight factor.
    pub(crate) fn advanced(&self, factor: f64) -> Self {
        let mut next = self.clone();
        next.index += 1;
        next.weight = next.weight.and(factor);
        next
    }
}

/// Select the surviving first-level branches for a token: exact hits mask
/// all similar hits; otherwise the similar hits in descending similarity,
/// ties keeping branch order.
pub(crate) fn select<'t, P, K, S, A, E>(
    branches: &'t [(P, PatternTree<P, K, S, A, E>)],
    token: &K,
    matcher: &dyn Fn(&P, &K) -> Similarity,
) -> Vec<(&'t PatternTree<P, K, S, A, E>, f64)> {
    let mut exact = Vec::new();
    let mut similar: Vec<(&PatternTree<P, K, S, A, E>, f64)> = Vec::new();
    for (pattern, subtree) in branches {
        match matcher(pattern, token) {
            Similarity::ExactlyEqual => exact.push((subtree, 1.0)),
            Similarity::Similar(score) => similar.push((subtree, score)),
            Similarity::Dissimilar => {}
        }
    }
    if exact.is_empty() {
        similar.sort_by(|a, b| b.1.total_cmp(&a.1));
        similar
    } else {
        exact
    }
}

/// Every outcome of evaluating `rule` over `input`: the list-of-successes
/// interpretation of the rule tree.
pub fn query_all<P, K, S, A, E>(
    rule: &Rule<P, K, S, A, E>,
    matcher: &dyn Fn(&P, &K) -> Similarity,
    user: S,
    input: Vec<K>,
) -> Vec<Outcome<K, S, A, E>>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    eval(rule, &QueryState::new(user, input), matcher)
}

/// Only the successful outcomes, with their final states.
pub fn query<P, K, S, A, E>(
    rule: &Rule<P, K, S, A, E>,
    matcher: &dyn Fn(&P, &K) -> Similarity,
    user: S,
    input: Vec<K>,
) -> Vec<(A, QueryState<K, S>)>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    query_all(rule, matcher, user, input)
        .into_iter()
        .filter_map(|(outcome, state)| outcome.ok().map(|value| (value, state)))
        .collect()
}

/// The first successful outcome, if any.
pub fn query_first<P, K, S, A, E>(
    rule: &Rule<P, K, S, A, E>,
    matcher: &dyn Fn(&P, &K) -> Similarity,
    user: S,
    input: Vec<K>,
) -> Option<(A, QueryState<K, S>)>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    query(rule, matcher, user, input).into_iter().next()
}

pub(crate) fn eval<P, K, S, A, E>(
    rule: &Rule<P, K, S, A, E>,
    state: &QueryState<K, S>,
    matcher: &dyn Fn(&P, &K) -> Similarity,
) -> Vec<Outcome<K, S, A, E>>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    match rule {
        Rule::Empty => Vec::new(),
        Rule::Return(value) => vec![(PValue::Ok(value.clone()), state.clone())],
        Rule::Throw(err) => vec![(PValue::Fail(err.clone()), state.clone())],
        Rule::Lift(thunk) => eval(&thunk(), state, matcher),
        Rule::State(f) => f(state)
            .into_iter()
            .flat_map(|(node, state)| eval(&node, &state, matcher))
            .collect(),
        Rule::Choice(left, right) => {
            let mut outcomes = eval(left, state, matcher);
            outcomes.extend(eval(right, state, matcher));
            outcomes
        }
        Rule::Op(op, child) => eval_op(op, child, state, matcher),
        Rule::Tree(depth_first, breadth_first) => {
            // a trie matches only when there is a token to dispatch on
            if state.peek().is_none() {
                return Vec::new();
            }
            let mut outcomes =
                eval_node(depth_first, state, Vec::new(), matcher, Traversal::DepthFirst);
            outcomes.extend(eval_node(
                breadth_first,
                state,
                Vec::new(),
                matcher,
                Traversal::BreadthFirst,
            ));
            outcomes
        }
    }
}

fn eval_op<P, K, S, A, E>(
    op: &RuleOp<K, S>,
    child: &Rule<P, K, S, A, E>,
    state: &QueryState<K, S>,
    matcher: &dyn Fn(&P, &K) -> Similarity,
) -> Vec<Outcome<K, S, A, E>>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    match op {
        RuleOp::ResetWeight => {
            let entry_weight = state.weight;
            eval(child, state, matcher)
                .into_iter()
                .map(|(outcome, mut state)| {
                    state.weight = entry_weight;
                    (outcome, state)
                })
                .collect()
        }
        RuleOp::BestMatch(count) => {
            let (mut successes, failures): (Vec<_>, Vec<_>) = eval(child, state, matcher)
                .into_iter()
                .partition(|(outcome, _)| outcome.is_ok());
            if successes.is_empty() {
                return failures;
            }
            successes.sort_by(|a, b| b.1.weight.cmp(&a.1.weight));
            if *count > 0 {
                successes.truncate(*count as usize);
            }
            successes
        }
        RuleOp::Prune(filter) => {
            let mut outcomes = eval(child, state, matcher);
            outcomes.retain(|(_, state)| filter(state));
            outcomes
        }
    }
}

fn eval_node<P, K, S, A, E>(
    node: &PatternTree<P, K, S, A, E>,
    state: &QueryState<K, S>,
    taken: Vec<K>,
    matcher: &dyn Fn(&P, &K) -> Similarity,
    traversal: Traversal,
) -> Vec<Outcome<K, S, A, E>>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    let mut outcomes = Vec::new();
    if traversal == Traversal::BreadthFirst {
        outcomes.extend(eval_leaf(node, state, &taken, matcher));
    }
    if let Some(token) = state.peek().cloned() {
        for (subtree, factor) in select(&node.branches, &token, matcher) {
            let advanced = state.advanced(factor);
            let mut taken = taken.clone();
            taken.push(token.clone());
            outcomes.extend(eval_node(subtree, &advanced, taken, matcher, traversal));
        }
    }
    if traversal == Traversal::DepthFirst {
        outcomes.extend(eval_leaf(node, state, &taken, matcher));
    }
    outcomes
}

fn eval_leaf<P, K, S, A, E>(
    node: &PatternTree<P, K, S, A, E>,
    state: &QueryState<K, S>,
    taken: &[K],
    matcher: &dyn Fn(&P, &K) -> Similarity,
) -> Vec<Outcome<K, S, A, E>>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    match &node.leaf {
        Some(leaf) => eval(&leaf(taken.to_vec()), state, matcher),
        None => Vec::new(),
    }
}
