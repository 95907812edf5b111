use super::eval::select;
use super::{
    Outcome, PatternTree, QueryState, Rule, RuleOp, ShapeTree, Similarity, Traversal,
};

/// The outcome of evaluating a rule against a possibly-incomplete input.
///
/// Which parts are empty tells the caller everything:
///
/// | predictions | results | branches | meaning |
/// |---|---|---|---|
/// | empty | empty | empty | no continuation can help |
/// | empty | non-empty | empty | complete; more input only backtracks |
/// | non-empty | empty | non-empty | a prefix of one or more matches |
/// | non-empty | non-empty | non-empty | matches as-is *and* can be extended |
pub struct PartialResult<P, K, S, A, E> {
    /// Token sequences that could legally continue the query.
    pub predictions: ShapeTree<K>,
    /// Outcomes the input already produces.
    pub results: Vec<Outcome<K, S, A, E>>,
    /// Unexplored tries waiting for more input, with the states they were
    /// reached in.
    pub branches: Vec<(
        PatternTree<P, K, S, A, E>,
        PatternTree<P, K, S, A, E>,
        QueryState<K, S>,
    )>,
}

impl<P, K: Ord + Clone, S, A, E> PartialResult<P, K, S, A, E> {
    pub fn empty() -> Self {
        Self {
            predictions: ShapeTree::new(),
            results: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// No results and no way forward.
    pub fn is_dead_end(&self) -> bool {
        self.predictions.is_empty() && self.results.is_empty() && self.branches.is_empty()
    }

    /// The query already produced outcomes and nothing would extend it.
    pub fn is_complete(&self) -> bool {
        !self.results.is_empty() && self.predictions.is_empty() && self.branches.is_empty()
    }

    /// More input could still lead somewhere.
    pub fn can_extend(&self) -> bool {
        !self.predictions.is_empty()
    }

    pub(crate) fn merge(&mut self, other: Self) {
        let predictions = std::mem::take(&mut self.predictions);
        self.predictions = predictions.union(other.predictions);
        self.results.extend(other.results);
        self.branches.extend(other.branches);
    }
}

/// A predictive evaluator: evaluates rules like the plain query functions
/// while input lasts, and when the input runs out inside a trie, asks the
/// caller's predictor to synthesize the token sequences each remaining
/// pattern path would accept.
///
/// `depth_limit` bounds how far the enumeration unfolds recursive rules
/// once the input is exhausted; evaluation with input in hand is bounded
/// by the input itself.
pub struct PartialQuery<'q, P, K> {
    matcher: &'q dyn Fn(&P, &K) -> Similarity,
    predictor: &'q dyn Fn(&[P]) -> Vec<Vec<K>>,
    depth_limit: usize,
}

impl<'q, P, K> PartialQuery<'q, P, K>
where
    P: Ord + Clone + 'static,
    K: Ord + Clone + 'static,
{
    pub fn new(
        matcher: &'q dyn Fn(&P, &K) -> Similarity,
        predictor: &'q dyn Fn(&[P]) -> Vec<Vec<K>>,
        depth_limit: usize,
    ) -> Self {
        Self {
            matcher,
            predictor,
            depth_limit,
        }
    }

    /// Evaluate `rule` against an incomplete input.
    pub fn run<S, A, E>(
        &self,
        rule: &Rule<P, K, S, A, E>,
        user: S,
        input: Vec<K>,
    ) -> PartialResult<P, K, S, A, E>
    where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        self.eval(rule, &QueryState::new(user, input), self.depth_limit)
    }

    /// Continue a previous partial evaluation with more input. Composes:
    /// resuming with `a` and then `b` is the same as running over the
    /// concatenated input.
    pub fn resume<S, A, E>(
        &self,
        partial: PartialResult<P, K, S, A, E>,
        more: Vec<K>,
    ) -> PartialResult<P, K, S, A, E>
    where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        let mut out = PartialResult::empty();
        // completed outcomes carry over; their input arrays grow so they
        // line up with a fresh run over the full input
        out.results = partial
            .results
            .into_iter()
            .map(|(outcome, mut state)| {
                state.extend_input(&more);
                (outcome, state)
            })
            .collect();
        for (depth_first, breadth_first, mut state) in partial.branches {
            state.extend_input(&more);
            let sub = self.eval_tree(&depth_first, &breadth_first, &state, self.depth_limit);
            out.merge(sub);
        }
        out
    }

    /// The flattened prediction paths for a query.
    pub fn guesses<S, A, E>(
        &self,
        rule: &Rule<P, K, S, A, E>,
        user: S,
        input: Vec<K>,
    ) -> Vec<Vec<K>>
    where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        self.run(rule, user, input).predictions.paths()
    }

    /// Treat the final token of `query` as still being typed: run the
    /// partial query on the prefix and keep only the predictions whose
    /// first token the caller's `starts_with(in_progress, predicted)`
    /// accepts.
    pub fn guess_trailing<S, A, E>(
        &self,
        rule: &Rule<P, K, S, A, E>,
        user: S,
        mut query: Vec<K>,
        starts_with: &dyn Fn(&K, &K) -> bool,
    ) -> Vec<Vec<K>>
    where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        let in_progress = match query.pop() {
            Some(token) => token,
            None => return self.guesses(rule, user, query),
        };
        self.run(rule, user, query)
            .predictions
            .paths()
            .into_iter()
            .filter(|path| {
                path.first()
                    .map_or(false, |token| starts_with(&in_progress, token))
            })
            .collect()
    }

    fn eval<S, A, E>(
        &self,
        rule: &Rule<P, K, S, A, E>,
        state: &QueryState<K, S>,
        depth: usize,
    ) -> PartialResult<P, K, S, A, E>
    where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        match rule {
            Rule::Empty => PartialResult::empty(),
            Rule::Return(value) => {
                let mut out = PartialResult::empty();
                out.results
                    .push((crate::PValue::Ok(value.clone()), state.clone()));
                out
            }
            Rule::Throw(err) => {
                let mut out = PartialResult::empty();
                out.results
                    .push((crate::PValue::Fail(err.clone()), state.clone()));
                out
            }
            Rule::Lift(thunk) => {
                if state.exhausted() {
                    if depth == 0 {
                        return PartialResult::empty();
                    }
                    self.eval(&thunk(), state, depth - 1)
                } else {
                    self.eval(&thunk(), state, depth)
                }
            }
            Rule::State(f) => {
                let mut out = PartialResult::empty();
                for (node, state) in f(state) {
                    out.merge(self.eval(&node, &state, depth));
                }
                out
            }
            Rule::Choice(left, right) => {
                let mut out = self.eval(left, state, depth);
                out.merge(self.eval(right, state, depth));
                out
            }
            Rule::Op(op, child) => self.eval_op(op, child, state, depth),
            Rule::Tree(depth_first, breadth_first) => {
                self.eval_tree(depth_first, breadth_first, state, depth)
            }
        }
    }

    fn eval_op<S, A, E>(
        &self,
        op: &RuleOp<K, S>,
        child: &Rule<P, K, S, A, E>,
        state: &QueryState<K, S>,
        depth: usize,
    ) -> PartialResult<P, K, S, A, E>
    where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        match op {
            RuleOp::ResetWeight => {
                let entry_weight = state.weight;
                let mut out = self.eval(child, state, depth);
                for (_, state) in &mut out.results {
                    state.weight = entry_weight;
                }
                out
            }
            RuleOp::BestMatch(count) => {
                // ranking applies to what is finished; unexplored branches
                // pass through to be ranked after resumption
                let mut out = self.eval(child, state, depth);
                let (mut successes, failures): (Vec<_>, Vec<_>) = out
                    .results
                    .drain(..)
                    .partition(|(outcome, _)| outcome.is_ok());
                if successes.is_empty() {
                    out.results = failures;
                } else {
                    successes.sort_by(|a, b| b.1.weight.cmp(&a.1.weight));
                    if *count > 0 {
                        successes.truncate(*count as usize);
                    }
                    out.results = successes;
                }
                out
            }
            RuleOp::Prune(filter) => {
                let mut out = self.eval(child, state, depth);
                out.results.retain(|(_, state)| filter(state));
                out.branches.retain(|(_, _, state)| filter(state));
                out
            }
        }
    }

    pub(crate) fn eval_tree<S, A, E>(
        &self,
        depth_first: &PatternTree<P, K, S, A, E>,
        breadth_first: &PatternTree<P, K, S, A, E>,
        state: &QueryState<K, S>,
        depth: usize,
    ) -> PartialResult<P, K, S, A, E>
    where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        let mut out = PartialResult::empty();
        self.eval_node(
            depth_first,
            state,
            Vec::new(),
            depth,
            Traversal::DepthFirst,
            &mut out,
        );
        self.eval_node(
            breadth_first,
            state,
            Vec::new(),
            depth,
            Traversal::BreadthFirst,
            &mut out,
        );
        out
    }

    fn eval_node<S, A, E>(
        &self,
        node: &PatternTree<P, K, S, A, E>,
        state: &QueryState<K, S>,
        taken: Vec<K>,
        depth: usize,
        traversal: Traversal,
        out: &mut PartialResult<P, K, S, A, E>,
    ) where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        if traversal == Traversal::BreadthFirst {
            self.eval_node_leaf(node, state, &taken, depth, out);
        }
        match state.peek().cloned() {
            Some(token) => {
                for (subtree, factor) in select(&node.branches, &token, self.matcher) {
                    let advanced = state.advanced(factor);
                    let mut taken = taken.clone();
                    taken.push(token.clone());
                    self.eval_node(subtree, &advanced, taken, depth, traversal, out);
                }
            }
            None => {
                if !node.branches.is_empty() {
                    for (pattern, subtree) in &node.branches {
                        let mut paths = Vec::new();
                        collect_paths(vec![pattern.clone()], subtree, depth, &mut paths);
                        for path in paths {
                            for sequence in (self.predictor)(&path) {
                                out.predictions.insert_path(&sequence);
                            }
                        }
                    }
                    let remnant = PatternTree {
                        leaf: None,
                        branches: node.branches.clone(),
                    }
                    .with_prefix(taken.clone());
                    out.branches.push(match traversal {
                        Traversal::DepthFirst => (remnant, PatternTree::new(), state.clone()),
                        Traversal::BreadthFirst => (PatternTree::new(), remnant, state.clone()),
                    });
                }
            }
        }
        if traversal == Traversal::DepthFirst {
            self.eval_node_leaf(node, state, &taken, depth, out);
        }
    }

    fn eval_node_leaf<S, A, E>(
        &self,
        node: &PatternTree<P, K, S, A, E>,
        state: &QueryState<K, S>,
        taken: &[K],
        depth: usize,
        out: &mut PartialResult<P, K, S, A, E>,
    ) where
        S: Clone + 'static,
        A: Clone + 'static,
        E: Clone + 'static,
    {
        if let Some(leaf) = &node.leaf {
            let sub = self.eval(&leaf(taken.to_vec()), state, depth);
            out.merge(sub);
        }
    }
}

/// Every pattern path from here to a leaf, cut off at the depth limit.
fn collect_paths<P, K, S, A, E>(
    prefix: Vec<P>,
    node: &PatternTree<P, K, S, A, E>,
    depth: usize,
    out: &mut Vec<Vec<P>>,
) where
    P: Clone,
{
    if node.leaf.is_some() {
        out.push(prefix.clone());
    }
    if depth > 0 {
        for (pattern, child) in &node.branches {
            let mut next = prefix.clone();
            next.push(pattern.clone());
            collect_paths(next, child, depth - 1, out);
        }
    }
}
