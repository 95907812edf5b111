use super::{Leaf, PatternTree, QueryState, Rule, RuleError, RuleOp, ShapeTree};
use std::rc::Rc;

impl<P, K, S, A, E> Rule<P, K, S, A, E>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    /// A rule with no outcomes at all.
    pub fn empty() -> Self {
        Rule::Empty
    }

    /// A rule with a single successful outcome.
    pub fn value(value: A) -> Self {
        Rule::Return(value)
    }

    /// A rule that fails hard with a message.
    pub fn fail(message: &str) -> Self {
        Rule::Throw(RuleError::Fail(message.to_string()))
    }

    /// A rule that fails hard with a caller error.
    pub fn throw(err: E) -> Self {
        Rule::Throw(RuleError::Error(err))
    }

    /// Defer construction until evaluation reaches this node; the
    /// recursion point for self-referential rules.
    pub fn lift<F: Fn() -> Self + 'static>(f: F) -> Self {
        Rule::Lift(Rc::new(f))
    }

    /// Branch on (and rewrite) the query state: every pair the function
    /// produces is evaluated independently.
    pub fn with_state<F>(f: F) -> Self
    where
        F: Fn(&QueryState<K, S>) -> Vec<(Self, QueryState<K, S>)> + 'static,
    {
        Rule::State(Rc::new(f))
    }

    /// Build a rule whose trie matches any of the given pattern paths,
    /// invoking `leaf` with the tokens that matched. The paths land in the
    /// depth-first map; see [from_edges_breadth](Rule::from_edges_breadth)
    /// for the other traversal.
    pub fn from_edges<F>(paths: Vec<Vec<P>>, leaf: F) -> Self
    where
        F: Fn(Vec<K>) -> Self + 'static,
    {
        let leaf: Leaf<P, K, S, A, E> = Rc::new(leaf);
        let mut tree = PatternTree::new();
        for path in paths {
            tree.insert(&path, leaf.clone());
        }
        Rule::Tree(tree, PatternTree::new())
    }

    pub fn from_edges_breadth<F>(paths: Vec<Vec<P>>, leaf: F) -> Self
    where
        F: Fn(Vec<K>) -> Self + 'static,
    {
        let leaf: Leaf<P, K, S, A, E> = Rc::new(leaf);
        let mut tree = PatternTree::new();
        for path in paths {
            tree.insert(&path, leaf.clone());
        }
        Rule::Tree(PatternTree::new(), tree)
    }

    /// Wrap a pair of already-built tries.
    pub fn from_tree(
        depth_first: PatternTree<P, K, S, A, E>,
        breadth_first: PatternTree<P, K, S, A, E>,
    ) -> Self {
        Rule::Tree(depth_first, breadth_first)
    }

    /// Alternation. Two trie rules fuse into one by keyed union — the
    /// branch-compilation that keeps wide rule alternations cheap; other
    /// pairings stay a [Choice](Rule::Choice) evaluated in order.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Rule::Empty, rule) | (rule, Rule::Empty) => rule,
            (Rule::Tree(df1, bf1), Rule::Tree(df2, bf2)) => {
                Rule::Tree(df1.union(df2), bf1.union(bf2))
            }
            (left, right) => Rule::Choice(Box::new(left), Box::new(right)),
        }
    }

    /// Monadic sequencing; distributes through every node, including the
    /// leaves of tries.
    pub fn and_then<B, F>(self, f: F) -> Rule<P, K, S, B, E>
    where
        B: Clone + 'static,
        F: Fn(A) -> Rule<P, K, S, B, E> + 'static,
    {
        self.bind(Rc::new(f))
    }

    pub(crate) fn bind<B: Clone + 'static>(
        self,
        f: Rc<dyn Fn(A) -> Rule<P, K, S, B, E>>,
    ) -> Rule<P, K, S, B, E> {
        match self {
            Rule::Empty => Rule::Empty,
            Rule::Return(value) => f(value),
            Rule::Throw(err) => Rule::Throw(err),
            Rule::Lift(thunk) => Rule::Lift(Rc::new(move || thunk().bind(f.clone()))),
            Rule::State(g) => Rule::State(Rc::new(move |state| {
                g(state)
                    .into_iter()
                    .map(|(node, state)| (node.bind(f.clone()), state))
                    .collect()
            })),
            Rule::Op(op, child) => Rule::Op(op, Box::new(child.bind(f))),
            Rule::Choice(left, right) => {
                Rule::Choice(Box::new(left.bind(f.clone())), Box::new(right.bind(f)))
            }
            Rule::Tree(depth_first, breadth_first) => Rule::Tree(
                depth_first.bind_leaves(f.clone()),
                breadth_first.bind_leaves(f),
            ),
        }
    }

    pub fn map<B, F>(self, f: F) -> Rule<P, K, S, B, E>
    where
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        self.and_then(move |value| Rule::Return(f(value)))
    }

    /// Sequencing that keeps the second result. Two trie rules fuse into a
    /// deeper trie — the second grafted under the first's leaves — which
    /// is what makes long `a >> b >> c` pattern chains predictable without
    /// evaluating them.
    pub fn then<B: Clone + 'static>(self, next: Rule<P, K, S, B, E>) -> Rule<P, K, S, B, E> {
        match (self, next) {
            (Rule::Tree(df1, bf1), Rule::Tree(df2, bf2)) => {
                Rule::Tree(df1.graft(&df2, 0), bf1.graft(&bf2, 0))
            }
            (rule, next) => rule.bind(Rc::new(move |_| next.clone())),
        }
    }

    /// Evaluate the child, then restore the entry weight in every outcome.
    pub fn reset_weight(self) -> Self {
        Rule::Op(RuleOp::ResetWeight, Box::new(self))
    }

    /// Keep only the `count` highest-weighted successes of the child (all
    /// of them when `count <= 0`); failures surface only when there are no
    /// successes at all.
    pub fn best_match(self, count: i64) -> Self {
        Rule::Op(RuleOp::BestMatch(count), Box::new(self))
    }

    /// Keep only the outcomes whose query state passes the filter.
    pub fn prune<F>(self, filter: F) -> Self
    where
        F: Fn(&QueryState<K, S>) -> bool + 'static,
    {
        Rule::Op(RuleOp::Prune(Rc::new(filter)), Box::new(self))
    }

    /// The branching structure of the rule's tries, leaves erased:
    /// choices union, meta-operations are transparent, deferred nodes are
    /// forced one step. Meant for trie-built rules.
    pub fn shape(&self) -> ShapeTree<P> {
        match self {
            Rule::Tree(depth_first, breadth_first) => {
                depth_first.shape().union(breadth_first.shape())
            }
            Rule::Choice(left, right) => left.shape().union(right.shape()),
            Rule::Op(_, child) => child.shape(),
            Rule::Lift(thunk) => thunk().shape(),
            _ => ShapeTree::new(),
        }
    }

    /// Delete the trie paths that appear in `shape`.
    pub fn trim(self, shape: &ShapeTree<P>) -> Self {
        match self {
            Rule::Tree(depth_first, breadth_first) => {
                let depth_first = depth_first.trim(shape);
                let breadth_first = breadth_first.trim(shape);
                if depth_first.is_empty() && breadth_first.is_empty() {
                    Rule::Empty
                } else {
                    Rule::Tree(depth_first, breadth_first)
                }
            }
            Rule::Choice(left, right) => left.trim(shape).or(right.trim(shape)),
            Rule::Op(op, child) => Rule::Op(op, Box::new(child.trim(shape))),
            other => other,
        }
    }

    /// Delete the trie paths *not* in `shape`.
    /// `trim(s, r) <|> mask(s, r)` restores `r` for trie-built rules.
    pub fn mask(self, shape: &ShapeTree<P>) -> Self {
        match self {
            Rule::Tree(depth_first, breadth_first) => {
                let depth_first = depth_first.mask(shape);
                let breadth_first = breadth_first.mask(shape);
                if depth_first.is_empty() && breadth_first.is_empty() {
                    Rule::Empty
                } else {
                    Rule::Tree(depth_first, breadth_first)
                }
            }
            Rule::Choice(left, right) => left.mask(shape).or(right.mask(shape)),
            Rule::Op(op, child) => Rule::Op(op, Box::new(child.mask(shape))),
            other => other,
        }
    }
}

impl<P, K, S, E> Rule<P, K, S, K, E>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    E: Clone + 'static,
{
    /// Consume and produce one token; no outcomes when the input is
    /// exhausted.
    pub fn next() -> Self {
        Rule::with_state(|state: &QueryState<K, S>| match state.peek() {
            Some(token) => {
                let token = token.clone();
                let mut advanced = state.clone();
                advanced.index += 1;
                vec![(Rule::Return(token), advanced)]
            }
            None => Vec::new(),
        })
    }
}

impl<P, K, S, E> Rule<P, K, S, Vec<K>, E>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    E: Clone + 'static,
{
    /// Nondeterministically consume a prefix of the remaining input — one
    /// outcome per possible length, shortest first — producing the tokens
    /// consumed.
    pub fn part() -> Self {
        Rule::with_state(|state| {
            let remaining = state.remaining().to_vec();
            (0..=remaining.len())
                .map(|count| {
                    let mut advanced = state.clone();
                    advanced.index += count;
                    (Rule::Return(remaining[..count].to_vec()), advanced)
                })
                .collect()
        })
    }

    /// Consume and produce everything left.
    pub fn remainder() -> Self {
        Rule::with_state(|state| {
            let rest = state.remaining().to_vec();
            let mut advanced = state.clone();
            advanced.index = advanced.input.len();
            vec![(Rule::Return(rest), advanced)]
        })
    }
}

impl<P, K, S, E> Rule<P, K, S, (), E>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    E: Clone + 'static,
{
    /// Succeed only when the whole input has been consumed.
    pub fn done() -> Self {
        Rule::with_state(|state| {
            if state.exhausted() {
                vec![(Rule::Return(()), state.clone())]
            } else {
                Vec::new()
            }
        })
    }
}
