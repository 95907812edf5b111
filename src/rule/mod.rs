//! A production-rule engine over token sequences.
//!
//! A [Rule] is a first-class tree: its interesting nodes are *pattern
//! tries* — branch maps keyed by caller-supplied pattern atoms — and the
//! engine evaluates a rule against an input sequence by dispatching each
//! token through the trie with a caller-supplied similarity measure.
//! Exact matches always mask merely-similar ones, so a grammar can keep a
//! literal branch and a fuzzy fallback at the same position and the
//! literal wins whenever it applies.
//!
//! Because the rule is plain data, it can be transformed without being
//! evaluated: [or](Rule::or) fuses two tries by keyed union,
//! [then](Rule::then) fuses them by grafting one under the other's leaves,
//! and [shape](Rule::shape) / [trim](Rule::trim) / [mask](Rule::mask)
//! manipulate the branch structure wholesale. Evaluation comes in two
//! modes: [query_all](crate::rule::query_all) and friends interpret the
//! rule as a list of weighted outcomes, and [PartialQuery] evaluates an
//! *incomplete* input, reporting what it already produces and which token
//! sequences could legally extend it.
//!
//! # Example
//!
//! ```
//! use lang_pk::rule::{query, Rule, Similarity};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
//! enum Cmd {
//!     Show,
//!     Status,
//! }
//!
//! let rule: Rule<Cmd, Cmd, (), Vec<Cmd>, String> =
//!     Rule::from_edges(vec![vec![Cmd::Show, Cmd::Status]], Rule::value);
//!
//! let exact = |pattern: &Cmd, token: &Cmd| {
//!     if pattern == token {
//!         Similarity::ExactlyEqual
//!     } else {
//!         Similarity::Dissimilar
//!     }
//! };
//!
//! let hits = query(&rule, &exact, (), vec![Cmd::Show, Cmd::Status]);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].0, vec![Cmd::Show, Cmd::Status]);
//! ```

mod build;
mod eval;
mod partial;
mod similarity;
mod tree;

#[cfg(test)]
mod __tests__;

pub use eval::{query, query_all, query_first};

use crate::PValue;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
/// How close a pattern atom came to a token, as judged by the caller's
/// match function: `Dissimilar < Similar(x) < ExactlyEqual`.
///
/// [combine](Similarity::combine) multiplies the payloads, with
/// `Dissimilar` absorbing and `ExactlyEqual` as the identity, so a chain
/// of fuzzy matches accumulates into one score.
pub enum Similarity {
    Dissimilar,
    Similar(f64),
    ExactlyEqual,
}

#[derive(Debug, Clone, Copy)]
/// The fuzzy score a query accumulates while matching; competing results
/// are ranked by it. Starts at full certainty and only decays.
pub struct Certainty(pub f64);

/// The state threaded through a rule evaluation: opaque caller state, the
/// accumulated weight, and a read position into the shared input sequence.
///
/// Branching clones the state, so mutations on one evaluation path are
/// invisible to its siblings.
pub struct QueryState<K, S> {
    pub user: S,
    pub weight: Certainty,
    pub index: usize,
    pub input: Rc<Vec<K>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A rule-evaluation failure: either a plain message or a caller error.
pub enum RuleError<E> {
    Fail(String),
    Error(E),
}

impl<E: Display> Display for RuleError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleError::Fail(message) => write!(f, "{}", message),
            RuleError::Error(err) => write!(f, "{}", err),
        }
    }
}

/// The function a pattern trie invokes when a path of patterns has been
/// matched: it receives the tokens consumed along the path and produces
/// the rule to continue with.
pub type Leaf<P, K, S, A, E> = Rc<dyn Fn(Vec<K>) -> Rule<P, K, S, A, E>>;

/// One node of a pattern trie: an optional leaf for "a path ends here",
/// and subtrees keyed by the pattern atom that extends the path. Branches
/// are kept sorted and binary-searched.
pub struct PatternTree<P, K, S, A, E> {
    pub(crate) leaf: Option<Leaf<P, K, S, A, E>>,
    pub(crate) branches: Vec<(P, PatternTree<P, K, S, A, E>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The branching structure of a pattern trie with the leaves erased: which
/// paths exist, and which of them are complete. Also the shape predictions
/// are reported in, keyed by tokens instead of patterns.
pub struct ShapeTree<P> {
    pub(crate) terminal: bool,
    pub(crate) children: Vec<(P, ShapeTree<P>)>,
}

/// A meta-operation wrapped around a rule subtree.
pub enum RuleOp<K, S> {
    /// Restore the entry weight in every outcome of the child.
    ResetWeight,
    /// Keep only the highest-weighted successes of the child; a
    /// non-positive count keeps them all.
    BestMatch(i64),
    /// Keep only the outcomes whose query state passes the filter. State
    /// effects of pruned outcomes are discarded with them.
    Prune(Rc<dyn Fn(&QueryState<K, S>) -> bool>),
}

/// A production rule: a first-class, inspectable tree evaluated against a
/// token sequence. See the [module documentation](self).
pub enum Rule<P, K, S, A, E> {
    /// No outcomes at all; the identity of [or](Rule::or).
    Empty,
    /// A single successful outcome.
    Return(A),
    /// A single hard failure.
    Throw(RuleError<E>),
    /// A deferred node, forced when evaluation reaches it. The only place
    /// an external effect can run mid-evaluation, and the recursion point
    /// for self-referential rules.
    Lift(Rc<dyn Fn() -> Rule<P, K, S, A, E>>),
    /// Branch on (and rewrite) the query state.
    State(StateFn<P, K, S, A, E>),
    /// A meta-operation around a child.
    Op(RuleOp<K, S>, Box<Rule<P, K, S, A, E>>),
    /// Both alternatives, in order.
    Choice(Box<Rule<P, K, S, A, E>>, Box<Rule<P, K, S, A, E>>),
    /// A pair of pattern tries: the depth-first map (subtrees before their
    /// own leaf) and the breadth-first map (leaf before subtrees), always
    /// evaluated in that order.
    Tree(
        PatternTree<P, K, S, A, E>,
        PatternTree<P, K, S, A, E>,
    ),
}

pub type StateFn<P, K, S, A, E> =
    Rc<dyn Fn(&QueryState<K, S>) -> Vec<(Rule<P, K, S, A, E>, QueryState<K, S>)>>;

pub use partial::{PartialQuery, PartialResult};

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Traversal {
    DepthFirst,
    BreadthFirst,
}

/// One weighted outcome of a rule evaluation.
pub type Outcome<K, S, A, E> = (PValue<A, RuleError<E>>, QueryState<K, S>);

impl<K, S> Clone for RuleOp<K, S> {
    fn clone(&self) -> Self {
        match self {
            RuleOp::ResetWeight => RuleOp::ResetWeight,
            RuleOp::BestMatch(count) => RuleOp::BestMatch(*count),
            RuleOp::Prune(filter) => RuleOp::Prune(filter.clone()),
        }
    }
}

impl<K, S> Debug for RuleOp<K, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleOp::ResetWeight => write!(f, "ResetWeight"),
            RuleOp::BestMatch(count) => write!(f, "BestMatch({})", count),
            RuleOp::Prune(_) => write!(f, "Prune(..)"),
        }
    }
}

impl<P: Clone, K, S, A: Clone, E: Clone> Clone for Rule<P, K, S, A, E> {
    fn clone(&self) -> Self {
        match self {
            Rule::Empty => Rule::Empty,
            Rule::Return(value) => Rule::Return(value.clone()),
            Rule::Throw(err) => Rule::Throw(err.clone()),
            Rule::Lift(thunk) => Rule::Lift(thunk.clone()),
            Rule::State(f) => Rule::State(f.clone()),
            Rule::Op(op, child) => Rule::Op(op.clone(), child.clone()),
            Rule::Choice(left, right) => Rule::Choice(left.clone(), right.clone()),
            Rule::Tree(depth_first, breadth_first) => {
                Rule::Tree(depth_first.clone(), breadth_first.clone())
            }
        }
    }
}

impl<P: Clone, K, S, A, E> Clone for PatternTree<P, K, S, A, E> {
    fn clone(&self) -> Self {
        Self {
            leaf: self.leaf.clone(),
            branches: self.branches.clone(),
        }
    }
}
