use super::{Leaf, PatternTree, Rule, ShapeTree};
use ptree::TreeItem;
use std::borrow::Cow;
use std::fmt::Debug;
use std::rc::Rc;

pub(crate) fn combine_leaves<P, K, S, A, E>(
    first: Option<Leaf<P, K, S, A, E>>,
    second: Option<Leaf<P, K, S, A, E>>,
) -> Option<Leaf<P, K, S, A, E>>
where
    K: Clone + 'static,
    P: 'static,
    S: 'static,
    A: 'static,
    E: 'static,
{
    match (first, second) {
        (Some(one), Some(two)) => Some(Rc::new(move |tokens: Vec<K>| {
            Rule::Choice(Box::new(one(tokens.clone())), Box::new(two(tokens)))
        })),
        (one, two) => one.or(two),
    }
}

/// Sequence two leaves across a graft point: the first receives the
/// tokens matched before the split, the second the tokens after it.
fn sequence_leaves<P, K, S, A, E, B>(
    first: Leaf<P, K, S, A, E>,
    second: Leaf<P, K, S, B, E>,
    split: usize,
) -> Leaf<P, K, S, B, E>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    B: Clone + 'static,
    E: Clone + 'static,
{
    Rc::new(move |tokens: Vec<K>| {
        let cut = split.min(tokens.len());
        let back = tokens[cut..].to_vec();
        let front = tokens[..cut].to_vec();
        let second = second.clone();
        first(front).bind(Rc::new(move |_| second(back.clone())))
    })
}

fn union_branches<P, K, S, A, E>(
    left: Vec<(P, PatternTree<P, K, S, A, E>)>,
    right: Vec<(P, PatternTree<P, K, S, A, E>)>,
) -> Vec<(P, PatternTree<P, K, S, A, E>)>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: 'static,
    A: 'static,
    E: 'static,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut l = left.into_iter().peekable();
    let mut r = right.into_iter().peekable();
    loop {
        match (l.peek(), r.peek()) {
            (Some((lk, _)), Some((rk, _))) => match lk.cmp(rk) {
                std::cmp::Ordering::Less => merged.push(l.next().unwrap()),
                std::cmp::Ordering::Greater => merged.push(r.next().unwrap()),
                std::cmp::Ordering::Equal => {
                    let (key, left_child) = l.next().unwrap();
                    let (_, right_child) = r.next().unwrap();
                    merged.push((key, left_child.union(right_child)));
                }
            },
            (Some(_), None) => {
                merged.extend(l);
                break;
            }
            (None, Some(_)) => {
                merged.extend(r);
                break;
            }
            (None, None) => break,
        }
    }
    merged
}

impl<P, K, S, A, E> PatternTree<P, K, S, A, E>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: 'static,
    A: 'static,
    E: 'static,
{
    pub fn new() -> Self {
        Self {
            leaf: None,
            branches: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leaf.is_none() && self.branches.is_empty()
    }

    pub fn branches(&self) -> &[(P, PatternTree<P, K, S, A, E>)] {
        &self.branches
    }

    /// Register a pattern path; a path already present combines both
    /// leaves as alternatives.
    pub fn insert(&mut self, path: &[P], leaf: Leaf<P, K, S, A, E>) {
        match path.split_first() {
            None => {
                self.leaf = combine_leaves(self.leaf.take(), Some(leaf));
            }
            Some((head, rest)) => match self.branches.binary_search_by(|(p, _)| p.cmp(head)) {
                Ok(index) => self.branches[index].1.insert(rest, leaf),
                Err(index) => {
                    let mut child = PatternTree::new();
                    child.insert(rest, leaf);
                    self.branches.insert(index, (head.clone(), child));
                }
            },
        }
    }

    /// Keyed union of two tries; colliding complete paths keep both
    /// leaves as alternatives, in operand order.
    pub fn union(self, other: Self) -> Self {
        PatternTree {
            leaf: combine_leaves(self.leaf, other.leaf),
            branches: union_branches(self.branches, other.branches),
        }
    }

    /// Rebuild the trie with every leaf transformed.
    pub(crate) fn transform_leaves<B: 'static>(
        &self,
        f: &dyn Fn(Leaf<P, K, S, A, E>) -> Leaf<P, K, S, B, E>,
    ) -> PatternTree<P, K, S, B, E> {
        PatternTree {
            leaf: self.leaf.clone().map(f),
            branches: self
                .branches
                .iter()
                .map(|(p, child)| (p.clone(), child.transform_leaves(f)))
                .collect(),
        }
    }

    /// Bake a token prefix into every leaf, so a trie saved mid-match can
    /// be resumed with fresh input and still hand its leaves the full
    /// token path.
    pub(crate) fn with_prefix(&self, prefix: Vec<K>) -> Self {
        self.transform_leaves(&move |leaf: Leaf<P, K, S, A, E>| {
            let prefix = prefix.clone();
            let wrapped: Leaf<P, K, S, A, E> = Rc::new(move |tokens: Vec<K>| {
                let mut full = prefix.clone();
                full.extend(tokens);
                leaf(full)
            });
            wrapped
        })
    }

    /// The branching structure with the leaves erased.
    pub fn shape(&self) -> ShapeTree<P> {
        ShapeTree {
            terminal: self.leaf.is_some(),
            children: self
                .branches
                .iter()
                .map(|(p, child)| (p.clone(), child.shape()))
                .collect(),
        }
    }

    /// Delete the paths that appear in `shape` (set difference).
    pub fn trim(&self, shape: &ShapeTree<P>) -> Self {
        let leaf = if shape.terminal {
            None
        } else {
            self.leaf.clone()
        };
        let mut branches = Vec::new();
        for (p, child) in &self.branches {
            match shape.children.binary_search_by(|(sp, _)| sp.cmp(p)) {
                Ok(index) => {
                    let trimmed = child.trim(&shape.children[index].1);
                    if !trimmed.is_empty() {
                        branches.push((p.clone(), trimmed));
                    }
                }
                Err(_) => branches.push((p.clone(), child.clone())),
            }
        }
        PatternTree { leaf, branches }
    }

    /// Delete the paths *not* in `shape` (set intersection).
    pub fn mask(&self, shape: &ShapeTree<P>) -> Self {
        let leaf = if shape.terminal {
            self.leaf.clone()
        } else {
            None
        };
        let mut branches = Vec::new();
        for (p, child) in &self.branches {
            if let Ok(index) = shape.children.binary_search_by(|(sp, _)| sp.cmp(p)) {
                let masked = child.mask(&shape.children[index].1);
                if !masked.is_empty() {
                    branches.push((p.clone(), masked));
                }
            }
        }
        PatternTree { leaf, branches }
    }
}

impl<P, K, S, A, E> PatternTree<P, K, S, A, E>
where
    P: Ord + Clone + 'static,
    K: Clone + 'static,
    S: Clone + 'static,
    A: Clone + 'static,
    E: Clone + 'static,
{
    pub(crate) fn bind_leaves<B: Clone + 'static>(
        &self,
        f: Rc<dyn Fn(A) -> Rule<P, K, S, B, E>>,
    ) -> PatternTree<P, K, S, B, E> {
        self.transform_leaves(&move |leaf: Leaf<P, K, S, A, E>| {
            let f = f.clone();
            let bound: Leaf<P, K, S, B, E> =
                Rc::new(move |tokens: Vec<K>| leaf(tokens).bind(f.clone()));
            bound
        })
    }

    /// The Cartesian product with sequential bind: every complete path of
    /// `self` continues into the whole of `next`, with the leaves split at
    /// the graft depth. `depth` is the number of tokens consumed from the
    /// fused root down to this node.
    pub(crate) fn graft<B: Clone + 'static>(
        &self,
        next: &PatternTree<P, K, S, B, E>,
        depth: usize,
    ) -> PatternTree<P, K, S, B, E> {
        let continued: Vec<(P, PatternTree<P, K, S, B, E>)> = self
            .branches
            .iter()
            .map(|(p, child)| (p.clone(), child.graft(next, depth + 1)))
            .collect();
        match &self.leaf {
            Some(first) => {
                let first = first.clone();
                let mut sequenced = next
                    .transform_leaves(&move |second| sequence_leaves(first.clone(), second, depth));
                sequenced.branches = union_branches(continued, sequenced.branches);
                sequenced
            }
            None => PatternTree {
                leaf: None,
                branches: continued,
            },
        }
    }
}

impl<P: Ord + Clone> ShapeTree<P> {
    pub fn new() -> Self {
        Self {
            terminal: false,
            children: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.terminal && self.children.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn children(&self) -> &[(P, ShapeTree<P>)] {
        &self.children
    }

    pub fn insert_path(&mut self, path: &[P]) {
        match path.split_first() {
            None => self.terminal = true,
            Some((head, rest)) => match self.children.binary_search_by(|(p, _)| p.cmp(head)) {
                Ok(index) => self.children[index].1.insert_path(rest),
                Err(index) => {
                    let mut child = ShapeTree::new();
                    child.insert_path(rest);
                    self.children.insert(index, (head.clone(), child));
                }
            },
        }
    }

    pub fn union(mut self, other: Self) -> Self {
        self.terminal |= other.terminal;
        for (key, child) in other.children {
            match self.children.binary_search_by(|(p, _)| p.cmp(&key)) {
                Ok(index) => {
                    let existing = std::mem::replace(&mut self.children[index].1, ShapeTree::new());
                    self.children[index].1 = existing.union(child);
                }
                Err(index) => self.children.insert(index, (key, child)),
            }
        }
        self
    }

    pub fn contains_path(&self, path: &[P]) -> bool {
        match path.split_first() {
            None => self.terminal,
            Some((head, rest)) => self
                .children
                .binary_search_by(|(p, _)| p.cmp(head))
                .map_or(false, |index| self.children[index].1.contains_path(rest)),
        }
    }

    /// Every complete path, in branch order.
    pub fn paths(&self) -> Vec<Vec<P>> {
        let mut collected = Vec::new();
        self.walk(&mut Vec::new(), &mut collected);
        collected
    }

    fn walk(&self, prefix: &mut Vec<P>, collected: &mut Vec<Vec<P>>) {
        if self.terminal {
            collected.push(prefix.clone());
        }
        for (key, child) in &self.children {
            prefix.push(key.clone());
            child.walk(prefix, collected);
            prefix.pop();
        }
    }
}

impl<P: Ord + Clone> Default for ShapeTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
struct ShapeBranch<P> {
    key: Option<P>,
    tree: ShapeTree<P>,
}

impl<P: Debug + Clone> TreeItem for ShapeBranch<P> {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match &self.key {
            Some(key) => {
                write!(f, "{:?}", key)?;
                if self.tree.terminal && !self.tree.children.is_empty() {
                    write!(f, " (end)")?;
                }
                Ok(())
            }
            None => write!(f, "*"),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::Owned(
            self.tree
                .children
                .iter()
                .map(|(key, child)| ShapeBranch {
                    key: Some(key.clone()),
                    tree: child.clone(),
                })
                .collect(),
        )
    }
}

impl<P: Debug + Clone> ShapeTree<P> {
    /// Render the tree to standard output; handy when exploring what a
    /// partial query predicts.
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(&ShapeBranch {
            key: None,
            tree: self.clone(),
        })
    }
}
