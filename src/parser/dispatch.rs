use super::{Parser, ParserKind, ParserState};
use crate::{ParseError, PValue};
use std::fmt::Debug;
use std::rc::Rc;

/// Sorted union of two dispatch tables; colliding keys combine their
/// branches with [Parser::or].
fn merge_keyed<K: Clone + Ord, S: 'static, T: Clone + Ord + Debug + 'static, A: 'static>(
    left: &[(K, Parser<S, T, A>)],
    right: &[(K, Parser<S, T, A>)],
) -> Vec<(K, Parser<S, T, A>)> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut l = left.iter().peekable();
    let mut r = right.iter().peekable();
    loop {
        match (l.peek(), r.peek()) {
            (Some((lk, lp)), Some((rk, rp))) => match lk.cmp(rk) {
                std::cmp::Ordering::Less => {
                    merged.push((lk.clone(), lp.clone()));
                    l.next();
                }
                std::cmp::Ordering::Greater => {
                    merged.push((rk.clone(), rp.clone()));
                    r.next();
                }
                std::cmp::Ordering::Equal => {
                    merged.push((lk.clone(), lp.or(rp)));
                    l.next();
                    r.next();
                }
            },
            (Some(_), None) => {
                merged.extend(l.map(|(k, p)| (k.clone(), p.clone())));
                break;
            }
            (None, Some(_)) => {
                merged.extend(r.map(|(k, p)| (k.clone(), p.clone())));
                break;
            }
            (None, None) => break,
        }
    }
    merged
}

impl<S, T: Clone + Ord + Debug, A> Parser<S, T, A> {
    /// Evaluate the parser against the state.
    ///
    /// Map shapes peek the next token and dispatch on its kind or text; a
    /// miss — including end of input — backtracks without consuming.
    pub fn run(&self, state: &mut ParserState<S, T>) -> PValue<A, ParseError<T>> {
        match &self.kind {
            ParserKind::Thunk(f) => f(state),
            ParserKind::KindMap(entries) => {
                let token = match state.peek() {
                    PValue::Ok(token) => token,
                    PValue::Backtrack => return PValue::Backtrack,
                    PValue::Fail(err) => return PValue::Fail(err),
                };
                match entries.binary_search_by(|(key, _)| key.cmp(&token.token.kind)) {
                    Ok(index) => entries[index].1.run(state),
                    Err(_) => PValue::Backtrack,
                }
            }
            ParserKind::TextMap(entries) => {
                let token = match state.peek() {
                    PValue::Ok(token) => token,
                    PValue::Backtrack => return PValue::Backtrack,
                    PValue::Fail(err) => return PValue::Fail(err),
                };
                if token.token.text.is_empty() {
                    return PValue::Backtrack;
                }
                match entries
                    .binary_search_by(|(key, _)| token.token.text.cmp_str(key).reverse())
                {
                    Ok(index) => entries[index].1.run(state),
                    Err(_) => PValue::Backtrack,
                }
            }
        }
    }
}

impl<S: 'static, T: Clone + Ord + Debug + 'static, A: 'static> Parser<S, T, A> {
    /// Alternation. Two kind tables or two text tables merge into one
    /// table; every other pairing composes as try-this-then-that. Either
    /// way, `Ok` and `Fail` from the first operand are final — only
    /// `Backtrack` reaches the second.
    pub fn or(&self, other: &Parser<S, T, A>) -> Parser<S, T, A> {
        let kind = match (&self.kind, &other.kind) {
            (ParserKind::KindMap(left), ParserKind::KindMap(right)) => {
                ParserKind::KindMap(Rc::new(merge_keyed(left, right)))
            }
            (ParserKind::TextMap(left), ParserKind::TextMap(right)) => {
                ParserKind::TextMap(Rc::new(merge_keyed(left, right)))
            }
            _ => {
                let first = self.clone();
                let second = other.clone();
                ParserKind::Thunk(Rc::new(move |state: &mut ParserState<S, T>| {
                    first.run(state).or_else(|| second.run(state))
                }))
            }
        };
        Parser { kind }
    }

    #[cfg(test)]
    pub(crate) fn table_width(&self) -> Option<usize> {
        match &self.kind {
            ParserKind::Thunk(_) => None,
            ParserKind::KindMap(entries) => Some(entries.len()),
            ParserKind::TextMap(entries) => Some(entries.len()),
        }
    }
}
