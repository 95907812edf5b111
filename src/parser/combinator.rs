use super::{Parser, ParserKind, ParserState};
use crate::{LocatedToken, ParseError, Position, PValue};
use std::fmt::Debug;
use std::rc::Rc;

impl<S: 'static, T: Clone + Ord + Debug + 'static, A: 'static> Parser<S, T, A> {
    /// A parser from a plain function over the state.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&mut ParserState<S, T>) -> PValue<A, ParseError<T>> + 'static,
    {
        Parser {
            kind: ParserKind::Thunk(Rc::new(f)),
        }
    }

    /// Defer construction until the parser runs; the recursion point for
    /// self-referential grammars.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Parser<S, T, A> + 'static,
    {
        Self::func(move |state| f().run(state))
    }

    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::func(move |_| PValue::Ok(value.clone()))
    }

    pub fn backtrack() -> Self {
        Self::func(|_| PValue::Backtrack)
    }

    pub fn fail(message: &str) -> Self {
        let message = message.to_string();
        Self::func(move |state| PValue::Fail(state.failure(message.clone())))
    }

    /// Monadic sequencing. Distributes into dispatch tables, so a compiled
    /// alternation stays compiled when something is parsed after it.
    pub fn and_then<B: 'static, F>(&self, f: F) -> Parser<S, T, B>
    where
        F: Fn(A) -> Parser<S, T, B> + 'static,
    {
        self.bind(Rc::new(f))
    }

    fn bind<B: 'static>(&self, f: Rc<dyn Fn(A) -> Parser<S, T, B>>) -> Parser<S, T, B> {
        let kind = match &self.kind {
            ParserKind::Thunk(g) => {
                let g = g.clone();
                ParserKind::Thunk(Rc::new(move |state: &mut ParserState<S, T>| {
                    g(state).and_then(|a| f(a).run(state))
                }))
            }
            ParserKind::KindMap(entries) => ParserKind::KindMap(Rc::new(
                entries
                    .iter()
                    .map(|(key, parser)| (key.clone(), parser.bind(f.clone())))
                    .collect(),
            )),
            ParserKind::TextMap(entries) => ParserKind::TextMap(Rc::new(
                entries
                    .iter()
                    .map(|(key, parser)| (key.clone(), parser.bind(f.clone())))
                    .collect(),
            )),
        };
        Parser { kind }
    }

    pub fn map<B: 'static, F>(&self, f: F) -> Parser<S, T, B>
    where
        F: Fn(A) -> B + 'static,
    {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<B: 'static>(&self, f: Rc<dyn Fn(A) -> B>) -> Parser<S, T, B> {
        let kind = match &self.kind {
            ParserKind::Thunk(g) => {
                let g = g.clone();
                ParserKind::Thunk(Rc::new(move |state: &mut ParserState<S, T>| {
                    g(state).map(|a| f(a))
                }))
            }
            ParserKind::KindMap(entries) => ParserKind::KindMap(Rc::new(
                entries
                    .iter()
                    .map(|(key, parser)| (key.clone(), parser.map_rc(f.clone())))
                    .collect(),
            )),
            ParserKind::TextMap(entries) => ParserKind::TextMap(Rc::new(
                entries
                    .iter()
                    .map(|(key, parser)| (key.clone(), parser.map_rc(f.clone())))
                    .collect(),
            )),
        };
        Parser { kind }
    }

    /// Sequence, keeping the second result.
    pub fn then<B: 'static>(&self, next: &Parser<S, T, B>) -> Parser<S, T, B> {
        let next = next.clone();
        self.bind(Rc::new(move |_| next.clone()))
    }

    pub fn ignore(&self) -> Parser<S, T, ()> {
        self.map(|_| ())
    }

    /// Convert a `Backtrack` from this parser into a hard failure
    /// `"expecting <what>"` at the current cursor. `Fail` passes through.
    pub fn expect(&self, what: &'static str) -> Self {
        let inner = self.clone();
        Self::func(move |state| match inner.run(state) {
            PValue::Backtrack => PValue::Fail(state.failure(format!("expecting {}", what))),
            other => other,
        })
    }

    /// Rewrite the start of any failure raised inside to the cursor at
    /// entry, so the diagnostic spans the whole construct being parsed.
    pub fn marker(&self) -> Self {
        let inner = self.clone();
        Self::func(move |state| {
            let entry = state.cursor();
            inner.run(state).map_fail(|mut err| {
                err.location = err.location.with_start(entry);
                err
            })
        })
    }

    pub fn optional(&self) -> Parser<S, T, Option<A>> {
        let inner = self.clone();
        Parser::func(move |state| match inner.run(state) {
            PValue::Ok(value) => PValue::Ok(Some(value)),
            PValue::Backtrack => PValue::Ok(None),
            PValue::Fail(err) => PValue::Fail(err),
        })
    }

    pub fn default_to(&self, value: A) -> Self
    where
        A: Clone,
    {
        self.optional()
            .map(move |parsed| parsed.unwrap_or_else(|| value.clone()))
    }

    /// Zero or more repetitions.
    pub fn many(&self) -> Parser<S, T, Vec<A>> {
        let inner = self.clone();
        Parser::func(move |state| {
            let mut collected = Vec::new();
            loop {
                match inner.run(state) {
                    PValue::Ok(value) => collected.push(value),
                    PValue::Backtrack => return PValue::Ok(collected),
                    PValue::Fail(err) => return PValue::Fail(err),
                }
            }
        })
    }

    /// One or more repetitions.
    pub fn some(&self) -> Parser<S, T, Vec<A>> {
        let inner = self.clone();
        Parser::func(move |state| {
            let mut collected = match inner.run(state) {
                PValue::Ok(value) => vec![value],
                PValue::Backtrack => return PValue::Backtrack,
                PValue::Fail(err) => return PValue::Fail(err),
            };
            loop {
                match inner.run(state) {
                    PValue::Ok(value) => collected.push(value),
                    PValue::Backtrack => return PValue::Ok(collected),
                    PValue::Fail(err) => return PValue::Fail(err),
                }
            }
        })
    }
}

impl<S: 'static, T: Clone + Ord + Debug + 'static> Parser<S, T, LocatedToken<T>> {
    /// Consume any one token.
    pub fn shift_any() -> Self {
        Self::func(|state| state.shift())
    }

    /// A single-entry kind table: dispatch on a token of kind `kind`, then
    /// consume and produce it.
    pub fn kind(kind: T) -> Self {
        Parser {
            kind: ParserKind::KindMap(Rc::new(vec![(kind, Self::shift_any())])),
        }
    }

    /// A single-entry text table: dispatch on a token whose text equals
    /// `text`, then consume and produce it.
    pub fn text(text: &str) -> Self {
        Parser {
            kind: ParserKind::TextMap(Rc::new(vec![(text.to_string(), Self::shift_any())])),
        }
    }

    /// The next token without consuming it.
    pub fn peek() -> Self {
        Self::func(|state| state.peek())
    }
}

impl<S: 'static, T: Clone + Ord + Debug + 'static> Parser<S, T, ()> {
    /// Succeed only when no tokens remain.
    pub fn eof() -> Self {
        Self::func(|state| {
            if state.at_end() {
                PValue::Ok(())
            } else {
                PValue::Backtrack
            }
        })
    }

    /// Apply a mutation to the caller state. Not rolled back on
    /// backtracking.
    pub fn update_state<F: Fn(&mut S) + 'static>(f: F) -> Self {
        Self::func(move |state| {
            f(state.user_mut());
            PValue::Ok(())
        })
    }
}

impl<S: Clone + 'static, T: Clone + Ord + Debug + 'static> Parser<S, T, S> {
    /// Produce a copy of the caller state.
    pub fn get_state() -> Self {
        Self::func(|state| PValue::Ok(state.user().clone()))
    }
}

impl<S: 'static, T: Clone + Ord + Debug + 'static> Parser<S, T, Position> {
    /// The current cursor position.
    pub fn cursor() -> Self {
        Self::func(|state| PValue::Ok(state.cursor()))
    }
}
